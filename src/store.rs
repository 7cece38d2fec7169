// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::aggregate::{self, CategoryFilter};
use crate::error::SpendError;
use crate::models::{
    BudgetLine, BudgetMap, CategoryTotal, DataIssue, Month, MonthlyTotal, RawTransaction,
    Transaction,
};

pub const CSV_HEADER: [&str; 7] = [
    "date",
    "store",
    "amount",
    "category",
    "subcategory",
    "split",
    "note",
];

/// A read-only view of the transaction table taken at one point in time.
///
/// Rows that failed to parse are kept aside in `issues` and never reach an
/// aggregation. Cloning shares the underlying rows.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    transactions: Arc<[Transaction]>,
    issues: Arc<[DataIssue]>,
}

impl Snapshot {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: transactions.into(),
            issues: Vec::new().into(),
        }
    }

    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (u64, RawTransaction)>,
    {
        let mut transactions = Vec::new();
        let mut issues = Vec::new();
        for (row, raw) in rows {
            match raw.parse() {
                Ok(t) => transactions.push(t),
                Err(issue) => {
                    warn!(row, %issue, "leaving transaction out of snapshot");
                    issues.push(DataIssue { row, issue });
                }
            }
        }
        debug!(
            transactions = transactions.len(),
            issues = issues.len(),
            "built transaction snapshot"
        );
        Self {
            transactions: transactions.into(),
            issues: issues.into(),
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn issues(&self) -> &[DataIssue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn category_totals(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Vec<CategoryTotal>, SpendError> {
        aggregate::category_totals(&self.transactions, filter)
    }

    pub fn monthly_totals(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Vec<MonthlyTotal>, SpendError> {
        aggregate::monthly_totals(&self.transactions, filter)
    }

    pub fn budget_status(
        &self,
        month: Month,
        budgets: &BudgetMap,
    ) -> Result<Vec<BudgetLine>, SpendError> {
        aggregate::budget_status(&self.transactions, month, budgets)
    }

    pub fn budget_status_with_idle(
        &self,
        month: Month,
        budgets: &BudgetMap,
    ) -> Result<Vec<BudgetLine>, SpendError> {
        aggregate::budget_status_with_idle(&self.transactions, month, budgets)
    }
}

/// Read spreadsheet rows, keyed by their line number. The header row must
/// name the columns of [`CSV_HEADER`] in that order (any case).
pub fn read_raw_rows<R: io::Read>(rdr: R) -> Result<Vec<(u64, RawTransaction)>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(rdr);
    let header: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let matches = header.len() == CSV_HEADER.len()
        && header
            .iter()
            .zip(CSV_HEADER)
            .all(|(got, want)| got.eq_ignore_ascii_case(want));
    if !matches {
        bail!(
            "Unexpected CSV header '{}', expected '{}'",
            header.join(","),
            CSV_HEADER.join(",")
        );
    }
    let mut rows = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        let line = rec.position().map(|p| p.line()).unwrap_or_default();
        let col = |i: usize| rec.get(i).unwrap_or("").trim().to_string();
        rows.push((
            line,
            RawTransaction {
                date: col(0),
                store: col(1),
                amount: col(2),
                category: col(3),
                subcategory: col(4),
                split: col(5),
                note: Some(col(6)).filter(|s| !s.is_empty()),
            },
        ));
    }
    Ok(rows)
}

pub fn read_csv<R: io::Read>(rdr: R) -> Result<Snapshot> {
    Ok(Snapshot::from_rows(read_raw_rows(rdr)?))
}

pub fn read_csv_path(path: &Path) -> Result<Snapshot> {
    let file =
        std::fs::File::open(path).with_context(|| format!("Open CSV {}", path.display()))?;
    read_csv(file).with_context(|| format!("Read CSV {}", path.display()))
}
