// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::raw_budgets;
use crate::models::Subcategory;
use crate::utils::{pretty_table, snapshot_for};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Findings as `(issue, detail)` pairs.
pub fn findings(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<(String, String)>> {
    let mut rows = Vec::new();
    let snapshot = snapshot_for(conn, sub)?;

    // 1) Rows left out of every report
    for d in snapshot.issues() {
        rows.push((d.issue.code().to_string(), format!("row {}: {}", d.row, d.issue)));
    }

    // 2) Budgets reports will skip
    for (name, amount) in raw_budgets(conn)? {
        if name.parse::<Subcategory>().is_err() {
            rows.push(("unknown_budget_subcategory".into(), name));
            continue;
        }
        match amount.parse::<Decimal>() {
            Ok(a) if a > Decimal::ZERO => {}
            Ok(_) => rows.push(("non_positive_budget".into(), format!("{} = {}", name, amount))),
            Err(_) => rows.push(("invalid_budget_amount".into(), format!("{} = {}", name, amount))),
        }
    }

    // 3) Split halves without a partner row on the same date at the same store
    let mut halves: BTreeMap<(chrono::NaiveDate, String), usize> = BTreeMap::new();
    for t in snapshot.transactions().iter().filter(|t| t.split) {
        *halves.entry((t.date, t.store.to_lowercase())).or_insert(0) += 1;
    }
    for ((date, store), n) in halves {
        if n < 2 {
            rows.push(("unpaired_split".into(), format!("{} {}", date, store)));
        }
    }
    Ok(rows)
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let rows: Vec<Vec<String>> = findings(conn, sub)?
        .into_iter()
        .map(|(issue, detail)| vec![issue, detail])
        .collect();
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
