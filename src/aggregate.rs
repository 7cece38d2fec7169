// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spending aggregation over an immutable slice of transactions.
//!
//! Every function here is pure: the caller passes the snapshot and the
//! filter parameters explicitly and gets a fresh result back.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use strum::IntoEnumIterator;
use tracing::warn;

use crate::error::SpendError;
use crate::models::{
    BudgetLine, BudgetMap, BudgetStatus, Category, CategoryShare, CategoryTotal, Month,
    MonthlyTotal, Subcategory, Transaction,
};

/// Inclusive date range plus the categories to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub categories: BTreeSet<Category>,
}

impl CategoryFilter {
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        categories: impl IntoIterator<Item = Category>,
    ) -> Self {
        Self {
            start,
            end,
            categories: categories.into_iter().collect(),
        }
    }

    /// Every category in the vocabulary.
    pub fn all(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(start, end, Category::iter())
    }

    /// Names outside the vocabulary select nothing.
    pub fn from_names<S: AsRef<str>>(start: NaiveDate, end: NaiveDate, names: &[S]) -> Self {
        let categories = names.iter().filter_map(|name| {
            let name = name.as_ref();
            match name.trim().parse::<Category>() {
                Ok(c) => Some(c),
                Err(_) => {
                    warn!(category = name, "ignoring unknown category in filter");
                    None
                }
            }
        });
        Self::new(start, end, categories)
    }

    fn check(&self) -> Result<(), SpendError> {
        if self.start > self.end {
            return Err(SpendError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn matches(&self, t: &Transaction) -> bool {
        t.date >= self.start && t.date <= self.end && self.categories.contains(&t.category)
    }
}

/// Sum of spend per category over the filtered rows, highest first. Ties are
/// ordered by category name.
///
/// Split rows are ordinary rows here: each half carries its own amount and
/// lands in its own category.
pub fn category_totals(
    txns: &[Transaction],
    filter: &CategoryFilter,
) -> Result<Vec<CategoryTotal>, SpendError> {
    filter.check()?;
    let mut sums: BTreeMap<Category, Decimal> = BTreeMap::new();
    for t in txns.iter().filter(|t| filter.matches(t)) {
        accumulate(sums.entry(t.category).or_insert(Decimal::ZERO), t.amount)?;
    }
    let mut out: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect();
    out.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.as_ref().cmp(b.category.as_ref()))
    });
    Ok(out)
}

/// Attach each category's percentage of the grand total.
pub fn category_shares(totals: &[CategoryTotal]) -> Result<Vec<CategoryShare>, SpendError> {
    let mut grand = Decimal::ZERO;
    for t in totals {
        accumulate(&mut grand, t.total)?;
    }
    totals
        .iter()
        .map(|t| {
            let share = if grand.is_zero() {
                Decimal::ZERO
            } else {
                percent_of(t.total, grand)?.round_dp(1)
            };
            Ok(CategoryShare {
                category: t.category,
                total: t.total,
                share,
            })
        })
        .collect()
}

/// Spend per calendar month in the range, oldest month first.
pub fn monthly_totals(
    txns: &[Transaction],
    filter: &CategoryFilter,
) -> Result<Vec<MonthlyTotal>, SpendError> {
    filter.check()?;
    let mut sums: BTreeMap<Month, Decimal> = BTreeMap::new();
    for t in txns.iter().filter(|t| filter.matches(t)) {
        accumulate(sums.entry(Month::of(t.date)).or_insert(Decimal::ZERO), t.amount)?;
    }
    Ok(sums
        .into_iter()
        .map(|(month, total)| MonthlyTotal { month, total })
        .collect())
}

fn accumulate(sum: &mut Decimal, amount: Decimal) -> Result<(), SpendError> {
    *sum = sum
        .checked_add(amount)
        .ok_or(SpendError::AmountOverflow)?;
    Ok(())
}

/// `part * 100 / whole`, unrounded. `whole` must be non-zero.
fn percent_of(part: Decimal, whole: Decimal) -> Result<Decimal, SpendError> {
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(whole))
        .ok_or(SpendError::AmountOverflow)
}

/// Budget status for one subcategory. `Ok(None)` when the ceiling is not
/// positive.
pub fn evaluate(
    subcategory: Subcategory,
    total_spent: Decimal,
    budget: Decimal,
) -> Result<Option<BudgetLine>, SpendError> {
    if budget <= Decimal::ZERO {
        return Ok(None);
    }
    let percent = percent_of(total_spent, budget)?
        .round()
        .to_i64()
        .unwrap_or(i64::MAX);
    let remaining = budget
        .checked_sub(total_spent)
        .ok_or(SpendError::AmountOverflow)?;
    let status = match total_spent.cmp(&budget) {
        std::cmp::Ordering::Greater => BudgetStatus::OverBudget,
        std::cmp::Ordering::Equal => BudgetStatus::AtLimit,
        std::cmp::Ordering::Less => BudgetStatus::OnTrack,
    };
    Ok(Some(BudgetLine {
        subcategory,
        total_spent,
        budget,
        percent,
        remaining,
        status,
    }))
}

fn spent_by_subcategory(
    txns: &[Transaction],
    month: Month,
    budgets: &BudgetMap,
) -> Result<BTreeMap<Subcategory, Decimal>, SpendError> {
    let mut sums = BTreeMap::new();
    for t in txns
        .iter()
        .filter(|t| month.contains(t.date) && budgets.get(t.subcategory).is_some())
    {
        accumulate(sums.entry(t.subcategory).or_insert(Decimal::ZERO), t.amount)?;
    }
    Ok(sums)
}

/// Budget status for every budgeted subcategory with activity in `month`,
/// in vocabulary order. Unbudgeted subcategories never appear.
pub fn budget_status(
    txns: &[Transaction],
    month: Month,
    budgets: &BudgetMap,
) -> Result<Vec<BudgetLine>, SpendError> {
    let mut lines = Vec::new();
    for (sub, spent) in spent_by_subcategory(txns, month, budgets)? {
        if let Some(budget) = budgets.get(sub) {
            lines.extend(evaluate(sub, spent, budget)?);
        }
    }
    Ok(lines)
}

/// Like [`budget_status`], but budgeted subcategories with no activity are
/// reported at zero spend.
pub fn budget_status_with_idle(
    txns: &[Transaction],
    month: Month,
    budgets: &BudgetMap,
) -> Result<Vec<BudgetLine>, SpendError> {
    let spent = spent_by_subcategory(txns, month, budgets)?;
    let mut lines = Vec::new();
    for (sub, budget) in budgets.iter() {
        let total = spent.get(&sub).copied().unwrap_or(Decimal::ZERO);
        lines.extend(evaluate(sub, total, budget)?);
    }
    Ok(lines)
}
