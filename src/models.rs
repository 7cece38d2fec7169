// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use strum::IntoEnumIterator;

use crate::error::{RowIssue, SpendError};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
    strum::VariantNames,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    Home,
    Auto,
    Grocery,
    Gift,
    Shopping,
    Education,
    Travel,
    Amusement,
    Health,
}

impl Category {
    pub fn subcategories(self) -> Vec<Subcategory> {
        Subcategory::iter().filter(|s| s.category() == self).collect()
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
    strum::VariantNames,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Subcategory {
    Rent,
    Utilities,
    Furniture,
    Household,
    Gas,
    Maintenance,
    Insurance,
    Parking,
    Grocery,
    Dining,
    Coffee,
    Gift,
    Donation,
    Clothing,
    Electronics,
    Personal,
    Tuition,
    Books,
    Courses,
    Flights,
    Lodging,
    Transit,
    Entertainment,
    Subscriptions,
    Hobbies,
    Medical,
    Pharmacy,
    Fitness,
}

impl Subcategory {
    /// The category this subcategory is filed under.
    pub fn category(self) -> Category {
        use Subcategory::*;
        match self {
            Rent | Utilities | Furniture | Household => Category::Home,
            Gas | Maintenance | Insurance | Parking => Category::Auto,
            Grocery | Dining | Coffee => Category::Grocery,
            Gift | Donation => Category::Gift,
            Clothing | Electronics | Personal => Category::Shopping,
            Tuition | Books | Courses => Category::Education,
            Flights | Lodging | Transit => Category::Travel,
            Entertainment | Subscriptions | Hobbies => Category::Amusement,
            Medical | Pharmacy | Fitness => Category::Health,
        }
    }
}

/// A calendar month (year + month number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = SpendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map(Self::of)
            .map_err(|_| SpendError::InvalidMonth(s.to_string()))
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub store: String,
    pub amount: Decimal,
    pub category: Category,
    pub subcategory: Subcategory,
    /// One half of a purchase divided across two rows.
    pub split: bool,
    pub note: Option<String>,
}

/// A transaction row as it sits in a spreadsheet or the ledger table, every
/// column still text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTransaction {
    pub date: String,
    pub store: String,
    pub amount: String,
    pub category: String,
    pub subcategory: String,
    pub split: String,
    pub note: Option<String>,
}

impl RawTransaction {
    pub fn parse(&self) -> Result<Transaction, RowIssue> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| RowIssue::InvalidDate(self.date.clone()))?;
        let amount = self
            .amount
            .trim()
            .parse::<Decimal>()
            .map_err(|_| RowIssue::InvalidAmount(self.amount.clone()))?;
        let category = self
            .category
            .trim()
            .parse::<Category>()
            .map_err(|_| RowIssue::UnknownCategory(self.category.clone()))?;
        let subcategory = self
            .subcategory
            .trim()
            .parse::<Subcategory>()
            .map_err(|_| RowIssue::UnknownSubcategory(self.subcategory.clone()))?;
        if subcategory.category() != category {
            return Err(RowIssue::Mismatch {
                category,
                subcategory,
            });
        }
        let split = parse_split(&self.split)?;
        let note = self
            .note
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Ok(Transaction {
            date,
            store: self.store.trim().to_string(),
            amount,
            category,
            subcategory,
            split,
            note,
        })
    }
}

fn parse_split(s: &str) -> Result<bool, RowIssue> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => Ok(false),
        "true" | "yes" | "y" | "1" => Ok(true),
        _ => Err(RowIssue::InvalidSplit(s.to_string())),
    }
}

/// A raw row that was left out of a snapshot, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataIssue {
    /// Ledger id or spreadsheet line number.
    pub row: u64,
    pub issue: RowIssue,
}

/// Monthly spending ceilings per subcategory. Every stored ceiling is positive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BudgetMap(BTreeMap<Subcategory, Decimal>);

impl BudgetMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn set(&mut self, subcategory: Subcategory, amount: Decimal) -> Result<(), SpendError> {
        if amount <= Decimal::ZERO {
            return Err(SpendError::NonPositiveBudget {
                subcategory,
                amount,
            });
        }
        self.0.insert(subcategory, amount);
        Ok(())
    }

    pub fn get(&self, subcategory: Subcategory) -> Option<Decimal> {
        self.0.get(&subcategory).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Subcategory, Decimal)> + '_ {
        self.0.iter().map(|(&k, &v)| (k, v))
    }

    /// Parse `{"Grocery": "320", "Dining": "150"}`.
    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        let raw: BTreeMap<Subcategory, Decimal> = serde_json::from_str(s)?;
        let mut budgets = Self::new();
        for (subcategory, amount) in raw {
            budgets.set(subcategory, amount)?;
        }
        Ok(budgets)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub total: Decimal,
    /// Percent of the grand total, one decimal place.
    pub share: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    pub month: Month,
    pub total: Decimal,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::AsRefStr,
)]
pub enum BudgetStatus {
    #[serde(rename = "On Track")]
    #[strum(serialize = "On Track")]
    OnTrack,
    #[serde(rename = "At Limit")]
    #[strum(serialize = "At Limit")]
    AtLimit,
    #[serde(rename = "Over Budget")]
    #[strum(serialize = "Over Budget")]
    OverBudget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetLine {
    pub subcategory: Subcategory,
    pub total_spent: Decimal,
    pub budget: Decimal,
    pub percent: i64,
    pub remaining: Decimal,
    pub status: BudgetStatus,
}
