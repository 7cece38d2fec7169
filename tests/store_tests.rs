// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use spendboard::error::RowIssue;
use spendboard::models::{Category, RawTransaction, Subcategory};
use spendboard::store::{Snapshot, read_csv};

const SHEET: &str = "date,store,amount,category,subcategory,split,note
2024-03-01,Corner Shop,5.92,Grocery,Grocery,,
2024-03-01,Card Shop,10.00,gift,gift,TRUE,birthday
2024-03-02,Mystery,4.00,Snacks,Grocery,,
2024-03-03,Hardware,7.00,Home,Dining,,
2024-02-30,Bad Date,1.00,Home,Rent,,
";

#[test]
fn csv_rows_outside_the_vocabulary_are_flagged_not_bucketed() {
    let snapshot = read_csv(SHEET.as_bytes()).unwrap();
    assert_eq!(snapshot.len(), 2);

    let gift = &snapshot.transactions()[1];
    assert_eq!(gift.category, Category::Gift);
    assert_eq!(gift.subcategory, Subcategory::Gift);
    assert!(gift.split);
    assert_eq!(gift.note.as_deref(), Some("birthday"));
    assert_eq!(snapshot.transactions()[0].note, None);

    let issues = snapshot.issues();
    assert_eq!(issues.len(), 3);
    assert_eq!(issues[0].row, 4);
    assert_eq!(issues[0].issue, RowIssue::UnknownCategory("Snacks".into()));
    assert_eq!(issues[1].row, 5);
    assert_eq!(
        issues[1].issue,
        RowIssue::Mismatch {
            category: Category::Home,
            subcategory: Subcategory::Dining,
        }
    );
    assert_eq!(issues[2].issue.code(), "invalid_date");
}

#[test]
fn raw_rows_parse_split_flags() {
    let mut raw = RawTransaction {
        date: "2024-03-01".into(),
        store: " Corner Shop ".into(),
        amount: "5.92".into(),
        category: "Grocery".into(),
        subcategory: "Coffee".into(),
        split: "yes".into(),
        note: Some("  ".into()),
    };
    let t = raw.parse().unwrap();
    assert!(t.split);
    assert_eq!(t.store, "Corner Shop");
    assert_eq!(t.note, None);

    raw.split = "0".into();
    assert!(!raw.parse().unwrap().split);

    raw.split = "maybe".into();
    assert_eq!(
        raw.parse().unwrap_err(),
        RowIssue::InvalidSplit("maybe".into())
    );

    raw.split = String::new();
    raw.amount = "five".into();
    assert_eq!(
        raw.parse().unwrap_err(),
        RowIssue::InvalidAmount("five".into())
    );
}

#[test]
fn snapshot_clones_share_rows() {
    let snapshot = read_csv(SHEET.as_bytes()).unwrap();
    let copy = snapshot.clone();
    assert!(std::ptr::eq(
        snapshot.transactions().as_ptr(),
        copy.transactions().as_ptr()
    ));
    assert!(Snapshot::default().is_empty());
}

#[test]
fn snapshot_delegates_to_the_aggregations() {
    let rows = read_csv(SHEET.as_bytes()).unwrap().transactions().to_vec();
    let snapshot = Snapshot::new(rows);
    assert!(snapshot.issues().is_empty());

    let start = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let end = chrono::NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
    let totals = snapshot
        .category_totals(&spendboard::aggregate::CategoryFilter::all(start, end))
        .unwrap();
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].category, Category::Gift);

    let mut budgets = spendboard::models::BudgetMap::new();
    budgets.set(Subcategory::Gift, "20".parse().unwrap()).unwrap();
    let lines = snapshot
        .budget_status("2024-03".parse().unwrap(), &budgets)
        .unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].percent, 50);
}

#[test]
fn reordered_header_is_rejected_up_front() {
    let sheet = "date,store,category,subcategory,amount,split,note\n\
                 2024-03-01,Corner Shop,Grocery,Grocery,5.92,,\n";
    let err = read_csv(sheet.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("Unexpected CSV header"), "{}", err);

    let shouting = "DATE,Store,AMOUNT,Category,Subcategory,Split,Note\n\
                    2024-03-01,Corner Shop,5.92,Grocery,Grocery,,\n";
    let snapshot = read_csv(shouting.as_bytes()).unwrap();
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.issues().is_empty());
}
