// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;
use spendboard::commands::{doctor, reports};
use spendboard::error::SpendError;
use spendboard::models::Category;
use spendboard::{cli, db};
use std::io::Write;
use tempfile::NamedTempFile;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO transactions(date,store,amount,category,subcategory,split) VALUES
            ('2024-03-01','Corner Shop','5.92','Grocery','Grocery',0),
            ('2024-03-01','Card Shop','10.00','Gift','Gift',1),
            ('2024-03-01','Card Shop','4.00','Home','Household',1),
            ('2024-02-18','Hardware','12.34','Home','Household',0),
            ('2024-03-12','Pump','20.00','Auto','Gas',0);
        "#,
    )
    .unwrap();
    conn
}

fn report_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["spendboard", "report"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("report", report_m)) => match report_m.subcommand() {
            Some((_, sub)) => sub.clone(),
            None => panic!("no report kind"),
        },
        _ => panic!("no report subcommand"),
    }
}

#[test]
fn category_report_for_selected_categories() {
    let conn = setup();
    let sub = report_matches(&[
        "categories",
        "--from",
        "2024-03-01",
        "--to",
        "2024-03-31",
        "--category",
        "Grocery,Gift",
    ]);
    let rows = reports::category_report(&conn, &sub).unwrap();
    let got: Vec<(Category, String)> = rows
        .iter()
        .map(|r| (r.category, format!("{:.2}", r.total)))
        .collect();
    assert_eq!(
        got,
        vec![
            (Category::Gift, "10.00".to_string()),
            (Category::Grocery, "5.92".to_string()),
        ]
    );
}

#[test]
fn category_report_defaults_to_every_category() {
    let conn = setup();
    let sub = report_matches(&["categories", "--from", "2024-03-01", "--to", "2024-03-31"]);
    let rows = reports::category_report(&conn, &sub).unwrap();
    let cats: Vec<Category> = rows.iter().map(|r| r.category).collect();
    assert_eq!(
        cats,
        vec![
            Category::Auto,
            Category::Gift,
            Category::Grocery,
            Category::Home
        ]
    );
    let share_sum: Decimal = rows.iter().map(|r| r.share).sum();
    assert!((share_sum - Decimal::ONE_HUNDRED).abs() <= Decimal::new(2, 1));
}

#[test]
fn category_report_rejects_inverted_range() {
    let conn = setup();
    let sub = report_matches(&["categories", "--from", "2024-03-31", "--to", "2024-03-01"]);
    let err = reports::category_report(&conn, &sub).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SpendError>(),
        Some(SpendError::InvalidRange { .. })
    ));
}

#[test]
fn reports_can_read_a_spreadsheet() {
    let conn = setup();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "date,store,amount,category,subcategory,split,note\n\
         2024-03-05,Bookshop,45.00,Education,Books,,\n\
         2024-03-06,Mystery,9.00,Snacks,Coffee,,"
    )
    .unwrap();
    file.flush().unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let sub = report_matches(&[
        "categories",
        "--from",
        "2024-03-01",
        "--to",
        "2024-03-31",
        "--csv",
        &path,
    ]);
    let rows = reports::category_report(&conn, &sub).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, Category::Education);
    assert_eq!(rows[0].share, Decimal::ONE_HUNDRED);
}

#[test]
fn monthly_report_spans_months() {
    let conn = setup();
    let sub = report_matches(&[
        "monthly",
        "--from",
        "2024-01-01",
        "--to",
        "2024-12-31",
        "-c",
        "Home",
    ]);
    let rows = reports::monthly_report(&conn, &sub).unwrap();
    let got: Vec<(String, String)> = rows
        .iter()
        .map(|r| (r.month.to_string(), format!("{:.2}", r.total)))
        .collect();
    assert_eq!(
        got,
        vec![
            ("2024-02".to_string(), "12.34".to_string()),
            ("2024-03".to_string(), "4.00".to_string()),
        ]
    );
}

#[test]
fn doctor_lists_rows_and_budgets_reports_skip() {
    let conn = setup();
    conn.execute_batch(
        r#"
        INSERT INTO transactions(date,store,amount,category,subcategory,split) VALUES
            ('2024-03-02','Mystery','3.00','Snacks','Coffee',0),
            ('2024-03-09','Outlet','25.00','Shopping','Clothing',1);
        INSERT INTO budgets(subcategory, amount) VALUES ('Snacks', '50'), ('Dining', '0');
        "#,
    )
    .unwrap();

    let matches = cli::build_cli().get_matches_from(["spendboard", "doctor"]);
    let sub = match matches.subcommand() {
        Some(("doctor", sub)) => sub.clone(),
        _ => panic!("no doctor subcommand"),
    };
    let found = doctor::findings(&conn, &sub).unwrap();
    let codes: Vec<&str> = found.iter().map(|(code, _)| code.as_str()).collect();
    assert!(codes.contains(&"unknown_category"));
    assert!(codes.contains(&"unknown_budget_subcategory"));
    assert!(codes.contains(&"non_positive_budget"));
    assert_eq!(codes.iter().filter(|c| **c == "unpaired_split").count(), 1);
    assert!(found.iter().any(|(_, detail)| detail == "2024-03-09 outlet"));
}

#[test]
fn category_report_surfaces_overflow_from_a_spreadsheet() {
    let conn = setup();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "date,store,amount,category,subcategory,split,note\n\
         2024-03-01,Dealer,1000000000000000000000000000,Auto,Gas,,"
    )
    .unwrap();
    file.flush().unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let sub = report_matches(&[
        "categories",
        "--from",
        "2024-03-01",
        "--to",
        "2024-03-31",
        "--csv",
        &path,
    ]);
    let err = reports::category_report(&conn, &sub).unwrap_err();
    assert_eq!(
        err.downcast_ref::<SpendError>(),
        Some(&SpendError::AmountOverflow)
    );
}
