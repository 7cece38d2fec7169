// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use serde_json::json;
use spendboard::{cli, commands::exporter, db, store};
use tempfile::tempdir;

fn base_conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO transactions(date,store,amount,category,subcategory,split,note) VALUES \
        ('2025-01-02','Corner Shop','12.34','Grocery','Grocery',0,'Weekly run')",
        [],
    )
    .unwrap();
    conn
}

fn run_export(conn: &Connection, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "spendboard",
        "export",
        "transactions",
        "--format",
        format,
        "--out",
        out,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_transactions_streams_pretty_json() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&conn, "json", &out_str).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "date": "2025-01-02",
                "store": "Corner Shop",
                "amount": "12.34",
                "category": "Grocery",
                "subcategory": "Grocery",
                "split": false,
                "note": "Weekly run"
            }
        ])
    );
}

#[test]
fn export_csv_reads_back_as_a_spreadsheet() {
    let conn = base_conn();
    conn.execute(
        "INSERT INTO transactions(date,store,amount,category,subcategory,split) VALUES \
        ('2025-01-03','Card Shop','10.00','Gift','Gift',1)",
        [],
    )
    .unwrap();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&conn, "CSV", &out_str).unwrap();

    let snapshot = store::read_csv_path(&out_path).unwrap();
    let ledger = db::load_snapshot(&conn).unwrap();
    assert!(snapshot.issues().is_empty());
    assert_eq!(snapshot.transactions(), ledger.transactions());
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    assert!(run_export(&conn, "xml", &out_str).is_err());
    assert!(!out_path.exists());
}
