// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::models::{BudgetMap, RawTransaction, Subcategory, Transaction};
use crate::store::Snapshot;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Spendboard", "spendboard"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("spendboard.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    open_at(&db_path()?)
}

pub fn open_at(path: &Path) -> Result<Connection> {
    let mut conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    debug!(path = %path.display(), "opened ledger");
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- columns are kept as text so rows that no longer parse stay visible
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        store TEXT NOT NULL,
        amount TEXT NOT NULL,
        category TEXT NOT NULL,
        subcategory TEXT NOT NULL,
        split INTEGER NOT NULL DEFAULT 0,
        note TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    CREATE TABLE IF NOT EXISTS budgets(
        subcategory TEXT PRIMARY KEY,
        amount TEXT NOT NULL -- monthly ceiling
    );
    "#,
    )?;
    Ok(())
}

pub fn insert_transaction(conn: &Connection, t: &Transaction) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions(date, store, amount, category, subcategory, split, note)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            t.date.to_string(),
            t.store,
            t.amount.to_string(),
            t.category.as_ref(),
            t.subcategory.as_ref(),
            t.split,
            t.note.as_deref()
        ],
    )?;
    Ok(())
}

/// Every ledger row, keyed by id, still as text.
pub fn raw_transactions(conn: &Connection) -> Result<Vec<(u64, RawTransaction)>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, store, amount, category, subcategory, split, note
         FROM transactions ORDER BY date, id",
    )?;
    let rows = stmt.query_map([], |r| {
        let split: bool = r.get(6)?;
        Ok((
            r.get::<_, i64>(0)? as u64,
            RawTransaction {
                date: r.get(1)?,
                store: r.get(2)?,
                amount: r.get(3)?,
                category: r.get(4)?,
                subcategory: r.get(5)?,
                split: split.to_string(),
                note: r.get(7)?,
            },
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

/// Read the whole ledger once into an immutable snapshot.
pub fn load_snapshot(conn: &Connection) -> Result<Snapshot> {
    Ok(Snapshot::from_rows(raw_transactions(conn)?))
}

/// Budget rows as stored, unvalidated.
pub fn raw_budgets(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut stmt = conn.prepare("SELECT subcategory, amount FROM budgets ORDER BY subcategory")?;
    let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

/// Budgets from the ledger. Entries naming an unknown subcategory or holding a
/// non-positive or unreadable amount are skipped.
pub fn load_budgets(conn: &Connection) -> Result<BudgetMap> {
    let mut budgets = BudgetMap::new();
    for (sub, amount_s) in raw_budgets(conn)? {
        let Ok(subcategory) = sub.parse::<Subcategory>() else {
            warn!(subcategory = %sub, "skipping budget for unknown subcategory");
            continue;
        };
        let Ok(amount) = amount_s.parse::<Decimal>() else {
            warn!(subcategory = %sub, amount = %amount_s, "skipping unreadable budget amount");
            continue;
        };
        if let Err(err) = budgets.set(subcategory, amount) {
            warn!(%err, "skipping budget");
        }
    }
    Ok(budgets)
}
