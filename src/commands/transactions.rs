// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::insert_transaction;
use crate::models::RawTransaction;
use crate::utils::{maybe_print_json, parse_month, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let arg = |name: &str| {
        sub.get_one::<String>(name)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };
    let raw = RawTransaction {
        date: arg("date"),
        store: arg("store"),
        amount: arg("amount"),
        category: arg("category"),
        subcategory: arg("subcategory"),
        split: sub.get_flag("split").to_string(),
        note: sub.get_one::<String>("note").map(|s| s.to_string()),
    };
    let t = raw
        .parse()
        .map_err(|issue| anyhow!("Cannot record transaction: {}", issue))?;
    insert_transaction(conn, &t)?;
    println!(
        "Recorded {:.2} on {} at '{}' ({} / {}{})",
        t.amount,
        t.date,
        t.store,
        t.category,
        t.subcategory,
        if t.split { ", split" } else { "" }
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.store.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.subcategory.clone(),
                    if r.split { "yes".into() } else { String::new() },
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Date",
                    "Store",
                    "Amount",
                    "Category",
                    "Subcategory",
                    "Split",
                    "Note"
                ],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub store: String,
    pub amount: String,
    pub category: String,
    pub subcategory: String,
    pub split: bool,
    pub note: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT date, store, amount, category, subcategory, split, note FROM transactions WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = sub.get_one::<String>("month") {
        let month = parse_month(month)?;
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(month.to_string());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND category=? COLLATE NOCASE");
        params_vec.push(cat.trim().into());
    }
    if let Some(subcat) = sub.get_one::<String>("subcategory") {
        sql.push_str(" AND subcategory=? COLLATE NOCASE");
        params_vec.push(subcat.trim().into());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(params_vec.iter()))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let note: Option<String> = r.get(6)?;
        data.push(TransactionRow {
            date: r.get(0)?,
            store: r.get(1)?,
            amount: r.get(2)?,
            category: r.get(3)?,
            subcategory: r.get(4)?,
            split: r.get(5)?,
            note: note.unwrap_or_default(),
        });
    }
    Ok(data)
}
