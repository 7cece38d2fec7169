// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{BudgetMap, Subcategory};
use crate::utils::{
    fmt_money, get_currency, maybe_print_json, parse_decimal, pretty_table, required,
};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = required(sub, "subcategory")?;
    let subcategory = name
        .parse::<Subcategory>()
        .map_err(|_| anyhow!("Unknown subcategory '{}'", name))?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    // Same positivity rule reports apply when loading.
    BudgetMap::new().set(subcategory, amount)?;
    conn.execute(
        "INSERT INTO budgets(subcategory, amount) VALUES (?1,?2)
         ON CONFLICT(subcategory) DO UPDATE SET amount=excluded.amount",
        params![subcategory.as_ref(), amount.to_string()],
    )?;
    println!(
        "Budget set for {} = {} per month",
        subcategory,
        fmt_money(&amount, &get_currency(conn)?)
    );
    Ok(())
}

#[derive(Serialize)]
pub struct BudgetRow {
    pub subcategory: String,
    pub category: String,
    pub amount: String,
}

pub fn query_rows(conn: &Connection) -> Result<Vec<BudgetRow>> {
    let budgets = crate::db::load_budgets(conn)?;
    Ok(budgets
        .iter()
        .map(|(sub, amount)| BudgetRow {
            subcategory: sub.to_string(),
            category: sub.category().to_string(),
            amount: format!("{:.2}", amount),
        })
        .collect())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = get_currency(conn)?;
        let hdr = format!("Monthly budget ({})", ccy);
        let rows = data
            .into_iter()
            .map(|r| vec![r.category, r.subcategory, r.amount])
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Subcategory", hdr.as_str()], rows)
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = required(sub, "subcategory")?;
    // Hand-edited rows may differ in case.
    let n = conn.execute(
        "DELETE FROM budgets WHERE subcategory=?1 COLLATE NOCASE",
        params![name],
    )?;
    if n == 0 {
        println!("No budget set for '{}'", name);
    } else {
        println!("Removed budget for '{}'", name);
    }
    Ok(())
}
