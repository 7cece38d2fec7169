// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{CategoryFilter, category_shares};
use crate::models::{BudgetLine, CategoryShare, MonthlyTotal};
use crate::utils::{
    budgets_for, get_currency, maybe_print_json, parse_date, parse_month, pretty_table, required,
    snapshot_for,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("categories", sub)) => categories(conn, sub)?,
        Some(("budget", sub)) => budget(conn, sub)?,
        Some(("monthly", sub)) => monthly(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn filter_from(sub: &clap::ArgMatches) -> Result<CategoryFilter> {
    let start = parse_date(required(sub, "from")?)?;
    let end = parse_date(required(sub, "to")?)?;
    Ok(match sub.get_many::<String>("category") {
        Some(names) => {
            let names: Vec<&String> = names.collect();
            CategoryFilter::from_names(start, end, &names)
        }
        None => CategoryFilter::all(start, end),
    })
}

pub fn category_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<CategoryShare>> {
    let filter = filter_from(sub)?;
    let snapshot = snapshot_for(conn, sub)?;
    let totals = snapshot.category_totals(&filter)?;
    Ok(category_shares(&totals)?)
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = category_report(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = get_currency(conn)?;
        let hdr = format!("Spent ({})", ccy);
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.category.to_string(),
                    format!("{:.2}", r.total),
                    format!("{:.1}%", r.share),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", hdr.as_str(), "Share"], rows)
        );
    }
    Ok(())
}

pub fn budget_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<BudgetLine>> {
    let month = parse_month(required(sub, "month")?)?;
    let snapshot = snapshot_for(conn, sub)?;
    let budgets = budgets_for(conn, sub)?;
    let lines = if sub.get_flag("all") {
        snapshot.budget_status_with_idle(month, &budgets)?
    } else {
        snapshot.budget_status(month, &budgets)?
    };
    Ok(lines)
}

fn budget(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = budget_report(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|l| {
                vec![
                    l.subcategory.to_string(),
                    format!("{:.2}", l.total_spent),
                    format!("{:.2}", l.budget),
                    format!("{}%", l.percent),
                    format!("{:.2}", l.remaining),
                    l.status.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Subcategory",
                    "Spent",
                    "Budget",
                    "Used",
                    "Remaining",
                    "Status"
                ],
                rows
            )
        );
    }
    Ok(())
}

pub fn monthly_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<MonthlyTotal>> {
    let filter = filter_from(sub)?;
    let snapshot = snapshot_for(conn, sub)?;
    Ok(snapshot.monthly_totals(&filter)?)
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = monthly_report(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = get_currency(conn)?;
        let hdr = format!("Spent ({})", ccy);
        let rows = data
            .iter()
            .map(|r| vec![r.month.to_string(), format!("{:.2}", r.total)])
            .collect();
        println!("{}", pretty_table(&["Month", hdr.as_str()], rows));
    }
    Ok(())
}
