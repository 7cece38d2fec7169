// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::insert_transaction;
use crate::store::read_raw_rows;
use crate::utils::required;
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use tracing::{info, warn};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn import_transactions(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = required(sub, "path")?;
    let skip_invalid = sub.get_flag("skip_invalid");
    let file = std::fs::File::open(path).with_context(|| format!("Open CSV {}", path))?;
    let rows = read_raw_rows(file).with_context(|| format!("Read CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut imported = 0usize;
    let mut skipped = 0usize;
    for (line, raw) in rows {
        match raw.parse() {
            Ok(t) => {
                insert_transaction(&tx, &t)?;
                imported += 1;
            }
            Err(issue) if skip_invalid => {
                warn!(line, %issue, "skipping row");
                skipped += 1;
            }
            Err(issue) => {
                return Err(anyhow!("Line {} of {}: {}", line, path, issue));
            }
        }
    }
    tx.commit()?;
    info!(imported, skipped, path, "import finished");
    if skipped > 0 {
        println!(
            "Imported {} transactions from {} ({} skipped)",
            imported, path, skipped
        );
    } else {
        println!("Imported {} transactions from {}", imported, path);
    }
    Ok(())
}
