// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Category;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;
use strum::IntoEnumIterator;

#[derive(Serialize)]
pub struct VocabularyRow {
    pub category: String,
    pub subcategories: Vec<String>,
}

pub fn vocabulary() -> Vec<VocabularyRow> {
    Category::iter()
        .map(|c| VocabularyRow {
            category: c.to_string(),
            subcategories: c.subcategories().iter().map(|s| s.to_string()).collect(),
        })
        .collect()
}

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let data = vocabulary();
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|r| vec![r.category, r.subcategories.join(", ")])
            .collect();
        println!("{}", pretty_table(&["Category", "Subcategories"], rows));
    }
    Ok(())
}
