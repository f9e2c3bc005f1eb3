//! Report rendering.
//!
//! Renderers build the whole artifact in memory; [`write_artifact`] then
//! replaces the target file in one write.

use std::path::Path;

use serde::Serialize;

use ltpstat_common::{LtpStatError, Result};

use crate::record::TestRecord;
use crate::scorer::RankedRecord;

pub const FILTERED_HEADER: &str = "name\t\t\ttype\t\tpass\tfail+broken\n";

pub const RANKING_TITLE: &str = "LTP test fix priority ranking (by fix potential)";

/// Tab-delimited table of the filtered list.
pub fn render_filtered_table(records: &[TestRecord]) -> String {
    let mut out = String::from(FILTERED_HEADER);
    for r in records {
        out.push_str(&format!(
            "{}\t\t{}\t{}\t{}\n",
            r.name, r.category, r.pass, r.fail_broken
        ));
    }
    out
}

/// One `"name",` line per record, ready to paste into a source list.
pub fn render_name_list(records: &[TestRecord]) -> String {
    records.iter().map(|r| format!("\"{}\",\n", r.name)).collect()
}

/// Format a weight the way the ranking header has always shown it:
/// shortest round-trip digits, at least one decimal place, and exponents
/// written with an explicit sign and two or more digits (`1e-05`, `1e+16`).
pub fn format_weight(weight: f64) -> String {
    let repr = format!("{weight:?}");
    match repr.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}

/// Fixed-width ranking table with title and formula line.
pub fn render_ranking_table(ranked: &[RankedRecord], failure_count_weight: f64) -> String {
    let mut out = String::new();
    out.push_str(RANKING_TITLE);
    out.push('\n');
    out.push_str(&"=".repeat(50));
    out.push_str("\n\n");
    out.push_str(&format!(
        "Ranking basis: score = (pass/fail)/total + {}*log(1+fail), \
         higher score means higher priority.\n\n",
        format_weight(failure_count_weight)
    ));

    let header = format!(
        "{:<6}{:<30}{:<25}{:<6}{:<12}{:<8}{:<10}\n",
        "Rank", "Name", "Type", "Pass", "Fail/Broken", "Total", "Score"
    );
    out.push_str(&header);
    out.push_str(&"-".repeat(header.len() + 5));
    out.push('\n');

    for r in ranked {
        out.push_str(&format!(
            "{:<6}{:<30}{:<25}{:<6}{:<12}{:<8}{:.4}\n",
            r.rank, r.name, r.category, r.pass, r.fail_broken, r.total_units, r.score
        ));
    }
    out
}

/// JSON form of the ranking.
#[derive(Debug, Serialize)]
pub struct RankingExport<'a> {
    pub failure_count_weight: f64,
    pub entries: &'a [RankedRecord],
}

pub fn render_ranking_json(ranked: &[RankedRecord], failure_count_weight: f64) -> Result<String> {
    let export = RankingExport { failure_count_weight, entries: ranked };
    Ok(serde_json::to_string_pretty(&export)?)
}

/// Overwrite `path` with `content`.
pub fn write_artifact(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| LtpStatError::io(path, e))
}
