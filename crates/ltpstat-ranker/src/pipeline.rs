//! End-to-end report runs: read the statistics file, build the report,
//! write the artifacts.
//!
//! A missing input file is reported and ends the run without touching any
//! output path. Every other I/O failure is returned as an error.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use ltpstat_common::{
    ListReportConfig, LtpStatError, RankReportConfig, ReportConfig, Result,
};

use crate::categories::CategoryAllowList;
use crate::record::{parse_records, ParseStats, TestRecord};
use crate::report::{
    render_filtered_table, render_name_list, render_ranking_json, render_ranking_table,
    write_artifact,
};
use crate::scorer::rank_records;
use crate::selector::select_and_sort;
use crate::weights::ScoreWeights;

/// Result of a run that may have found no input.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome<T> {
    Completed(T),
    InputMissing(PathBuf),
}

impl<T> RunOutcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(t) => Some(t),
            Self::InputMissing(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListReportSummary {
    pub stats: ParseStats,
    /// Records that passed the category filter
    pub kept: usize,
    pub filtered_path: PathBuf,
    pub names_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankReportSummary {
    pub stats: ParseStats,
    pub ranked: usize,
    pub output_path: PathBuf,
    pub json_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FullReportSummary {
    pub list: ListReportSummary,
    pub rank: RankReportSummary,
}

/// Read the whole statistics file. `Ok(None)` means it does not exist.
pub fn read_statistics(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(LtpStatError::io(path, e)),
    }
}

fn input_missing<T>(path: &Path) -> RunOutcome<T> {
    error!("Input file '{}' not found; no reports written", path.display());
    RunOutcome::InputMissing(path.to_path_buf())
}

/// Write the filtered list and the name list for already parsed records.
pub fn write_list_report_from<I>(
    records: I,
    stats: ParseStats,
    config: &ListReportConfig,
) -> Result<ListReportSummary>
where
    I: IntoIterator<Item = TestRecord>,
{
    let allow: CategoryAllowList = config.categories.iter().cloned().collect();
    let selected = select_and_sort(records, &allow);

    write_artifact(&config.filtered_path, &render_filtered_table(&selected))?;
    info!("Wrote filtered list to '{}'", config.filtered_path.display());
    write_artifact(&config.names_path, &render_name_list(&selected))?;
    info!("Wrote test names to '{}'", config.names_path.display());

    info!(
        "List report: {} of {} records kept ({} malformed lines skipped)",
        selected.len(),
        stats.records,
        stats.malformed
    );

    Ok(ListReportSummary {
        stats,
        kept: selected.len(),
        filtered_path: config.filtered_path.clone(),
        names_path: config.names_path.clone(),
    })
}

/// Write the ranking table (and optional JSON) for already parsed records.
pub fn write_rank_report_from<I>(
    records: I,
    stats: ParseStats,
    config: &RankReportConfig,
) -> Result<RankReportSummary>
where
    I: IntoIterator<Item = TestRecord>,
{
    let weights = ScoreWeights::new(config.failure_count_weight)?;
    let ranked = rank_records(records, &weights);

    let table = render_ranking_table(&ranked, weights.failure_count_weight);
    write_artifact(&config.output_path, &table)?;
    info!("Wrote ranking to '{}'", config.output_path.display());

    if let Some(json_path) = &config.json_path {
        let json = render_ranking_json(&ranked, weights.failure_count_weight)?;
        write_artifact(json_path, &json)?;
        info!("Wrote ranking JSON to '{}'", json_path.display());
    }

    info!(
        "Rank report: {} records ranked ({} malformed lines skipped)",
        ranked.len(),
        stats.malformed
    );

    Ok(RankReportSummary {
        stats,
        ranked: ranked.len(),
        output_path: config.output_path.clone(),
        json_path: config.json_path.clone(),
    })
}

/// Build and write the filtered list and the name list from file content.
pub fn write_list_report(content: &str, config: &ListReportConfig) -> Result<ListReportSummary> {
    let (records, stats) = parse_records(content);
    write_list_report_from(records, stats, config)
}

/// Build and write the ranking table (and optional JSON) from file content.
pub fn write_rank_report(content: &str, config: &RankReportConfig) -> Result<RankReportSummary> {
    let (records, stats) = parse_records(content);
    write_rank_report_from(records, stats, config)
}

/// Filtered list report from `input`.
pub fn run_list_report(input: &Path, config: &ListReportConfig) -> Result<RunOutcome<ListReportSummary>> {
    match read_statistics(input)? {
        Some(content) => Ok(RunOutcome::Completed(write_list_report(&content, config)?)),
        None => Ok(input_missing(input)),
    }
}

/// Ranking report from `input`.
pub fn run_rank_report(input: &Path, config: &RankReportConfig) -> Result<RunOutcome<RankReportSummary>> {
    // Reject a bad weight before reading or writing anything.
    ScoreWeights::new(config.failure_count_weight)?;
    match read_statistics(input)? {
        Some(content) => Ok(RunOutcome::Completed(write_rank_report(&content, config)?)),
        None => Ok(input_missing(input)),
    }
}

/// Both reports from one read and one parse of the input.
pub fn run_all(config: &ReportConfig) -> Result<RunOutcome<FullReportSummary>> {
    config.validate()?;
    match read_statistics(&config.input)? {
        Some(content) => {
            let (records, stats) = parse_records(&content);
            let list = write_list_report_from(records.iter().cloned(), stats, &config.list)?;
            let rank = write_rank_report_from(records, stats, &config.rank)?;
            Ok(RunOutcome::Completed(FullReportSummary { list, rank }))
        }
        None => Ok(input_missing(&config.input)),
    }
}
