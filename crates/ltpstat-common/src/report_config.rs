//! Report run configuration.
//!
//! Every path and tunable a report run needs is carried in one explicit
//! [`ReportConfig`] passed at call time. The struct can be written by hand
//! in TOML, YAML or JSON; all fields have defaults so partial files work.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LtpStatError, Result};

/// Categories kept by the filtered list report.
pub const DEFAULT_CATEGORIES: [&str; 4] = ["all pass", "skip pass", "part fail", "skip"];

/// Failure-count weight used by packaged runs of the ranking report.
pub const PACKAGED_FAILURE_COUNT_WEIGHT: f64 = 0.3;

/// Complete report run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Statistics file produced by the LTP run
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Filtered list report
    #[serde(default)]
    pub list: ListReportConfig,

    /// Ranking report
    #[serde(default)]
    pub rank: RankReportConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            list: ListReportConfig::default(),
            rank: RankReportConfig::default(),
        }
    }
}

fn default_input() -> PathBuf { PathBuf::from("ltp-statistic.txt") }

// ── List report ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListReportConfig {
    /// Tab-delimited table of kept records
    #[serde(default = "default_filtered_path")]
    pub filtered_path: PathBuf,

    /// Quoted, comma-terminated test names
    #[serde(default = "default_names_path")]
    pub names_path: PathBuf,

    /// Category allow-list (exact, case-sensitive match)
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

impl Default for ListReportConfig {
    fn default() -> Self {
        Self {
            filtered_path: default_filtered_path(),
            names_path: default_names_path(),
            categories: default_categories(),
        }
    }
}

fn default_filtered_path() -> PathBuf { PathBuf::from("ltp-filtered-sorted.txt") }
fn default_names_path()    -> PathBuf { PathBuf::from("ltp-test-names.txt") }
fn default_categories()    -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

// ── Rank report ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankReportConfig {
    /// Human-readable ranking table
    #[serde(default = "default_ranking_path")]
    pub output_path: PathBuf,

    /// Optional machine-readable copy of the ranking
    #[serde(default)]
    pub json_path: Option<PathBuf>,

    /// Weight of the `ln(1 + fail)` reward term
    #[serde(default = "default_failure_count_weight")]
    pub failure_count_weight: f64,
}

impl Default for RankReportConfig {
    fn default() -> Self {
        Self {
            output_path: default_ranking_path(),
            json_path: None,
            failure_count_weight: default_failure_count_weight(),
        }
    }
}

fn default_ranking_path()          -> PathBuf { PathBuf::from("ltp-ranking-final.txt") }
fn default_failure_count_weight()  -> f64     { PACKAGED_FAILURE_COUNT_WEIGHT }

/// A failure-count weight must be finite and non-negative.
pub fn validate_failure_count_weight(weight: f64) -> Result<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(LtpStatError::Config(format!(
            "failure_count_weight must be a non-negative finite number, got {weight}"
        )));
    }
    Ok(())
}

impl ReportConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load from a file, picking the format from its extension.
    /// `.yaml`/`.yml` and `.json` are recognised; anything else is TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LtpStatError::io(path, e))?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let config = match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            _ => Self::from_toml_str(&content)?,
        };
        tracing::debug!("Loaded report configuration from {}", path.display());
        Ok(config)
    }

    /// Save as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| LtpStatError::Config(format!("cannot serialise config: {e}")))
    }

    /// Reject values no report run can work with.
    pub fn validate(&self) -> Result<()> {
        validate_failure_count_weight(self.rank.failure_count_weight)?;
        if self.list.categories.is_empty() {
            return Err(LtpStatError::Config(
                "list.categories must name at least one category".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.input, PathBuf::from("ltp-statistic.txt"));
        assert_eq!(config.list.filtered_path, PathBuf::from("ltp-filtered-sorted.txt"));
        assert_eq!(config.list.names_path, PathBuf::from("ltp-test-names.txt"));
        assert_eq!(config.rank.output_path, PathBuf::from("ltp-ranking-final.txt"));
        assert_eq!(config.rank.json_path, None);
        assert_eq!(config.rank.failure_count_weight, 0.3);
        assert_eq!(config.list.categories, vec!["all pass", "skip pass", "part fail", "skip"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ReportConfig::from_toml_str(
            r#"
            input = "runs/2024-06.txt"

            [rank]
            failure_count_weight = 0.75
            "#,
        )
        .unwrap();
        assert_eq!(config.input, PathBuf::from("runs/2024-06.txt"));
        assert_eq!(config.rank.failure_count_weight, 0.75);
        assert_eq!(config.rank.output_path, PathBuf::from("ltp-ranking-final.txt"));
        assert_eq!(config.list, ListReportConfig::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = ReportConfig::from_toml_str("").unwrap();
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = ReportConfig::default();
        config.list.categories = vec!["part fail".to_string()];
        config.rank.json_path = Some(PathBuf::from("ranking.json"));
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = ReportConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_toml_string_parses_back() {
        let config = ReportConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(ReportConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_picks_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ltpstat.json");
        std::fs::write(&path, r#"{"rank": {"failure_count_weight": 1.5}}"#).unwrap();
        let config = ReportConfig::load(&path).unwrap();
        assert_eq!(config.rank.failure_count_weight, 1.5);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReportConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, LtpStatError::Io { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_weight() {
        let mut config = ReportConfig::default();
        config.rank.failure_count_weight = -0.1;
        assert!(matches!(config.validate(), Err(LtpStatError::Config(_))));
        config.rank.failure_count_weight = f64::NAN;
        assert!(config.validate().is_err());
        config.rank.failure_count_weight = f64::INFINITY;
        assert!(config.validate().is_err());
        config.rank.failure_count_weight = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_failure_count_weight_rule() {
        assert!(validate_failure_count_weight(0.0).is_ok());
        assert!(validate_failure_count_weight(0.3).is_ok());
        assert!(validate_failure_count_weight(1e9).is_ok());
        assert!(validate_failure_count_weight(-1e-9).is_err());
        assert!(validate_failure_count_weight(f64::NAN).is_err());
        assert!(validate_failure_count_weight(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_allow_list() {
        let mut config = ReportConfig::default();
        config.list.categories.clear();
        assert!(config.validate().is_err());
    }
}
