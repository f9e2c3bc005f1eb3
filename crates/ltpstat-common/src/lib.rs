//! ltpstat-common — Shared error type and report configuration used across all ltpstat crates.

pub mod error;
pub mod report_config;

// Re-export commonly used types
pub use error::{LtpStatError, Result};
pub use report_config::{ListReportConfig, RankReportConfig, ReportConfig};
