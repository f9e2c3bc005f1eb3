//! ltpstat-ranker — LTP statistics parsing, filtering and fix-priority ranking.

pub mod record;
pub mod categories;
pub mod selector;
pub mod weights;
pub mod scorer;
pub mod report;
pub mod pipeline;

pub use pipeline::{run_all, run_list_report, run_rank_report, RunOutcome};
pub use record::{parse_records, RecordParser, TestRecord};
pub use scorer::RankedRecord;
pub use weights::ScoreWeights;
