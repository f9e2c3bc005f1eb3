//! Filtered list selection: keep allow-listed categories, most passes first.

use crate::categories::CategoryAllowList;
use crate::record::TestRecord;

/// Keep records whose category is allow-listed, ordered by pass count
/// descending. Equal pass counts keep their input order.
pub fn select_and_sort<I>(records: I, allow: &CategoryAllowList) -> Vec<TestRecord>
where
    I: IntoIterator<Item = TestRecord>,
{
    let mut kept: Vec<TestRecord> = records
        .into_iter()
        .filter(|r| allow.contains(&r.category))
        .collect();

    // `sort_by` is stable
    kept.sort_by(|a, b| b.pass.cmp(&a.pass));
    kept
}
