//! Statistics-file record parsing.
//!
//! Each line of an LTP statistics file looks like
//!
//! ```text
//! name            type        pass    fail+broken
//! abort01         all pass    2       0
//! fcntl36         part fail   5       3
//! ```
//!
//! The first token is the test name, the last two are counts and whatever
//! sits between them is the category. Blank lines, `//` comments and the
//! header row are ignored. Anything else that does not fit the shape is
//! logged and dropped; a bad line never aborts a run.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Minimum token count: name, at least one category word, pass, fail.
pub const MIN_FIELDS: usize = 4;

/// Marker that starts a comment line.
pub const COMMENT_PREFIX: &str = "//";

/// One parsed test summary line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub name: String,
    /// Free-form outcome label, e.g. "all pass" or "part fail"
    pub category: String,
    pub pass: i64,
    /// Failed plus broken units
    pub fail_broken: i64,
    /// 1-based line number in the source file
    pub line_no: usize,
    /// The trimmed source line
    #[serde(skip)]
    pub source_line: String,
}

impl TestRecord {
    pub fn total_units(&self) -> i64 {
        self.pass.saturating_add(self.fail_broken)
    }
}

/// Why a line was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    TooFewFields(usize),
    BadCount(String),
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewFields(n) => write!(f, "expected at least {MIN_FIELDS} fields, found {n}"),
            Self::BadCount(tok) => write!(f, "count '{tok}' is not an integer"),
        }
    }
}

/// Classification of a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Record(TestRecord),
    Blank,
    Comment,
    Header,
    Malformed(MalformedReason),
}

/// Classify one raw line. `line_no` is 1-based.
pub fn parse_line(line_no: usize, raw: &str) -> ParsedLine {
    let line = raw.trim();
    if line.is_empty() {
        return ParsedLine::Blank;
    }
    if line.starts_with(COMMENT_PREFIX) {
        return ParsedLine::Comment;
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens[0].eq_ignore_ascii_case("name") {
        return ParsedLine::Header;
    }
    if tokens.len() < MIN_FIELDS {
        return ParsedLine::Malformed(MalformedReason::TooFewFields(tokens.len()));
    }

    let last = tokens.len() - 1;
    let fail_broken = match tokens[last].parse::<i64>() {
        Ok(n) => n,
        Err(_) => return ParsedLine::Malformed(MalformedReason::BadCount(tokens[last].to_string())),
    };
    let pass = match tokens[last - 1].parse::<i64>() {
        Ok(n) => n,
        Err(_) => {
            return ParsedLine::Malformed(MalformedReason::BadCount(tokens[last - 1].to_string()))
        }
    };

    ParsedLine::Record(TestRecord {
        name: tokens[0].to_string(),
        category: tokens[1..last - 1].join(" "),
        pass,
        fail_broken,
        line_no,
        source_line: line.to_string(),
    })
}

/// Per-run line counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    pub records: usize,
    pub blank: usize,
    pub comments: usize,
    pub headers: usize,
    pub malformed: usize,
}

impl ParseStats {
    pub fn lines_seen(&self) -> usize {
        self.records + self.blank + self.comments + self.headers + self.malformed
    }
}

/// Lazy record stream over the content of a statistics file.
///
/// Yields records in file order. Skipped lines are counted in
/// [`RecordParser::stats`], which is complete once the iterator is drained.
pub struct RecordParser<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    stats: ParseStats,
}

impl<'a> RecordParser<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines().enumerate(),
            stats: ParseStats::default(),
        }
    }

    pub fn stats(&self) -> ParseStats {
        self.stats
    }
}

impl Iterator for RecordParser<'_> {
    type Item = TestRecord;

    fn next(&mut self) -> Option<TestRecord> {
        for (idx, raw) in self.lines.by_ref() {
            let line_no = idx + 1;
            match parse_line(line_no, raw) {
                ParsedLine::Record(record) => {
                    self.stats.records += 1;
                    return Some(record);
                }
                ParsedLine::Blank => self.stats.blank += 1,
                ParsedLine::Comment => self.stats.comments += 1,
                ParsedLine::Header => {
                    debug!("Skipping header at line {line_no}");
                    self.stats.headers += 1;
                }
                ParsedLine::Malformed(reason) => {
                    warn!("Cannot parse line {line_no} ({reason}): {}", raw.trim());
                    self.stats.malformed += 1;
                }
            }
        }
        None
    }
}

/// Drain a parser into a vector, returning the final counters alongside.
pub fn parse_records(content: &str) -> (Vec<TestRecord>, ParseStats) {
    let mut parser = RecordParser::new(content);
    let records: Vec<TestRecord> = parser.by_ref().collect();
    (records, parser.stats())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(line: &str) -> TestRecord {
        match parse_line(1, line) {
            ParsedLine::Record(r) => r,
            other => panic!("expected a record, got {other:?}"),
        }
    }

    #[test]
    fn test_well_formed_line() {
        let r = record("test01  all pass   10   0");
        assert_eq!(r.name, "test01");
        assert_eq!(r.category, "all pass");
        assert_eq!(r.pass, 10);
        assert_eq!(r.fail_broken, 0);
        assert_eq!(r.total_units(), 10);
        assert_eq!(r.source_line, "test01  all pass   10   0");
    }

    #[test]
    fn test_whitespace_run_length_is_irrelevant() {
        let a = record("fcntl36 part fail 5 3");
        let b = record("\t fcntl36\t\tpart    fail \t 5\t\t3  \r");
        assert_eq!(a.name, b.name);
        assert_eq!(a.category, b.category);
        assert_eq!((a.pass, a.fail_broken), (b.pass, b.fail_broken));
    }

    #[test]
    fn test_single_word_category() {
        let r = record("getpid01 skip 0 0");
        assert_eq!(r.category, "skip");
    }

    #[test]
    fn test_skipped_lines() {
        assert_eq!(parse_line(1, ""), ParsedLine::Blank);
        assert_eq!(parse_line(1, "   \t "), ParsedLine::Blank);
        assert_eq!(parse_line(1, "// generated 2024-06-01"), ParsedLine::Comment);
        assert_eq!(parse_line(1, "  //x 1 2 3"), ParsedLine::Comment);
        assert_eq!(parse_line(1, "name type pass fail+broken"), ParsedLine::Header);
        assert_eq!(parse_line(1, "NAME\tTYPE\tPASS\tFAIL"), ParsedLine::Header);
    }

    #[test]
    fn test_name_prefixed_test_is_not_a_header() {
        let r = record("name_to_handle_at01 all pass 4 0");
        assert_eq!(r.name, "name_to_handle_at01");
    }

    #[test]
    fn test_too_few_fields() {
        assert_eq!(
            parse_line(3, "test03 foo"),
            ParsedLine::Malformed(MalformedReason::TooFewFields(2))
        );
        assert_eq!(
            parse_line(3, "test03 1 2"),
            ParsedLine::Malformed(MalformedReason::TooFewFields(3))
        );
    }

    #[test]
    fn test_non_integer_counts() {
        assert_eq!(
            parse_line(1, "test04 all pass ten 0"),
            ParsedLine::Malformed(MalformedReason::BadCount("ten".to_string()))
        );
        assert_eq!(
            parse_line(1, "test05 all pass 1 0.5"),
            ParsedLine::Malformed(MalformedReason::BadCount("0.5".to_string()))
        );
    }

    #[test]
    fn test_negative_counts_are_accepted() {
        let r = record("odd01 part fail -2 3");
        assert_eq!(r.pass, -2);
        assert_eq!(r.total_units(), 1);
    }

    #[test]
    fn test_parser_keeps_file_order_and_counts() {
        let content = "\
name type pass fail
// comment

a01 all pass 1 0
bad line
a01 all pass 1 0
b02 part fail 3 x
c03 skip 0 0
";
        let (records, stats) = parse_records(content);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a01", "a01", "c03"]);
        assert_eq!(records.iter().map(|r| r.line_no).collect::<Vec<_>>(), vec![4, 6, 8]);
        assert_eq!(
            stats,
            ParseStats { records: 3, blank: 1, comments: 1, headers: 1, malformed: 2 }
        );
        assert_eq!(stats.lines_seen(), 8);
    }
}
