//! Fixtures shared by ltpstat tests.

use std::path::{Path, PathBuf};

pub use pretty_assertions;

/// A small statistics file covering every line shape the parser handles.
pub const SAMPLE_STATISTICS: &str = "\
// LTP statistics, syscalls run
name                type        pass    fail+broken
test01  all pass   10   0
test02  part fail  5  3

abort01             all pass    2       0
test03 foo
fcntl36             part fail   12      4
getpid01            skip        0       0
madvise06           all fail    0       6
mmap18              skip pass   7       0
oom01               part fail   five    2
kill11              all fail    0       25
clone08             all pass    2       0
";

/// A scratch directory holding a statistics file.
pub struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Create a workspace with `content` written to `ltp-statistic.txt`.
    pub fn with_statistics(content: &str) -> Self {
        let ws = Self::new();
        ws.write("ltp-statistic.txt", content);
        ws
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.join(name);
        std::fs::write(&path, content).expect("write fixture");
        path
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.join(name)).expect("read artifact")
    }

    pub fn exists(&self, name: &str) -> bool {
        self.join(name).exists()
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
