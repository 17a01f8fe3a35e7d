/// Author name git reports for lines that have local, uncommitted edits.
pub const UNCOMMITTED_AUTHOR: &str = "Not Committed Yet";

/// One line's attribution as produced by a single
/// `git blame --porcelain -L<n>,+1` invocation. Created fresh per pipeline
/// run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlameRecord {
    pub commit: String,
    pub author: String,
    pub author_mail: String,
    pub author_time: i64,
    pub committer: String,
    pub committer_mail: String,
    pub committer_time: i64,
    pub summary: String,
    pub filename: String,
    pub line_content: String,
}

impl BlameRecord {
    /// The line has local edits not yet part of any commit. Runs for such
    /// lines render a fixed message and skip the issue-tracker lookup.
    pub fn is_uncommitted(&self) -> bool {
        self.author == UNCOMMITTED_AUTHOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(author: &str) -> BlameRecord {
        BlameRecord {
            commit: "a1b2c3".into(),
            author: author.into(),
            author_mail: "<dev@example.com>".into(),
            author_time: 1_700_000_000,
            committer: author.into(),
            committer_mail: "<dev@example.com>".into(),
            committer_time: 1_700_000_000,
            summary: "Fix login bug".into(),
            filename: "src/lib.rs".into(),
            line_content: "fn main() {}".into(),
        }
    }

    #[test]
    fn test_uncommitted_sentinel() {
        assert!(record(UNCOMMITTED_AUTHOR).is_uncommitted());
        assert!(!record("Ada Lovelace").is_uncommitted());
    }
}
