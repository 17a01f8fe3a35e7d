//! Inline annotation text composition.

use crate::domain::BlameRecord;
use crate::infra::app_config::AppConfig;

/// Fixed display text for lines with local, uncommitted edits.
pub const UNCOMMITTED_MESSAGE: &str = "Not committed yet";

const SUMMARY_LENGTH_LIMIT: usize = 30;
const FIELD_SEPARATOR: &str = " • ";

/// Compose the inline text: author, relative commit age, issue key, and
/// truncated summary, each gated by its configuration flag. Returns the
/// fixed uncommitted message for uncommitted lines and an empty string when
/// every field is disabled.
pub fn inline_message(record: &BlameRecord, issue_key: &str, config: &AppConfig) -> String {
    if record.is_uncommitted() {
        return UNCOMMITTED_MESSAGE.to_string();
    }
    let mut parts = Vec::new();
    if config.inline_committer {
        parts.push(record.author.clone());
    }
    if config.inline_relative_commit_time {
        let now = chrono::Utc::now().timestamp();
        parts.push(relative_time_passed(now, record.committer_time));
    }
    if config.inline_jira_issue_key && !issue_key.is_empty() {
        parts.push(issue_key.to_string());
    }
    if config.inline_commit_message {
        parts.push(truncate_summary(&record.summary));
    }
    parts.join(FIELD_SEPARATOR)
}

/// "N unit(s) ago" with second/minute/hour/day/month/year buckets, 30-day
/// months and 365-day years, rounded to the nearest unit. Both arguments in
/// unix seconds.
pub fn relative_time_passed(now: i64, then: i64) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = MINUTE * 60;
    const DAY: i64 = HOUR * 24;
    const MONTH: i64 = DAY * 30;
    const YEAR: i64 = DAY * 365;

    let elapsed = (now - then).max(0);
    let (divisor, unit) = if elapsed < MINUTE {
        (1, "second")
    } else if elapsed < HOUR {
        (MINUTE, "minute")
    } else if elapsed < DAY {
        (HOUR, "hour")
    } else if elapsed < MONTH {
        (DAY, "day")
    } else if elapsed < YEAR {
        (MONTH, "month")
    } else {
        (YEAR, "year")
    };
    let value = (elapsed as f64 / divisor as f64).round() as i64;
    let plural = if value > 1 { "s" } else { "" };
    format!("{value} {unit}{plural} ago")
}

/// Word-boundary truncation of the commit summary to roughly 30 characters.
fn truncate_summary(summary: &str) -> String {
    if summary.len() < SUMMARY_LENGTH_LIMIT {
        return summary.to_string();
    }
    let mut truncated = String::new();
    for word in summary.split(' ') {
        if truncated.len() + word.len() >= SUMMARY_LENGTH_LIMIT {
            break;
        }
        truncated.push_str(word);
        truncated.push(' ');
    }
    format!("{}...", truncated.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UNCOMMITTED_AUTHOR;

    fn record(author: &str, summary: &str, committer_time: i64) -> BlameRecord {
        BlameRecord {
            commit: "a1b2c3".into(),
            author: author.into(),
            author_mail: "<dev@example.com>".into(),
            author_time: committer_time,
            committer: author.into(),
            committer_mail: "<dev@example.com>".into(),
            committer_time,
            summary: summary.into(),
            filename: "src/lib.rs".into(),
            line_content: "code".into(),
        }
    }

    #[test]
    fn test_uncommitted_short_circuit() {
        let record = record(UNCOMMITTED_AUTHOR, "whatever", 0);
        assert_eq!(
            inline_message(&record, "", &AppConfig::default()),
            "Not committed yet"
        );
    }

    #[test]
    fn test_inline_message_all_fields() {
        let now = chrono::Utc::now().timestamp();
        let record = record("Ada", "Fix login PROJ-1", now - 120);
        let message = inline_message(&record, "PROJ-1", &AppConfig::default());
        assert_eq!(message, "Ada • 2 minutes ago • PROJ-1 • Fix login PROJ-1");
    }

    #[test]
    fn test_inline_message_respects_flags() {
        let config = AppConfig {
            inline_relative_commit_time: false,
            inline_jira_issue_key: false,
            inline_commit_message: false,
            ..AppConfig::default()
        };
        let record = record("Ada", "Fix login", 0);
        assert_eq!(inline_message(&record, "PROJ-1", &config), "Ada");
    }

    #[test]
    fn test_inline_message_empty_when_all_disabled() {
        let config = AppConfig {
            inline_committer: false,
            inline_relative_commit_time: false,
            inline_jira_issue_key: false,
            inline_commit_message: false,
            ..AppConfig::default()
        };
        let record = record("Ada", "Fix login", 0);
        assert_eq!(inline_message(&record, "PROJ-1", &config), "");
    }

    #[test]
    fn test_inline_message_omits_empty_key() {
        let config = AppConfig {
            inline_committer: false,
            inline_relative_commit_time: false,
            ..AppConfig::default()
        };
        let record = record("Ada", "Fix login", 0);
        assert_eq!(inline_message(&record, "", &config), "Fix login");
    }

    #[test]
    fn test_relative_time_buckets() {
        assert_eq!(relative_time_passed(45, 0), "45 seconds ago");
        assert_eq!(relative_time_passed(60, 0), "1 minute ago");
        assert_eq!(relative_time_passed(150, 0), "3 minutes ago");
        assert_eq!(relative_time_passed(7_200, 0), "2 hours ago");
        assert_eq!(relative_time_passed(86_400 * 3, 0), "3 days ago");
        assert_eq!(relative_time_passed(86_400 * 65, 0), "2 months ago");
        assert_eq!(relative_time_passed(86_400 * 800, 0), "2 years ago");
        // Clock skew: commits from the "future" count as just now. Only
        // values above one pluralize, so zero stays singular.
        assert_eq!(relative_time_passed(0, 100), "0 second ago");
    }

    #[test]
    fn test_truncate_summary() {
        let record = record("Ada", "Refactor the authentication session handling layer", 0);
        let config = AppConfig {
            inline_committer: false,
            inline_relative_commit_time: false,
            inline_jira_issue_key: false,
            ..AppConfig::default()
        };
        assert_eq!(
            inline_message(&record, "", &config),
            "Refactor the authentication..."
        );
    }

    #[test]
    fn test_short_summary_untouched() {
        let record = record("Ada", "Fix login", 0);
        let config = AppConfig {
            inline_committer: false,
            inline_relative_commit_time: false,
            inline_jira_issue_key: false,
            ..AppConfig::default()
        };
        assert_eq!(inline_message(&record, "", &config), "Fix login");
    }
}
