use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

lazy_static! {
    static ref PROJECT_KEY_RE: Regex = Regex::new(r"^[A-Z0-9]+$").expect("project key regex");
}

pub fn is_valid_project_key(key: &str) -> bool {
    PROJECT_KEY_RE.is_match(key)
}

/// Derive the issue key referenced by a commit summary.
///
/// For each configured project key, in configured order, matches
/// `KEY-?<digits>` (examples: `JRL-123`, `JRL12345`) and returns the first
/// match of the first key that matches anything. Commit summaries are
/// expected to reference at most one issue; when they do not, the configured
/// order is the tie-break. Returns an empty string when nothing matches.
pub fn extract_issue_key(summary: &str, project_keys: &[String]) -> String {
    for key in project_keys {
        let pattern = format!(r"{}-?\d+", regex::escape(key));
        let Ok(re) = Regex::new(&pattern) else {
            continue;
        };
        if let Some(found) = re.find(summary) {
            return found.as_str().to_string();
        }
    }
    String::new()
}

/// Jira issue content as returned by the REST `issue` resource. Only the
/// fields the surfaces render are deserialized; everything else is dropped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssuePayload {
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssueFields {
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: IssueStatus,
    #[serde(default)]
    pub assignee: Option<IssueUser>,
    #[serde(default, rename = "fixVersions")]
    pub fix_versions: Vec<IssueVersion>,
    #[serde(default)]
    pub attachment: Vec<IssueAttachment>,
    #[serde(default)]
    pub comment: Option<IssueComments>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssueStatus {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssueUser {
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssueVersion {
    pub name: String,
    #[serde(default, rename = "releaseDate")]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssueAttachment {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssueComments {
    #[serde(default)]
    pub comments: Vec<IssueComment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssueComment {
    #[serde(default)]
    pub author: Option<IssueUser>,
    pub body: String,
    pub created: String,
}

/// Terminal result of one remote fetch. All three variants are handled by
/// the pipeline; none is left pending.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Issue(IssuePayload),
    NotFound,
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_extract_issue_key_basic() {
        assert_eq!(
            extract_issue_key("Fix login bug PROJ-123 patch", &keys(&["PROJ"])),
            "PROJ-123"
        );
    }

    #[test]
    fn test_extract_issue_key_without_separator() {
        assert_eq!(
            extract_issue_key("JRL12345 tweak retry backoff", &keys(&["JRL"])),
            "JRL12345"
        );
    }

    #[test]
    fn test_extract_issue_key_no_match() {
        assert_eq!(extract_issue_key("Bump dependencies", &keys(&["PROJ"])), "");
        assert_eq!(extract_issue_key("PROJ-123", &[]), "");
    }

    #[test]
    fn test_extract_issue_key_configured_order_wins() {
        let summary = "ABC-1 relates to XYZ-2";
        assert_eq!(extract_issue_key(summary, &keys(&["XYZ", "ABC"])), "XYZ-2");
        assert_eq!(extract_issue_key(summary, &keys(&["ABC", "XYZ"])), "ABC-1");
    }

    #[test]
    fn test_extract_issue_key_first_match_per_key() {
        assert_eq!(
            extract_issue_key("PROJ-1 supersedes PROJ-2", &keys(&["PROJ"])),
            "PROJ-1"
        );
    }

    #[test]
    fn test_is_valid_project_key() {
        assert!(is_valid_project_key("PROJ"));
        assert!(is_valid_project_key("AB2"));
        assert!(!is_valid_project_key("proj"));
        assert!(!is_valid_project_key("PR-J"));
        assert!(!is_valid_project_key(""));
    }

    #[test]
    fn test_issue_payload_deserializes_sparse_fields() {
        let json = r#"{
            "key": "PROJ-123",
            "fields": {
                "summary": "Login fails on expired token",
                "status": { "name": "In Progress" }
            }
        }"#;
        let payload: IssuePayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.key, "PROJ-123");
        assert_eq!(payload.fields.status.name, "In Progress");
        assert!(payload.fields.assignee.is_none());
        assert!(payload.fields.fix_versions.is_empty());
        assert!(payload.fields.attachment.is_empty());
    }
}
