use crate::domain::{BlameError, BlameRecord};
use anyhow::Context;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// History lookup for exactly one line. One subprocess invocation per call;
/// calls are never pooled, rate-limited, or deduplicated across runs.
#[async_trait]
pub trait BlameLookup: Send + Sync {
    async fn lookup(
        &self,
        file: &Path,
        line: u32,
        repo_root: &Path,
    ) -> Result<BlameRecord, BlameError>;
}

/// `git blame` subprocess implementation.
pub struct GitBlame;

#[async_trait]
impl BlameLookup for GitBlame {
    async fn lookup(
        &self,
        file: &Path,
        line: u32,
        repo_root: &Path,
    ) -> Result<BlameRecord, BlameError> {
        // git line numbers are 1-based, editor lines 0-based
        let range = format!("-L{},+1", line + 1);
        let output = Command::new("git")
            .args(["blame", "--porcelain", &range])
            .arg(file)
            .current_dir(repo_root)
            .output()
            .await
            .context("run `git blame`")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("no such path") || stderr.contains("not a git repository") {
                return Err(BlameError::NotTracked(file.display().to_string()));
            }
            return Err(BlameError::CommandFailed(anyhow::anyhow!(format!(
                "`git blame` failed: {stderr}"
            ))));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_porcelain(&stdout)
    }
}

/// Parse single-line `git blame --porcelain` output. The first line is the
/// commit header, the tab-prefixed line is the content itself, everything
/// between is `key value` pairs.
pub fn parse_porcelain(blame: &str) -> Result<BlameRecord, BlameError> {
    let mut lines = blame.trim_end().lines();
    let header = lines.next().ok_or(BlameError::EmptyOutput)?;
    let commit = header
        .split_whitespace()
        .next()
        .ok_or_else(|| BlameError::Malformed("empty commit header".into()))?
        .to_string();

    let mut author = None;
    let mut author_mail = String::new();
    let mut author_time = 0;
    let mut committer = String::new();
    let mut committer_mail = String::new();
    let mut committer_time = 0;
    let mut summary = None;
    let mut filename = String::new();
    let mut line_content = String::new();

    for line in lines {
        if let Some(content) = line.strip_prefix('\t') {
            line_content = content.to_string();
            break;
        }
        let (key, value) = line.split_once(' ').unwrap_or((line, ""));
        match key {
            "author" => author = Some(value.to_string()),
            "author-mail" => author_mail = value.to_string(),
            "author-time" => author_time = parse_timestamp(key, value)?,
            "committer" => committer = value.to_string(),
            "committer-mail" => committer_mail = value.to_string(),
            "committer-time" => committer_time = parse_timestamp(key, value)?,
            "summary" => summary = Some(value.to_string()),
            "filename" => filename = value.to_string(),
            _ => {}
        }
    }

    Ok(BlameRecord {
        commit,
        author: author.ok_or_else(|| BlameError::Malformed("missing author".into()))?,
        author_mail,
        author_time,
        committer,
        committer_mail,
        committer_time,
        summary: summary.ok_or_else(|| BlameError::Malformed("missing summary".into()))?,
        filename,
        line_content,
    })
}

fn parse_timestamp(key: &str, value: &str) -> Result<i64, BlameError> {
    value
        .parse()
        .map_err(|_| BlameError::Malformed(format!("bad {key}: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UNCOMMITTED_AUTHOR;

    const PORCELAIN: &str = "\
4d2e5c7a8f9b0c1d2e3f4a5b6c7d8e9f0a1b2c3d 12 12 1
author Ada Lovelace
author-mail <ada@example.com>
author-time 1700000000
author-tz +0100
committer Charles Babbage
committer-mail <charles@example.com>
committer-time 1700000100
committer-tz +0100
summary Fix login bug PROJ-123 patch
previous 1111111111111111111111111111111111111111 src/auth.rs
filename src/auth.rs
\tlet token = session.refresh()?;
";

    #[test]
    fn test_parse_porcelain() {
        let record = parse_porcelain(PORCELAIN).unwrap();
        assert_eq!(record.commit, "4d2e5c7a8f9b0c1d2e3f4a5b6c7d8e9f0a1b2c3d");
        assert_eq!(record.author, "Ada Lovelace");
        assert_eq!(record.author_mail, "<ada@example.com>");
        assert_eq!(record.author_time, 1_700_000_000);
        assert_eq!(record.committer, "Charles Babbage");
        assert_eq!(record.committer_time, 1_700_000_100);
        assert_eq!(record.summary, "Fix login bug PROJ-123 patch");
        assert_eq!(record.filename, "src/auth.rs");
        assert_eq!(record.line_content, "let token = session.refresh()?;");
    }

    #[test]
    fn test_parse_porcelain_uncommitted() {
        let blame = "\
0000000000000000000000000000000000000000 3 3 1
author Not Committed Yet
author-mail <not.committed.yet>
author-time 1700000000
author-tz +0000
committer Not Committed Yet
committer-mail <not.committed.yet>
committer-time 1700000000
committer-tz +0000
summary Version of src/auth.rs from src/auth.rs
filename src/auth.rs
\tlocal edit
";
        let record = parse_porcelain(blame).unwrap();
        assert_eq!(record.author, UNCOMMITTED_AUTHOR);
        assert!(record.is_uncommitted());
    }

    #[test]
    fn test_parse_porcelain_empty() {
        assert!(matches!(parse_porcelain(""), Err(BlameError::EmptyOutput)));
    }

    #[test]
    fn test_parse_porcelain_missing_fields() {
        let blame = "4d2e5c7a 1 1 1\nfilename src/auth.rs\n\tcontent\n";
        assert!(matches!(
            parse_porcelain(blame),
            Err(BlameError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_lookup_real_repo() {
        let dir = tempfile::tempdir().unwrap();
        let repo = dir.path();
        let init = std::process::Command::new("git")
            .args(["init"])
            .current_dir(repo)
            .status()
            .unwrap();
        if !init.success() {
            return; // Skip if git is not installed
        }
        for (key, value) in [("user.name", "Test"), ("user.email", "test@example.com")] {
            std::process::Command::new("git")
                .args(["config", key, value])
                .current_dir(repo)
                .status()
                .unwrap();
        }
        std::fs::write(repo.join("file.txt"), "hello\n").unwrap();
        std::process::Command::new("git")
            .args(["add", "file.txt"])
            .current_dir(repo)
            .status()
            .unwrap();
        std::process::Command::new("git")
            .args(["commit", "-m", "Add file PROJ-7"])
            .current_dir(repo)
            .status()
            .unwrap();

        let record = GitBlame
            .lookup(Path::new("file.txt"), 0, repo)
            .await
            .unwrap();
        assert_eq!(record.author, "Test");
        assert_eq!(record.summary, "Add file PROJ-7");
        assert_eq!(record.line_content, "hello");
    }

    #[tokio::test]
    async fn test_lookup_outside_repo_is_not_tracked() {
        if std::process::Command::new("git")
            .arg("--version")
            .status()
            .is_err()
        {
            return; // Skip if git is not installed
        }
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("file.txt"), "hello\n").unwrap();
        let result = GitBlame.lookup(Path::new("file.txt"), 0, dir.path()).await;
        assert!(matches!(result, Err(BlameError::NotTracked(_))));
    }
}
