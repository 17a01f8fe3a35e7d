//! One-shot command line front end: annotates a single file line the same
//! way the editor surfaces would, printing the result to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use linelens::domain::{EditorContext, EditorId};
use linelens::infra::app_config::load_config;
use linelens::infra::git::GitBlame;
use linelens::infra::host::EditorHost;
use linelens::infra::jira::{JiraClient, issue_browse_url};
use linelens::render::DetailContent;
use linelens::state::Services;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "linelens",
    about = "Annotate a file line with git attribution and linked Jira issue details"
)]
struct Cli {
    /// File to annotate
    file: PathBuf,
    /// Line number (1-based)
    line: u32,
}

/// Fixed host for one-shot invocations: the "active editor" is the
/// requested file and line for the whole run.
struct CliHost {
    context: EditorContext,
    repo_root: PathBuf,
}

impl EditorHost for CliHost {
    fn active_context(&self) -> Option<EditorContext> {
        Some(self.context.clone())
    }

    fn workspace_root(&self, _document: &Path) -> Option<PathBuf> {
        Some(self.repo_root.clone())
    }
}

fn repo_root_for(file: &Path) -> Result<PathBuf> {
    let dir = file.parent().filter(|p| !p.as_os_str().is_empty());
    let output = std::process::Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(dir.unwrap_or(Path::new(".")))
        .output()
        .context("run `git rev-parse`")?;
    if !output.status.success() {
        anyhow::bail!("{} is not inside a git repository", file.display());
    }
    let root = String::from_utf8(output.stdout).context("decode `git rev-parse` stdout")?;
    Ok(PathBuf::from(root.trim()))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    if cli.line == 0 {
        anyhow::bail!("line numbers are 1-based");
    }

    let file = cli.file.canonicalize().context("resolve file path")?;
    let repo_root = repo_root_for(&file)?;
    let config = load_config();
    let jira_host = config.jira_host.clone();

    let host = Arc::new(CliHost {
        context: EditorContext::new(file, EditorId(0), cli.line - 1),
        repo_root,
    });
    let services = Services::new(
        host,
        Arc::new(GitBlame),
        Arc::new(JiraClient::new(
            config.jira_host.clone(),
            config.jira_bearer_token.clone(),
        )),
        config,
    );

    services.coordinator.run().await;

    match services.inline.visible_text() {
        Some(text) => println!("{text}"),
        None => println!("(no annotation)"),
    }
    match services.detail.content() {
        DetailContent::Issue { issue_key, payload } => {
            println!();
            println!("{issue_key}: {}", payload.fields.summary);
            println!("Status: {}", payload.fields.status.name);
            let assignee = payload
                .fields
                .assignee
                .map(|user| user.display_name)
                .unwrap_or_else(|| "Unassigned".to_string());
            println!("Assignee: {assignee}");
            if !payload.fields.fix_versions.is_empty() {
                let versions: Vec<_> = payload
                    .fields
                    .fix_versions
                    .iter()
                    .map(|version| version.name.as_str())
                    .collect();
                println!("Fix Version/s: {}", versions.join(", "));
            }
            println!("{}", issue_browse_url(&jira_host, &issue_key));
        }
        DetailContent::Failed { message, .. } => {
            println!();
            println!("{message}");
        }
        DetailContent::NoIssue | DetailContent::Loading { .. } => {}
    }

    Ok(())
}
