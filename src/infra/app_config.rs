use crate::domain::is_valid_project_key;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User configuration, read once per pipeline run and never written by the
/// pipeline itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub jira_host: String,
    pub jira_bearer_token: String,
    /// Ordered project key list; order is the tie-break when a summary
    /// matches more than one key.
    pub project_keys: Vec<String>,
    pub inline_committer: bool,
    pub inline_relative_commit_time: bool,
    pub inline_jira_issue_key: bool,
    pub inline_commit_message: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            jira_host: String::new(),
            jira_bearer_token: String::new(),
            project_keys: Vec::new(),
            inline_committer: true,
            inline_relative_commit_time: true,
            inline_jira_issue_key: true,
            inline_commit_message: true,
        }
    }
}

pub fn load_config() -> AppConfig {
    let path = config_path();
    let Ok(contents) = std::fs::read_to_string(&path) else {
        return AppConfig::default();
    };
    parse_config(&contents)
}

/// Keys that could never match a summary are dropped up front rather than
/// failing silently on every extraction.
fn parse_config(contents: &str) -> AppConfig {
    let mut config: AppConfig = toml::from_str(contents).unwrap_or_default();
    config.project_keys.retain(|key| {
        if is_valid_project_key(key) {
            return true;
        }
        log::warn!("ignoring invalid project key {key:?}");
        false
    });
    config
}

fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("LINELENS_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    app_data_dir().join("config.toml")
}

fn app_data_dir() -> PathBuf {
    if let Some(path) = std::env::var_os("LINELENS_DATA_HOME") {
        return PathBuf::from(path);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = home::home_dir() {
            return home
                .join("Library")
                .join("Application Support")
                .join("Linelens");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("Linelens");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("linelens");
        }
        if let Some(home) = home::home_dir() {
            return home.join(".local").join("share").join("linelens");
        }
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".linelens")
}
