use crate::domain::{FetchOutcome, IssuePayload};
use async_trait::async_trait;

/// Remote issue fetch. Every outcome is terminal; the client never leaves a
/// request pending from the pipeline's point of view and never panics.
#[async_trait]
pub trait IssueClient: Send + Sync {
    async fn fetch(&self, issue_key: &str) -> FetchOutcome;
}

/// Jira REST v2 client with bearer authentication.
pub struct JiraClient {
    http: reqwest::Client,
    host: String,
    bearer_token: String,
}

impl JiraClient {
    pub fn new(host: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            host: host.into(),
            bearer_token: bearer_token.into(),
        }
    }

    fn issue_api_url(&self, issue_key: &str) -> String {
        format!("https://{}/rest/api/2/issue/{}", self.host, issue_key)
    }
}

/// Browser-facing link for an issue key.
pub fn issue_browse_url(host: &str, issue_key: &str) -> String {
    format!("https://{host}/browse/{issue_key}")
}

#[async_trait]
impl IssueClient for JiraClient {
    async fn fetch(&self, issue_key: &str) -> FetchOutcome {
        let response = match self
            .http
            .get(self.issue_api_url(issue_key))
            .bearer_auth(&self.bearer_token)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return FetchOutcome::Failed(err.to_string()),
        };

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return FetchOutcome::NotFound;
        }
        if !response.status().is_success() {
            return FetchOutcome::Failed(format!("Jira responded with {}", response.status()));
        }

        match response.json::<IssuePayload>().await {
            Ok(payload) => FetchOutcome::Issue(payload),
            Err(err) => FetchOutcome::Failed(format!("decode Jira issue: {err}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_urls() {
        let client = JiraClient::new("jira.example.com", "token");
        assert_eq!(
            client.issue_api_url("PROJ-123"),
            "https://jira.example.com/rest/api/2/issue/PROJ-123"
        );
        assert_eq!(
            issue_browse_url("jira.example.com", "PROJ-123"),
            "https://jira.example.com/browse/PROJ-123"
        );
    }
}
