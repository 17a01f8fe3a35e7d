use crate::application::message::{UNCOMMITTED_MESSAGE, inline_message};
use crate::application::resolve::{ContextResolver, Resolution};
use crate::domain::{FetchOutcome, StalenessGuard, extract_issue_key};
use crate::infra::app_config::AppConfig;
use crate::infra::host::EditorHost;
use crate::infra::jira::IssueClient;
use crate::render::{DetailPanel, HoverContent, InlineAnnotation, StatusIndicator};
use parking_lot::RwLock;
use std::sync::Arc;

/// Orchestrates one pipeline run:
/// `resolving -> cheap-render -> (done | fetching -> applying-or-discarding)`.
///
/// Runs are never coalesced; any number may be in flight concurrently and
/// their lookups may complete in any order. Correctness rests entirely on
/// the staleness check each surface applies immediately before writing.
/// Superseded work is discarded on completion, never cancelled.
pub struct RenderCoordinator {
    host: Arc<dyn EditorHost>,
    resolver: ContextResolver,
    issues: Arc<dyn IssueClient>,
    config: Arc<RwLock<AppConfig>>,
    status: Arc<StatusIndicator>,
    inline: Arc<InlineAnnotation>,
    detail: Arc<DetailPanel>,
}

impl RenderCoordinator {
    pub fn new(
        host: Arc<dyn EditorHost>,
        resolver: ContextResolver,
        issues: Arc<dyn IssueClient>,
        config: Arc<RwLock<AppConfig>>,
        status: Arc<StatusIndicator>,
        inline: Arc<InlineAnnotation>,
        detail: Arc<DetailPanel>,
    ) -> Self {
        Self {
            host,
            resolver,
            issues,
            config,
            status,
            inline,
            detail,
        }
    }

    /// External invalidation, e.g. after a configuration change.
    pub fn hide_all(&self) {
        self.status.hide();
        self.inline.hide();
        self.detail.show_no_issue();
    }

    /// One end-to-end pipeline run for the current editor context. Every
    /// path terminates in a defined render state; no error escapes.
    pub async fn run(&self) {
        let resolution = match self.resolver.resolve().await {
            Ok(resolution) => resolution,
            Err(err) => {
                log::warn!("blame lookup failed: {err}");
                self.hide_all();
                return;
            }
        };
        let Resolution::Resolved { context, record } = resolution else {
            self.hide_all();
            return;
        };

        let guard = StalenessGuard::new(context);
        let config = self.config.read().clone();

        // cheap-render: inline text and key derivation, no suspension yet.
        let (issue_key, message) = if record.is_uncommitted() {
            (String::new(), UNCOMMITTED_MESSAGE.to_string())
        } else {
            let issue_key = extract_issue_key(&record.summary, &config.project_keys);
            let message = inline_message(&record, &issue_key, &config);
            (issue_key, message)
        };

        self.status.show(&issue_key, &guard);
        self.inline.show(&message, &guard);

        if issue_key.is_empty() {
            // Normal terminal state: no issue referenced by this commit.
            // The clears are guarded like any other write; a superseded run
            // must not wipe a newer run's remote content.
            if !guard.is_stale(self.host.active_context().as_ref()) {
                self.inline.clear_hover();
                self.detail.show_no_issue();
            }
            return;
        }

        // Idempotent short-circuit: the panel already shows this key.
        // The hover is scoped per line, so it still redoes its
        // loading-then-resolved sequence, from cache when possible.
        let refresh_panel = self.detail.current_key().as_deref() != Some(issue_key.as_str());

        self.inline.set_hover_loading(&guard);
        if refresh_panel {
            self.detail.show_loading(&issue_key, &guard);
        }

        let outcome = if !refresh_panel
            && let Some(payload) = self.detail.cached_payload(&issue_key)
        {
            FetchOutcome::Issue(payload)
        } else {
            self.issues.fetch(&issue_key).await
        };

        // applying-or-discarding: the fetch was a suspension point, so the
        // cursor may have moved on. Stale results are dropped silently.
        if guard.is_stale(self.host.active_context().as_ref()) {
            return;
        }

        match outcome {
            FetchOutcome::Issue(payload) => {
                self.inline.set_hover(
                    HoverContent::Issue {
                        issue_key: issue_key.clone(),
                        payload: payload.clone(),
                    },
                    &guard,
                );
                if refresh_panel {
                    self.detail.show_issue(&issue_key, payload, &guard);
                }
            }
            FetchOutcome::NotFound => {
                self.apply_failure(&issue_key, refresh_panel, &guard);
            }
            FetchOutcome::Failed(reason) => {
                log::warn!("issue fetch for {issue_key} failed: {reason}");
                self.apply_failure(&issue_key, refresh_panel, &guard);
            }
        }
    }

    fn apply_failure(&self, issue_key: &str, refresh_panel: bool, guard: &StalenessGuard) {
        let message = format!("Failed to load the content of {issue_key}.");
        self.inline.set_hover(
            HoverContent::Failed {
                issue_key: issue_key.to_string(),
                message: message.clone(),
            },
            guard,
        );
        if refresh_panel {
            self.detail.show_failure(issue_key, &message, guard);
        }
    }
}
