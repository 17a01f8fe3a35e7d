use crate::domain::{IssuePayload, StalenessGuard};
use crate::infra::host::EditorHost;
use parking_lot::Mutex;
use std::sync::Arc;

/// What the detail panel currently presents.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailContent {
    /// No issue for the focused line. The initial state.
    NoIssue,
    Loading {
        issue_key: String,
    },
    Issue {
        issue_key: String,
        payload: IssuePayload,
    },
    Failed {
        issue_key: String,
        message: String,
    },
}

struct DetailState {
    content: DetailContent,
    /// Host-driven panel visibility (side panel can be toggled away).
    visible: bool,
    /// Key of the last successful write; the idempotent fetch short-circuit
    /// compares against this.
    token_key: Option<String>,
    /// Last successfully rendered issue, kept so the panel can be restored
    /// without a re-fetch when it becomes visible again.
    cached: Option<(String, IssuePayload)>,
}

/// Issue detail surface.
pub struct DetailPanel {
    host: Arc<dyn EditorHost>,
    state: Mutex<DetailState>,
}

impl DetailPanel {
    pub fn new(host: Arc<dyn EditorHost>) -> Self {
        Self {
            host,
            state: Mutex::new(DetailState {
                content: DetailContent::NoIssue,
                visible: true,
                token_key: None,
                cached: None,
            }),
        }
    }

    /// Key the panel last applied, if any.
    pub fn current_key(&self) -> Option<String> {
        self.state.lock().token_key.clone()
    }

    pub fn content(&self) -> DetailContent {
        self.state.lock().content.clone()
    }

    /// Last successfully rendered payload for `issue_key`, if it is the one
    /// cached. Lets a short-circuited run resolve hover content without
    /// issuing another fetch.
    pub fn cached_payload(&self, issue_key: &str) -> Option<IssuePayload> {
        let state = self.state.lock();
        state
            .cached
            .as_ref()
            .filter(|(key, _)| key == issue_key)
            .map(|(_, payload)| payload.clone())
    }

    /// Clear remote content for a line without an issue key. Also drops the
    /// applied key so a later run for the same issue is not short-circuited
    /// into showing this cleared view.
    pub fn show_no_issue(&self) {
        let mut state = self.state.lock();
        state.content = DetailContent::NoIssue;
        state.token_key = None;
    }

    /// Guarded write of the loading placeholder.
    pub fn show_loading(&self, issue_key: &str, guard: &StalenessGuard) -> bool {
        if guard.is_stale(self.host.active_context().as_ref()) {
            return false;
        }
        self.state.lock().content = DetailContent::Loading {
            issue_key: issue_key.to_string(),
        };
        true
    }

    /// Guarded write of fetched issue content; records the key as applied
    /// and caches the payload for restore.
    pub fn show_issue(&self, issue_key: &str, payload: IssuePayload, guard: &StalenessGuard) -> bool {
        if guard.is_stale(self.host.active_context().as_ref()) {
            return false;
        }
        let mut state = self.state.lock();
        state.content = DetailContent::Issue {
            issue_key: issue_key.to_string(),
            payload: payload.clone(),
        };
        state.token_key = Some(issue_key.to_string());
        state.cached = Some((issue_key.to_string(), payload));
        true
    }

    /// Guarded write of an in-place failure message. The key is still
    /// recorded as applied; the cache keeps whatever loaded last.
    pub fn show_failure(&self, issue_key: &str, message: &str, guard: &StalenessGuard) -> bool {
        if guard.is_stale(self.host.active_context().as_ref()) {
            return false;
        }
        let mut state = self.state.lock();
        state.content = DetailContent::Failed {
            issue_key: issue_key.to_string(),
            message: message.to_string(),
        };
        state.token_key = Some(issue_key.to_string());
        true
    }

    /// External invalidation: drop content, applied key, and cache.
    pub fn hide(&self) {
        let mut state = self.state.lock();
        state.content = DetailContent::NoIssue;
        state.token_key = None;
        state.cached = None;
    }

    /// Host visibility toggle. On reappearing, the last successfully
    /// rendered issue is restored from cache without a re-fetch.
    pub fn set_host_visible(&self, visible: bool) {
        let mut state = self.state.lock();
        let reappeared = visible && !state.visible;
        state.visible = visible;
        if reappeared {
            if let Some((issue_key, payload)) = state.cached.clone() {
                state.content = DetailContent::Issue { issue_key, payload };
            }
        }
    }

    pub fn is_host_visible(&self) -> bool {
        self.state.lock().visible
    }
}
