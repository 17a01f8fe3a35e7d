use crate::domain::{EditorContext, StalenessGuard};
use crate::infra::host::EditorHost;
use parking_lot::Mutex;
use std::sync::Arc;

struct StatusState {
    text: String,
    token: EditorContext,
}

/// Status bar surface showing the issue key for the focused line.
pub struct StatusIndicator {
    host: Arc<dyn EditorHost>,
    state: Mutex<Option<StatusState>>,
}

impl StatusIndicator {
    pub fn new(host: Arc<dyn EditorHost>) -> Self {
        Self {
            host,
            state: Mutex::new(None),
        }
    }

    /// Guarded write. An empty key hides the indicator; returns false when
    /// the write was skipped because the run's context is no longer live.
    /// The hide is guarded too: a superseded no-key run must not erase what
    /// a newer run has rendered.
    pub fn show(&self, issue_key: &str, guard: &StalenessGuard) -> bool {
        if guard.is_stale(self.host.active_context().as_ref()) {
            return false;
        }
        if issue_key.is_empty() {
            self.hide();
            return true;
        }
        *self.state.lock() = Some(StatusState {
            text: issue_key.to_string(),
            token: guard.context().clone(),
        });
        true
    }

    pub fn hide(&self) {
        *self.state.lock() = None;
    }

    pub fn visible_text(&self) -> Option<String> {
        self.state.lock().as_ref().map(|state| state.text.clone())
    }

    pub fn last_applied(&self) -> Option<EditorContext> {
        self.state.lock().as_ref().map(|state| state.token.clone())
    }
}
