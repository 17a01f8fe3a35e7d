use crate::domain::{EditorContext, IssuePayload, StalenessGuard};
use crate::infra::host::EditorHost;
use parking_lot::Mutex;
use std::sync::Arc;

/// Hover affordance attached to the inline annotation. Scoped per line, not
/// per issue key: every run that resolves a key redoes the
/// loading-then-resolved sequence even when the detail panel short-circuits.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverContent {
    Loading,
    Issue {
        issue_key: String,
        payload: IssuePayload,
    },
    Failed {
        issue_key: String,
        message: String,
    },
}

struct InlineState {
    text: String,
    hover: Option<HoverContent>,
    token: EditorContext,
}

/// End-of-line annotation surface: attribution text plus an optional hover.
pub struct InlineAnnotation {
    host: Arc<dyn EditorHost>,
    state: Mutex<Option<InlineState>>,
}

impl InlineAnnotation {
    pub fn new(host: Arc<dyn EditorHost>) -> Self {
        Self {
            host,
            state: Mutex::new(None),
        }
    }

    /// Guarded write of the annotation text. Clears any previous hover; an
    /// empty text hides the annotation. Returns false when skipped as stale,
    /// hides included.
    pub fn show(&self, text: &str, guard: &StalenessGuard) -> bool {
        if guard.is_stale(self.host.active_context().as_ref()) {
            return false;
        }
        if text.is_empty() {
            self.hide();
            return true;
        }
        *self.state.lock() = Some(InlineState {
            text: text.to_string(),
            hover: None,
            token: guard.context().clone(),
        });
        true
    }

    /// Guarded write of the hover placeholder shown while a fetch is in
    /// flight.
    pub fn set_hover_loading(&self, guard: &StalenessGuard) -> bool {
        self.set_hover(HoverContent::Loading, guard)
    }

    /// Guarded write of the resolved hover content.
    pub fn set_hover(&self, hover: HoverContent, guard: &StalenessGuard) -> bool {
        if guard.is_stale(self.host.active_context().as_ref()) {
            return false;
        }
        let mut state = self.state.lock();
        if let Some(state) = state.as_mut() {
            state.hover = Some(hover);
            state.token = guard.context().clone();
            return true;
        }
        false
    }

    pub fn clear_hover(&self) {
        if let Some(state) = self.state.lock().as_mut() {
            state.hover = None;
        }
    }

    pub fn hide(&self) {
        *self.state.lock() = None;
    }

    pub fn visible_text(&self) -> Option<String> {
        self.state.lock().as_ref().map(|state| state.text.clone())
    }

    pub fn hover(&self) -> Option<HoverContent> {
        self.state.lock().as_ref().and_then(|state| state.hover.clone())
    }

    pub fn last_applied(&self) -> Option<EditorContext> {
        self.state.lock().as_ref().map(|state| state.token.clone())
    }
}
