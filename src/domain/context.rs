use std::path::PathBuf;

/// Identity of one editor pane. Two editors showing the same document are
/// distinct contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditorId(pub u64);

/// Where a pipeline run was issued for: one document, one editor, one line.
/// Captured once at dispatch time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorContext {
    pub document: PathBuf,
    pub editor: EditorId,
    pub line: u32,
}

impl EditorContext {
    pub fn new(document: impl Into<PathBuf>, editor: EditorId, line: u32) -> Self {
        Self {
            document: document.into(),
            editor,
            line,
        }
    }
}

/// Captured context plus the staleness predicate applied before every
/// surface write. A run carries one guard for its whole lifetime; every
/// write re-checks against the live context at write time, not against
/// any earlier snapshot.
#[derive(Debug, Clone)]
pub struct StalenessGuard {
    captured: EditorContext,
}

impl StalenessGuard {
    pub fn new(captured: EditorContext) -> Self {
        Self { captured }
    }

    pub fn context(&self) -> &EditorContext {
        &self.captured
    }

    /// True when the live editor/line no longer equals the captured one.
    /// No live context at all (editor lost focus) also counts as stale.
    pub fn is_stale(&self, live: Option<&EditorContext>) -> bool {
        live != Some(&self.captured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(line: u32) -> EditorContext {
        EditorContext::new("/repo/src/lib.rs", EditorId(1), line)
    }

    #[test]
    fn test_guard_fresh_when_live_matches() {
        let guard = StalenessGuard::new(ctx(10));
        assert!(!guard.is_stale(Some(&ctx(10))));
    }

    #[test]
    fn test_guard_stale_on_line_move() {
        let guard = StalenessGuard::new(ctx(10));
        assert!(guard.is_stale(Some(&ctx(11))));
    }

    #[test]
    fn test_guard_stale_on_editor_switch() {
        let guard = StalenessGuard::new(ctx(10));
        let other = EditorContext::new("/repo/src/lib.rs", EditorId(2), 10);
        assert!(guard.is_stale(Some(&other)));
    }

    #[test]
    fn test_guard_stale_without_live_context() {
        let guard = StalenessGuard::new(ctx(10));
        assert!(guard.is_stale(None));
    }
}
