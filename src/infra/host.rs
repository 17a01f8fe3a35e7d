use crate::domain::EditorContext;
use std::path::{Path, PathBuf};

/// Synchronous view of the embedding editor.
///
/// `active_context` is the liveness reference point: the pipeline reads it
/// once at dispatch time to capture a run's context, and every surface reads
/// it again immediately before writing. The editor integration implements
/// this; tests use a scripted fake.
pub trait EditorHost: Send + Sync {
    /// Live active editor plus cursor line, or `None` when no editor has
    /// focus.
    fn active_context(&self) -> Option<EditorContext>;

    /// Enclosing workspace/repository root for a document, if any.
    fn workspace_root(&self, document: &Path) -> Option<PathBuf>;
}
