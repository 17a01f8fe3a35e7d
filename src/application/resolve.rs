use crate::domain::{BlameError, BlameRecord, EditorContext};
use crate::infra::git::BlameLookup;
use crate::infra::host::EditorHost;
use std::sync::Arc;

/// Outcome of capturing the live editor context and blaming its line.
/// `Unavailable` is a valid terminal state, not an error.
#[derive(Debug)]
pub enum Resolution {
    Unavailable,
    Resolved {
        context: EditorContext,
        record: BlameRecord,
    },
}

/// Captures the active editor context synchronously at call time and runs
/// the history lookup for the one line under the cursor.
pub struct ContextResolver {
    host: Arc<dyn EditorHost>,
    blame: Arc<dyn BlameLookup>,
}

impl ContextResolver {
    pub fn new(host: Arc<dyn EditorHost>, blame: Arc<dyn BlameLookup>) -> Self {
        Self { host, blame }
    }

    /// The returned record is tagged with the context captured *before* the
    /// lookup's possibly slow completion; the cursor may move while the
    /// subprocess runs.
    pub async fn resolve(&self) -> Result<Resolution, BlameError> {
        let Some(context) = self.host.active_context() else {
            return Ok(Resolution::Unavailable);
        };
        let Some(repo_root) = self.host.workspace_root(&context.document) else {
            return Ok(Resolution::Unavailable);
        };

        let record = match self
            .blame
            .lookup(&context.document, context.line, &repo_root)
            .await
        {
            Ok(record) => record,
            Err(BlameError::NotTracked(_)) => return Ok(Resolution::Unavailable),
            Err(err) => return Err(err),
        };

        Ok(Resolution::Resolved { context, record })
    }
}
