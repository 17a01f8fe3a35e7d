//! Domain error types for Linelens.
//!
//! Lookup failures are the only errors the pipeline propagates; everything
//! else terminates in a defined render state (hidden, cleared, or a literal
//! in-place failure message).

use thiserror::Error;

/// Failures of the local history lookup.
#[derive(Debug, Error)]
pub enum BlameError {
    #[error("File is not tracked by git: {0}")]
    NotTracked(String),

    #[error("git blame produced no output")]
    EmptyOutput,

    #[error("Malformed blame output: {0}")]
    Malformed(String),

    #[error("Blame lookup failed: {0}")]
    CommandFailed(#[from] anyhow::Error),
}
