//! Render surfaces.
//!
//! Each surface is exclusively owned by its controller, tracks the context
//! (and key, where relevant) of its last successful write, and performs
//! guarded writes: the live editor context is re-checked immediately before
//! any visible mutation, and a write for a superseded context is skipped
//! silently. That check is the sole synchronization discipline between
//! overlapping pipeline runs.

pub mod detail;
pub mod inline;
pub mod status;

pub use detail::{DetailContent, DetailPanel};
pub use inline::{HoverContent, InlineAnnotation};
pub use status::StatusIndicator;
