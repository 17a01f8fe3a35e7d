//! Domain types for Linelens.
//! Defines the editor context, blame and issue data structures, and the
//! staleness guard used by the rendering pipeline.

pub mod blame;
pub mod context;
pub mod error;
pub mod issue;

pub use blame::*;
pub use context::*;
pub use error::*;
pub use issue::*;
