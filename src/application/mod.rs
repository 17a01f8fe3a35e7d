//! Application layer (the rendering pipeline).
//!
//! Orchestrates context resolution, the two asynchronous lookups, and the
//! guarded surface writes, without depending on any concrete editor or
//! transport.

pub mod events;
pub mod message;
pub mod pipeline;
pub mod resolve;
