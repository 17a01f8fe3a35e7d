//! Infrastructure layer (adapters/implementations).
//!
//! This module contains IO-heavy integrations (git subprocess, Jira REST,
//! configuration storage) behind the traits the pipeline consumes.

pub mod app_config;
pub mod git;
pub mod host;
pub mod jira;
