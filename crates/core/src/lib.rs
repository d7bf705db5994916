//! Domain vocabulary shared by every other crate in the workspace.
//!
//! This crate has no internal dependencies so the persistence layer,
//! the workflow engine, and any future worker or CLI tooling can all
//! depend on it.

pub mod error;
pub mod proposal;
pub mod status;
pub mod types;
