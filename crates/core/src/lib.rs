//! Domain types and rules shared across the workspace.
//!
//! This crate is deliberately free of I/O: everything here is a pure type or
//! a pure function so the db and api crates can depend on it without pulling
//! in a runtime.

pub mod completion;
pub mod error;
pub mod registration;
pub mod roles;
pub mod schedule;
pub mod types;

pub use error::CoreError;
pub use types::{DbId, Timestamp};
