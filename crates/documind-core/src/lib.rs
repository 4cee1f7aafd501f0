//! documind-core - Core types and traits for the documind demo
//!
//! This crate provides the foundational types, traits, error handling,
//! and configuration used throughout the documind workspace.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::{DocumindError, Result};
pub use traits::*;
pub use types::*;
