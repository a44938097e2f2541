//! Common utilities for the linkline overlay.
//!
//! This crate provides shared infrastructure used by the DOM model and the
//! overlay engine:
//! - **Warning System** - deduplicated, colored terminal output for
//!   recoverable conditions

pub mod warning;
