//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All user-facing output goes through this module to keep formatting
//! consistent and to honour `--quiet` and `--json`.

pub mod output;
