//! core
//!
//! Support code shared by the CLI.
//!
//! # Modules
//!
//! - [`config`] - Configuration schema and loading

pub mod config;
