//! # tracklink Common Library
//!
//! Shared code for the tracklink services:
//! - Error and result types
//! - Bootstrap TOML configuration and config file discovery
//! - Setting resolution (CLI → ENV → TOML → compiled default)

pub mod config;
pub mod error;

pub use error::{Error, Result};
