//! # PawPrint Common Library
//!
//! Shared code for the PawPrint crates:
//! - Error type and result alias
//! - TOML configuration model and config file resolution
//! - Tracing subscriber initialisation

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
