//! SigFig basic library
//!
//! Provides functions shared by the SigFig tools:
//! - logging initialisation (bracketed console format, runtime level changes)
//! - layered configuration loading (defaults, files, environment)

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
