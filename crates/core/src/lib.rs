//! Core types and shared functionality for pagesift.
//!
//! This crate provides:
//! - Unified error types
//! - Layered configuration
//! - Run status, result records, and output folder naming

pub mod config;
pub mod error;
pub mod output;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use output::{DocumentPaths, OutputBundle, RunReport, RunStatus, short_safe_folder};
