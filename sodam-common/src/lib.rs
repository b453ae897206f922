//! # Sodam Common Library
//!
//! Shared code for the Sodam commercial-district diagnosis service:
//! - Error type used by every service function
//! - Bootstrap configuration and root folder resolution
//! - SQLite initialization and persisted row models

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
