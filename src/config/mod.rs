//! Configuration module for tallybook
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::DataPaths;
pub use settings::Settings;
