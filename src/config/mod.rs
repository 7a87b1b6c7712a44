//! Configuration module for Sitesift
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use sitesift::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitesift.toml")).unwrap();
//! println!("Crawl will start at: {}", config.session.seed);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, HttpConfig, SessionConfig, DEFAULT_KEYWORD, DEFAULT_SEED,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
