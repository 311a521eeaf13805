//! Shared types, error model, and configuration for statedocs.
//!
//! This crate is the foundation depended on by all other statedocs crates.
//! It provides:
//! - [`StateDocsError`] — the unified error type
//! - Domain types ([`ListingEntry`], [`DetailRecord`], [`NormalizedEntity`], [`DocumentKind`])
//! - Configuration ([`AppConfig`], [`CrawlConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CrawlConfig, CrawlSection, DefaultsConfig, InputConfig, OutputConfig, config_dir,
    config_file_path, init_config, init_config_at, load_config, load_config_from,
};
pub use error::{Result, StateDocsError};
pub use types::{DetailRecord, DocumentKind, ListingEntry, NormalizedEntity, UNKNOWN};
