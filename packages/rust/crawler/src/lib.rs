//! Directory crawler for the state contact pages.
//!
//! This crate provides:
//! - [`directory`] — detail links found on the listing page
//! - [`detail`] — per-field detail page extraction behind [`FieldLocator`]
//! - [`engine`] — [`DirectoryClient`], the HTTP side of both

pub mod detail;
pub mod directory;
pub mod engine;

pub use detail::{DetailField, FieldLocator, HtmlFieldLocator, extract_detail, parse_detail};
pub use directory::parse_listing;
pub use engine::DirectoryClient;
