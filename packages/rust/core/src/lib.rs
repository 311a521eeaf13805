//! Pipelines that turn state reference data into markdown documents.
//!
//! This crate ties together the directory crawler, the document renderer, and
//! flat-file output into end-to-end workflows:
//! - [`pipeline::crawl_departments`] — scrape the state contact directory
//! - [`generate::generate_from_csv`] — render one document per CSV row

pub mod assembler;
pub mod export;
pub mod generate;
pub mod pipeline;
