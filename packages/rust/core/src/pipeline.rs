//! End-to-end crawl pipeline: directory → details → documents → CSV export.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, instrument, warn};

use statedocs_crawler::DirectoryClient;
use statedocs_markdown::DocumentRenderer;
use statedocs_shared::{CrawlConfig, DocumentKind, ListingEntry, NormalizedEntity, Result};

use crate::assembler::{assemble, department_fields, ensure_dir, write_document};
use crate::export::write_export;

/// Configuration for [`crawl_departments`].
#[derive(Debug, Clone)]
pub struct CrawlRunConfig {
    pub crawl: CrawlConfig,
    /// Directory receiving one markdown file per entity.
    pub output_dir: PathBuf,
    /// Consolidated CSV of every successful entity.
    pub export_path: PathBuf,
}

/// What happened to one listing entry.
#[derive(Debug, Clone)]
pub enum EntityOutcome {
    /// Document written; the entity also goes into the export.
    Succeeded(NormalizedEntity),
    /// Skipped for this run.
    Failed { display_name: String, reason: String },
}

/// Summary of a crawl run.
#[derive(Debug)]
pub struct CrawlReport {
    /// One outcome per listing entry, in listing order.
    pub outcomes: Vec<EntityOutcome>,
    /// Set when the export was written (at least one success).
    pub export_path: Option<PathBuf>,
    pub elapsed: Duration,
}

impl CrawlReport {
    /// Successful entities in listing order.
    pub fn succeeded(&self) -> impl Iterator<Item = &NormalizedEntity> {
        self.outcomes.iter().filter_map(|o| match o {
            EntityOutcome::Succeeded(entity) => Some(entity),
            EntityOutcome::Failed { .. } => None,
        })
    }

    pub fn success_count(&self) -> usize {
        self.succeeded().count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before an entity's detail page is fetched.
    fn entity_started(&self, name: &str, current: usize, total: usize);
    /// Called when an entity is skipped.
    fn entity_failed(&self, name: &str, reason: &str);
    /// Called when the pipeline completes.
    fn done(&self, report: &CrawlReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn entity_started(&self, _name: &str, _current: usize, _total: usize) {}
    fn entity_failed(&self, _name: &str, _reason: &str) {}
    fn done(&self, _report: &CrawlReport) {}
}

/// Run the full crawl.
///
/// 1. Ensure the output directory exists
/// 2. Fetch the directory listing (failure aborts the run)
/// 3. For each entry in order: fetch details, render, write; failures skip
///    only that entry
/// 4. Sleep the politeness delay after every entry
/// 5. Write the CSV export if anything succeeded
#[instrument(skip_all, fields(output_dir = %config.output_dir.display()))]
pub async fn crawl_departments(
    config: &CrawlRunConfig,
    renderer: &DocumentRenderer,
    progress: &dyn ProgressReporter,
) -> Result<CrawlReport> {
    let start = Instant::now();

    ensure_dir(&config.output_dir)?;
    let client = DirectoryClient::new(config.crawl.clone())?;

    progress.phase("Fetching directory");
    let entries = client.list_entries().await?;
    let total = entries.len();

    progress.phase("Scraping state contacts");
    let mut outcomes = Vec::with_capacity(total);

    for (i, entry) in entries.iter().enumerate() {
        progress.entity_started(&entry.display_name, i + 1, total);
        info!(name = %entry.display_name, "scraping");

        let outcome = match process_entity(&client, entry, renderer, config).await {
            Ok(entity) => EntityOutcome::Succeeded(entity),
            Err(e) => {
                warn!(name = %entry.display_name, error = %e, "skipping entity");
                progress.entity_failed(&entry.display_name, &e.to_string());
                EntityOutcome::Failed {
                    display_name: entry.display_name.clone(),
                    reason: e.to_string(),
                }
            }
        };
        outcomes.push(outcome);

        if !config.crawl.delay.is_zero() {
            tokio::time::sleep(config.crawl.delay).await;
        }
    }

    let mut report = CrawlReport {
        outcomes,
        export_path: None,
        elapsed: Duration::ZERO,
    };

    progress.phase("Writing export");
    if write_export(&config.export_path, report.succeeded())? > 0 {
        report.export_path = Some(config.export_path.clone());
    }

    report.elapsed = start.elapsed();

    info!(
        succeeded = report.success_count(),
        failed = report.failure_count(),
        duration_ms = report.elapsed.as_millis(),
        "crawl completed"
    );

    progress.done(&report);
    Ok(report)
}

/// Fetch, assemble, render, and write one entity.
async fn process_entity(
    client: &DirectoryClient,
    entry: &ListingEntry,
    renderer: &DocumentRenderer,
    config: &CrawlRunConfig,
) -> Result<NormalizedEntity> {
    let detail = client.fetch_detail(&entry.detail_url).await?;
    let entity = assemble(entry, &detail);

    let doc = renderer.render(
        DocumentKind::StateDepartmentOfEducation,
        &department_fields(&entity),
    );
    write_document(&config.output_dir, &doc)?;

    Ok(entity)
}
