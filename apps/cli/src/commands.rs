//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use statedocs_core::generate::{GenerateConfig, generate_from_csv};
use statedocs_core::pipeline::{CrawlReport, CrawlRunConfig, ProgressReporter, crawl_departments};
use statedocs_markdown::{DocumentRenderer, FixedClock};
use statedocs_shared::{
    AppConfig, CrawlConfig, DocumentKind, init_config, init_config_at, load_config,
    load_config_from,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// statedocs — state reference data as markdown notes.
#[derive(Parser)]
#[command(
    name = "statedocs",
    version,
    about = "Render U.S. state, board of education, and department of education notes.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Config file (defaults to ~/.statedocs/statedocs.toml).
    #[arg(long, global = true, env = "STATEDOCS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Stamp documents with this date (YYYY-MM-DD) instead of today.
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Scrape the state contact directory into department of education notes.
    Crawl {
        /// Output directory for the notes.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Path of the consolidated CSV export.
        #[arg(long)]
        export: Option<PathBuf>,

        /// Pause between detail pages, in milliseconds.
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Origin of the directory site.
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Render one note per state from a CSV.
    States {
        /// Input CSV with `state` and `abbreviation` columns.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory for the notes.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Render one note per state board of education from a CSV.
    Boards {
        /// Input CSV with `state`, `abbreviation`, and `boe_url` columns.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory for the notes.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "statedocs=info",
        1 => "statedocs=debug",
        _ => "statedocs=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Crawl {
            out,
            export,
            delay_ms,
            base_url,
        } => {
            let mut config = resolve_config(config_path)?;
            if let Some(ms) = delay_ms {
                config.crawl.delay_ms = ms;
            }
            if let Some(url) = base_url {
                config.crawl.base_url = url;
            }
            cmd_crawl(&config, cli.date, out, export).await
        }
        Command::States { input, out } => {
            let config = resolve_config(config_path)?;
            let input = input.unwrap_or_else(|| config.input.states_csv.clone().into());
            let out = out.unwrap_or_else(|| config.output.states_dir.clone().into());
            cmd_generate(&config, cli.date, DocumentKind::State, input, out)
        }
        Command::Boards { input, out } => {
            let config = resolve_config(config_path)?;
            let input = input.unwrap_or_else(|| config.input.boards_csv.clone().into());
            let out = out.unwrap_or_else(|| config.output.boards_dir.clone().into());
            cmd_generate(
                &config,
                cli.date,
                DocumentKind::StateBoardOfEducation,
                input,
                out,
            )
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(config_path),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

/// Load the config from `--config`, or the default location.
fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

fn build_renderer(config: &AppConfig, date: Option<NaiveDate>) -> DocumentRenderer {
    let renderer = DocumentRenderer::new(config.defaults.author.clone());
    match date {
        Some(d) => renderer.with_clock(FixedClock(d)),
        None => renderer,
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_crawl(
    config: &AppConfig,
    date: Option<NaiveDate>,
    out: Option<PathBuf>,
    export: Option<PathBuf>,
) -> Result<()> {
    let crawl = CrawlConfig::try_from(config)?;
    let run_config = CrawlRunConfig {
        crawl,
        output_dir: out.unwrap_or_else(|| config.output.departments_dir.clone().into()),
        export_path: export.unwrap_or_else(|| config.output.departments_export.clone().into()),
    };

    info!(
        base_url = %run_config.crawl.base_url,
        delay_ms = run_config.crawl.delay.as_millis(),
        "starting directory crawl"
    );

    let renderer = build_renderer(config, date);
    let reporter = CliProgress::new();

    let report = match crawl_departments(&run_config, &renderer, &reporter).await {
        Ok(report) => report,
        Err(e) => {
            reporter.spinner.finish_and_clear();
            return Err(eyre!("directory crawl failed: {e}"));
        }
    };

    println!();
    println!("  Scraping complete!");
    println!("  Documents: {}", report.success_count());
    println!("  Skipped:   {}", report.failure_count());
    println!("  Folder:    {}", run_config.output_dir.display());
    match &report.export_path {
        Some(path) => println!("  Export:    {}", path.display()),
        None => println!("  Export:    (none, nothing succeeded)"),
    }
    println!("  Time:      {:.1}s", report.elapsed.as_secs_f64());
    println!();

    Ok(())
}

fn cmd_generate(
    config: &AppConfig,
    date: Option<NaiveDate>,
    kind: DocumentKind,
    input: PathBuf,
    output_dir: PathBuf,
) -> Result<()> {
    let renderer = build_renderer(config, date);
    let gen_config = GenerateConfig {
        kind,
        input,
        output_dir,
    };

    info!(%kind, input = %gen_config.input.display(), "generating documents");

    let report = generate_from_csv(&gen_config, &renderer)?;

    println!(
        "Successfully created {} markdown files in '{}'.",
        report.created,
        report.output_dir.display()
    );

    Ok(())
}

fn cmd_config_init(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(p) => {
            init_config_at(p)?;
            p.to_path_buf()
        }
        None => init_config()?,
    };
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn entity_started(&self, name: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Scraping [{current}/{total}] {name}"));
    }

    fn entity_failed(&self, name: &str, reason: &str) {
        self.spinner
            .println(format!("Error scraping {name}: {reason}"));
    }

    fn done(&self, _report: &CrawlReport) {
        self.spinner.finish_and_clear();
    }
}
