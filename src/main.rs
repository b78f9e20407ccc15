// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{anyhow, bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use asset_listing::{
    query, Criteria, DataQualityEngine, DatasetConfig, DatasetKind, ListableRecord, ViewMode,
};

const USAGE: &str = "\
Usage:
  asset-listing list   <kind> <fixture> [--filter L] [--search Q] [--sort S] [--page N] [--view grid|list] [--config F]
  asset-listing audit  <kind> <fixture> [--config F]
  asset-listing browse <kind> <fixture> [--config F]

  <kind>     properties | funds | transactions
  <fixture>  .json or .csv file of records";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("list") => {
            init_logging();
            run_list(&args[1..])
        }
        Some("audit") => {
            init_logging();
            run_audit(&args[1..])
        }
        // The TUI owns the terminal; no log output there
        Some("browse") => run_browse(&args[1..]),
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ============================================================================
// ARGUMENTS
// ============================================================================

#[derive(Debug, Default)]
struct CliArgs {
    kind: Option<DatasetKind>,
    fixture: Option<PathBuf>,
    config: Option<PathBuf>,
    filter: Option<String>,
    search: Option<String>,
    sort: Option<String>,
    page: Option<usize>,
    view: Option<ViewMode>,
}

impl CliArgs {
    fn parse(args: &[String]) -> Result<Self> {
        let mut parsed = CliArgs::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            let flag = arg.as_str();
            let mut value = || {
                iter.next()
                    .cloned()
                    .ok_or_else(|| anyhow!("Missing value for {}", flag))
            };

            match flag {
                "--filter" => parsed.filter = Some(value()?),
                "--search" => parsed.search = Some(value()?),
                "--sort" => parsed.sort = Some(value()?),
                "--config" => parsed.config = Some(PathBuf::from(value()?)),
                "--page" => {
                    let raw = value()?;
                    let page = raw
                        .parse::<usize>()
                        .with_context(|| format!("Invalid page number: {:?}", raw))?;
                    parsed.page = Some(page);
                }
                "--view" => {
                    parsed.view = Some(match value()?.as_str() {
                        "grid" => ViewMode::Grid,
                        "list" => ViewMode::List,
                        other => bail!("Unknown view mode {:?} (expected grid or list)", other),
                    });
                }
                flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
                positional => {
                    if parsed.kind.is_none() {
                        parsed.kind = Some(positional.parse()?);
                    } else if parsed.fixture.is_none() {
                        parsed.fixture = Some(PathBuf::from(positional));
                    } else {
                        bail!("Unexpected argument: {}", positional);
                    }
                }
            }
        }

        Ok(parsed)
    }

    fn kind(&self) -> Result<DatasetKind> {
        self.kind.ok_or_else(|| anyhow!("Missing <kind>\n\n{}", USAGE))
    }

    fn fixture(&self) -> Result<&Path> {
        self.fixture
            .as_deref()
            .ok_or_else(|| anyhow!("Missing <fixture>\n\n{}", USAGE))
    }

    /// `--config` file if given, else the kind's preset
    fn dataset_config(&self) -> Result<DatasetConfig> {
        match &self.config {
            Some(path) => DatasetConfig::from_file(path),
            None => Ok(self.kind()?.config()),
        }
    }

    fn criteria(&self, config: &DatasetConfig) -> Criteria {
        let mut criteria = Criteria::for_config(config);
        if let Some(filter) = &self.filter {
            criteria = criteria.with_filter(filter.clone());
        }
        if let Some(search) = &self.search {
            criteria = criteria.with_search(search.clone());
        }
        if let Some(sort) = &self.sort {
            criteria = criteria.with_sort(sort.clone());
        }
        if let Some(page) = self.page {
            criteria = criteria.with_page(page);
        }
        if let Some(view) = self.view {
            criteria = criteria.with_view_mode(view);
        }
        criteria
    }

    fn load(&self) -> Result<(DatasetConfig, Vec<ListableRecord>)> {
        let kind = self.kind()?;
        let config = self.dataset_config()?;
        let records = kind.load(self.fixture()?)?;
        Ok((config, records))
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

fn run_list(args: &[String]) -> Result<()> {
    let cli = CliArgs::parse(args)?;
    let (config, records) = cli.load()?;
    let criteria = cli.criteria(&config);

    let slice = query(&records, &config, &criteria);
    tracing::info!(caption = %slice.caption(), "listing computed");

    let json = serde_json::to_string_pretty(&slice).context("Failed to serialize visible slice")?;
    println!("{}", json);

    Ok(())
}

fn run_audit(args: &[String]) -> Result<()> {
    let cli = CliArgs::parse(args)?;
    let (config, records) = cli.load()?;

    println!("🔍 Data Quality Audit - {}", config.name);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let engine = DataQualityEngine::new(&config);
    let reports = engine.validate_batch(&records);

    for report in reports.iter().filter(|r| !r.is_clean()) {
        println!("\n{}", report.summary());
        for issue in &report.issues {
            println!("   {:?} {}: {} ({:?})", issue.severity, issue.field, issue.message, issue.raw);
        }
    }

    let summary = engine.batch_summary(&reports);
    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{}", summary.summary());

    if summary.critical_issues_count > 0 {
        println!("❌ {} record(s) with critical issues", summary.critical_issues_count);
    } else if summary.needs_review_count > 0 {
        println!("⚠️  {} record(s) need review", summary.needs_review_count);
    } else {
        println!("✅ All records clean");
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_browse(args: &[String]) -> Result<()> {
    let cli = CliArgs::parse(args)?;
    let (config, records) = cli.load()?;
    let criteria = cli.criteria(&config);

    println!("📊 Loaded {} records into {}", records.len(), config.name);
    println!("Starting UI... (Press 'q' to quit)\n");

    let controller = asset_listing::ListingController::with_criteria(&records, &config, criteria);
    let mut app = ui::App::new(controller);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_browse(_args: &[String]) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: asset-listing list <kind> <fixture>");
    std::process::exit(1);
}
