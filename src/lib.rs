pub mod browse;
pub mod cli;
pub mod config;
pub mod display;
pub mod filter;
pub mod import;
pub mod paginate;
pub mod recipe;
pub mod store;

pub use browse::{BrowseError, ErrorKind, SearchParams, cuisines, get_recipe, list, search};
pub use cli::{Cli, ColorMode, Commands, OutputFormat, cli_parse};
pub use filter::{CompositePredicate, FilterExpression, FilterField, FilterParseError};
pub use paginate::{PageRequest, PageResult, Pagination, SortKey, envelope_of, window_of};
pub use recipe::{RecipeId, RecipeRecord};
pub use store::{MemoryStore, QueryExecutor};

use crate::browse::{compile_params, run_query};
use crate::cli::PageArgs;
use crate::config::BrowserConfig;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_DATASET: &str = "recipes.json";

/// Install the stderr log subscriber; `RUST_LOG` overrides the flags
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .try_init();
}

fn apply_color_mode(mode: ColorMode) {
    match mode {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }
}

/// `--data` (or `RECIPES_DATA`), then the config file, then `recipes.json`
fn dataset_path(cli_data: Option<&Path>, config: &BrowserConfig) -> PathBuf {
    cli_data
        .map(Path::to_path_buf)
        .or_else(|| config.dataset.path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET))
}

fn open_store(path: &Path) -> anyhow::Result<MemoryStore> {
    MemoryStore::open(path).with_context(|| format!("Failed to open recipe dataset '{}'", path.display()))
}

fn page_params(paging: &PageArgs) -> SearchParams {
    SearchParams {
        page: paging.page.clone(),
        limit: paging.limit.clone(),
        ..SearchParams::default()
    }
}

/// Exit status for a failed run: 2 for client errors, 1 otherwise
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<BrowseError>() {
        Some(browse_err) if browse_err.is_client_error() => 2,
        _ => 1,
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::load_config(cli.config.as_deref())?;
    apply_color_mode(cli.color);

    let data_path = dataset_path(cli.data.as_deref(), &config);
    let format = cli.format;
    let default_limit = config.paging.default_limit;

    match cli.command {
        Commands::List { paging } => {
            let params = page_params(&paging);
            let request = params
                .page_request(default_limit)
                .map_err(BrowseError::from)?;
            let store = open_store(&data_path)?;
            let result = list(&store, request)?;
            print_page(format, &result, &config);
        }
        Commands::Search {
            title,
            cuisine,
            calories,
            total_time,
            rating,
            paging,
        } => {
            let params = SearchParams {
                title,
                cuisine,
                calories,
                total_time,
                rating,
                ..page_params(&paging)
            };
            // Validate everything before touching the dataset
            let request = params
                .page_request(default_limit)
                .map_err(BrowseError::from)?;
            let predicate = compile_params(&params).map_err(BrowseError::from)?;
            debug!("Compiled predicate: {predicate}");

            let store = open_store(&data_path)?;
            let result = run_query(&store, &predicate, request)?;
            print_page(format, &result, &config);
        }
        Commands::Show { id } => {
            let store = open_store(&data_path)?;
            let recipe = get_recipe(&store, &id)?;
            match format {
                OutputFormat::Text => print!("{}", display::format_recipe_text(&recipe)),
                OutputFormat::Json => println!("{}", display::format_recipe_json(&recipe)),
            }
        }
        Commands::Cuisines => {
            let store = open_store(&data_path)?;
            let names = cuisines(&store)?;
            match format {
                OutputFormat::Text => print!("{}", display::format_cuisines_text(&names)),
                OutputFormat::Json => println!("{}", display::format_cuisines_json(&names)),
            }
        }
        Commands::Import { source, output } => {
            let destination = output.unwrap_or(data_path);
            let show_progress = !cli.quiet && format == OutputFormat::Text;
            let report = import::import_to_dataset(&source, &destination, show_progress)?;
            match format {
                OutputFormat::Text => {
                    println!("{}", report.summary());
                    println!("Dataset written to {}", destination.display());
                }
                OutputFormat::Json => {
                    let body = serde_json::json!({
                        "success": true,
                        "data": {
                            "processed": report.processed,
                            "skipped": report.skipped,
                            "output": destination.display().to_string(),
                        }
                    });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
            }
        }
    }

    Ok(())
}

fn print_page(format: OutputFormat, result: &PageResult<RecipeRecord>, config: &BrowserConfig) {
    match format {
        OutputFormat::Text => print!("{}", display::format_page_text(result, &config.display)),
        OutputFormat::Json => println!("{}", display::format_page_json(result)),
    }
}
