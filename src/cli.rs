use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Browse a recipe collection with keyword, cuisine and numeric filters
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Normalized dataset file (as written by `import`)
    #[arg(long, global = true, env = "RECIPES_DATA")]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(short = 'F', long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to use colors
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct PageArgs {
    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<String>,

    /// Recipes per page (1-100)
    #[arg(long)]
    pub limit: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all recipes, highest rated first
    List {
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Search recipes with filters; numeric filters take [op]<number>, e.g. ">=4"
    Search {
        /// Title contains this text (case-insensitive)
        #[arg(long)]
        title: Option<String>,

        /// Exact cuisine name
        #[arg(long)]
        cuisine: Option<String>,

        /// Calories comparison, e.g. "<=400"
        #[arg(long, allow_hyphen_values = true)]
        calories: Option<String>,

        /// Total time in minutes, e.g. "<=30"
        #[arg(long = "total-time", allow_hyphen_values = true)]
        total_time: Option<String>,

        /// Rating comparison, e.g. ">=4.5"
        #[arg(long, allow_hyphen_values = true)]
        rating: Option<String>,

        #[command(flatten)]
        paging: PageArgs,
    },
    /// Show one recipe in detail
    Show {
        /// Recipe id
        id: String,
    },
    /// List the distinct cuisines in the dataset
    Cuisines,
    /// Clean a raw recipe dump into a dataset file
    Import {
        /// Raw JSON dump keyed by recipe id
        source: PathBuf,

        /// Where to write the dataset (defaults to --data, then recipes.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
