use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, builder::BoolishValueParser};

pub const DEFAULT_PAGE_URL: &str = "http://localhost/search/";

/// Command-line arguments for the blogsift binary.
#[derive(Debug, Parser)]
#[command(name = "blogsift", version, about = "Archive search for static blogs")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "BLOGSIFT_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Search the archive once and print the rendered list.
    Query(QueryArgs),
    /// Replay a visit to the search page: load from a url, then type each input.
    Simulate(SimulateArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the resource list path.
    #[arg(long = "resources", value_name = "PATH", global = true)]
    pub resources: Option<PathBuf>,

    /// Override the item template path.
    #[arg(long = "template", value_name = "PATH", global = true)]
    pub template: Option<PathBuf>,

    /// Override value escaping (verbatim|html).
    #[arg(long = "escape", value_name = "MODE", global = true)]
    pub escape: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Clone)]
pub struct QueryArgs {
    /// Text to look for in titles and urls.
    #[arg(value_name = "NEEDLE", allow_hyphen_values = true)]
    pub needle: String,

    /// Output rendered markup or the matching records.
    #[arg(long, value_enum, default_value_t = OutputFormat::Markup)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Markup,
    Json,
}

#[derive(Debug, Args, Clone)]
pub struct SimulateArgs {
    /// Url the search page is opened with.
    #[arg(long = "page-url", value_name = "URL", default_value = DEFAULT_PAGE_URL)]
    pub page_url: String,

    /// Value of the search field after an input event; repeat for each event.
    #[arg(long = "input", value_name = "VALUE", allow_hyphen_values = true)]
    pub inputs: Vec<String>,
}
