use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, compare, config, genres, show};
use media_catalog_config::PathManager;
use media_catalog_core::{SortKey, TypeFilter};
use media_catalog_models::{MediaKey, MediaType};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "media-comparer")]
#[command(about = "Media Comparer - Browse movies and TV shows and compare them side by side")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily-rotated file instead of stderr
    /// (defaults to logs/media-comparer.log in the config directory)
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the combined movie and TV catalog
    #[command(long_about = "List one catalog page from both sources, filtered, searched and sorted. Use --select to pick up to two titles of the same type for comparison.")]
    Browse {
        /// Media type to list: all, movie or tv
        #[arg(long = "type", default_value = "all")]
        type_filter: TypeFilter,

        /// Case-insensitive title search within the loaded page
        #[arg(long)]
        search: Option<String>,

        /// Genre name from the genre catalog (repeatable)
        #[arg(long = "genre", value_name = "NAME")]
        genres: Vec<String>,

        /// Sort order: popularity, rating, title or year (defaults to catalog.default_sort)
        #[arg(long)]
        sort: Option<SortKey>,

        /// Catalog page, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Select a title for comparison as TYPE:ID, e.g. movie:42 (repeatable)
        #[arg(long = "select", value_name = "KEY")]
        select: Vec<MediaKey>,

        /// Earliest release year, filtered by the sources
        #[arg(long, value_name = "YEAR")]
        year_min: Option<i32>,

        /// Latest release year, filtered by the sources
        #[arg(long, value_name = "YEAR")]
        year_max: Option<i32>,

        /// Also send --search to the sources instead of only searching the loaded page
        #[arg(long, requires = "search")]
        server_search: bool,

        /// Load the comparison report when two titles are selected
        #[arg(long = "compare")]
        load_comparison: bool,
    },
    /// Show one title in detail
    Show {
        /// movie or tv
        media_type: MediaType,
        id: u64,
    },
    /// Compare two titles of the same type
    #[command(long_about = "Compare two movies or two TV shows: common genres, common cast and key facts side by side.")]
    Compare {
        /// movie or tv
        media_type: MediaType,
        left: u64,
        right: u64,
    },
    /// List the genre catalog
    Genres,
    /// Manage configuration and API keys
    #[command(long_about = "Manage the service URLs, catalog defaults and API keys. Running without a subcommand shows the current configuration.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks API keys)
    Show {
        /// Show API keys unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Interactive setup of service URLs and catalog defaults
    Init,

    /// Store an API key in the credentials file
    SetKey {
        /// movie or tv
        service: MediaType,

        /// API key (if not provided, will prompt)
        key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .map(|path| path.unwrap_or_else(|| PathManager::default().default_log_file()));
    logging::init_logging(cli.verbose, cli.quiet, log_file.as_deref()).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Browse {
            type_filter,
            search,
            genres,
            sort,
            page,
            select,
            year_min,
            year_max,
            server_search,
            load_comparison,
        } => {
            let args = browse::BrowseArgs {
                type_filter,
                search,
                genres,
                sort,
                page,
                select,
                year_min,
                year_max,
                server_search,
                load_comparison,
            };
            browse::run_browse(args, &output).await
        }
        Commands::Show { media_type, id } => show::run_show(media_type, id, &output).await,
        Commands::Compare {
            media_type,
            left,
            right,
        } => compare::run_compare(media_type, left, right, &output).await,
        Commands::Genres => genres::run_genres(&output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output).await
        }
    }
}
