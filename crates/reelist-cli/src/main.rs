use clap::{ArgAction, Parser, Subcommand};

mod commands;
mod logging;
mod output;
mod tui;

#[derive(Parser)]
#[command(name = "reelist")]
#[command(about = "reelist - search movies, rate them, remember what you watched")]
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

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog interactively (the default when no command is given)
    #[command(long_about = "Open the interactive browser: type to search, pick a result to see \
its details, rate it 1-10 and add it to your watched list. The list is persisted between runs.")]
    Browse {
        /// Start with this query already in the search box
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Keep the watched list in memory only (nothing written to disk)
        #[arg(long, action = ArgAction::SetTrue)]
        ephemeral: bool,
    },

    /// One-shot catalog search
    Search {
        /// Title fragment to search for (at least 3 characters)
        term: String,
    },

    /// Show the full catalog record for one title
    Show {
        #[arg(value_name = "IMDB_ID")]
        id: String,
    },

    /// Print the watched list and its summary statistics
    List,

    /// Fetch a title and add it to the watched list with your rating
    Rate {
        #[arg(value_name = "IMDB_ID")]
        id: String,

        /// Your rating, 1-10
        #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: u8,
    },

    /// Remove a title from the watched list
    Remove {
        #[arg(value_name = "IMDB_ID")]
        id: String,
    },

    /// Delete stored data
    Clear {
        /// Delete the watched list
        #[arg(long, action = ArgAction::SetTrue)]
        watched: bool,

        /// Delete the watched list and the configuration file
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "watched")]
        all: bool,
    },

    /// Inspect or update configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Store the OMDb API key (prompts when not given)
    SetKey {
        key: Option<String>,
    },

    /// Print the configuration and data paths
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Browse {
        query: None,
        ephemeral: false,
    });

    // The interactive browser owns the terminal, so it logs to a file;
    // everything else logs to stderr.
    match &command {
        Commands::Browse { .. } => logging::init_file_logging(cli.verbose, cli.quiet)
            .map_err(|e| color_eyre::eyre::eyre!("{}", e))?,
        _ => logging::init_logging(cli.verbose, cli.quiet)
            .map_err(|e| color_eyre::eyre::eyre!("{}", e))?,
    }

    let output = output::Output::new(cli.output, cli.quiet);

    match command {
        Commands::Browse { query, ephemeral } => commands::browse::run(query, ephemeral).await,
        Commands::Search { term } => commands::search::run(&term, &output).await,
        Commands::Show { id } => commands::show::run(&id, &output).await,
        Commands::List => commands::list::run(&output),
        Commands::Rate { id, rating } => commands::rate::run(&id, rating, &output).await,
        Commands::Remove { id } => commands::remove::run(&id, &output),
        Commands::Clear { watched, all } => commands::clear::run(watched, all, &output),
        Commands::Config { cmd } => {
            commands::config::run(cmd.unwrap_or(ConfigCommands::Show { full: false }), &output)
        }
    }
}
