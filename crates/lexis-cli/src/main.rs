//! # Lexis CLI
//!
//! Command-line front end for the Lexis dictionary.
//!
//! ## Commands
//!
//! - `lexis add <word> -p <pos> -d <definition>` - Add an entry
//! - `lexis lookup <word>` - List the entries for a word, numbered
//! - `lexis show <word> <index>` - Show one numbered entry
//! - `lexis edit <word> <index> ...` - Change one numbered entry
//! - `lexis delete <word> -p <pos> -d <definition>` - Remove an entry
//! - `lexis words` - List the distinct words
//! - `lexis speak <word>` - Pronounce a word
//!
//! ## Example Usage
//!
//! ```bash
//! lexis add cat -p noun -d "a feline" -s kitty -a dog
//! lexis lookup cat
//! lexis edit cat 1 -d "a small domesticated feline"
//! lexis edit cat 1 --word kitten
//! lexis speak cat --voice secondary
//! ```

mod app;
mod commands;

use app::App;
use clap::{Parser, Subcommand};
use lexis_core::{Config, LexisError, Voice};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Lexis - a personal dictionary in a text file
#[derive(Parser)]
#[command(name = "lexis")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the dictionary file (overrides the configuration)
    #[arg(long, global = true, env = "LEXIS_STORE")]
    store: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all logging except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new entry
    Add {
        /// The word being defined
        word: String,

        /// Part of speech (noun, verb, adjective, adverb, other)
        #[arg(short, long = "pos")]
        part_of_speech: String,

        /// Definition
        #[arg(short, long)]
        definition: String,

        /// Synonyms
        #[arg(short, long, default_value = "")]
        synonyms: String,

        /// Antonyms
        #[arg(short, long, default_value = "")]
        antonyms: String,
    },

    /// List every entry for a word, numbered in file order
    #[command(alias = "load")]
    Lookup {
        /// Word to look up
        word: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Show the entry with the given number (as listed by `lookup`)
    Show {
        /// Word to look up
        word: String,

        /// Entry number, starting at 1
        index: usize,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Change the entry with the given number; omitted fields keep their value
    Edit {
        /// Word whose entry to change
        word: String,

        /// Entry number, starting at 1
        index: usize,

        /// New word
        #[arg(long = "word")]
        new_word: Option<String>,

        /// New part of speech
        #[arg(short, long = "pos")]
        part_of_speech: Option<String>,

        /// New definition
        #[arg(short, long)]
        definition: Option<String>,

        /// New synonyms
        #[arg(short, long)]
        synonyms: Option<String>,

        /// New antonyms
        #[arg(short, long)]
        antonyms: Option<String>,
    },

    /// Delete the first entry matching word, part of speech, and definition
    Delete {
        /// Word of the entry
        word: String,

        /// Part of speech of the entry
        #[arg(short, long = "pos")]
        part_of_speech: String,

        /// Definition of the entry
        #[arg(short, long)]
        definition: String,
    },

    /// List the distinct words in the dictionary
    Words {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Pronounce a word from the dictionary
    Speak {
        /// Word to pronounce
        word: String,

        /// Voice to use (primary, secondary)
        #[arg(long)]
        voice: Option<Voice>,
    },

    /// Show dictionary status and statistics
    Status,

    /// Replace the dictionary with the copy saved before the last change
    Restore {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Setup logging
    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => config.general.log_level.as_str(),
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();

    let app = App::new(config, cli.store)?;

    // Execute command
    match cli.command {
        Commands::Add {
            word,
            part_of_speech,
            definition,
            synonyms,
            antonyms,
        } => commands::add::run(
            &app,
            commands::entry_input(word, part_of_speech, definition, synonyms, antonyms),
        ),
        Commands::Lookup { word, output } => commands::lookup::run(&app, &word, output),
        Commands::Show {
            word,
            index,
            output,
        } => commands::show::run(&app, &word, index, output),
        Commands::Edit {
            word,
            index,
            new_word,
            part_of_speech,
            definition,
            synonyms,
            antonyms,
        } => commands::edit::run(
            &app,
            &word,
            index,
            commands::edit::Changes {
                word: new_word,
                part_of_speech,
                definition,
                synonyms,
                antonyms,
            },
        ),
        Commands::Delete {
            word,
            part_of_speech,
            definition,
        } => commands::delete::run(&app, &word, &part_of_speech, &definition),
        Commands::Words { output } => commands::words::run(&app, output),
        Commands::Speak { word, voice } => commands::speak::run(&app, &word, voice),
        Commands::Status => commands::status::run(&app),
        Commands::Restore { yes } => commands::restore::run(&app, yes),
    }
}

/// Print an error the way the user should see it and pick an exit code.
///
/// Input problems (missing fields, duplicates, unknown entries) exit with 2;
/// everything else exits with 1.
fn report(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<LexisError>() {
        Some(e) if e.is_user_error() => {
            eprintln!("{}: {}", e.title(), e);
            ExitCode::from(2)
        }
        Some(e) => {
            error!(error = %e, "Operation failed");
            eprintln!("{}: {}", e.title(), e);
            ExitCode::FAILURE
        }
        None => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
