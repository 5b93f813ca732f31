//! convodesk - conversation logger and folder browser on one command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use convodesk_cli::config::Config;
use convodesk_cli::logging::{self, LogFormat, LogPreset};
use convodesk_core::{transcript, ConversationManager, DirectoryIndexer};
use convodesk_types::Conversation;
use std::path::PathBuf;

/// Conversation logger and folder browser.
#[derive(Parser, Debug)]
#[command(name = "convodesk")]
#[command(about = "Record question/answer pairs and browse directory trees")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the conversation log directory
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Override the database path
    #[arg(long, value_name = "FILE")]
    db_path: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long)]
    quiet: bool,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Save a conversation to both stores
    Save {
        #[arg(long)]
        id: String,
        #[arg(long)]
        question: String,
        #[arg(long)]
        answer: String,
    },
    /// Load a conversation by id (file store first, database as fallback)
    Load {
        #[arg(long)]
        id: String,
        /// Print as JSON instead of the two-line transcript
        #[arg(long)]
        json: bool,
    },
    /// Load a conversation from an arbitrary transcript file
    LoadFile {
        path: PathBuf,
        /// Print as JSON instead of the two-line transcript
        #[arg(long)]
        json: bool,
    },
    /// Print a line-based summary of a conversation
    Summary {
        #[arg(long)]
        id: String,
        /// Also write the summary to this file
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Print a directory listing (shallow by default)
    Tree {
        path: PathBuf,
        /// Recurse into subdirectories with indentation
        #[arg(long)]
        full: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(
        LogPreset::from_flags(cli.verbose, cli.debug, cli.quiet),
        cli.log_format,
    );

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(dir) = cli.log_dir {
        config.log_dir = dir;
    }
    if let Some(path) = cli.db_path {
        config.db_path = path;
    }

    match cli.command {
        Command::Tree { path, full } => {
            let indexer = DirectoryIndexer::new();
            let listing = if full {
                indexer.render_full(&path)?
            } else {
                indexer.render_shallow(&path)?
            };
            print!("{}", listing);
            Ok(())
        }
        command => run_conversation_command(&config, command),
    }
}

fn run_conversation_command(config: &Config, command: Command) -> Result<()> {
    tracing::info!(
        target: "convodesk::startup",
        "Opening stores (log dir: {}, database: {})",
        config.log_dir.display(),
        config.db_path.display()
    );
    let manager = ConversationManager::open(&config.log_dir, &config.db_path)?;

    match command {
        Command::Save {
            id,
            question,
            answer,
        } => {
            manager.save(&id, &question, &answer)?;
            println!("Conversation {} saved", id);
        }
        Command::Load { id, json } => match manager.load(&id)? {
            Some(conversation) => print_conversation(&conversation, json)?,
            None => eprintln!("Conversation {} not found", id),
        },
        Command::LoadFile { path, json } => match manager.load_from_path(&path)? {
            Some(conversation) => print_conversation(&conversation, json)?,
            None => eprintln!("Conversation file {} not found", path.display()),
        },
        Command::Summary { id, out } => match manager.summarize(&id)? {
            Some(summary) => {
                if let Some(out) = &out {
                    std::fs::write(out, &summary)?;
                }
                println!("{}", summary);
            }
            None => eprintln!("Conversation {} not found", id),
        },
        Command::Tree { .. } => unreachable!("tree runs without opening the stores"),
    }

    manager.shutdown()?;
    Ok(())
}

fn print_conversation(conversation: &Conversation, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(conversation)?);
    } else {
        println!(
            "{}",
            transcript::render(&conversation.question, &conversation.answer)
        );
    }
    Ok(())
}
