mod replay;

use std::path::PathBuf;

use anyhow::Result;
use chat_notify_core::config::CoreConfig;
use chat_notify_core::tracing_setup::init_tracing;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chat-notify-cli")]
#[command(about = "Group chat push notifications by conversation")]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, short)]
    pretty: bool,

    /// Path to JSON config file (contains countSuffixes)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON-lines file of push payloads and print the resulting notifications
    Replay {
        /// File with one push payload per line
        file: PathBuf,

        /// Dismiss all notifications of this realm after replaying (repeatable)
        #[arg(long)]
        dismiss: Vec<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CoreConfig::load(path)?,
        None => CoreConfig::load_or_default()?,
    };

    match cli.command {
        Commands::Replay { file, dismiss } => {
            let reports = replay::replay_file(&file, &dismiss, &config)?;
            let output = if cli.pretty {
                serde_json::to_string_pretty(&reports)?
            } else {
                serde_json::to_string(&reports)?
            };
            println!("{}", output);
        }
    }

    Ok(())
}
