//! calibra CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod render;

#[derive(Parser)]
#[command(
    name = "calibra",
    version,
    about = "Calibrated probability assessment quiz"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz of true/false trivia questions
    Take {
        /// Number of questions (default from config, else 10)
        #[arg(long)]
        amount: Option<u32>,

        /// Trivia category id
        #[arg(long)]
        category: Option<u32>,

        /// Difficulty: easy, medium, hard
        #[arg(long)]
        difficulty: Option<String>,

        /// Trivia API base URL
        #[arg(long)]
        source_url: Option<String>,

        /// Skip the welcome and instructions screen
        #[arg(long)]
        skip_intro: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score a JSON answer sheet without playing
    Score {
        /// Path to the answer sheet
        #[arg(long)]
        sheet: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List the calibration strategy tips
    Tips,

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    let filter = match "calibra=info".parse::<tracing_subscriber::filter::Directive>() {
        Ok(directive) => tracing_subscriber::EnvFilter::from_default_env().add_directive(directive),
        Err(_) => tracing_subscriber::EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            amount,
            category,
            difficulty,
            source_url,
            skip_intro,
            config,
        } => {
            commands::take::execute(commands::take::TakeOptions {
                amount,
                category,
                difficulty,
                source_url,
                skip_intro,
                config,
            })
            .await
        }
        Commands::Score { sheet, format } => commands::score::execute(sheet, format),
        Commands::Tips => commands::tips::execute(),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
