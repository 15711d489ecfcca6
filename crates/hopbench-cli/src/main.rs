//! hopbench CLI: play the multi-hop quiz against a model baseline.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "hopbench",
    version,
    about = "Multi-hop reasoning quiz: human vs. model"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quiz in the terminal
    Play {
        /// Question file (defaults to the configured one)
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Participant name
        #[arg(long)]
        name: Option<String>,

        /// Participant position
        #[arg(long)]
        position: Option<String>,

        /// Difficulty tier (1-5)
        #[arg(long)]
        difficulty: Option<u8>,

        /// Seed for the question draw
        #[arg(long)]
        seed: Option<u64>,

        /// Report output directory (defaults to the configured one)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report format: json, html, all, none
        #[arg(long, default_value = "json")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the questions at one difficulty tier
    Questions {
        /// Difficulty tier (1-5)
        #[arg(long)]
        difficulty: u8,

        /// Question file (defaults to the configured one)
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a question file for records that would be defaulted
    Validate {
        /// Question file (defaults to the configured one)
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Render a saved session JSON as an HTML report
    Report {
        /// Session JSON written by `play`
        #[arg(long)]
        session: PathBuf,

        /// HTML output path (defaults to the session path with .html)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Create starter config and question file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hopbench=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            questions,
            name,
            position,
            difficulty,
            seed,
            output,
            format,
            config,
        } => {
            commands::play::execute(commands::play::PlayArgs {
                questions,
                name,
                position,
                difficulty,
                seed,
                output,
                format,
                config,
            })
            .await
        }
        Commands::Questions {
            difficulty,
            questions,
            config,
        } => commands::questions::execute(difficulty, questions, config),
        Commands::Validate { questions, config } => commands::validate::execute(questions, config),
        Commands::Report { session, output } => commands::report::execute(session, output),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
