//! keyprint CLI: build training tables, train, inspect sessions, predict and verify.

use clap::{Parser, Subcommand};
use keyprint::{
    config::AppConfig,
    dataset::{FeatureTable, LabelMap, Orchestrator},
    features::FeatureExtractor,
    logging::StructuredLogger,
    model::{load_classifier, CentroidModel},
    session::read_session,
    verify::VerificationEngine,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(name = "keyprint")]
#[command(version)]
#[command(about = "Keystroke-dynamics feature extraction and identity verification", long_about = None)]
struct Cli {
    /// Config file (JSON); defaults to $KEYPRINT_CONFIG_PATH or config.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a labeled training table from a directory of sessions
    Extract {
        /// Session directory (defaults to paths.sessions_dir)
        dir: Option<PathBuf>,
    },

    /// Train a centroid model from the training table
    Train {
        /// Training table (defaults to paths.train_table)
        #[arg(long)]
        table: Option<PathBuf>,

        /// Model output (defaults to paths.model)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the full timing profile of one session as JSON
    Features {
        input: PathBuf,
    },

    /// Predict the user label of one session
    Predict {
        input: PathBuf,
    },

    /// Check a live session against the user its file name claims
    Verify {
        input: PathBuf,
    },
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(|| {
        std::env::var("KEYPRINT_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.json"))
    })
}

fn run(cli: Cli, config: AppConfig) -> Result<ExitCode, BoxError> {
    match cli.command {
        Commands::Extract { dir } => {
            let dir = dir.unwrap_or_else(|| config.paths.sessions_dir.clone());
            let mut orchestrator = Orchestrator::new(config.paths.clone());
            let table = orchestrator.extract_directory(&dir)?;
            for (username, label) in orchestrator.labels().iter() {
                println!("{}\t{}", label, username);
            }
            info!(rows = table.len(), "extraction complete");
        }
        Commands::Train { table, output } => {
            let table_path = table.unwrap_or_else(|| config.paths.train_table.clone());
            let output = output.unwrap_or_else(|| config.paths.model.clone());
            let table = FeatureTable::read_csv(&table_path)?;
            let model = CentroidModel::train(&table, &config.training.target_column)?;
            model.save(&output)?;
            info!(
                rows = table.len(),
                classes = model.centroids.len(),
                model = %output.display(),
                "model trained"
            );
        }
        Commands::Features { input } => {
            let events = read_session(&input)?;
            let profile = FeatureExtractor::new().profile(&events)?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Commands::Predict { input } => {
            let classifier = load_classifier(&config.paths.model)?;
            let orchestrator = Orchestrator::new(config.paths.clone());
            let features = orchestrator.extract_file(&input)?;
            let label = classifier.predict(&features)?;
            let username = LabelMap::load(&config.paths.label_map)
                .ok()
                .and_then(|m| m.username(label).map(str::to_string));
            match username {
                Some(name) => println!("{}\t{}", label, name),
                None => println!("{}", label),
            }
        }
        Commands::Verify { input } => {
            let classifier = load_classifier(&config.paths.model)?;
            let engine = VerificationEngine::with_letter_labels(classifier);
            let orchestrator = Orchestrator::new(config.paths.clone());
            let verdict = engine.verify(&orchestrator, &input)?;
            StructuredLogger::emit_json(&verdict, &mut std::io::stdout())?;
            if !verdict.matched {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode, BoxError> {
    let cli = Cli::parse();
    let config = AppConfig::load(&config_path(&cli));
    StructuredLogger::init(config.log.json, &config.log.level);

    run(cli, config)
}
