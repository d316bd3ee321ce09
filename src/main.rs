//! release-wizard command line.
//!
//! Headless access to the shared validator and the tags CSV import.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use release_wizard::adapters::{LocalDocumentStorage, SharedValidator};
use release_wizard::application::{
    ImportTagsCommand, ImportTagsHandler, ValidateFileCommand, ValidateFileHandler,
};
use release_wizard::config::{AppConfig, LoggingConfig};
use release_wizard::domain::foundation::DocumentType;

#[derive(Parser)]
#[command(name = "release-wizard")]
#[command(about = "Build and validate release documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a release document JSON file
    Validate {
        file: PathBuf,

        /// Document type; defaults to the file's own file_type
        #[arg(short = 't', long = "type")]
        file_type: Option<String>,
    },

    /// Build release_tags.json from a tags CSV
    ImportTags {
        csv: PathBuf,

        #[arg(long)]
        version: String,

        #[arg(long)]
        date: String,

        #[arg(long = "type")]
        release_type: String,

        #[arg(long)]
        manager: String,

        /// Output directory; overrides the configured export directory
        #[arg(short = 'o', long)]
        output_dir: Option<PathBuf>,
    },

    /// List the supported document types
    SchemaTypes,
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    init_tracing(&config.logging);

    let validator = Arc::new(SharedValidator::new());

    match cli.command {
        Command::Validate { file, file_type } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let handler = ValidateFileHandler::new(validator);
            let result = handler.handle(ValidateFileCommand {
                contents,
                file_type,
            })?;

            if result.is_valid() {
                println!("{}: valid {}", file.display(), result.file_type);
                return Ok(ExitCode::SUCCESS);
            }
            for error in &result.errors {
                println!("{}", error);
            }
            Ok(ExitCode::FAILURE)
        }

        Command::ImportTags {
            csv,
            version,
            date,
            release_type,
            manager,
            output_dir,
        } => {
            let text = std::fs::read_to_string(&csv)
                .with_context(|| format!("Failed to read {}", csv.display()))?;
            let output_dir = output_dir.unwrap_or(config.export.output_dir);
            let storage = LocalDocumentStorage::new(output_dir)
                .with_max_file_size(config.export.max_file_size_bytes);

            let handler = ImportTagsHandler::new(validator, Arc::new(storage));
            let result = handler.handle(ImportTagsCommand {
                csv: text,
                release_version: version,
                release_date: date,
                release_type,
                release_manager: manager,
            })?;

            match result.metadata {
                Some(meta) => {
                    println!(
                        "{} ({} rows, {} bytes, sha256 {})",
                        meta.path.display(),
                        result.rows_imported,
                        meta.size_bytes,
                        meta.checksum
                    );
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    for error in &result.errors {
                        println!("{}", error);
                    }
                    Ok(ExitCode::FAILURE)
                }
            }
        }

        Command::SchemaTypes => {
            for document_type in DocumentType::all() {
                println!(
                    "{:<22} {}",
                    document_type.as_str(),
                    document_type.display_name()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
