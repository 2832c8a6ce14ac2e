use std::fs::{self, File, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::classifier::{OllamaClassifier, SYSTEM_PROMPT};
use crate::config::{Overrides, Settings};
use crate::models::{ClassificationRecord, Field, ItemOutcome};
use crate::report::{
    DATA_HANDLING_NOTES, ExportColumns, category_counts, export_csv, render_text_chart,
    render_text_table,
};
use crate::session::Session;
use crate::utils::{log_file_path, single_line};

#[derive(Parser)]
#[command(name = "waste-sorter")]
#[command(version = "0.1.0")]
#[command(about = "Classify waste items with a local language model", long_about = None)]
pub struct Cli {
    /// Settings file (TOML)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Chat completion endpoint of the inference service
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Model identifier sent with each request
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive interface (default)
    Tui,
    /// Classify a single item and print its fields
    Classify {
        /// Item description, e.g. "banana peel"
        item: String,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Classify newline-separated items from a file or stdin
    Batch {
        /// Read items from this file instead of stdin
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Show the data-handling notes
    Notes,
    /// Show the instruction sent to the model
    Prompt,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Write the session history to a CSV file
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Include instruction, tip and raw reply columns in the export
    #[arg(long, requires = "export")]
    pub full: bool,
}

impl ExportArgs {
    fn columns(&self) -> ExportColumns {
        if self.full { ExportColumns::Full } else { ExportColumns::Summary }
    }
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            config_file: self.config.clone(),
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            timeout_secs: self.timeout,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Notes) => {
            print_notes();
            return Ok(());
        }
        Some(Commands::Prompt) => {
            println!("{SYSTEM_PROMPT}");
            return Ok(());
        }
        _ => {}
    }

    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    init_tracing(interactive)?;

    let settings = Settings::load(&cli.overrides())?;
    info!(endpoint = %settings.endpoint, model = %settings.model, "Settings loaded");

    match &cli.command {
        Some(Commands::Classify { item, export }) => classify_one(&settings, item, export),
        Some(Commands::Batch { file, export }) => classify_many(&settings, file.as_deref(), export),
        _ => crate::tui::run_interactive(&settings),
    }
}

/// CLI logs to stderr; the TUI logs to a file so lines never land on the screen
fn init_tracing(interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| if interactive { "info".into() } else { "warn".into() });

    let writer = if interactive {
        match open_tui_log(log_file_path()) {
            Some(file) => BoxMakeWriter::new(Mutex::new(file)),
            None => BoxMakeWriter::new(io::sink),
        }
    } else {
        BoxMakeWriter::new(io::stderr)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(!interactive)
        .with_writer(writer)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))?;

    Ok(())
}

/// Open the TUI log file, creating its directory.
///
/// Any failure is reported on stderr (the alternate screen is not up yet) and
/// turns file logging off rather than keeping the TUI from starting.
fn open_tui_log(path: Result<PathBuf>) -> Option<File> {
    let opened = path.and_then(|path| {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))
    });

    match opened {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    }
}

fn classify_one(settings: &Settings, item: &str, export: &ExportArgs) -> Result<()> {
    let classifier = OllamaClassifier::new(settings)?;
    let mut session = Session::new();

    match session.classify_item(&classifier, item) {
        ItemOutcome::Classified(record) => print_record(&record),
        ItemOutcome::Failed { error, .. } if error.is_validation() => bail!("{error}"),
        ItemOutcome::Failed { item, error } => {
            eprintln!(
                "Make sure the inference service is running and {} is available.",
                settings.model
            );
            bail!("Classification failed for '{}': {error}", single_line(&item));
        }
    }

    if let Some(path) = &export.export {
        write_export(path, &session, export.columns())?;
    }

    Ok(())
}

fn classify_many(settings: &Settings, file: Option<&Path>, export: &ExportArgs) -> Result<()> {
    let input = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read items from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("Failed to read items from stdin")?;
            buf
        }
    };

    let classifier = OllamaClassifier::new(settings)?;
    let mut session = Session::new();
    let report = session.classify_batch(&classifier, &input);

    if report.is_empty() {
        bail!("Please enter at least one item.");
    }

    for (item, error) in report.failures() {
        eprintln!("Failed for item: {}: {error}", single_line(item));
    }

    if !session.is_empty() {
        println!("{}", render_text_table(session.records()));
        println!("Waste Category Distribution");
        println!("{}", render_text_chart(&category_counts(session.records())));
    }
    println!("{} classified, {} failed", report.succeeded(), report.failed());

    if let Some(path) = &export.export {
        if session.is_empty() {
            eprintln!("Nothing to export: no item was classified");
        } else {
            write_export(path, &session, export.columns())?;
        }
    }

    Ok(())
}

fn print_record(record: &ClassificationRecord) {
    println!("Item: {}", single_line(&record.item));
    for field in Field::ALL {
        println!("{}: {}", field.label(), single_line(record.field(field)));
    }
}

fn write_export(path: &Path, session: &Session, columns: ExportColumns) -> Result<()> {
    export_csv(path, session.records(), columns)?;
    println!("Exported {} rows to {}", session.len(), path.display());
    Ok(())
}

fn print_notes() {
    println!("Data handling");
    println!("=============");
    for note in DATA_HANDLING_NOTES {
        println!("- {note}");
    }
}
