//! # Command Line Interface
//!
//! `gwvalidate check` validates every document found in the given files;
//! `gwvalidate check-update` validates documents as updates of earlier
//! versions. Violations are printed on stdout, as text or JSON, and turn
//! into a [`GwValidateError::Validation`] so the binary exits non-zero.

use crate::config::{CheckConfig, OutputFormat, Settings};
use crate::document::{load_documents, validate_document, validate_document_update, ConfigDocument};
use crate::errors::{GwValidateError, Result};
use crate::validation::ErrorList;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "gwvalidate")]
#[command(about = "Semantic validation for gateway routing configuration")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (defaults to ./gwvalidate.yaml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Report format override
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Namespace for documents that do not carry one
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate every document in the given YAML or JSON files
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Validate the documents in NEW as updates of those in OLD
    CheckUpdate {
        /// File holding the current documents
        #[arg(long)]
        old: PathBuf,

        /// File holding the updated documents, in the same order
        #[arg(long)]
        new: PathBuf,
    },
}

impl Cli {
    /// Apply command line overrides on top of loaded settings
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if self.verbose {
            settings.observability.log_level = "debug".to_string();
        }
        if let Some(output) = self.output {
            settings.check.output = output;
        }
        if let Some(namespace) = &self.namespace {
            settings.check.default_namespace = namespace.clone();
        }
    }
}

/// Violations found in one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub source: String,
    pub document: String,
    pub errors: ErrorList,
}

impl DocumentReport {
    fn new(source: &Path, document: &ConfigDocument, errors: ErrorList) -> Self {
        let report =
            Self { source: source.display().to_string(), document: document.display_name(), errors };
        let span = crate::document_span!(report.source, report.document);
        span.record("violations", report.errors.len());
        let _entered = span.enter();
        for error in report.errors.iter() {
            debug!(%error, "violation");
        }
        report
    }
}

/// Run the parsed command and print its report.
pub fn run_cli(cli: &Cli, settings: &Settings) -> Result<()> {
    let reports = match &cli.command {
        Commands::Check { files } => check_files(files, &settings.check)?,
        Commands::CheckUpdate { old, new } => check_update(old, new, &settings.check)?,
    };

    let rendered = render(&reports, settings.check.output)?;
    if !rendered.is_empty() {
        println!("{}", rendered);
    }

    let violations = violation_count(&reports);
    info!(documents = reports.len(), violations, "check finished");
    if violations > 0 {
        let failing = reports.iter().filter(|r| !r.errors.is_empty()).count();
        return Err(GwValidateError::validation(
            format!("{} violation(s) in {} of {} document(s)", violations, failing, reports.len()),
            violations,
        ));
    }
    Ok(())
}

/// Validate every document in `files`.
pub fn check_files(files: &[PathBuf], check: &CheckConfig) -> Result<Vec<DocumentReport>> {
    let mut reports = Vec::new();
    for path in files {
        for mut document in load_documents(path)? {
            document.apply_default_namespace(&check.default_namespace);
            let errors = validate_document(&document);
            reports.push(DocumentReport::new(path, &document, errors));
        }
    }
    Ok(reports)
}

/// Validate the documents in `new` as updates of the documents in `old`,
/// pairing them by position.
pub fn check_update(old: &Path, new: &Path, check: &CheckConfig) -> Result<Vec<DocumentReport>> {
    let previous = load_documents(old)?;
    let updated = load_documents(new)?;
    if previous.len() != updated.len() {
        return Err(GwValidateError::validation(
            format!(
                "{} holds {} document(s) but {} holds {}",
                old.display(),
                previous.len(),
                new.display(),
                updated.len()
            ),
            1,
        ));
    }

    let mut reports = Vec::with_capacity(updated.len());
    for (mut before, mut after) in previous.into_iter().zip(updated) {
        before.apply_default_namespace(&check.default_namespace);
        after.apply_default_namespace(&check.default_namespace);
        let errors = validate_document_update(&before, &after)
            .map_err(|e| e.with_context(after.display_name()))?;
        reports.push(DocumentReport::new(new, &after, errors));
    }
    Ok(reports)
}

/// Total number of violations across `reports`.
pub fn violation_count(reports: &[DocumentReport]) -> usize {
    reports.iter().map(|r| r.errors.len()).sum()
}

/// Render reports in the requested format.
///
/// Text output has one line per violation and nothing for clean documents;
/// JSON output lists every document.
pub fn render(reports: &[DocumentReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(reports)?),
        OutputFormat::Text => Ok(reports
            .iter()
            .flat_map(|report| {
                report
                    .errors
                    .iter()
                    .map(move |error| format!("{}: {}: {}", report.source, report.document, error))
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
