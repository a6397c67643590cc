//! One-shot component export

use super::{load_document, write_output, CommandResult};
use athena_core::config::AthenaConfig;
use athena_core::export::full_result;
use athena_core::Extractor;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    Document,
    CurrentPage,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// JSON dump of the design file
    #[arg(long)]
    pub document: PathBuf,

    #[arg(long, value_enum, default_value = "document")]
    pub scope: ScopeArg,

    /// Write the export here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn execute(args: ExportArgs, config: &AthenaConfig) -> CommandResult {
    let document = load_document(&args.document)?;
    let mut extractor = Extractor::new(&document, config.export.clone());
    let extraction = match args.scope {
        ScopeArg::Document => extractor.extract_components_from_document(),
        ScopeArg::CurrentPage => extractor.extract_components_from_current_page(),
    };

    for error in &extraction.errors {
        eprintln!("warning: {}", error);
    }
    if !extraction.errors.is_empty() {
        eprintln!(
            "{} component(s) could not be exported",
            extraction.errors.len()
        );
    }

    let payload = full_result(&extraction.export)?;
    write_output(args.out.as_ref(), &payload.json)
}
