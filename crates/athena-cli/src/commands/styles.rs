//! Style export

use super::{load_document, write_output, CommandResult};
use athena_core::styles::collect_styles;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct StylesArgs {
    /// JSON dump of the design file
    #[arg(long)]
    pub document: PathBuf,

    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn execute(args: StylesArgs) -> CommandResult {
    let document = load_document(&args.document)?;
    let payload = collect_styles(&document)?;
    write_output(args.out.as_ref(), &serde_json::to_string_pretty(&payload)?)
}
