//! Token export

use super::{load_document, token_source, write_output, CommandResult};
use athena_core::config::AthenaConfig;
use athena_core::tokens::{collect_tokens, AliasResolver};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TokensArgs {
    /// JSON dump of the design file
    #[arg(long)]
    pub document: PathBuf,

    /// Library token document used to resolve aliases (defaults to the
    /// configured URL)
    #[arg(long, conflicts_with = "no_remote")]
    pub token_source: Option<PathBuf>,

    /// Leave library aliases unresolved
    #[arg(long)]
    pub no_remote: bool,

    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn execute(args: TokensArgs, config: &AthenaConfig) -> CommandResult {
    let document = load_document(&args.document)?;
    let resolver = if args.no_remote {
        AliasResolver::disabled()
    } else {
        AliasResolver::new(token_source(args.token_source.as_ref(), config))
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let payload = runtime.block_on(collect_tokens(&document, &resolver))?;
    write_output(args.out.as_ref(), &serde_json::to_string_pretty(&payload)?)
}
