//! Subcommands and the helpers they share.

pub mod export;
pub mod serve;
pub mod styles;
pub mod tokens;

use athena_core::config::{AthenaConfig, Loader};
use athena_core::Document;
use std::path::{Path, PathBuf};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

pub fn load_config(path: Option<&Path>) -> Result<AthenaConfig, Box<dyn std::error::Error>> {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    Ok(loader.build()?)
}

pub fn load_document(path: &Path) -> Result<Document, Box<dyn std::error::Error>> {
    Document::load(path).map_err(|e| format!("{}: {}", path.display(), e).into())
}

/// Write `text` to `out`, or to stdout when no file is given
pub fn write_output(out: Option<&PathBuf>, text: &str) -> CommandResult {
    match out {
        Some(path) => {
            std::fs::write(path, text)?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

pub fn print_config(config: &AthenaConfig) -> CommandResult {
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Remote token source: a local file when given, the configured URL otherwise
pub fn token_source(
    file: Option<&PathBuf>,
    config: &AthenaConfig,
) -> std::sync::Arc<dyn athena_core::tokens::RemoteTokenSource> {
    use athena_core::tokens::{FileTokenSource, HttpTokenSource};
    match file {
        Some(path) => std::sync::Arc::new(FileTokenSource::new(path)),
        None => std::sync::Arc::new(HttpTokenSource::new(&config.tokens.remote_source_url)),
    }
}
