//! JSON-lines message loop
//!
//! Every stdin line is one UI message; every outbound message and host
//! notification is written to stdout as one JSON line. A `cancel-export`
//! line stops a running page walk right away, then goes through the normal
//! routing like any other message.

use super::{load_document, token_source, CommandResult};
use athena_core::config::AthenaConfig;
use athena_core::session::{HostChannel, OutboundMessage, PluginRuntime};
use athena_core::tokens::AliasResolver;
use clap::Args;
use serde_json::{json, Value};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// JSON dump of the design file
    #[arg(long)]
    pub document: PathBuf,

    /// Library token document used to resolve aliases
    #[arg(long)]
    pub token_source: Option<PathBuf>,
}

/// Writes the host side of the protocol to stdout
struct StdoutHost;

impl StdoutHost {
    fn write_line(&self, value: &impl serde::Serialize) {
        let line = match serde_json::to_string(value) {
            Ok(line) => line,
            Err(err) => {
                tracing::error!(error = %err, "unserializable outbound message");
                return;
            }
        };
        let mut stdout = std::io::stdout().lock();
        if let Err(err) = writeln!(stdout, "{}", line).and_then(|_| stdout.flush()) {
            tracing::error!(error = %err, "stdout closed");
        }
    }
}

impl HostChannel for StdoutHost {
    fn post_message(&mut self, message: OutboundMessage) {
        self.write_line(&message);
    }

    fn notify(&mut self, text: &str, timeout_ms: u32) {
        self.write_line(&json!({
            "type": "notify",
            "payload": { "message": text, "timeout": timeout_ms }
        }));
    }
}

pub fn execute(args: ServeArgs, config: &AthenaConfig) -> CommandResult {
    let document = load_document(&args.document)?;
    let resolver = AliasResolver::new(token_source(args.token_source.as_ref(), config));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        let mut plugin = PluginRuntime::new(&document, config, resolver, StdoutHost);
        let cancel_slot = plugin.cancel_slot();
        let (tx, mut rx) = mpsc::unbounded_channel::<Value>();

        let reader = tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if line.trim().is_empty() {
                    continue;
                }
                let value: Value = match serde_json::from_str(&line) {
                    Ok(value) => value,
                    Err(err) => {
                        tracing::warn!(error = %err, "stdin line is not JSON");
                        continue;
                    }
                };
                if value.get("type").and_then(Value::as_str) == Some("cancel-export")
                    && cancel_slot.cancel_active()
                {
                    tracing::info!("running export interrupted");
                }
                if tx.send(value).is_err() {
                    break;
                }
            }
        });

        while let Some(message) = rx.recv().await {
            plugin.handle(message).await;
        }
        reader.await.ok();
    });
    Ok(())
}
