//! Where the library token document used for alias resolution comes from.

use crate::errors::{AthenaError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;

/// Source of the remote token export document (raw JSON text)
#[async_trait]
pub trait RemoteTokenSource: Send + Sync {
    async fn fetch(&self) -> Result<String>;

    /// Where the document comes from, for diagnostics
    fn location(&self) -> String;
}

/// Fetches the document over HTTPS
pub struct HttpTokenSource {
    client: Client,
    url: String,
}

impl HttpTokenSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl RemoteTokenSource for HttpTokenSource {
    async fn fetch(&self) -> Result<String> {
        let remote_err = |reason: String| AthenaError::RemoteSource {
            url: self.url.clone(),
            reason,
        };
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| remote_err(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(remote_err(format!("HTTP {}", status)));
        }
        response.text().await.map_err(|e| remote_err(e.to_string()))
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Reads the document from a local file
pub struct FileTokenSource {
    path: PathBuf,
}

impl FileTokenSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RemoteTokenSource for FileTokenSource {
    async fn fetch(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| AthenaError::RemoteSource {
                url: self.path.display().to_string(),
                reason: e.to_string(),
            })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
