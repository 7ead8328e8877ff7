// File: crates/biblio-render/src/sink.rs
// Summary: Export sink boundary for the encoded share image.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink unavailable: {0}")]
    Unavailable(String),
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Receives the encoded PNG. Availability is never assumed; an absent
/// or failing sink is a failure outcome, not a crash.
#[async_trait]
pub trait ShareSink: Send + Sync {
    async fn deliver(&self, png_bytes: &[u8]) -> Result<(), SinkError>;
}

/// Writes the composite to a file.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl ShareSink for FileSink {
    async fn deliver(&self, png_bytes: &[u8]) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SinkError::Unavailable(e.to_string()))?;
        }
        std::fs::write(&self.path, png_bytes).map_err(|e| SinkError::Delivery(e.to_string()))
    }
}
