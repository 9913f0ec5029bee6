use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ngtax_core::BracketTable;
use tracing::debug;

use crate::loader::{BracketConfigLoader, BracketFormat, BracketLoaderError};

/// Somewhere a bracket table can be fetched from.
///
/// Implementations are free to do I/O; the result is validated before it is
/// returned, so a successful load is always usable by the engine.
#[async_trait]
pub trait BracketSource: Send + Sync {
    /// Human-readable origin, for logs and error messages.
    fn describe(&self) -> String;

    async fn load(&self) -> Result<BracketTable, BracketLoaderError>;
}

/// Reads a JSON or CSV bracket file from disk.
#[derive(Debug, Clone)]
pub struct FileBracketSource {
    path: PathBuf,
}

impl FileBracketSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl BracketSource for FileBracketSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<BracketTable, BracketLoaderError> {
        let format = BracketFormat::from_path(&self.path)?;
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| BracketLoaderError::Io {
                path: self.describe(),
                message: e.to_string(),
            })?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "read bracket file");
        BracketConfigLoader::load_reader(bytes.as_slice(), format)
    }
}

/// The table compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedBracketSource;

#[async_trait]
impl BracketSource for EmbeddedBracketSource {
    fn describe(&self) -> String {
        "embedded 2026 table".to_string()
    }

    async fn load(&self) -> Result<BracketTable, BracketLoaderError> {
        BracketConfigLoader::embedded()
    }
}
