//! Readiness gate for the one-time bracket load at startup.
//!
//! The engine must not run until its bracket table has been fetched. The gate
//! starts the fetch in the background and lets callers wait for it; if the
//! fetch fails the gate stays disabled for the rest of the process.

use std::sync::Arc;

use ngtax_core::{BracketTable, ConfigurationError};
use tokio::sync::watch;
use tracing::{error, info};

use crate::source::BracketSource;

/// Current state of the bracket load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineStatus {
    Loading,
    Ready(Arc<BracketTable>),
    Disabled(ConfigurationError),
}

impl EngineStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Handle that callers wait on before using the engine.
///
/// Cloning is cheap; every clone observes the same load.
#[derive(Debug, Clone)]
pub struct EngineGate {
    status: watch::Receiver<EngineStatus>,
}

impl EngineGate {
    /// Starts loading `source` on the current tokio runtime.
    pub fn spawn<S>(source: S) -> Self
    where
        S: BracketSource + 'static,
    {
        let (tx, rx) = watch::channel(EngineStatus::Loading);
        tokio::spawn(async move {
            let status = resolve(&source).await;
            tx.send_replace(status);
        });
        Self { status: rx }
    }

    /// Snapshot of the current state without waiting.
    pub fn status(&self) -> EngineStatus {
        self.status.borrow().clone()
    }

    /// Waits for the load to finish.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigurationError`] that disabled the engine. Every
    /// later call returns the same error; the load is never retried.
    pub async fn ready(&self) -> Result<Arc<BracketTable>, ConfigurationError> {
        let mut rx = self.status.clone();
        let status = match rx
            .wait_for(|s| !matches!(s, EngineStatus::Loading))
            .await
        {
            Ok(status) => status.clone(),
            Err(_) => EngineStatus::Loading,
        };

        match status {
            EngineStatus::Ready(table) => Ok(table),
            EngineStatus::Disabled(err) => Err(err),
            EngineStatus::Loading => Err(ConfigurationError::Missing(
                "bracket loader stopped before finishing".to_string(),
            )),
        }
    }
}

async fn resolve<S: BracketSource>(source: &S) -> EngineStatus {
    match source.load().await {
        Ok(table) => {
            info!(source = %source.describe(), brackets = table.len(), "bracket table ready");
            EngineStatus::Ready(Arc::new(table))
        }
        Err(err) => {
            error!(source = %source.describe(), %err, "bracket table failed to load; engine disabled");
            EngineStatus::Disabled(err.into())
        }
    }
}
