//! Local cache of the last inputs the user asked to remember.
//!
//! Stored as TOML under the user's config directory. Nothing else is
//! persisted by the tool.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use ngtax_core::ReliefInputs;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable that overrides the preference directory.
pub const CONFIG_DIR_ENV: &str = "NGTAX_CONFIG_DIR";

const APP_DIR: &str = "ngtax";
const FILE_NAME: &str = "preferences.toml";

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("no config directory: set NGTAX_CONFIG_DIR, XDG_CONFIG_HOME or HOME")]
    NoConfigDir,

    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid preferences file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Remembered calculator inputs. Every field is optional; absent fields are
/// simply not remembered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pension: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brackets_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Preferences {
    /// Snapshot of one calculation's inputs, stamped with the current time.
    pub fn remember(
        income: Decimal,
        reliefs: &ReliefInputs,
        brackets_path: Option<PathBuf>,
    ) -> Self {
        Self {
            income: Some(income),
            rent: Some(reliefs.rent),
            pension: Some(reliefs.pension),
            insurance: Some(reliefs.insurance),
            brackets_path,
            saved_at: Some(Utc::now()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Reads and writes [`Preferences`] at a fixed path.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store keeping `preferences.toml` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(FILE_NAME),
        }
    }

    /// Store in the directory named by the environment.
    ///
    /// Lookup order: `$NGTAX_CONFIG_DIR`, `$XDG_CONFIG_HOME/ngtax`,
    /// `$HOME/.config/ngtax`.
    pub fn from_env() -> Result<Self, PreferencesError> {
        config_dir(|key| std::env::var(key).ok())
            .map(Self::in_dir)
            .ok_or(PreferencesError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored preferences. A missing file yields the defaults.
    pub fn load(&self) -> Result<Preferences, PreferencesError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no preferences file");
                return Ok(Preferences::default());
            }
            Err(source) => {
                return Err(PreferencesError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        toml::from_str(&content).map_err(|source| PreferencesError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes `prefs`, creating the directory if needed.
    pub fn save(
        &self,
        prefs: &Preferences,
    ) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| PreferencesError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(prefs)?;
        fs::write(&self.path, content).map_err(|source| PreferencesError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), "saved preferences");
        Ok(())
    }

    /// Removes the preferences file. Returns `false` if there was none.
    pub fn clear(&self) -> Result<bool, PreferencesError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "cleared preferences");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(PreferencesError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

fn config_dir(env: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    non_empty(CONFIG_DIR_ENV).map(PathBuf::from).or_else(|| {
        non_empty("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| non_empty("HOME").map(|h| PathBuf::from(h).join(".config")))
            .map(|base| base.join(APP_DIR))
    })
}
