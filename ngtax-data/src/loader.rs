use std::io::Read;
use std::path::Path;

use ngtax_core::{BracketTable, ConfigurationError, TaxBracket};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// The bracket table bundled with the crate (2026 regime).
pub const EMBEDDED_BRACKETS_JSON: &str = include_str!("../data/brackets_2026.json");

/// Errors that can occur when loading tax bracket data.
#[derive(Debug, Error)]
pub enum BracketLoaderError {
    #[error("cannot read {path}: {message}")]
    Io { path: String, message: String },

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unsupported bracket file format '{0}' (expected .json or .csv)")]
    UnsupportedFormat(String),

    #[error("invalid bracket table: {0}")]
    Invalid(#[from] ConfigurationError),
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

impl From<serde_json::Error> for BracketLoaderError {
    fn from(err: serde_json::Error) -> Self {
        BracketLoaderError::JsonParse(err.to_string())
    }
}

impl From<BracketLoaderError> for ConfigurationError {
    fn from(err: BracketLoaderError) -> Self {
        match err {
            BracketLoaderError::Io { .. } => ConfigurationError::Missing(err.to_string()),
            BracketLoaderError::Invalid(inner) => inner,
            other => ConfigurationError::Malformed(other.to_string()),
        }
    }
}

/// Supported on-disk formats, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketFormat {
    Json,
    Csv,
}

impl BracketFormat {
    pub fn from_path(path: &Path) -> Result<Self, BracketLoaderError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(BracketLoaderError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

/// A single record from a bracket CSV file.
///
/// - `min`: lower bound of the bracket
/// - `max`: upper bound (empty for unbounded)
/// - `rate`: marginal rate as a decimal (e.g., 0.15 for 15%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub min: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max: Option<Decimal>,
    pub rate: Decimal,
}

impl From<BracketRecord> for TaxBracket {
    fn from(record: BracketRecord) -> Self {
        TaxBracket {
            min: record.min,
            max: record.max,
            rate: record.rate,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket configuration in JSON or CSV form.
///
/// Parsing returns the raw brackets; the `load_*` methods also validate them
/// into a [`BracketTable`].
pub struct BracketConfigLoader;

impl BracketConfigLoader {
    /// Parse brackets from a JSON array of `{min, max, rate}` records.
    ///
    /// `max` may be `null` for the unbounded top bracket.
    pub fn parse_json<R: Read>(reader: R) -> Result<Vec<TaxBracket>, BracketLoaderError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parse brackets from CSV with a `min,max,rate` header.
    pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<TaxBracket>, BracketLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut brackets = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            brackets.push(record.into());
        }

        Ok(brackets)
    }

    /// Parse and validate in one step.
    pub fn load_reader<R: Read>(
        reader: R,
        format: BracketFormat,
    ) -> Result<BracketTable, BracketLoaderError> {
        let brackets = match format {
            BracketFormat::Json => Self::parse_json(reader)?,
            BracketFormat::Csv => Self::parse_csv(reader)?,
        };
        Ok(BracketTable::new(brackets)?)
    }

    /// Read, parse and validate a bracket file, choosing the format from its
    /// extension.
    pub fn load_path(path: &Path) -> Result<BracketTable, BracketLoaderError> {
        let format = BracketFormat::from_path(path)?;
        let file = std::fs::File::open(path).map_err(|e| BracketLoaderError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::load_reader(file, format)
    }

    /// The bundled 2026 table.
    pub fn embedded() -> Result<BracketTable, BracketLoaderError> {
        Self::load_reader(EMBEDDED_BRACKETS_JSON.as_bytes(), BracketFormat::Json)
    }
}
