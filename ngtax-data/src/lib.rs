//! Bracket configuration loading for the Nigerian tax engine.

pub mod gate;
pub mod loader;
pub mod source;

pub use gate::{EngineGate, EngineStatus};
pub use loader::{
    BracketConfigLoader, BracketFormat, BracketLoaderError, BracketRecord,
    EMBEDDED_BRACKETS_JSON,
};
pub use source::{BracketSource, EmbeddedBracketSource, FileBracketSource};
