//! Command-line front end for the Nigerian tax engine.

pub mod app;
pub mod cli;
pub mod logging;
pub mod preferences;
pub mod render;
