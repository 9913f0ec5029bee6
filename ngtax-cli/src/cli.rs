use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ngtax_core::TaxRegime;

/// Nigerian personal income tax calculator.
///
/// Compares the 2025 flat-rate regime with the 2026 bracket regime for the
/// same income and reliefs.
#[derive(Debug, Parser)]
#[command(name = "ngtax")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log filter: a level ("warn", "debug") or any RUST_LOG directive.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute tax under both regimes.
    Calculate(CalculateArgs),

    /// Print the active bracket table.
    Brackets(BracketsArgs),

    /// Inspect or remove remembered inputs.
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

/// Amounts accept `₦` or `NGN` prefixes and comma separators.
/// Omitted amounts fall back to remembered preferences, then to zero.
#[derive(Debug, Clone, Default, Args)]
pub struct CalculateArgs {
    /// Gross annual income.
    #[arg(long)]
    pub income: Option<String>,

    /// Annual rent paid.
    #[arg(long)]
    pub rent: Option<String>,

    /// Annual pension contributions.
    #[arg(long)]
    pub pension: Option<String>,

    /// Annual life insurance or annuity premiums.
    #[arg(long)]
    pub insurance: Option<String>,

    /// Bracket table (.json or .csv). Defaults to $NGTAX_BRACKETS, then the
    /// built-in 2026 table.
    #[arg(long)]
    pub brackets: Option<PathBuf>,

    /// Only compute this regime: "old"/"2025" or "new"/"2026".
    #[arg(long, value_parser = parse_regime, conflicts_with = "breakdown")]
    pub regime: Option<TaxRegime>,

    /// Show how the taxable income falls across the brackets.
    #[arg(long, default_value_t = false)]
    pub breakdown: bool,

    /// Print the result as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Save these inputs for next time.
    #[arg(long, default_value_t = false)]
    pub remember: bool,
}

fn parse_regime(s: &str) -> Result<TaxRegime, String> {
    TaxRegime::parse(s).ok_or_else(|| format!("unknown regime '{s}' (expected old, new, 2025 or 2026)"))
}

#[derive(Debug, Clone, Default, Args)]
pub struct BracketsArgs {
    /// Bracket table (.json or .csv). Defaults to $NGTAX_BRACKETS, then the
    /// built-in 2026 table.
    #[arg(long)]
    pub brackets: Option<PathBuf>,

    /// Print the table as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum PrefsAction {
    /// Print the remembered inputs.
    Show,
    /// Delete the preferences file.
    Clear,
}
