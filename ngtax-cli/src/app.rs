//! Command execution.
//!
//! Each command writes its output to the given writer so it can be captured
//! in tests; logs go through `tracing` to stderr.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use ngtax_core::analytics::{CalculationEvent, record_calculation};
use ngtax_core::calculations::common::parse_amount;
use ngtax_core::{ReliefInputs, TaxEngine, TaxEngineError};
use ngtax_data::{EmbeddedBracketSource, EngineGate, FileBracketSource};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::cli::{BracketsArgs, CalculateArgs, Command, PrefsAction};
use crate::preferences::{PreferenceStore, Preferences};
use crate::render::{
    CalculationReport, RegimeReport, render_brackets, render_calculation, render_regime,
};

/// Environment variable naming the default bracket file.
pub const BRACKETS_ENV: &str = "NGTAX_BRACKETS";

/// Runs one parsed command.
///
/// `store` is `None` when no config directory could be determined; commands
/// that only read preferences then behave as if none were saved.
pub async fn run<W: Write>(
    command: Command,
    store: Option<&PreferenceStore>,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Calculate(args) => calculate(&args, store, out).await,
        Command::Brackets(args) => brackets(&args, store, out).await,
        Command::Prefs { action } => prefs(action, store, out),
    }
}

/// Starts loading the bracket table from `path`, or the built-in table when
/// no path is given.
pub fn spawn_gate(path: Option<&Path>) -> EngineGate {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading brackets from file");
            EngineGate::spawn(FileBracketSource::new(path))
        }
        None => EngineGate::spawn(EmbeddedBracketSource),
    }
}

fn brackets_from_env() -> Option<PathBuf> {
    std::env::var_os(BRACKETS_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Bracket file to load: the flag, then `$NGTAX_BRACKETS`, then the
/// remembered path. `None` means the built-in table.
fn resolve_brackets_path(
    flag: Option<&Path>,
    env: Option<PathBuf>,
    remembered: Option<&Path>,
) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or(env)
        .or_else(|| remembered.map(Path::to_path_buf))
}

/// Bracket path saved by `--remember`. Only an explicit flag replaces the
/// remembered value; `$NGTAX_BRACKETS` is never persisted.
fn brackets_path_to_remember(
    flag: Option<&Path>,
    remembered: Option<&Path>,
) -> Option<PathBuf> {
    flag.or(remembered).map(Path::to_path_buf)
}

fn load_preferences(store: Option<&PreferenceStore>) -> Result<Preferences> {
    match store {
        Some(store) => store
            .load()
            .with_context(|| format!("Failed to read preferences: {}", store.path().display())),
        None => Ok(Preferences::default()),
    }
}

/// A flag wins over the remembered value.
fn resolve_amount(
    field: &'static str,
    flag: Option<&str>,
    remembered: Option<Decimal>,
) -> Result<Option<Decimal>, TaxEngineError> {
    match flag {
        Some(text) => parse_amount(field, text).map(Some),
        None => Ok(remembered),
    }
}

pub async fn calculate<W: Write>(
    args: &CalculateArgs,
    store: Option<&PreferenceStore>,
    out: &mut W,
) -> Result<()> {
    let saved = load_preferences(store)?;

    let Some(income) = resolve_amount("income", args.income.as_deref(), saved.income)? else {
        bail!("no income given: pass --income or save one with --remember");
    };
    let reliefs = ReliefInputs::new(
        resolve_amount("rent", args.rent.as_deref(), saved.rent)?.unwrap_or_default(),
        resolve_amount("pension", args.pension.as_deref(), saved.pension)?.unwrap_or_default(),
        resolve_amount("insurance", args.insurance.as_deref(), saved.insurance)?
            .unwrap_or_default(),
    );
    let brackets_path = resolve_brackets_path(
        args.brackets.as_deref(),
        brackets_from_env(),
        saved.brackets_path.as_deref(),
    );

    let table = spawn_gate(brackets_path.as_deref())
        .ready()
        .await
        .context("Bracket table unavailable; tax engine disabled")?;
    let engine = TaxEngine::new(&table);

    if let Some(regime) = args.regime {
        let tax = engine.compute(regime, income, &reliefs)?;
        let report = RegimeReport::new(regime, income, tax);
        if args.json {
            let json = serde_json::to_string_pretty(&report).context("Failed to encode result")?;
            writeln!(out, "{json}")?;
        } else {
            write!(out, "{}", render_regime(&report))?;
        }
    } else {
        write_comparison(&engine, income, &reliefs, args, out)?;
    }

    if args.remember {
        let Some(store) = store else {
            bail!("cannot remember inputs: no config directory (set NGTAX_CONFIG_DIR)");
        };
        let brackets_path = brackets_path_to_remember(
            args.brackets.as_deref(),
            saved.brackets_path.as_deref(),
        );
        store
            .save(&Preferences::remember(income, &reliefs, brackets_path))
            .with_context(|| format!("Failed to save preferences: {}", store.path().display()))?;
    }

    Ok(())
}

fn write_comparison<W: Write>(
    engine: &TaxEngine<'_>,
    income: Decimal,
    reliefs: &ReliefInputs,
    args: &CalculateArgs,
    out: &mut W,
) -> Result<()> {
    let comparison = engine.compare(income, reliefs)?;
    record_calculation(&CalculationEvent::from_comparison(&comparison));

    let breakdown = args
        .breakdown
        .then(|| engine.bracket_breakdown(comparison.new.taxable_income));
    let report = CalculationReport {
        comparison,
        breakdown,
    };

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to encode result")?;
        writeln!(out, "{json}")?;
    } else {
        write!(out, "{}", render_calculation(&report))?;
    }
    Ok(())
}

pub async fn brackets<W: Write>(
    args: &BracketsArgs,
    store: Option<&PreferenceStore>,
    out: &mut W,
) -> Result<()> {
    let saved = load_preferences(store)?;
    let path = resolve_brackets_path(
        args.brackets.as_deref(),
        brackets_from_env(),
        saved.brackets_path.as_deref(),
    );
    let table = spawn_gate(path.as_deref())
        .ready()
        .await
        .context("Bracket table unavailable")?;

    if args.json {
        let json = serde_json::to_string_pretty(&*table).context("Failed to encode table")?;
        writeln!(out, "{json}")?;
    } else {
        write!(out, "{}", render_brackets(&table))?;
    }
    Ok(())
}

pub fn prefs<W: Write>(
    action: PrefsAction,
    store: Option<&PreferenceStore>,
    out: &mut W,
) -> Result<()> {
    let Some(store) = store else {
        bail!("no config directory: set NGTAX_CONFIG_DIR, XDG_CONFIG_HOME or HOME");
    };

    match action {
        PrefsAction::Show => {
            let saved = store
                .load()
                .with_context(|| format!("Failed to read preferences: {}", store.path().display()))?;
            if saved.is_empty() {
                writeln!(out, "No saved preferences ({}).", store.path().display())?;
            } else {
                let text = toml::to_string_pretty(&saved).context("Failed to encode preferences")?;
                writeln!(out, "# {}", store.path().display())?;
                write!(out, "{text}")?;
            }
        }
        PrefsAction::Clear => {
            if store.clear()? {
                writeln!(out, "Cleared {}.", store.path().display())?;
            } else {
                warn!(path = %store.path().display(), "no preferences to clear");
                writeln!(out, "Nothing to clear.")?;
            }
        }
    }
    Ok(())
}
