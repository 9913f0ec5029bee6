//! Tax calculation modules for the two Nigerian personal income tax regimes.
//!
//! The free functions here mirror the engine operations one-to-one and use
//! the statutory [`crate::TaxRules`]; [`crate::TaxEngine`] wraps them around a
//! pre-validated bracket table.

pub mod common;
mod new_regime;
mod old_regime;

pub use new_regime::compute_new_regime_tax;
pub use old_regime::compute_old_regime_tax;

pub(crate) use new_regime::{
    bracket_breakdown, compute_reliefs, new_regime_tax, validate_inputs,
};
pub(crate) use old_regime::old_regime_tax;
