//! Bucketed usage events.
//!
//! Raw income and tax figures never leave the engine; only coarse bands are
//! recorded, as a single `tracing` event on the `ngtax::analytics` target.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::info;

use crate::{RegimeComparison, TaxRegime};

/// Coarse gross-income band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeBucket {
    UpTo800k,
    UpTo3m,
    UpTo12m,
    UpTo25m,
    UpTo50m,
    Above50m,
}

impl IncomeBucket {
    pub fn from_amount(income: Decimal) -> Self {
        if income <= dec!(800000) {
            Self::UpTo800k
        } else if income <= dec!(3000000) {
            Self::UpTo3m
        } else if income <= dec!(12000000) {
            Self::UpTo12m
        } else if income <= dec!(25000000) {
            Self::UpTo25m
        } else if income <= dec!(50000000) {
            Self::UpTo50m
        } else {
            Self::Above50m
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpTo800k => "0-800k",
            Self::UpTo3m => "800k-3m",
            Self::UpTo12m => "3m-12m",
            Self::UpTo25m => "12m-25m",
            Self::UpTo50m => "25m-50m",
            Self::Above50m => "50m+",
        }
    }
}

impl fmt::Display for IncomeBucket {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse annual-tax band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxBucket {
    Zero,
    UpTo100k,
    UpTo500k,
    UpTo2m,
    Above2m,
}

impl TaxBucket {
    pub fn from_amount(tax: Decimal) -> Self {
        if tax <= Decimal::ZERO {
            Self::Zero
        } else if tax <= dec!(100000) {
            Self::UpTo100k
        } else if tax <= dec!(500000) {
            Self::UpTo500k
        } else if tax <= dec!(2000000) {
            Self::UpTo2m
        } else {
            Self::Above2m
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::UpTo100k => "0-100k",
            Self::UpTo500k => "100k-500k",
            Self::UpTo2m => "500k-2m",
            Self::Above2m => "2m+",
        }
    }
}

impl fmt::Display for TaxBucket {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What gets recorded for one calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculationEvent {
    pub income_bucket: IncomeBucket,
    pub old_tax_bucket: TaxBucket,
    pub new_tax_bucket: TaxBucket,
    pub cheaper: Option<TaxRegime>,
    pub used_reliefs: bool,
}

impl CalculationEvent {
    pub fn from_comparison(comparison: &RegimeComparison) -> Self {
        Self {
            income_bucket: IncomeBucket::from_amount(comparison.income),
            old_tax_bucket: TaxBucket::from_amount(comparison.old_tax),
            new_tax_bucket: TaxBucket::from_amount(comparison.new.tax),
            cheaper: comparison.cheaper,
            used_reliefs: comparison.new.reliefs().total() > Decimal::ZERO,
        }
    }
}

/// Emits the event on the `ngtax::analytics` target.
pub fn record_calculation(event: &CalculationEvent) {
    info!(
        target: "ngtax::analytics",
        income_bucket = %event.income_bucket,
        old_tax_bucket = %event.old_tax_bucket,
        new_tax_bucket = %event.new_tax_bucket,
        cheaper = event.cheaper.map(|r| r.as_str()).unwrap_or("equal"),
        used_reliefs = event.used_reliefs,
        "calculation"
    );
}
