use std::ops::Deref;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// A contiguous income range taxed at a single marginal rate.
///
/// `max` of `None` marks the unbounded top bracket (`null` in JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min: Decimal,
    pub max: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    /// Upper bound used by the bracket walk; `Decimal::MAX` when unbounded.
    pub fn upper_bound(&self) -> Decimal {
        self.max.unwrap_or(Decimal::MAX)
    }

    pub fn is_unbounded(&self) -> bool {
        self.max.is_none()
    }

    /// Whether `amount` lies inside this bracket (`min < amount <= max`).
    pub fn contains(
        &self,
        amount: Decimal,
    ) -> bool {
        amount > self.min && amount <= self.upper_bound()
    }
}

/// A validated, immutable bracket table.
///
/// The brackets are ascending, contiguous from 0 and end with a single
/// unbounded bracket. Once built the table never changes, so it can be shared
/// freely between callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Validates `brackets` and wraps them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the table is empty, does not start at
    /// zero, is out of order, has gaps or overlaps, carries a rate outside
    /// `0..=1`, or does not end with exactly one unbounded bracket.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, ConfigurationError> {
        validate(&brackets)?;
        Ok(Self { brackets })
    }

    pub fn as_slice(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// The bracket whose range contains `amount`, if `amount` is positive.
    pub fn bracket_for(
        &self,
        amount: Decimal,
    ) -> Option<&TaxBracket> {
        self.brackets.iter().find(|b| b.contains(amount))
    }

    /// Marginal rate applied to the last unit of `amount`.
    pub fn marginal_rate(
        &self,
        amount: Decimal,
    ) -> Decimal {
        self.bracket_for(amount)
            .map(|b| b.rate)
            .unwrap_or(Decimal::ZERO)
    }
}

impl Deref for BracketTable {
    type Target = [TaxBracket];

    fn deref(&self) -> &Self::Target {
        &self.brackets
    }
}

impl TryFrom<Vec<TaxBracket>> for BracketTable {
    type Error = ConfigurationError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl<'de> Deserialize<'de> for BracketTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let brackets = Vec::<TaxBracket>::deserialize(deserializer)?;
        BracketTable::new(brackets).map_err(serde::de::Error::custom)
    }
}

pub(crate) fn validate(brackets: &[TaxBracket]) -> Result<(), ConfigurationError> {
    let first = brackets.first().ok_or(ConfigurationError::Empty)?;
    if first.min != Decimal::ZERO {
        return Err(ConfigurationError::NotAnchoredAtZero(first.min));
    }

    let last_index = brackets.len() - 1;
    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(ConfigurationError::RateOutOfRange {
                index,
                rate: bracket.rate,
            });
        }

        match bracket.max {
            Some(max) if max <= bracket.min => {
                return Err(ConfigurationError::EmptyRange {
                    index,
                    min: bracket.min,
                    max,
                });
            }
            Some(max) if index == last_index => {
                return Err(ConfigurationError::LastBracketBounded(max));
            }
            None if index != last_index => {
                return Err(ConfigurationError::UnboundedBeforeLast(index));
            }
            _ => {}
        }

        if index == 0 {
            continue;
        }
        let previous = &brackets[index - 1];
        if bracket.min <= previous.min {
            return Err(ConfigurationError::Unordered {
                index,
                min: bracket.min,
                previous_min: previous.min,
            });
        }
        // previous.max is Some here: an earlier None would have failed above.
        let previous_max = previous.upper_bound();
        if bracket.min != previous_max {
            return Err(ConfigurationError::NotContiguous {
                index,
                min: bracket.min,
                previous_max,
            });
        }
    }

    Ok(())
}
