//! Lazy numeric realization
//!
//! Number nodes keep their literal verbatim. A numeric value is produced
//! only on request, and the numeric type is chosen from the literal's text
//! rather than its magnitude:
//!
//! - contains `e` or `E`: [`NumberClass::Float`]
//! - contains `.`, or is longer than the text of `i64::MAX` (19 chars), or
//!   starts with `-` and is longer than the text of `i64::MIN` (20 chars):
//!   [`NumberClass::Decimal`]
//! - otherwise [`NumberClass::Integer`]
//!
//! The length rule is applied to the literal as written. A 20 character
//! negative literal such as `-9223372036854775808` has the same length as
//! `i64::MIN` but is routed to the decimal path because it also exceeds the
//! positive bound.

use super::error::JsonError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Text length of `i64::MAX`
const I64_MAX_CHARS: usize = 19;
/// Text length of `i64::MIN`
const I64_MIN_CHARS: usize = 20;

/// Numeric type chosen for a literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberClass {
    /// 64-bit signed integer
    Integer,
    /// 64-bit binary float
    Float,
    /// 96-bit decimal
    Decimal,
}

impl NumberClass {
    /// Classify a raw literal
    pub fn of(literal: &str) -> Self {
        if literal.contains(['e', 'E']) {
            return NumberClass::Float;
        }
        let chars = literal.chars().count();
        if literal.contains('.')
            || (literal.starts_with('-') && chars > I64_MIN_CHARS)
            || chars > I64_MAX_CHARS
        {
            NumberClass::Decimal
        } else {
            NumberClass::Integer
        }
    }
}

/// A realized number
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonNumber {
    /// From [`NumberClass::Integer`]
    Integer(i64),
    /// From [`NumberClass::Float`]
    Float(f64),
    /// From [`NumberClass::Decimal`]
    Decimal(Decimal),
}

impl JsonNumber {
    /// Parse `literal` with the parser of its class
    pub fn realize(literal: &str) -> Result<Self, JsonError> {
        let class = NumberClass::of(literal);
        let invalid = |reason: String| JsonError::InvalidNumber {
            literal: literal.to_string(),
            class,
            reason,
        };
        match class {
            NumberClass::Integer => literal
                .parse::<i64>()
                .map(JsonNumber::Integer)
                .map_err(|e| invalid(e.to_string())),
            NumberClass::Float => literal
                .parse::<f64>()
                .map(JsonNumber::Float)
                .map_err(|e| invalid(e.to_string())),
            NumberClass::Decimal => Decimal::from_str(literal)
                .map(JsonNumber::Decimal)
                .map_err(|e| invalid(e.to_string())),
        }
    }

    /// The class this number was realized with
    pub fn class(&self) -> NumberClass {
        match self {
            JsonNumber::Integer(_) => NumberClass::Integer,
            JsonNumber::Float(_) => NumberClass::Float,
            JsonNumber::Decimal(_) => NumberClass::Decimal,
        }
    }

    /// Integral value, if it fits an `i64` exactly
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonNumber::Integer(i) => Some(*i),
            JsonNumber::Float(_) => None,
            JsonNumber::Decimal(d) if d.fract().is_zero() => d.to_i64(),
            JsonNumber::Decimal(_) => None,
        }
    }

    /// Nearest `f64`
    pub fn as_f64(&self) -> f64 {
        match self {
            JsonNumber::Integer(i) => *i as f64,
            JsonNumber::Float(f) => *f,
            JsonNumber::Decimal(d) => d.to_f64().unwrap_or(f64::NAN),
        }
    }
}
