use std::fmt;

use serde::{Deserialize, Deserializer};

/// Absorbs float noise (0.33 + 0.33 = 0.6600000000000001) before a ceiling.
const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuantityError {
    #[error("Empty quantity")]
    Empty,

    #[error("Invalid number format: {0}")]
    InvalidNumber(String),

    #[error("Invalid fraction format: {0}")]
    InvalidFraction(String),

    #[error("Denominator cannot be zero")]
    ZeroDenominator,

    #[error("Negative quantities are not allowed")]
    Negative,

    #[error("Quantity is not a finite number")]
    NotFinite,
}

fn vulgar_fraction(c: char) -> Option<f64> {
    match c {
        '¼' => Some(0.25),
        '½' => Some(0.5),
        '¾' => Some(0.75),
        '⅓' => Some(1.0 / 3.0),
        '⅔' => Some(2.0 / 3.0),
        '⅛' => Some(0.125),
        '⅜' => Some(0.375),
        '⅝' => Some(0.625),
        '⅞' => Some(0.875),
        _ => None,
    }
}

/// Parse a quantity string into a number
///
/// Supports formats:
/// - Whole numbers: "2"
/// - Decimals: "0.5"
/// - Pure fractions: "1/2"
/// - Mixed fractions: "1 1/2"
/// - Unicode fractions: "½", "1½", "1 ½"
/// - Ranges: "2-3" (first number wins)
pub fn parse_quantity(quantity_str: &str) -> Result<f64, QuantityError> {
    let mut trimmed = quantity_str.trim();

    if let Some((first, _)) = trimmed.split_once('-') {
        trimmed = first.trim();
    }

    if trimmed.is_empty() {
        return Err(QuantityError::Empty);
    }

    let mut total = 0.0;
    for part in trimmed.split_whitespace() {
        total += parse_part(part)?;
    }

    check(total)
}

fn parse_part(part: &str) -> Result<f64, QuantityError> {
    // "1½" is a whole number glued to a vulgar fraction
    if let Some(last) = part.chars().last()
        && let Some(fraction) = vulgar_fraction(last)
    {
        let whole = &part[..part.len() - last.len_utf8()];
        if whole.is_empty() {
            return Ok(fraction);
        }
        return Ok(parse_number(whole)? + fraction);
    }

    if let Some((numerator, denominator)) = part.split_once('/') {
        let numerator = numerator
            .parse::<f64>()
            .map_err(|_| QuantityError::InvalidFraction(part.to_string()))?;
        let denominator = denominator
            .parse::<f64>()
            .map_err(|_| QuantityError::InvalidFraction(part.to_string()))?;

        if denominator == 0.0 {
            return Err(QuantityError::ZeroDenominator);
        }

        return check(numerator / denominator);
    }

    parse_number(part)
}

fn parse_number(text: &str) -> Result<f64, QuantityError> {
    let value = text
        .parse::<f64>()
        .map_err(|_| QuantityError::InvalidNumber(text.to_string()))?;

    check(value)
}

fn check(value: f64) -> Result<f64, QuantityError> {
    if !value.is_finite() {
        return Err(QuantityError::NotFinite);
    }

    if value < 0.0 {
        return Err(QuantityError::Negative);
    }

    Ok(value)
}

/// Round a summed quantity up so a shopper never under-buys
///
/// - < 1: ceiling at two decimals (0.666 → 0.67)
/// - >= 1: ceiling to the next whole number (1.2 → 2)
pub fn round_up(total: f64) -> f64 {
    let rounded = if total < 1.0 {
        ((total * 100.0) - EPSILON).ceil() / 100.0
    } else {
        (total - EPSILON).ceil()
    };

    // ceil(-1e-9) is -0.0
    rounded + 0.0
}

/// Format a quantity for display: "3", "0.67", "0.5"
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }

    let formatted = format!("{:.2}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Serde helper: accept a number, a quantity string or null, and degrade
/// anything unparseable to `None`
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let raw = Option::<Raw>::deserialize(deserializer)?;

    let parsed = match raw {
        None => return Ok(None),
        Some(Raw::Number(value)) => check(value),
        Some(Raw::Text(text)) => parse_quantity(&text),
        Some(Raw::Other(_)) => Err(QuantityError::InvalidNumber("non-numeric value".to_string())),
    };

    match parsed {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            tracing::debug!(error = %err, "quantity treated as missing");
            Ok(None)
        }
    }
}

/// Display wrapper used by the text renderer
pub struct Quantity(pub f64);

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_quantity(self.0))
    }
}
