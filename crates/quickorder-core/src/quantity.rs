//! Quantity field parsing.
//!
//! The quantity input is free text. The raw text is kept verbatim for display
//! and parsed into a [`Quantity`] on every edit, so an invalid value can never
//! reach a cart line.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// A validated, positive line quantity.
///
/// Deserializing applies the same bounds as [`Quantity::new`] with
/// [`MAX_QUANTITY_PER_ITEM`] as the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Quantity of a single unit.
    pub const ONE: Quantity = Quantity(1);

    /// Create a quantity, rejecting zero and values above `max`.
    pub fn new(value: u32, max: u32) -> Result<Self, QuantityError> {
        if value == 0 {
            return Err(QuantityError::Zero);
        }
        if value > max {
            return Err(QuantityError::TooLarge { value, max });
        }
        Ok(Self(value))
    }

    /// Parse user input.
    ///
    /// Surrounding whitespace is ignored; anything else that is not an
    /// unsigned integer is rejected.
    pub fn parse(raw: &str, max: u32) -> Result<Self, QuantityError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QuantityError::Empty);
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(QuantityError::NotANumber(raw.to_string()));
        }
        match trimmed.parse::<u32>() {
            Ok(value) => Self::new(value, max),
            // All digits but out of u32 range.
            Err(_) => Err(QuantityError::TooLarge {
                value: u32::MAX,
                max,
            }),
        }
    }

    /// Get the numeric value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value, MAX_QUANTITY_PER_ITEM)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a quantity input was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    #[error("quantity is empty")]
    Empty,

    #[error("quantity is not a number: {0:?}")]
    NotANumber(String),

    #[error("quantity must be at least 1")]
    Zero,

    #[error("quantity {value} exceeds maximum allowed ({max})")]
    TooLarge { value: u32, max: u32 },
}

/// The quantity field as typed, plus its parse result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityInput {
    raw: String,
    parsed: Result<Quantity, QuantityError>,
}

impl QuantityInput {
    /// Record an edit of the quantity field.
    pub fn edit(raw: impl Into<String>, max: u32) -> Self {
        let raw = raw.into();
        let parsed = Quantity::parse(&raw, max);
        Self { raw, parsed }
    }

    /// The text exactly as entered.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parse result.
    pub fn parsed(&self) -> Result<Quantity, QuantityError> {
        self.parsed.clone()
    }

    pub fn is_valid(&self) -> bool {
        self.parsed.is_ok()
    }
}

impl Default for QuantityInput {
    fn default() -> Self {
        Self {
            raw: Quantity::ONE.to_string(),
            parsed: Ok(Quantity::ONE),
        }
    }
}
