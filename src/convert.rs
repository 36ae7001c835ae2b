//! # Display Hash Conversion
//!
//! Bitcoin-family hashes are computed and stored in internal (little-endian)
//! byte order but shown to users byte-reversed. This module turns a raw
//! byte array into that display form and back.
//!
//! The reversal is per byte: each hex pair stays intact, only pair order
//! changes. `[0x12, 0x34]` displays as `3412`.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::error::{json_kind, ConvertError};
use crate::telemetry::truncate_hex;

/// What to do with integers outside 0..=255
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    /// Fail with `OutOfRange`
    #[default]
    Reject,
    /// Reduce modulo 256 (-1 becomes 255)
    Mask,
}

impl RangePolicy {
    /// `literal` is a JSON integer literal of any magnitude
    fn apply(self, index: usize, literal: &str) -> Result<u8, ConvertError> {
        match self {
            RangePolicy::Reject => literal
                .parse::<i128>()
                .ok()
                .and_then(|value| u8::try_from(value).ok())
                .ok_or_else(|| ConvertError::OutOfRange {
                    index,
                    value: literal.to_string(),
                }),
            RangePolicy::Mask => Ok(reduce_mod_256(literal)),
        }
    }
}

impl fmt::Display for RangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RangePolicy::Reject => write!(f, "reject"),
            RangePolicy::Mask => write!(f, "mask"),
        }
    }
}

/// Euclidean remainder of a decimal integer literal, digit by digit
fn reduce_mod_256(literal: &str) -> u8 {
    let (negative, digits) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal),
    };
    let rem = digits
        .bytes()
        .fold(0u32, |acc, d| (acc * 10 + u32::from(d - b'0')) % 256);

    if negative {
        ((256 - rem) % 256) as u8
    } else {
        rem as u8
    }
}

/// Source text of a JSON number without fraction or exponent
///
/// serde_json keeps the literal verbatim (`arbitrary_precision`), so
/// integers wider than 64 bits survive parsing.
fn integer_literal(item: &Value) -> Option<String> {
    match item {
        Value::Number(n) => {
            let text = n.to_string();
            let digits = text.strip_prefix('-').unwrap_or(&text);
            let is_integer = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
            is_integer.then_some(text)
        }
        _ => None,
    }
}

/// Raw hash bytes in internal order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ByteSequence(Vec<u8>);

impl ByteSequence {
    pub fn new(bytes: Vec<u8>) -> Self {
        ByteSequence(bytes)
    }

    /// Parse a CLI argument as a JSON byte array
    pub fn parse(input: &str, policy: RangePolicy) -> Result<Self, ConvertError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_json(&value, policy)
    }

    /// Assert that `value` is an array of byte-range integers
    pub fn from_json(value: &Value, policy: RangePolicy) -> Result<Self, ConvertError> {
        let items = value.as_array().ok_or_else(|| ConvertError::NotAnArray {
            found: json_kind(value).to_string(),
        })?;

        let mut bytes = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let literal = integer_literal(item).ok_or_else(|| ConvertError::NotAnInteger {
                index,
                value: item.to_string(),
            })?;
            bytes.push(policy.apply(index, &literal)?);
        }

        Ok(ByteSequence(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compact JSON array text, e.g. `[18,52]`
    pub fn to_json(&self) -> Result<String, ConvertError> {
        serde_json::to_string(&self.0).map_err(ConvertError::Encode)
    }

    pub fn to_display_hash(&self) -> DisplayHash {
        to_display_hash(&self.0)
    }
}

impl From<Vec<u8>> for ByteSequence {
    fn from(bytes: Vec<u8>) -> Self {
        ByteSequence(bytes)
    }
}

/// Byte-reversed lowercase hex rendering of a hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayHash(String);

impl DisplayHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DisplayHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reverse byte order and hex-encode (internal order -> display order)
pub fn to_display_hash(bytes: &[u8]) -> DisplayHash {
    let reversed: Vec<u8> = bytes.iter().rev().cloned().collect();
    let hex = hex::encode(&reversed);

    debug!(
        bytes = bytes.len(),
        hash = %truncate_hex(&hex, 16),
        "Converted to display hash"
    );

    DisplayHash(hex)
}

/// Decode a display hash back into internal byte order
///
/// Accepts either case and an optional `0x` prefix.
pub fn from_display_hash(display: &str) -> Result<ByteSequence, ConvertError> {
    let trimmed = display.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let mut bytes = hex::decode(digits)?;
    bytes.reverse();
    Ok(ByteSequence(bytes))
}
