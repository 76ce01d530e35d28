//! Score decoding and uint256 encoding.
//!
//! Accepted bodies: decimal digits, `0x` hex, a JSON non-negative integer,
//! or a JSON string holding either textual form. A JSON pointer can select
//! the score out of a larger document first.

use primitive_types::U256;
use serde_json::Value;

use crate::OracleError;

/// Decode the upstream body into a score.
pub fn decode_score(body: &str, pointer: Option<&str>) -> Result<U256, OracleError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(OracleError::InvalidBody("empty body".into()));
    }

    // Bare digits go straight to the integer parser so values beyond u64
    // keep full precision.
    if pointer.is_none() {
        if let Some(value) = parse_text(trimmed)? {
            return Ok(value);
        }
    }

    let document: Value = serde_json::from_str(trimmed)
        .map_err(|e| OracleError::InvalidBody(format!("not a number or JSON: {e}")))?;
    let selected = match pointer {
        Some(p) => document
            .pointer(p)
            .ok_or_else(|| OracleError::InvalidBody(format!("no value at {p}")))?,
        None => &document,
    };
    from_json(selected)
}

fn from_json(value: &Value) -> Result<U256, OracleError> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return Ok(U256::from(v));
            }
            match n.as_f64() {
                Some(f) if f < 0.0 => {
                    Err(OracleError::InvalidBody(format!("negative score {n}")))
                }
                // Past u64 a JSON number is already an f64 and has lost digits.
                Some(f) if f.fract() == 0.0 && f >= u64::MAX as f64 => {
                    Err(OracleError::InvalidBody(format!(
                        "score {n} exceeds u64 as a JSON number, send it as a string"
                    )))
                }
                _ => Err(OracleError::InvalidBody(format!("non-integer score {n}"))),
            }
        }
        Value::String(s) => parse_text(s.trim())?
            .ok_or_else(|| OracleError::InvalidBody(format!("not an integer: {s:?}"))),
        other => Err(OracleError::InvalidBody(format!(
            "unsupported JSON value {other}"
        ))),
    }
}

/// `Ok(None)` when the text is not an integer literal at all.
fn parse_text(text: &str) -> Result<Option<U256>, OracleError> {
    if let Some(hex_digits) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        if hex_digits.is_empty() || !hex_digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Ok(None);
        }
        let significant = hex_digits.trim_start_matches('0');
        if significant.len() > 64 {
            return Err(OracleError::Overflow);
        }
        if significant.is_empty() {
            return Ok(Some(U256::zero()));
        }
        return U256::from_str_radix(significant, 16)
            .map(Some)
            .map_err(|_| OracleError::Overflow);
    }

    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }
    U256::from_dec_str(text)
        .map(Some)
        .map_err(|_| OracleError::Overflow)
}

/// Big-endian 32-byte form, the ABI layout of a `uint256`.
pub fn encode_uint256(value: U256) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (i, byte) in out.iter_mut().rev().enumerate() {
        *byte = value.byte(i);
    }
    out
}

/// `0x`-prefixed lowercase hex.
pub fn to_hex(encoded: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(encoded))
}
