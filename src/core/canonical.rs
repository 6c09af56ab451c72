//! Canonicalization of visualization records.
//!
//! Records coming out of a log provider mix geometry layouts freely: nested
//! per-point triples, typed numeric buffers, flat coordinate runs, CSS-style
//! hex color strings. The binary schema accepts exactly one shape for each, so
//! every record is normalized before encoding:
//!
//! - geometry sequences under `vertices` / `points` / `colors` are flattened
//!   into a single run of numbers
//! - typed numeric buffers are materialized into plain sequences
//! - `stroke_color` / `fill_color` hex strings become integer channel arrays
//! - image mappings (binary `data` payload) pass through untouched
//!
//! The transform is pure and idempotent: already-canonical input comes back
//! unchanged.

use crate::core::value::{Mapping, Value};

/// Keys whose sequence values carry flattenable geometry.
const ROLE_KEYS: [&str; 3] = ["vertices", "points", "colors"];

/// Keys whose string values may be hex colors.
const COLOR_KEYS: [&str; 2] = ["stroke_color", "fill_color"];

/// Parent key of image mappings, which hold pre-encoded binary data.
const IMAGES_KEY: &str = "images";

#[inline]
fn is_role_key(key: Option<&str>) -> bool {
    key.is_some_and(|k| ROLE_KEYS.contains(&k))
}

#[inline]
fn is_color_key(key: Option<&str>) -> bool {
    key.is_some_and(|k| COLOR_KEYS.contains(&k))
}

/// Canonicalize a whole record tree.
pub fn canonicalize(record: &Value) -> Value {
    canonicalize_value(record, None)
}

/// Canonicalize one value given the key it appears under in its parent.
fn canonicalize_value(value: &Value, key: Option<&str>) -> Value {
    match value {
        Value::Sequence(items) => canonicalize_sequence(items, key),

        // Typed buffers outside a role key still become plain sequences
        Value::Buffer(buf) => Value::Sequence(buf.to_numbers()),

        Value::Text(text) if is_color_key(key) => {
            // Malformed-but-prefixed strings are deliberately left as-is
            parse_hex_color(text).unwrap_or_else(|| value.clone())
        }

        Value::Mapping(map) => {
            // Image payloads are already binary; do not descend into them
            if key == Some(IMAGES_KEY) && map.contains("data") {
                return value.clone();
            }

            let rebuilt: Mapping = map
                .iter()
                .map(|(k, v)| (k.to_string(), canonicalize_value(v, Some(k))))
                .collect();
            Value::Mapping(rebuilt)
        }

        // All other primitives pass through unchanged
        _ => value.clone(),
    }
}

/// Canonicalize a sequence, flattening geometry under role keys.
///
/// Role sequences arrive in one of four shapes, detected from the first
/// element:
/// - `[[x, y, z], [x, y, z], ...]` - flattened by concatenation
/// - `[buffer, buffer, ...]` - each buffer materialized, then concatenated
/// - `[x, y, z, x, y, z, ...]` - already flat, passes through
/// - `[{..}, {..}, ...]` - recursed element-wise, keeping the role key
fn canonicalize_sequence(items: &[Value], key: Option<&str>) -> Value {
    if !is_role_key(key) {
        return Value::Sequence(
            items
                .iter()
                .map(|item| canonicalize_value(item, key))
                .collect(),
        );
    }

    match items.first() {
        Some(Value::Sequence(first)) => {
            let mut flat = Vec::with_capacity(items.len() * first.len());
            for item in items {
                match item {
                    Value::Sequence(inner) => flat.extend(inner.iter().cloned()),
                    other => flat.push(other.clone()),
                }
            }
            Value::Sequence(flat)
        }
        Some(Value::Buffer(first)) => {
            let mut flat = Vec::with_capacity(items.len() * first.len());
            for item in items {
                match item {
                    Value::Buffer(buf) => flat.extend(buf.to_numbers()),
                    other => flat.push(other.clone()),
                }
            }
            Value::Sequence(flat)
        }
        Some(Value::Number(_)) => Value::Sequence(items.to_vec()),
        _ => Value::Sequence(
            items
                .iter()
                .map(|item| canonicalize_value(item, key))
                .collect(),
        ),
    }
}

/// Parse a `#`-prefixed hex color string into an integer channel sequence.
///
/// 3- and 4-digit forms consume one digit per channel, 6- and 8-digit forms
/// two digits per channel. Any other digit count yields `None`.
fn parse_hex_color(text: &str) -> Option<Value> {
    let digits = text.strip_prefix('#')?;
    let len = digits.len();
    if !(len == 3 || len == 4 || len == 6 || len == 8) {
        return None;
    }

    let step = if len <= 4 { 1 } else { 2 };
    let mut channels = Vec::with_capacity(len / step);
    for chunk in digits.as_bytes().chunks(step) {
        let mut channel = 0u32;
        for &b in chunk {
            channel = channel * 16 + (b as char).to_digit(16)?;
        }
        channels.push(Value::Number(f64::from(channel)));
    }

    Some(Value::Sequence(channels))
}
