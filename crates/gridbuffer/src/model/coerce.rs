//! Validating text coercion for cell edits.
//!
//! Editors hand the model raw text; these functions convert it to the
//! column's declared type. Failures are reported through `None` only —
//! invalid user input never panics or raises.

use super::value::{CellValue, ColumnType};

/// Parses raw text as an integer cell value.
pub fn parse_int(raw: &str) -> Option<CellValue> {
    raw.trim().parse::<i64>().ok().map(CellValue::Int)
}

/// Parses raw text as a float cell value.
pub fn parse_float(raw: &str) -> Option<CellValue> {
    raw.trim().parse::<f64>().ok().map(CellValue::Float)
}

/// Parses raw text as a boolean cell value.
///
/// Accepts exactly the literal tokens `"True"` and `"False"` plus the
/// numeric sentinels `"1"` and `"0"`. Anything else is rejected. This is
/// deliberately stricter than a generic truthy/falsy cast; callers must not
/// substitute one.
pub fn parse_bool(raw: &str) -> Option<CellValue> {
    match raw {
        "True" | "1" => Some(CellValue::Bool(true)),
        "False" | "0" => Some(CellValue::Bool(false)),
        _ => None,
    }
}

/// Coerces raw text to the given column type.
///
/// Text and opaque columns accept any input unconditionally.
pub fn coerce(ty: ColumnType, raw: &str) -> Option<CellValue> {
    match ty {
        ColumnType::Int => parse_int(raw),
        ColumnType::Float => parse_float(raw),
        ColumnType::Bool => parse_bool(raw),
        ColumnType::Text => Some(CellValue::Text(raw.to_string())),
        ColumnType::Opaque => Some(CellValue::Opaque(raw.to_string())),
    }
}
