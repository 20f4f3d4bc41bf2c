//! Editor parameter hints for external delegate layers.
//!
//! The model itself never builds editors; it only advertises the bounded
//! spin-box parameters a delegate should use for numeric columns. Text,
//! boolean, and opaque columns get no hints and fall back to a plain text
//! editor.

use super::value::ColumnType;

/// Bounded numeric editor parameters for one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorHints {
    /// Lowest accepted value.
    pub minimum: f64,
    /// Highest accepted value.
    pub maximum: f64,
    /// Increment per editor step.
    pub step: f64,
    /// Decimal places shown while editing.
    pub decimals: usize,
}

impl EditorHints {
    /// The editor hints for a column of the given type, or `None` when the
    /// type is edited as plain text.
    pub fn for_column_type(ty: ColumnType) -> Option<EditorHints> {
        match ty {
            ColumnType::Int => Some(EditorHints {
                minimum: -65535.0,
                maximum: 65535.0,
                step: 1.0,
                decimals: 0,
            }),
            ColumnType::Float => Some(EditorHints {
                minimum: -65535.0,
                maximum: 65535.0,
                step: 0.01,
                decimals: 2,
            }),
            ColumnType::Bool | ColumnType::Text | ColumnType::Opaque => None,
        }
    }
}
