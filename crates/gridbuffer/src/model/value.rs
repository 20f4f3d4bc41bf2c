//! Cell values and column schema tags.
//!
//! Every column declares a [`ColumnType`]; the type drives input validation
//! and default-value synthesis on row insertion. [`CellValue`] is the tagged
//! container for a single cell.

use std::fmt;

/// The declared type of a column.
///
/// A cell value stored in a column is always convertible to the column's
/// declared type; this is enforced at write time by the coercing validator,
/// not at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Signed integers.
    Int,
    /// Floating point numbers.
    Float,
    /// Booleans.
    Bool,
    /// Free-form text.
    Text,
    /// Opaque data kept as raw text; never validated.
    Opaque,
}

impl ColumnType {
    /// Returns the default value used to fill new rows in a column of this type.
    pub fn default_value(&self) -> CellValue {
        match self {
            ColumnType::Int => CellValue::Int(0),
            ColumnType::Float => CellValue::Float(0.0),
            // Inherited from the row-insertion defaults of the original
            // dataframe model: freshly inserted boolean cells read true.
            ColumnType::Bool => CellValue::Bool(true),
            ColumnType::Text => CellValue::Text(String::new()),
            ColumnType::Opaque => CellValue::Opaque(String::new()),
        }
    }

    /// Returns `true` for numerically ordered types (Int, Float).
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Int | ColumnType::Float)
    }
}

/// A single cell's value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Integer data.
    Int(i64),
    /// Floating point data.
    Float(f64),
    /// Boolean data.
    Bool(bool),
    /// Text data.
    Text(String),
    /// Opaque data carried as raw text.
    Opaque(String),
}

impl CellValue {
    /// The column type this value belongs to.
    pub fn column_type(&self) -> ColumnType {
        match self {
            CellValue::Int(_) => ColumnType::Int,
            CellValue::Float(_) => ColumnType::Float,
            CellValue::Bool(_) => ColumnType::Bool,
            CellValue::Text(_) => ColumnType::Text,
            CellValue::Opaque(_) => ColumnType::Opaque,
        }
    }

    /// Attempts to get the value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to get the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) | CellValue::Opaque(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Formats the value for display.
    ///
    /// Floating point values are rounded to `decimals` significant decimal
    /// places when a precision is configured; everything else degrades to
    /// the plain text conversion. This never fails.
    pub fn display(&self, decimals: Option<usize>) -> String {
        match (self, decimals) {
            (CellValue::Float(v), Some(d)) => format!("{v:.d$}"),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Float(v) => write!(f, "{v}"),
            // The capitalized tokens are the ones the validator accepts back.
            CellValue::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            CellValue::Text(s) | CellValue::Opaque(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Int(n as i64)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(ColumnType::Int.default_value(), CellValue::Int(0));
        assert_eq!(ColumnType::Float.default_value(), CellValue::Float(0.0));
        assert_eq!(ColumnType::Bool.default_value(), CellValue::Bool(true));
        assert_eq!(
            ColumnType::Text.default_value(),
            CellValue::Text(String::new())
        );
    }

    #[test]
    fn test_display_rounding() {
        let v = CellValue::Float(3.14159);
        assert_eq!(v.display(Some(2)), "3.14");
        assert_eq!(v.display(None), "3.14159");

        // Non-numeric values ignore the precision and degrade to plain text.
        let s = CellValue::Text("abc".into());
        assert_eq!(s.display(Some(2)), "abc");
        let n = CellValue::Int(7);
        assert_eq!(n.display(Some(2)), "7");
    }

    #[test]
    fn test_bool_display_round_trips_through_validator() {
        assert_eq!(CellValue::Bool(true).to_string(), "True");
        assert_eq!(CellValue::Bool(false).to_string(), "False");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(CellValue::Int(5).as_int(), Some(5));
        assert_eq!(CellValue::Int(5).as_float(), None);
        assert_eq!(CellValue::Text("x".into()).as_str(), Some("x"));
        assert_eq!(CellValue::from(2.5).column_type(), ColumnType::Float);
    }
}
