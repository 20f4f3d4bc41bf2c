//! Owned table storage and the shared source-table handle.
//!
//! A [`Table`] is a plain value: ordered, labeled, typed columns of equal
//! length plus a row-label sequence. The transactional models keep two of
//! them — the externally shared source behind a [`SharedTable`] handle, and
//! a privately owned shadow copy where edits accumulate.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{ModelError, ModelResult};
use crate::model::value::{CellValue, ColumnType};

/// The shared handle to an externally owned source table.
///
/// The model clones the handle and writes through it only during commit and
/// bulk replace, always overwriting contents in place, so every other holder
/// of the same handle observes updates consistently.
pub type SharedTable = Arc<RwLock<Table>>;

/// A single typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// The column label. Must be unique within a table.
    pub label: String,
    /// The declared type governing validation and default synthesis.
    pub ty: ColumnType,
    /// The cells, one per table row.
    pub cells: Vec<CellValue>,
}

impl Column {
    /// Creates a column with the given label, type, and cells.
    pub fn new(label: impl Into<String>, ty: ColumnType, cells: Vec<CellValue>) -> Self {
        Self {
            label: label.into(),
            ty,
            cells,
        }
    }

    /// Creates a column filled with `count` copies of `value`.
    pub fn filled(label: impl Into<String>, ty: ColumnType, value: CellValue, count: usize) -> Self {
        Self {
            label: label.into(),
            ty,
            cells: vec![value; count],
        }
    }
}

/// A 2-D grid of typed columns with row labels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    row_labels: Vec<String>,
}

impl Table {
    /// Creates a table from columns, verifying the shape invariant.
    ///
    /// Fails with [`ModelError::Schema`] when column lengths are ragged or
    /// column labels collide. Row labels start as the contiguous decimal
    /// sequence `0..n`.
    pub fn new(columns: Vec<Column>) -> ModelResult<Self> {
        let mut table = Self {
            columns,
            row_labels: Vec::new(),
        };
        table.validate()?;
        table.reset_row_labels();
        Ok(table)
    }

    /// Verifies the shape invariant: equal column lengths, unique column
    /// labels, every cell matching its column's declared type.
    pub(crate) fn validate(&self) -> ModelResult<()> {
        let rows = self.row_count();
        for (i, column) in self.columns.iter().enumerate() {
            if column.cells.len() != rows {
                return Err(ModelError::Schema {
                    reason: format!(
                        "column '{}' has {} cells, expected {}",
                        column.label,
                        column.cells.len(),
                        rows
                    ),
                });
            }
            if self.columns[..i].iter().any(|c| c.label == column.label) {
                return Err(ModelError::Schema {
                    reason: format!("duplicate column label '{}'", column.label),
                });
            }
            if let Some(value) = column.cells.iter().find(|v| v.column_type() != column.ty) {
                return Err(ModelError::Schema {
                    reason: format!(
                        "column '{}' declared {:?} but holds {value:?}",
                        column.label, column.ty
                    ),
                });
            }
        }
        Ok(())
    }

    /// Creates an empty (0x0) table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a uniformly typed table from row-major data.
    ///
    /// Column labels are synthesized as the positional decimal sequence.
    /// Fails with [`ModelError::Schema`] when rows are ragged or a value
    /// does not match `ty`.
    pub fn from_rows(rows: Vec<Vec<CellValue>>, ty: ColumnType) -> ModelResult<Self> {
        let width = rows.first().map_or(0, Vec::len);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ModelError::Schema {
                    reason: format!("row {i} has {} cells, expected {width}", row.len()),
                });
            }
            if let Some(value) = row.iter().find(|v| v.column_type() != ty) {
                return Err(ModelError::Schema {
                    reason: format!("value {value:?} in row {i} does not match column type {ty:?}"),
                });
            }
        }

        let columns = (0..width)
            .map(|j| Column {
                label: j.to_string(),
                ty,
                cells: rows.iter().map(|row| row[j].clone()).collect(),
            })
            .collect();
        Self::new(columns)
    }

    /// The number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    /// The number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` when the table has no rows or no columns.
    pub fn is_empty_shape(&self) -> bool {
        self.row_count() == 0 || self.column_count() == 0
    }

    /// The columns, in insertion order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Mutable access to the columns. The caller is responsible for keeping
    /// the shape invariant intact.
    pub(crate) fn columns_mut(&mut self) -> &mut Vec<Column> {
        &mut self.columns
    }

    /// The cell at the given position, if in bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.columns.get(col)?.cells.get(row)
    }

    /// Overwrites the cell at the given position. Returns `false` when out
    /// of bounds.
    pub fn set_cell(&mut self, row: usize, col: usize, value: CellValue) -> bool {
        match self.columns.get_mut(col).and_then(|c| c.cells.get_mut(row)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// The label of the given column, if in bounds.
    pub fn column_label(&self, col: usize) -> Option<&str> {
        self.columns.get(col).map(|c| c.label.as_str())
    }

    /// The declared type of the given column, if in bounds.
    pub fn column_type(&self, col: usize) -> Option<ColumnType> {
        self.columns.get(col).map(|c| c.ty)
    }

    /// The label of the given row, if in bounds.
    pub fn row_label(&self, row: usize) -> Option<&str> {
        self.row_labels.get(row).map(String::as_str)
    }

    /// The row labels.
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// Replaces the row labels without resequencing.
    pub(crate) fn set_row_labels(&mut self, labels: Vec<String>) {
        self.row_labels = labels;
    }

    /// Resets row labels to the contiguous decimal sequence `0..row_count`.
    pub(crate) fn reset_row_labels(&mut self) {
        self.row_labels = (0..self.row_count()).map(|i| i.to_string()).collect();
    }

    /// Returns the position of the column with the given label.
    pub fn position_of(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.label == label)
    }

    /// Overwrites this table's contents from `other`, in place.
    ///
    /// Labels, types, cells, and row labels are all brought in line with
    /// `other`; the allocation identity of `self` is untouched. This is the
    /// commit path: external holders of the same handle observe the update.
    pub(crate) fn overwrite_from(&mut self, other: &Table) {
        self.columns.truncate(other.columns.len());
        for (j, src) in other.columns.iter().enumerate() {
            match self.columns.get_mut(j) {
                Some(dst) => {
                    dst.label = src.label.clone();
                    dst.ty = src.ty;
                    dst.cells.resize(src.cells.len(), src.ty.default_value());
                    dst.cells.clone_from_slice(&src.cells);
                }
                None => self.columns.push(src.clone()),
            }
        }
        self.row_labels = other.row_labels.clone();
    }
}

/// Wraps a table in the shared source handle.
pub fn shared(table: Table) -> SharedTable {
    Arc::new(RwLock::new(table))
}
