//! The 2-D transactional grid model.
//!
//! `GridModel` binds an externally owned source table and maintains a
//! privately owned shadow copy. Interactive edits land in the shadow only;
//! `commit` pushes them back to the source in place, `rollback` discards
//! them. Every structural mutation is bracketed by the matching
//! about-to/done signal pair so observers can resize before and after.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::error::{ModelError, ModelResult};
use crate::model::coerce;
use crate::model::index::CellIndex;
use crate::model::table::{Column, SharedTable, Table};
use crate::model::traits::{ModelSignals, Orientation, TabularModel};
use crate::model::value::{CellValue, ColumnType};

const TARGET: &str = "gridbuffer::model";

/// A transactional model over a 2-D grid of typed columns.
///
/// # Example
///
/// ```
/// use gridbuffer::model::{shared, CellValue, Column, ColumnType, GridModel, Table};
///
/// let source = shared(Table::new(vec![
///     Column::new("qty", ColumnType::Int, vec![CellValue::Int(1), CellValue::Int(2)]),
/// ]).unwrap());
///
/// let model = GridModel::new(source.clone()).unwrap().with_editable(true);
///
/// // Edits accumulate in the shadow copy...
/// assert!(model.set_cell_value(0, 0, "5"));
/// assert_eq!(source.read().cell(0, 0), Some(&CellValue::Int(1)));
///
/// // ...until they are committed back to the source, in place.
/// model.commit();
/// assert_eq!(source.read().cell(0, 0), Some(&CellValue::Int(5)));
/// ```
pub struct GridModel {
    source: SharedTable,
    shadow: RwLock<Table>,
    signals: ModelSignals,
    editable: AtomicBool,
    display_decimal: RwLock<Option<usize>>,
    require_square: bool,
}

impl GridModel {
    /// Binds the model to a source table.
    ///
    /// Synthesizes the shadow table as a deep value copy and emits the
    /// layout bracket pair. Fails with [`ModelError::Schema`] when the
    /// source violates the shape invariant.
    pub fn new(source: SharedTable) -> ModelResult<Self> {
        Self::bind(source, false)
    }

    /// Binds the model to a source table that must stay square.
    ///
    /// Like [`new`](Self::new), but additionally fails with
    /// [`ModelError::NotSquare`] when the source's row and column counts
    /// disagree. The constraint is re-checked on every bulk replace, and
    /// structural mutation (which would de-square the grid) is rejected
    /// on square-constrained models.
    pub fn new_square(source: SharedTable) -> ModelResult<Self> {
        Self::bind(source, true)
    }

    /// Creates a model over a fresh, uniformly typed source built from
    /// row-major data. The source handle is retrievable via
    /// [`source`](Self::source).
    pub fn from_rows(rows: Vec<Vec<CellValue>>, ty: ColumnType) -> ModelResult<Self> {
        let table = Table::from_rows(rows, ty)?;
        Self::new(crate::model::table::shared(table))
    }

    fn bind(source: SharedTable, require_square: bool) -> ModelResult<Self> {
        {
            let table = source.read();
            table.validate()?;
            if require_square && table.row_count() != table.column_count() {
                return Err(ModelError::NotSquare {
                    rows: table.row_count(),
                    cols: table.column_count(),
                });
            }
        }

        let model = Self {
            shadow: RwLock::new(Table::empty()),
            source,
            signals: ModelSignals::new(),
            // Locked until the owning context opts in to edits.
            editable: AtomicBool::new(false),
            display_decimal: RwLock::new(Some(2)),
            require_square,
        };
        model.signals.emit_layout_changed(|| model.resync_shadow());
        Ok(model)
    }

    /// Sets the display precision for floating point cells; `None` formats
    /// values without rounding.
    pub fn set_display_decimal(&self, decimals: Option<usize>) {
        *self.display_decimal.write() = decimals;
    }

    /// Builder-style variant of [`set_display_decimal`](Self::set_display_decimal).
    pub fn with_display_decimal(self, decimals: Option<usize>) -> Self {
        self.set_display_decimal(decimals);
        self
    }

    /// Toggles whether the edit API accepts cell writes. Models start
    /// locked.
    pub fn set_editable(&self, editable: bool) {
        self.editable.store(editable, Ordering::SeqCst);
    }

    /// Builder-style variant of [`set_editable`](Self::set_editable).
    pub fn with_editable(self, editable: bool) -> Self {
        self.set_editable(editable);
        self
    }

    /// The shared source handle this model is bound to.
    pub fn source(&self) -> SharedTable {
        self.source.clone()
    }

    /// Rebinds the model to a different source table.
    ///
    /// The shadow is rebuilt from the new source; pending edits against the
    /// old source are dropped. The prior binding is untouched on failure.
    pub fn set_source(&mut self, source: SharedTable) -> ModelResult<()> {
        {
            let table = source.read();
            table.validate()?;
            if self.require_square && table.row_count() != table.column_count() {
                return Err(ModelError::NotSquare {
                    rows: table.row_count(),
                    cols: table.column_count(),
                });
            }
        }
        self.source = source;
        self.signals.emit_layout_changed(|| self.resync_shadow());
        Ok(())
    }

    /// Bulk-replaces the source table's content with a differently shaped
    /// table, preserving the source's identity, then rebuilds the shadow to
    /// match.
    ///
    /// Used when a collaborator hands the model freshly parsed tabular data
    /// of unknown prior shape.
    pub fn replace_from_external(&self, table: Table) -> ModelResult<()> {
        if self.require_square && table.row_count() != table.column_count() {
            return Err(ModelError::NotSquare {
                rows: table.row_count(),
                cols: table.column_count(),
            });
        }
        self.signals.emit_layout_changed(|| {
            self.source.write().overwrite_from(&table);
            self.resync_shadow();
        });
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Read path
    // -------------------------------------------------------------------------

    /// The number of rows in the shadow table.
    pub fn row_count(&self) -> usize {
        self.shadow.read().row_count()
    }

    /// The number of columns in the shadow table.
    pub fn column_count(&self) -> usize {
        self.shadow.read().column_count()
    }

    /// The shadow cell value at the given position.
    pub fn cell_value(&self, row: usize, col: usize) -> Option<CellValue> {
        self.shadow.read().cell(row, col).cloned()
    }

    /// The shadow cell formatted for display.
    ///
    /// Floating point cells are rounded to the configured display precision;
    /// everything else degrades to the plain text conversion. Returns `None`
    /// only for out-of-bounds positions.
    pub fn display_value(&self, row: usize, col: usize) -> Option<String> {
        let decimals = *self.display_decimal.read();
        self.shadow
            .read()
            .cell(row, col)
            .map(|v| v.display(decimals))
    }

    /// The label of the given column.
    ///
    /// Falls back to the positional decimal label for out-of-bounds
    /// sections, so views can always render a header.
    pub fn column_label(&self, col: usize) -> String {
        self.shadow
            .read()
            .column_label(col)
            .map_or_else(|| col.to_string(), str::to_string)
    }

    /// The label of the given row, falling back to the positional decimal
    /// label.
    pub fn row_label(&self, row: usize) -> String {
        self.shadow
            .read()
            .row_label(row)
            .map_or_else(|| row.to_string(), str::to_string)
    }

    /// The declared type of the given column.
    pub fn column_type(&self, col: usize) -> Option<ColumnType> {
        self.shadow.read().column_type(col)
    }

    // -------------------------------------------------------------------------
    // Write path
    // -------------------------------------------------------------------------

    /// Coerces `raw` against the column's declared type and writes the
    /// shadow cell.
    ///
    /// On success emits a point `data_changed` and returns `true`. On
    /// coercion failure (or while the model is locked against edits) the
    /// prior value is retained and `false` is returned; user-input errors
    /// never panic.
    pub fn set_cell_value(&self, row: usize, col: usize, raw: &str) -> bool {
        if !self.is_editable() {
            tracing::debug!(target: TARGET, row, col, "edit rejected: model is not editable");
            return false;
        }

        let Some(ty) = self.column_type(col) else {
            return false;
        };
        let Some(value) = coerce::coerce(ty, raw) else {
            tracing::debug!(target: TARGET, row, col, raw, ?ty, "edit rejected: coercion failed");
            return false;
        };

        let written = self.shadow.write().set_cell(row, col, value);
        if written {
            self.signals
                .emit_data_changed_single(CellIndex::new(row, col));
        }
        written
    }

    /// Renames a column in the shadow table only; pending until commit.
    ///
    /// Returns `false` when out of bounds or when the new label collides
    /// with an existing column.
    pub fn set_column_label(&self, col: usize, label: &str) -> bool {
        {
            let mut shadow = self.shadow.write();
            if col >= shadow.column_count() {
                return false;
            }
            if shadow.position_of(label).is_some_and(|pos| pos != col) {
                tracing::debug!(target: TARGET, col, label, "rename rejected: duplicate label");
                return false;
            }
            shadow.columns_mut()[col].label = label.to_string();
        }
        self.signals
            .header_data_changed
            .emit((Orientation::Horizontal, col, col));
        true
    }

    /// Batch-assigns header labels for one orientation.
    ///
    /// Horizontal labels rename the shadow columns (pending until commit);
    /// vertical labels replace the row labels. Fails with
    /// [`ModelError::SizeMismatch`] when the length disagrees with the
    /// dimension; the prior labels are untouched.
    pub fn set_header_batch(
        &self,
        labels: Vec<String>,
        orientation: Orientation,
    ) -> ModelResult<()> {
        let last = {
            let mut shadow = self.shadow.write();
            match orientation {
                Orientation::Horizontal => {
                    if labels.len() != shadow.column_count() {
                        return Err(ModelError::SizeMismatch {
                            expected: shadow.column_count(),
                            actual: labels.len(),
                        });
                    }
                    for (column, label) in shadow.columns_mut().iter_mut().zip(labels) {
                        column.label = label;
                    }
                    shadow.column_count().saturating_sub(1)
                }
                Orientation::Vertical => {
                    if labels.len() != shadow.row_count() {
                        return Err(ModelError::SizeMismatch {
                            expected: shadow.row_count(),
                            actual: labels.len(),
                        });
                    }
                    shadow.set_row_labels(labels);
                    shadow.row_count().saturating_sub(1)
                }
            }
        };
        self.signals.header_data_changed.emit((orientation, 0, last));
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Structural mutations
    // -------------------------------------------------------------------------

    /// Appends `count` rows at the end, each cell populated with the
    /// column's type-appropriate default. Row labels are reset to the
    /// contiguous decimal sequence afterward.
    ///
    /// Returns `false` if `count < 1`, the table has no columns (there is
    /// no schema to default-fill), or the model is square-constrained.
    pub fn insert_rows(&self, count: usize) -> bool {
        if count < 1 || self.reject_structural("insert_rows") {
            return false;
        }
        let position = {
            let shadow = self.shadow.read();
            if shadow.column_count() == 0 {
                tracing::warn!(target: TARGET, "insert_rows rejected: table has no columns");
                return false;
            }
            shadow.row_count()
        };

        self.signals
            .emit_rows_inserted(position, position + count - 1, || {
                let mut shadow = self.shadow.write();
                for column in shadow.columns_mut() {
                    let default = column.ty.default_value();
                    column.cells.extend(std::iter::repeat(default).take(count));
                }
                shadow.reset_row_labels();
            });
        true
    }

    /// Appends a column of the given type, filled with `default` for every
    /// existing row.
    ///
    /// Returns `false` without touching state when `label` collides with an
    /// existing column, `default` does not match `ty`, or the model is
    /// square-constrained — duplicate labels are never allowed.
    pub fn insert_column(&self, label: &str, ty: ColumnType, default: CellValue) -> bool {
        if self.reject_structural("insert_column") {
            return false;
        }
        if default.column_type() != ty {
            tracing::debug!(target: TARGET, label, ?ty, "insert_column rejected: default value type mismatch");
            return false;
        }
        let position = {
            let shadow = self.shadow.read();
            if shadow.position_of(label).is_some() {
                tracing::debug!(target: TARGET, label, "insert_column rejected: duplicate label");
                return false;
            }
            shadow.column_count()
        };

        self.signals.emit_columns_inserted(position, position, || {
            let mut shadow = self.shadow.write();
            let rows = shadow.row_count();
            shadow
                .columns_mut()
                .push(Column::filled(label, ty, default, rows));
        });
        true
    }

    /// Removes the given set of row positions in one notified batch, then
    /// resets the row labels to a contiguous sequence.
    ///
    /// Out-of-bounds positions are ignored. Returns `false` when the set is
    /// empty, matches nothing, or the model is square-constrained.
    pub fn remove_rows(&self, rows: &[usize]) -> bool {
        if rows.is_empty() || self.reject_structural("remove_rows") {
            return false;
        }

        let mut matched: Vec<usize> = {
            let shadow = self.shadow.read();
            rows.iter()
                .copied()
                .filter(|&r| r < shadow.row_count())
                .collect()
        };
        matched.sort_unstable();
        matched.dedup();
        if matched.is_empty() {
            return false;
        }

        let first = matched[0];
        let last = first + matched.len() - 1;
        self.signals.emit_rows_removed(first, last, || {
            let mut shadow = self.shadow.write();
            for &row in matched.iter().rev() {
                for column in shadow.columns_mut() {
                    column.cells.remove(row);
                }
            }
            shadow.reset_row_labels();
        });
        true
    }

    /// Removes columns identified by `(position, label)` pairs, one notified
    /// removal at a time.
    ///
    /// Positions are adjusted downward as earlier entries are deleted; the
    /// label must still match the live column at the adjusted position, or
    /// the entry is skipped and counted as an error. Removal that empties
    /// the table of columns also clears all rows. Best-effort: completed
    /// removals are not rolled back, and the overall result is `false` if
    /// any entry failed. Rejected outright on square-constrained models.
    pub fn remove_columns(&self, columns: &[(usize, String)]) -> bool {
        if columns.is_empty() || self.reject_structural("remove_columns") {
            return false;
        }

        let rows_before = self.shadow.read().row_count();
        let mut deleted = 0usize;
        let mut errored = false;
        for (position, label) in columns {
            let position = position.saturating_sub(deleted);
            let matches = self.shadow.read().column_label(position) == Some(label.as_str());
            if !matches {
                tracing::debug!(target: TARGET, position, label, "skipping stale column removal");
                errored = true;
                continue;
            }

            self.signals.emit_columns_removed(position, position, || {
                self.shadow.write().columns_mut().remove(position);
            });
            deleted += 1;
        }

        let cols = self.shadow.read().column_count();
        if cols > 0 {
            let rows = self.shadow.read().row_count();
            if rows > 0 {
                self.signals.data_changed.emit((
                    CellIndex::new(0, 0),
                    CellIndex::new(rows - 1, cols - 1),
                ));
            }
        } else {
            // Removing the last column leaves orphaned rows; clear them too.
            if rows_before > 0 {
                self.signals.emit_rows_removed(0, rows_before - 1, || {
                    self.shadow.write().set_row_labels(Vec::new());
                });
            }
            self.signals
                .data_changed
                .emit((CellIndex::invalid(), CellIndex::invalid()));
        }

        !errored
    }

    /// Square-constrained models keep their shape through commit; any
    /// structural mutation would break it.
    fn reject_structural(&self, operation: &str) -> bool {
        if self.require_square {
            tracing::debug!(target: TARGET, operation, "structural mutation rejected: model is square-constrained");
        }
        self.require_square
    }

    // -------------------------------------------------------------------------
    // Commit / rollback
    // -------------------------------------------------------------------------

    /// Pushes every pending edit back to the source table, in place.
    ///
    /// Column labels are renamed to match the shadow (supporting mid-edit
    /// renames) and every cell is copied shadow to source, preserving the
    /// source's identity so external holders observe the update. Emits
    /// `edit_confirmed` once shadow and source are consistent again.
    /// No-op when the source is empty-shaped.
    pub fn commit(&self) {
        if self.source.read().is_empty_shape() {
            return;
        }
        {
            let shadow = self.shadow.read();
            self.source.write().overwrite_from(&shadow);
        }
        self.resync_shadow();
        self.signals.edit_confirmed.emit(());
    }

    /// Discards the shadow table, rebuilding it from the current source.
    ///
    /// Emits `edit_refuted` once shadow and source are consistent again.
    /// Idempotent: a second rollback leaves the shadow unchanged.
    pub fn rollback(&self) {
        self.resync_shadow();
        self.signals.edit_refuted.emit(());
    }

    /// Rebuilds the shadow as a deep copy of the current source and
    /// announces the refreshed extent. Shared by bind, commit, and rollback
    /// so all three leave shadow and source consistent.
    fn resync_shadow(&self) {
        let (rows, cols) = {
            let source = self.source.read();
            self.shadow.write().overwrite_from(&source);
            (source.row_count(), source.column_count())
        };
        if rows > 0 && cols > 0 {
            self.signals
                .data_changed
                .emit((CellIndex::new(0, 0), CellIndex::new(rows - 1, cols - 1)));
        }
    }
}

impl fmt::Debug for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridModel")
            .field("rows", &self.row_count())
            .field("columns", &self.column_count())
            .field("require_square", &self.require_square)
            .field("editable", &self.is_editable())
            .finish_non_exhaustive()
    }
}

impl TabularModel for GridModel {
    fn row_count(&self) -> usize {
        GridModel::row_count(self)
    }

    fn column_count(&self) -> usize {
        GridModel::column_count(self)
    }

    fn value_at(&self, index: &CellIndex) -> Option<CellValue> {
        if !index.is_valid() {
            return None;
        }
        self.cell_value(index.row(), index.column())
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }

    fn set_data(&self, index: &CellIndex, raw: &str) -> bool {
        index.is_valid() && self.set_cell_value(index.row(), index.column(), raw)
    }

    fn is_editable(&self) -> bool {
        self.editable.load(Ordering::SeqCst)
    }

    fn header_data(&self, section: usize, orientation: Orientation) -> Option<String> {
        match orientation {
            Orientation::Horizontal if section < self.column_count() => {
                Some(self.column_label(section))
            }
            Orientation::Vertical if section < self.row_count() => Some(self.row_label(section)),
            _ => None,
        }
    }

    fn display_text(&self, index: &CellIndex) -> Option<String> {
        if !index.is_valid() {
            return None;
        }
        self.display_value(index.row(), index.column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::shared;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn int_table(rows: &[&[i64]], labels: &[&str]) -> Table {
        let columns = labels
            .iter()
            .enumerate()
            .map(|(j, label)| {
                Column::new(
                    *label,
                    ColumnType::Int,
                    rows.iter().map(|r| CellValue::Int(r[j])).collect(),
                )
            })
            .collect();
        Table::new(columns).unwrap()
    }

    fn sample_model() -> (GridModel, SharedTable) {
        let source = shared(int_table(&[&[1, 2], &[3, 4], &[5, 6]], &["col1", "col2"]));
        let model = GridModel::new(source.clone()).unwrap().with_editable(true);
        (model, source)
    }

    #[test]
    fn test_bind_copies_source_into_shadow() {
        let (model, source) = sample_model();
        assert_eq!(model.row_count(), 3);
        assert_eq!(model.column_count(), 2);
        assert_eq!(model.cell_value(1, 1), Some(CellValue::Int(4)));
        assert_eq!(source.read().cell(1, 1), Some(&CellValue::Int(4)));
    }

    #[test]
    fn test_square_bind_rejects_rectangles() {
        let source = shared(int_table(&[&[1, 2], &[3, 4], &[5, 6]], &["a", "b"]));
        let err = GridModel::new_square(source).unwrap_err();
        assert_eq!(err, ModelError::NotSquare { rows: 3, cols: 2 });

        let square = shared(int_table(&[&[1, 2], &[3, 4]], &["a", "b"]));
        assert!(GridModel::new_square(square).is_ok());
    }

    #[test]
    fn test_square_model_rejects_structural_mutation() {
        let source = shared(int_table(&[&[1, 2], &[3, 4]], &["a", "b"]));
        let model = GridModel::new_square(source.clone())
            .unwrap()
            .with_editable(true);

        assert!(!model.insert_rows(1));
        assert!(!model.insert_column("c", ColumnType::Int, CellValue::Int(0)));
        assert!(!model.remove_rows(&[0]));
        assert!(!model.remove_columns(&[(0, "a".to_string())]));
        assert_eq!(model.row_count(), 2);
        assert_eq!(model.column_count(), 2);

        // Cell edits still commit without disturbing the shape.
        assert!(model.set_cell_value(0, 0, "9"));
        model.commit();
        assert_eq!(source.read().cell(0, 0), Some(&CellValue::Int(9)));
        assert_eq!(source.read().row_count(), source.read().column_count());
    }

    #[test]
    fn test_edits_stay_in_shadow_until_commit() {
        let (model, source) = sample_model();

        assert!(model.set_cell_value(0, 0, "42"));
        assert_eq!(model.cell_value(0, 0), Some(CellValue::Int(42)));
        assert_eq!(source.read().cell(0, 0), Some(&CellValue::Int(1)));

        model.commit();
        assert_eq!(source.read().cell(0, 0), Some(&CellValue::Int(42)));
    }

    #[test]
    fn test_invalid_input_rejected_prior_value_kept() {
        let (model, _source) = sample_model();

        assert!(!model.set_cell_value(0, 0, "abc"));
        assert_eq!(model.cell_value(0, 0), Some(CellValue::Int(1)));

        assert!(model.set_cell_value(0, 0, "42"));
        assert_eq!(model.cell_value(0, 0), Some(CellValue::Int(42)));
    }

    #[test]
    fn test_model_starts_locked() {
        let source = shared(int_table(&[&[1]], &["a"]));
        let model = GridModel::new(source).unwrap();

        assert!(!model.is_editable());
        assert!(!model.set_cell_value(0, 0, "42"));
        assert_eq!(model.cell_value(0, 0), Some(CellValue::Int(1)));

        model.set_editable(true);
        assert!(model.set_cell_value(0, 0, "42"));
    }

    #[test]
    fn test_rollback_discards_shadow_edits() {
        let (model, source) = sample_model();

        assert!(model.set_cell_value(0, 0, "99"));
        model.rollback();
        assert_eq!(model.cell_value(0, 0), Some(CellValue::Int(1)));
        assert_eq!(source.read().cell(0, 0), Some(&CellValue::Int(1)));
    }

    #[test]
    fn test_commit_then_rollback_round_trip() {
        let (model, _source) = sample_model();

        assert!(model.set_cell_value(2, 1, "70"));
        let before: Vec<_> = (0..3)
            .flat_map(|r| (0..2).map(move |c| (r, c)))
            .map(|(r, c)| model.cell_value(r, c))
            .collect();

        model.commit();
        model.rollback();

        let after: Vec<_> = (0..3)
            .flat_map(|r| (0..2).map(move |c| (r, c)))
            .map(|(r, c)| model.cell_value(r, c))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_rollback_is_idempotent() {
        let (model, _source) = sample_model();
        assert!(model.set_cell_value(0, 1, "8"));

        model.rollback();
        let once: Vec<_> = (0..3).map(|r| model.cell_value(r, 1)).collect();
        model.rollback();
        let twice: Vec<_> = (0..3).map(|r| model.cell_value(r, 1)).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_insert_rows_appends_defaults() {
        let (model, _source) = sample_model();

        assert!(model.insert_rows(2));
        assert_eq!(model.row_count(), 5);
        assert_eq!(model.cell_value(3, 0), Some(CellValue::Int(0)));
        assert_eq!(model.cell_value(4, 1), Some(CellValue::Int(0)));

        // Row labels form a contiguous 0..n sequence afterward.
        let labels: Vec<_> = (0..5).map(|r| model.row_label(r)).collect();
        assert_eq!(labels, vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_insert_rows_rejects_bad_counts_and_empty_schema() {
        let (model, _source) = sample_model();
        assert!(!model.insert_rows(0));

        let empty = GridModel::new(shared(Table::empty())).unwrap();
        assert!(!empty.insert_rows(1));
    }

    #[test]
    fn test_insert_column_fills_default_and_rejects_duplicates() {
        let (model, _source) = sample_model();

        assert!(model.insert_column("flag", ColumnType::Bool, CellValue::Bool(false)));
        assert_eq!(model.column_count(), 3);
        for row in 0..3 {
            assert_eq!(model.cell_value(row, 2), Some(CellValue::Bool(false)));
        }

        assert!(!model.insert_column("flag", ColumnType::Int, CellValue::Int(0)));
        assert_eq!(model.column_count(), 3);

        // Mismatched default value is rejected too.
        assert!(!model.insert_column("other", ColumnType::Int, CellValue::Text("x".into())));
    }

    #[test]
    fn test_remove_rows_batch() {
        let (model, _source) = sample_model();

        assert!(model.remove_rows(&[0, 2]));
        assert_eq!(model.row_count(), 1);
        assert_eq!(model.cell_value(0, 0), Some(CellValue::Int(3)));
        assert_eq!(model.row_label(0), "0");

        assert!(!model.remove_rows(&[]));
        assert!(!model.remove_rows(&[17]));
    }

    #[test]
    fn test_remove_columns_best_effort() {
        let (model, _source) = sample_model();

        // One stale entry, one live entry: the live one still goes through,
        // the overall result reports the failure.
        let ok = model.remove_columns(&[(0, "gone".to_string()), (1, "col2".to_string())]);
        assert!(!ok);
        assert_eq!(model.column_count(), 1);
        assert_eq!(model.column_label(0), "col1");
    }

    #[test]
    fn test_remove_columns_adjusts_positions() {
        let source = shared(int_table(&[&[1, 2, 3]], &["a", "b", "c"]));
        let model = GridModel::new(source).unwrap();

        let ok = model.remove_columns(&[(0, "a".to_string()), (2, "c".to_string())]);
        assert!(ok);
        assert_eq!(model.column_count(), 1);
        assert_eq!(model.column_label(0), "b");
    }

    #[test]
    fn test_removing_all_columns_clears_rows() {
        let (model, _source) = sample_model();
        let removed = Arc::new(Mutex::new(Vec::new()));

        let r = removed.clone();
        model
            .signals()
            .rows_removed
            .connect(move |&span| r.lock().push(span));

        assert!(model.remove_columns(&[(0, "col1".to_string()), (1, "col2".to_string())]));
        assert_eq!(model.column_count(), 0);
        assert_eq!(model.row_count(), 0);
        // Observers hear the rows go, not just the columns.
        assert_eq!(*removed.lock(), vec![(0, 2)]);
    }

    #[test]
    fn test_spec_scenario_end_to_end() {
        // 3x2 integer table; drop the second column, append a default row,
        // commit: the source becomes the same 4x1 table.
        let (model, source) = sample_model();

        assert!(model.remove_columns(&[(1, "col2".to_string())]));
        assert_eq!(model.row_count(), 3);
        assert_eq!(model.column_count(), 1);
        for (row, expected) in [1, 3, 5].into_iter().enumerate() {
            assert_eq!(model.cell_value(row, 0), Some(CellValue::Int(expected)));
        }

        assert!(model.insert_rows(1));
        assert_eq!(model.row_count(), 4);
        assert_eq!(model.cell_value(3, 0), Some(CellValue::Int(0)));

        model.commit();
        let committed = source.read();
        assert_eq!(committed.row_count(), 4);
        assert_eq!(committed.column_count(), 1);
        for (row, expected) in [1, 3, 5, 0].into_iter().enumerate() {
            assert_eq!(committed.cell(row, 0), Some(&CellValue::Int(expected)));
        }
    }

    #[test]
    fn test_commit_applies_pending_renames() {
        let (model, source) = sample_model();

        assert!(model.set_column_label(0, "renamed"));
        assert_eq!(source.read().column_label(0), Some("col1"));

        model.commit();
        assert_eq!(source.read().column_label(0), Some("renamed"));
    }

    #[test]
    fn test_rename_rejects_duplicates() {
        let (model, _source) = sample_model();
        assert!(!model.set_column_label(0, "col2"));
        assert_eq!(model.column_label(0), "col1");

        // Renaming a column to its own label is a no-op, not a collision.
        assert!(model.set_column_label(0, "col1"));
    }

    #[test]
    fn test_header_batch_size_mismatch() {
        let (model, _source) = sample_model();

        let err = model
            .set_header_batch(vec!["only".into()], Orientation::Horizontal)
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::SizeMismatch {
                expected: 2,
                actual: 1
            }
        );

        model
            .set_header_batch(vec!["x".into(), "y".into()], Orientation::Horizontal)
            .unwrap();
        assert_eq!(model.column_label(0), "x");
        assert_eq!(model.column_label(1), "y");

        model
            .set_header_batch(
                vec!["r0".into(), "r1".into(), "r2".into()],
                Orientation::Vertical,
            )
            .unwrap();
        assert_eq!(model.row_label(1), "r1");
    }

    #[test]
    fn test_replace_from_external_preserves_source_identity() {
        let (model, source) = sample_model();
        let replacement = int_table(&[&[7], &[8]], &["fresh"]);

        model.replace_from_external(replacement).unwrap();

        assert_eq!(model.row_count(), 2);
        assert_eq!(model.column_count(), 1);
        assert_eq!(model.cell_value(0, 0), Some(CellValue::Int(7)));

        // Same handle, new contents.
        assert_eq!(source.read().column_label(0), Some("fresh"));
        assert_eq!(source.read().row_count(), 2);
    }

    #[test]
    fn test_display_precision() {
        let source = shared(
            Table::new(vec![Column::new(
                "v",
                ColumnType::Float,
                vec![CellValue::Float(2.71828)],
            )])
            .unwrap(),
        );
        let model = GridModel::new(source).unwrap();

        assert_eq!(model.display_value(0, 0), Some("2.72".to_string()));
        model.set_display_decimal(None);
        assert_eq!(model.display_value(0, 0), Some("2.71828".to_string()));
        assert_eq!(model.display_value(5, 0), None);
    }

    #[test]
    fn test_structural_signal_brackets() {
        let (model, _source) = sample_model();
        let events = Arc::new(Mutex::new(Vec::new()));

        let e = events.clone();
        model
            .signals()
            .rows_about_to_be_inserted
            .connect(move |&(first, last)| e.lock().push(("about", first, last)));
        let e = events.clone();
        model
            .signals()
            .rows_inserted
            .connect(move |&(first, last)| e.lock().push(("done", first, last)));

        assert!(model.insert_rows(2));
        assert_eq!(*events.lock(), vec![("about", 3, 4), ("done", 3, 4)]);
    }

    #[test]
    fn test_commit_and_rollback_events() {
        let (model, _source) = sample_model();
        let events = Arc::new(Mutex::new(Vec::new()));

        let e = events.clone();
        model
            .signals()
            .edit_confirmed
            .connect(move |_| e.lock().push("confirmed"));
        let e = events.clone();
        model
            .signals()
            .edit_refuted
            .connect(move |_| e.lock().push("refuted"));

        model.commit();
        model.rollback();
        assert_eq!(*events.lock(), vec!["confirmed", "refuted"]);
    }

    #[test]
    fn test_debug_reports_shape() {
        let (model, _source) = sample_model();
        let rendered = format!("{model:?}");
        assert!(rendered.contains("GridModel"));
        assert!(rendered.contains("rows: 3"));
        assert!(rendered.contains("columns: 2"));
    }

    #[test]
    fn test_point_change_notification() {
        let (model, _source) = sample_model();
        let changed = Arc::new(Mutex::new(Vec::new()));

        let c = changed.clone();
        model
            .signals()
            .data_changed
            .connect(move |&(top_left, bottom_right)| {
                c.lock().push((top_left, bottom_right));
            });

        assert!(model.set_cell_value(1, 0, "10"));
        assert!(!model.set_cell_value(1, 0, "not a number"));

        let events = changed.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], (CellIndex::new(1, 0), CellIndex::new(1, 0)));
    }
}
