//! Core trait and notification set for tabular models.
//!
//! Views and delegates consume models through [`TabularModel`] and stay
//! synchronized by connecting to [`ModelSignals`].

use gridbuffer_core::Signal;

use super::index::CellIndex;
use super::value::CellValue;

/// Header orientation for `header_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Horizontal header (column headers).
    Horizontal,
    /// Vertical header (row headers).
    Vertical,
}

/// The core trait for tabular models.
///
/// `TabularModel` provides a flat, view-agnostic interface over a 2-D grid.
/// Views use this interface to query and display cells without knowing the
/// underlying storage.
///
/// # Implementation Requirements
///
/// At minimum, implement [`row_count`](TabularModel::row_count),
/// [`column_count`](TabularModel::column_count),
/// [`value_at`](TabularModel::value_at), and
/// [`signals`](TabularModel::signals). Editable models also implement
/// [`set_data`](TabularModel::set_data).
pub trait TabularModel: Send + Sync {
    /// Returns the number of rows.
    fn row_count(&self) -> usize;

    /// Returns the number of columns.
    fn column_count(&self) -> usize;

    /// Returns the value stored at the given index.
    ///
    /// Returns `None` if the index is invalid or out of bounds.
    fn value_at(&self, index: &CellIndex) -> Option<CellValue>;

    /// Returns the signals for this model.
    ///
    /// Views connect to these signals to receive notifications about data
    /// changes, insertions, removals, and commit/rollback events.
    fn signals(&self) -> &ModelSignals;

    // -------------------------------------------------------------------------
    // Optional methods with default implementations
    // -------------------------------------------------------------------------

    /// Sets the cell at the given index from raw editor text.
    ///
    /// Returns `true` if the input passed validation and the cell was
    /// written. The default implementation returns `false` (read-only).
    ///
    /// Implementations should emit `data_changed` after modifying data.
    fn set_data(&self, _index: &CellIndex, _raw: &str) -> bool {
        false
    }

    /// Returns `true` when the model currently accepts edits.
    ///
    /// The default returns `false` (read-only).
    fn is_editable(&self) -> bool {
        false
    }

    /// Returns header text for the given section (row or column header).
    ///
    /// - For horizontal headers, `section` is the column index
    /// - For vertical headers, `section` is the row index
    ///
    /// The default returns `None`.
    fn header_data(&self, _section: usize, _orientation: Orientation) -> Option<String> {
        None
    }

    /// Returns the display text for a cell.
    ///
    /// The default formats [`value_at`](TabularModel::value_at) without
    /// rounding; models with a configured display precision override this.
    fn display_text(&self, index: &CellIndex) -> Option<String> {
        self.value_at(index).map(|v| v.display(None))
    }

    /// Returns `true` when the model has no rows or no columns.
    fn is_empty(&self) -> bool {
        self.row_count() == 0 || self.column_count() == 0
    }
}

/// Collection of signals emitted by tabular models.
///
/// Views connect to these signals to stay synchronized with the model.
///
/// # Signal Usage
///
/// - **Before structural modifications**: `rows_about_to_be_*`,
///   `columns_about_to_be_*`, or `layout_about_to_change`
/// - **After structural modifications**: the matching `*_inserted`,
///   `*_removed`, or `layout_changed`
/// - **Cell edits**: `data_changed` for value modifications
/// - **Transactions**: `edit_confirmed` after commit, `edit_refuted` after
///   rollback
pub struct ModelSignals {
    // -------------------------------------------------------------------------
    // Row modification signals
    // -------------------------------------------------------------------------
    /// Emitted just before rows are inserted. Args: (first row, last row)
    pub rows_about_to_be_inserted: Signal<(usize, usize)>,

    /// Emitted after rows have been inserted. Args: (first row, last row)
    pub rows_inserted: Signal<(usize, usize)>,

    /// Emitted just before rows are removed. Args: (first row, last row)
    pub rows_about_to_be_removed: Signal<(usize, usize)>,

    /// Emitted after rows have been removed. Args: (first row, last row)
    pub rows_removed: Signal<(usize, usize)>,

    // -------------------------------------------------------------------------
    // Column modification signals
    // -------------------------------------------------------------------------
    /// Emitted just before columns are inserted. Args: (first, last)
    pub columns_about_to_be_inserted: Signal<(usize, usize)>,

    /// Emitted after columns have been inserted. Args: (first, last)
    pub columns_inserted: Signal<(usize, usize)>,

    /// Emitted just before columns are removed. Args: (first, last)
    pub columns_about_to_be_removed: Signal<(usize, usize)>,

    /// Emitted after columns have been removed. Args: (first, last)
    pub columns_removed: Signal<(usize, usize)>,

    // -------------------------------------------------------------------------
    // Data change signals
    // -------------------------------------------------------------------------
    /// Emitted when data in existing cells changes.
    /// Args: (top-left index, bottom-right index)
    pub data_changed: Signal<(CellIndex, CellIndex)>,

    /// Emitted when header data changes.
    /// Args: (orientation, first section, last section)
    pub header_data_changed: Signal<(Orientation, usize, usize)>,

    // -------------------------------------------------------------------------
    // Layout signals
    // -------------------------------------------------------------------------
    /// Emitted before a structural reset (bind or bulk replace).
    pub layout_about_to_change: Signal<()>,

    /// Emitted after a structural reset.
    pub layout_changed: Signal<()>,

    // -------------------------------------------------------------------------
    // Transaction signals
    // -------------------------------------------------------------------------
    /// Emitted after pending edits have been committed to the source table.
    pub edit_confirmed: Signal<()>,

    /// Emitted after pending edits have been discarded.
    pub edit_refuted: Signal<()>,
}

impl Default for ModelSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSignals {
    /// Creates a new set of model signals.
    pub fn new() -> Self {
        Self {
            rows_about_to_be_inserted: Signal::new(),
            rows_inserted: Signal::new(),
            rows_about_to_be_removed: Signal::new(),
            rows_removed: Signal::new(),
            columns_about_to_be_inserted: Signal::new(),
            columns_inserted: Signal::new(),
            columns_about_to_be_removed: Signal::new(),
            columns_removed: Signal::new(),
            data_changed: Signal::new(),
            header_data_changed: Signal::new(),
            layout_about_to_change: Signal::new(),
            layout_changed: Signal::new(),
            edit_confirmed: Signal::new(),
            edit_refuted: Signal::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Convenience methods for emitting signals
    // -------------------------------------------------------------------------

    /// Emits the bracket pair for row insertion around `insert_fn`.
    pub fn emit_rows_inserted<F>(&self, first: usize, last: usize, insert_fn: F)
    where
        F: FnOnce(),
    {
        self.rows_about_to_be_inserted.emit((first, last));
        insert_fn();
        self.rows_inserted.emit((first, last));
    }

    /// Emits the bracket pair for row removal around `remove_fn`.
    pub fn emit_rows_removed<F>(&self, first: usize, last: usize, remove_fn: F)
    where
        F: FnOnce(),
    {
        self.rows_about_to_be_removed.emit((first, last));
        remove_fn();
        self.rows_removed.emit((first, last));
    }

    /// Emits the bracket pair for column insertion around `insert_fn`.
    pub fn emit_columns_inserted<F>(&self, first: usize, last: usize, insert_fn: F)
    where
        F: FnOnce(),
    {
        self.columns_about_to_be_inserted.emit((first, last));
        insert_fn();
        self.columns_inserted.emit((first, last));
    }

    /// Emits the bracket pair for column removal around `remove_fn`.
    pub fn emit_columns_removed<F>(&self, first: usize, last: usize, remove_fn: F)
    where
        F: FnOnce(),
    {
        self.columns_about_to_be_removed.emit((first, last));
        remove_fn();
        self.columns_removed.emit((first, last));
    }

    /// Emits the data_changed signal for a single cell.
    pub fn emit_data_changed_single(&self, index: CellIndex) {
        self.data_changed.emit((index, index));
    }

    /// Emits the layout bracket pair around `change_fn`.
    pub fn emit_layout_changed<F>(&self, change_fn: F)
    where
        F: FnOnce(),
    {
        self.layout_about_to_change.emit(());
        change_fn();
        self.layout_changed.emit(());
    }
}
