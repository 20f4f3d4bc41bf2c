//! The 1-D transactional vector model.
//!
//! `VectorModel` is the fixed-length specialization of the shadow/source
//! contract: a single typed sequence presented either as one column or,
//! transposed, as one row. It supports validated per-cell writes and batch
//! replacement but no structural mutation; the length is set at bind time.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::error::{ModelError, ModelResult};
use crate::model::coerce;
use crate::model::index::CellIndex;
use crate::model::table::{SharedTable, Table};
use crate::model::traits::{ModelSignals, Orientation, TabularModel};
use crate::model::value::{CellValue, ColumnType};

const TARGET: &str = "gridbuffer::model";

/// How a vector model presents its sequence to views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorOrientation {
    /// One column of n rows.
    Column,
    /// One row of n columns (the transposed presentation).
    Row,
}

/// A transactional model over a fixed-length typed sequence.
///
/// The source must hold exactly one column; element `i` of the sequence maps
/// to cell `(i, 0)` in [`Column`](VectorOrientation::Column) orientation and
/// to cell `(0, i)` in [`Row`](VectorOrientation::Row) orientation. Edits
/// accumulate in a shadow copy until [`commit`](Self::commit), exactly as in
/// [`GridModel`](super::grid_model::GridModel).
pub struct VectorModel {
    source: SharedTable,
    shadow: RwLock<Table>,
    signals: ModelSignals,
    orientation: VectorOrientation,
    editable: AtomicBool,
    display_decimal: RwLock<Option<usize>>,
}

impl VectorModel {
    /// Binds the model to a single-column source table.
    ///
    /// Fails with [`ModelError::Schema`] when the source has more than one
    /// column or is otherwise malformed.
    pub fn new(source: SharedTable, orientation: VectorOrientation) -> ModelResult<Self> {
        {
            let table = source.read();
            table.validate()?;
            if table.column_count() != 1 {
                return Err(ModelError::Schema {
                    reason: format!(
                        "vector model requires exactly one column, got {}",
                        table.column_count()
                    ),
                });
            }
        }

        let model = Self {
            shadow: RwLock::new(Table::empty()),
            source,
            signals: ModelSignals::new(),
            orientation,
            // Locked until the owning context opts in to edits.
            editable: AtomicBool::new(false),
            display_decimal: RwLock::new(None),
        };
        model.signals.emit_layout_changed(|| model.resync_shadow());
        Ok(model)
    }

    /// The presentation orientation.
    pub fn orientation(&self) -> VectorOrientation {
        self.orientation
    }

    /// The element type of the sequence.
    pub fn element_type(&self) -> Option<ColumnType> {
        self.shadow.read().column_type(0)
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.shadow.read().row_count()
    }

    /// Returns `true` when the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The shared source handle this model is bound to.
    pub fn source(&self) -> SharedTable {
        self.source.clone()
    }

    /// Sets the display precision for floating point elements; `None`
    /// formats values without rounding.
    pub fn set_display_decimal(&self, decimals: Option<usize>) {
        *self.display_decimal.write() = decimals;
    }

    /// Toggles whether the edit API accepts element writes. Models start
    /// locked.
    pub fn set_editable(&self, editable: bool) {
        self.editable.store(editable, Ordering::SeqCst);
    }

    /// Builder-style variant of [`set_editable`](Self::set_editable).
    pub fn with_editable(self, editable: bool) -> Self {
        self.set_editable(editable);
        self
    }

    /// The shadow element at the given position.
    pub fn element(&self, pos: usize) -> Option<CellValue> {
        self.shadow.read().cell(pos, 0).cloned()
    }

    /// The shadow element formatted for display at the configured precision.
    pub fn display_element(&self, pos: usize) -> Option<String> {
        let decimals = *self.display_decimal.read();
        self.shadow.read().cell(pos, 0).map(|v| v.display(decimals))
    }

    /// Coerces `raw` against the element type and writes the shadow element.
    ///
    /// Returns `false` on coercion failure or while the model is locked
    /// against edits; the prior value is retained.
    pub fn set_element(&self, pos: usize, raw: &str) -> bool {
        if !self.is_editable() {
            tracing::debug!(target: TARGET, pos, "edit rejected: model is not editable");
            return false;
        }
        let Some(ty) = self.element_type() else {
            return false;
        };
        let Some(value) = coerce::coerce(ty, raw) else {
            tracing::debug!(target: TARGET, pos, raw, ?ty, "edit rejected: coercion failed");
            return false;
        };

        let written = self.shadow.write().set_cell(pos, 0, value);
        if written {
            self.signals.emit_data_changed_single(self.index_of(pos));
        }
        written
    }

    /// Batch-replaces every element from raw text, all-or-nothing.
    ///
    /// Fails with [`ModelError::SizeMismatch`] when the batch length
    /// disagrees with the sequence length, and with
    /// [`ModelError::Schema`] when any entry fails coercion; the shadow is
    /// untouched on failure.
    pub fn set_data_batch(&self, raw: &[&str]) -> ModelResult<()> {
        let ty = self.element_type().ok_or(ModelError::Schema {
            reason: "vector model has no element column".to_string(),
        })?;
        let values = raw
            .iter()
            .map(|r| {
                coerce::coerce(ty, r).ok_or_else(|| ModelError::Schema {
                    reason: format!("value '{r}' is not a valid {ty:?}"),
                })
            })
            .collect::<ModelResult<Vec<_>>>()?;
        self.set_values_batch(values)
    }

    /// Batch-replaces every element with already-typed values.
    ///
    /// Fails with [`ModelError::SizeMismatch`] on length disagreement and
    /// with [`ModelError::Schema`] when a value does not match the element
    /// type; the shadow is untouched on failure.
    pub fn set_values_batch(&self, values: Vec<CellValue>) -> ModelResult<()> {
        let last = {
            let mut shadow = self.shadow.write();
            let len = shadow.row_count();
            if values.len() != len {
                return Err(ModelError::SizeMismatch {
                    expected: len,
                    actual: values.len(),
                });
            }
            let ty = shadow.column_type(0).ok_or(ModelError::Schema {
                reason: "vector model has no element column".to_string(),
            })?;
            if let Some(value) = values.iter().find(|v| v.column_type() != ty) {
                return Err(ModelError::Schema {
                    reason: format!("value {value:?} does not match element type {ty:?}"),
                });
            }
            shadow.columns_mut()[0].cells = values;
            len.saturating_sub(1)
        };
        self.signals
            .data_changed
            .emit((self.index_of(0), self.index_of(last)));
        Ok(())
    }

    /// Batch-assigns element labels.
    ///
    /// Only the orientation along the sequence is meaningful; labels along
    /// the other axis would name the single row or column and are rejected.
    /// Fails with [`ModelError::SizeMismatch`] when the length disagrees
    /// with the sequence length.
    pub fn set_header_batch(
        &self,
        labels: Vec<String>,
        orientation: Orientation,
    ) -> ModelResult<()> {
        if orientation != self.sequence_axis() {
            return Err(ModelError::Schema {
                reason: "header batch must address the sequence axis".to_string(),
            });
        }
        let last = {
            let mut shadow = self.shadow.write();
            let len = shadow.row_count();
            if labels.len() != len {
                return Err(ModelError::SizeMismatch {
                    expected: len,
                    actual: labels.len(),
                });
            }
            shadow.set_row_labels(labels);
            len.saturating_sub(1)
        };
        self.signals
            .header_data_changed
            .emit((orientation, 0, last));
        Ok(())
    }

    /// The label of the element at the given position, falling back to the
    /// positional decimal label.
    pub fn element_label(&self, pos: usize) -> String {
        self.shadow
            .read()
            .row_label(pos)
            .map_or_else(|| pos.to_string(), str::to_string)
    }

    /// Pushes every pending edit back to the source sequence, in place.
    /// Emits `edit_confirmed`. No-op when the source is empty.
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

    /// Discards the shadow, rebuilding it from the current source. Emits
    /// `edit_refuted`. Idempotent.
    pub fn rollback(&self) {
        self.resync_shadow();
        self.signals.edit_refuted.emit(());
    }

    fn resync_shadow(&self) {
        let len = {
            let source = self.source.read();
            self.shadow.write().overwrite_from(&source);
            source.row_count()
        };
        if len > 0 {
            self.signals
                .data_changed
                .emit((self.index_of(0), self.index_of(len - 1)));
        }
    }

    /// Maps a sequence position to the presented cell index.
    fn index_of(&self, pos: usize) -> CellIndex {
        match self.orientation {
            VectorOrientation::Column => CellIndex::new(pos, 0),
            VectorOrientation::Row => CellIndex::new(0, pos),
        }
    }

    /// Maps a presented cell index back to the sequence position.
    fn position_of(&self, index: &CellIndex) -> Option<usize> {
        if !index.is_valid() {
            return None;
        }
        match self.orientation {
            VectorOrientation::Column if index.column() == 0 => Some(index.row()),
            VectorOrientation::Row if index.row() == 0 => Some(index.column()),
            _ => None,
        }
    }

    /// The header orientation running along the sequence.
    fn sequence_axis(&self) -> Orientation {
        match self.orientation {
            VectorOrientation::Column => Orientation::Vertical,
            VectorOrientation::Row => Orientation::Horizontal,
        }
    }
}

impl fmt::Debug for VectorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorModel")
            .field("len", &self.len())
            .field("orientation", &self.orientation)
            .field("editable", &self.is_editable())
            .finish_non_exhaustive()
    }
}

impl TabularModel for VectorModel {
    fn row_count(&self) -> usize {
        match self.orientation {
            VectorOrientation::Column => self.len(),
            VectorOrientation::Row => 1,
        }
    }

    fn column_count(&self) -> usize {
        match self.orientation {
            VectorOrientation::Column => 1,
            VectorOrientation::Row => self.len(),
        }
    }

    fn value_at(&self, index: &CellIndex) -> Option<CellValue> {
        self.position_of(index).and_then(|pos| self.element(pos))
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }

    fn set_data(&self, index: &CellIndex, raw: &str) -> bool {
        self.position_of(index)
            .is_some_and(|pos| self.set_element(pos, raw))
    }

    fn is_editable(&self) -> bool {
        self.editable.load(Ordering::SeqCst)
    }

    fn header_data(&self, section: usize, orientation: Orientation) -> Option<String> {
        if orientation == self.sequence_axis() && section < self.len() {
            Some(self.element_label(section))
        } else {
            None
        }
    }

    fn display_text(&self, index: &CellIndex) -> Option<String> {
        self.position_of(index)
            .and_then(|pos| self.display_element(pos))
    }
}
