//! Transactional tabular models.
//!
//! This module provides a view-agnostic model layer over 2-D typed grids.
//! The central idea is a dual-buffer design: each model binds an externally
//! owned **source table** (shared behind [`SharedTable`]) and keeps a private
//! **shadow table** where edits accumulate. [`GridModel::commit`] copies the
//! shadow back into the source in place; [`GridModel::rollback`] discards it.
//!
//! # Core Types
//!
//! - [`Table`] / [`Column`] / [`SharedTable`]: the typed column storage
//! - [`ColumnType`] / [`CellValue`]: schema tags and cell contents
//! - [`CellIndex`]: identifies a cell's position in a model
//! - [`TabularModel`]: the trait views consume models through
//! - [`ModelSignals`]: change notifications views connect to
//!
//! # Model Implementations
//!
//! - [`GridModel`]: the 2-D transactional model with structural mutation
//! - [`VectorModel`]: the fixed-length 1-D specialization
//!
//! # Example
//!
//! ```
//! use gridbuffer::model::{
//!     shared, CellValue, Column, ColumnType, GridModel, Table, TabularModel,
//! };
//!
//! let source = shared(Table::new(vec![
//!     Column::new("count", ColumnType::Int, vec![CellValue::Int(10)]),
//! ]).unwrap());
//!
//! let model = GridModel::new(source.clone()).unwrap().with_editable(true);
//!
//! // Views stay synchronized through signals.
//! model.signals().data_changed.connect(|(top_left, bottom_right)| {
//!     println!("cells changed: {top_left:?}..{bottom_right:?}");
//! });
//!
//! // Edits are validated against the column type and buffered until commit.
//! assert!(model.set_cell_value(0, 0, "11"));
//! assert!(!model.set_cell_value(0, 0, "eleven"));
//! model.commit();
//! assert_eq!(source.read().cell(0, 0), Some(&CellValue::Int(11)));
//! ```

pub mod coerce;
mod editor;
mod grid_model;
mod index;
mod table;
mod traits;
mod value;
mod vector_model;

pub use editor::EditorHints;
pub use grid_model::GridModel;
pub use index::CellIndex;
pub use table::{shared, Column, SharedTable, Table};
pub use traits::{ModelSignals, Orientation, TabularModel};
pub use value::{CellValue, ColumnType};
pub use vector_model::{VectorModel, VectorOrientation};
