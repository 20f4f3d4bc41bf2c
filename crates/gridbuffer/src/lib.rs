//! Gridbuffer - a transactional tabular model layer.
//!
//! Gridbuffer decouples an externally owned source table from an editable
//! shadow copy. Collaborating components (views, delegates, file readers)
//! consume models through the [`model::TabularModel`] trait and stay
//! synchronized via the synchronous signal system re-exported from
//! `gridbuffer-core`.
//!
//! # Example
//!
//! ```
//! use gridbuffer::model::{shared, CellValue, Column, ColumnType, GridModel, Table};
//!
//! let source = shared(Table::new(vec![
//!     Column::new("id", ColumnType::Int, vec![CellValue::Int(1), CellValue::Int(2)]),
//! ]).unwrap());
//!
//! let model = GridModel::new(source.clone()).unwrap();
//! assert!(model.insert_rows(1));
//! assert_eq!(source.read().row_count(), 2);
//! model.commit();
//! assert_eq!(source.read().row_count(), 3);
//! ```

pub use gridbuffer_core::*;

pub mod error;
pub mod model;

pub use error::{ModelError, ModelResult};
