//! Core systems for gridbuffer.
//!
//! This crate provides the notification backbone used by the gridbuffer
//! model crates:
//!
//! - **Signal/Slot System**: Type-safe observer registration and synchronous,
//!   in-process delivery
//!
//! All delivery is direct: connected slots run to completion on the emitting
//! thread before `emit` returns. There is no event loop, no queuing, and no
//! reordering.
//!
//! # Example
//!
//! ```
//! use gridbuffer_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
