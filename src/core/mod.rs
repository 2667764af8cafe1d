//! Core interaction engine – the item model, live reordering and snapped
//! resizing.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Widths
//! handed to the resize controller are plain `f64`s in whatever unit the
//! caller measures in (pixels, terminal cells).

pub mod error;
pub mod grid;
pub mod item;
pub mod reorder;
pub mod resize;

pub use error::{GridError, Result};
pub use grid::GridModel;
pub use item::{GridItem, InteractionState, ItemId, Session, GRID_COLUMNS};
