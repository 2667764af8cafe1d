//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer reads the core grid model and turns it into cells on the
//! terminal.  It never mutates the model.

pub mod grid_widget;
pub mod layout;
pub mod theme;
