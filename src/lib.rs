//! Interaction engine for a 12-column grid of reorderable, resizable items,
//! plus the terminal front-end that drives it.
//!
//! [`core`] is the engine and has no terminal dependencies.  [`app`], [`ui`]
//! and [`config`] make up the front-end used by the `col-grid` binary.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;
