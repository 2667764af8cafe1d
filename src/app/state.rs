//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{GridModel, ItemId};
use crate::ui::layout::AppLayout;

/// Pointer gesture currently captured by the mouse, if any.
///
/// The core tracks sessions per item; this only remembers which item the
/// pointer grabbed so that drag and release events can be routed to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Drag(ItemId),
    Resize(ItemId),
}

/// Top-level application state.
pub struct AppState {
    /// The grid being edited.
    pub grid: GridModel,
    /// Item targeted by keyboard actions.
    pub selected: Option<ItemId>,
    /// Mouse gesture in progress.
    pub gesture: Option<Gesture>,
    /// User-configurable keybindings.
    pub config: AppConfig,
    /// Last known terminal size; hit-testing recomputes layout from it.
    pub terminal_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(grid: GridModel, config: AppConfig) -> Self {
        let selected = grid.ids().next();
        Self {
            grid,
            selected,
            gesture: None,
            config,
            terminal_area: Rect::default(),
            should_quit: false,
            status_message: None,
        }
    }

    pub fn layout(&self) -> AppLayout {
        AppLayout::from_area(self.terminal_area)
    }
}
