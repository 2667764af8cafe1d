//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

use crate::core::GridModel;

use super::grid_widget::GridGeometry;

/// Primary screen layout with the grid pane and a bottom status bar.
pub struct AppLayout {
    pub grid_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // grid pane (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            grid_area: chunks[0],
            status_area: chunks[1],
        }
    }

    /// The grid pane's frame.  Items are laid out inside its border.
    pub fn grid_block<'a>() -> Block<'a> {
        Block::default().borders(Borders::ALL)
    }

    /// Item placement exactly as [`GridWidget`](super::grid_widget::GridWidget)
    /// draws it inside the grid pane.
    pub fn grid_geometry(&self, grid: &GridModel) -> GridGeometry {
        GridGeometry::compute(grid, Self::grid_block().inner(self.grid_area))
    }
}
