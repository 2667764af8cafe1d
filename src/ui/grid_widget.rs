//! Custom Ratatui widget that renders a [`GridModel`] as a 12-column grid.
//!
//! Items are laid out left to right.  An item that would push a row past 12
//! columns starts a new row, the way a CSS grid row wraps.  Wrapping is purely
//! presentational: the model itself is a single ordered list.
//!
//! [`GridGeometry`] is shared with the input handler so that hit-testing uses
//! exactly the rectangles that were drawn.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::core::{GridModel, InteractionState, ItemId, GRID_COLUMNS};

use super::theme::Theme;

/// Height of one grid row in terminal cells (border + two text lines + border).
pub const ROW_HEIGHT: u16 = 4;

const HANDLE_SYMBOL: &str = "┃";

// ───────────────────────────────────────── geometry ──────────

/// Which part of an item the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitZone {
    Body,
    /// The rightmost column of the item, used as the resize handle.
    Handle,
}

/// Where one item landed on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemCell {
    pub id: ItemId,
    pub rect: Rect,
    /// Visual row (0-based) after wrapping.
    pub row: usize,
}

impl ItemCell {
    pub fn handle_x(&self) -> u16 {
        self.rect.x + self.rect.width.saturating_sub(1)
    }

    fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.rect.x
            && col < self.rect.x + self.rect.width
            && row >= self.rect.y
            && row < self.rect.y + self.rect.height
    }
}

/// Screen placement of every visible item inside `area`.
#[derive(Debug, Clone, Default)]
pub struct GridGeometry {
    pub area: Rect,
    pub cells: Vec<ItemCell>,
}

impl GridGeometry {
    pub fn compute(grid: &GridModel, area: Rect) -> Self {
        let column_width = f64::from(area.width) / f64::from(GRID_COLUMNS);
        let edge = |column: u8| (f64::from(column) * column_width).round() as u16;

        let mut cells = Vec::with_capacity(grid.len());
        let mut row = 0usize;
        let mut start: u8 = 0;

        for item in grid.items() {
            let span = item.column_span();
            if start > 0 && start + span > GRID_COLUMNS {
                row += 1;
                start = 0;
            }

            let x = edge(start);
            let width = edge(start + span) - x;
            let y_offset = (row as u32) * u32::from(ROW_HEIGHT);
            start += span;

            // Rows past the bottom of the area are not drawn or hittable.
            if y_offset + u32::from(ROW_HEIGHT) > u32::from(area.height) || width == 0 {
                continue;
            }

            cells.push(ItemCell {
                id: item.id(),
                rect: Rect::new(area.x + x, area.y + y_offset as u16, width, ROW_HEIGHT),
                row,
            });
        }

        Self { area, cells }
    }

    /// Width of the full 12-column row, the reference frame for resizing.
    pub fn container_width(&self) -> u16 {
        self.area.width
    }

    pub fn cell(&self, id: ItemId) -> Option<&ItemCell> {
        self.cells.iter().find(|cell| cell.id == id)
    }

    /// The item under `(col, row)` and which part of it was hit.
    pub fn hit(&self, col: u16, row: u16) -> Option<(ItemCell, HitZone)> {
        let cell = self.cells.iter().find(|cell| cell.contains(col, row))?;
        let zone = if col == cell.handle_x() {
            HitZone::Handle
        } else {
            HitZone::Body
        };
        Some((*cell, zone))
    }
}

// ───────────────────────────────────────── widget ────────────

/// The grid widget itself — created fresh each frame.
pub struct GridWidget<'a> {
    grid: &'a GridModel,
    selected: Option<ItemId>,
    block: Option<Block<'a>>,
}

impl<'a> GridWidget<'a> {
    pub fn new(grid: &'a GridModel) -> Self {
        Self {
            grid,
            selected: None,
            block: None,
        }
    }

    pub fn selected(mut self, selected: Option<ItemId>) -> Self {
        self.selected = selected;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for GridWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        let geometry = GridGeometry::compute(self.grid, inner);
        for cell in &geometry.cells {
            let Some(item) = self.grid.get(cell.id) else {
                continue;
            };
            let state = item.interaction_state();
            let is_selected = self.selected == Some(cell.id);

            let border_style = match state {
                InteractionState::Dragging => Theme::dragging_style(),
                InteractionState::Resizing => Theme::resizing_border_style(),
                InteractionState::Idle if is_selected => Theme::selected_border_style(),
                InteractionState::Idle => Theme::item_border_style(),
            };
            let item_block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style);
            let text_area = item_block.inner(cell.rect);
            item_block.render(cell.rect, buf);

            let label_style = if state == InteractionState::Dragging {
                Theme::dragging_style()
            } else {
                Theme::label_style()
            };
            Paragraph::new(vec![
                Line::from(Span::styled(format!("Item {}", cell.id), label_style)),
                Line::from(Span::styled(
                    format!("{}/{}", item.column_span(), GRID_COLUMNS),
                    Theme::span_style(),
                )),
            ])
            .render(text_area, buf);

            // No resize affordance while the item is being dragged.
            if state != InteractionState::Dragging && cell.rect.width > 1 {
                let handle_style = if state == InteractionState::Resizing {
                    Theme::active_handle_style()
                } else {
                    Theme::handle_style()
                };
                let x = cell.handle_x();
                for y in text_area.y..text_area.y + text_area.height {
                    buf[(x, y)].set_symbol(HANDLE_SYMBOL).set_style(handle_style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::new(2, 1, 120, 12)
    }

    #[test]
    fn uniform_items_share_one_row() {
        let grid = GridModel::with_uniform(3, 4);
        let geo = GridGeometry::compute(&grid, area());
        let rects: Vec<Rect> = geo.cells.iter().map(|c| c.rect).collect();
        assert_eq!(
            rects,
            [
                Rect::new(2, 1, 40, ROW_HEIGHT),
                Rect::new(42, 1, 40, ROW_HEIGHT),
                Rect::new(82, 1, 40, ROW_HEIGHT),
            ]
        );
        assert!(geo.cells.iter().all(|c| c.row == 0));
    }

    #[test]
    fn overflowing_item_wraps_to_next_row() {
        let mut grid = GridModel::with_uniform(3, 4);
        grid.set_column_span(ItemId(2), 10.0).unwrap();
        let geo = GridGeometry::compute(&grid, area());

        let second = geo.cell(ItemId(2)).unwrap();
        assert_eq!(second.row, 1);
        assert_eq!(second.rect, Rect::new(2, 1 + ROW_HEIGHT, 100, ROW_HEIGHT));
        // Item 3 does not fit beside item 2 either.
        assert_eq!(geo.cell(ItemId(3)).unwrap().row, 2);
    }

    #[test]
    fn rows_past_the_bottom_are_skipped() {
        let grid = GridModel::with_uniform(4, 12);
        let geo = GridGeometry::compute(&grid, area());
        assert_eq!(geo.cells.len(), 3);
        assert!(geo.cell(ItemId(4)).is_none());
    }

    #[test]
    fn hit_distinguishes_body_and_handle() {
        let grid = GridModel::with_uniform(3, 4);
        let geo = GridGeometry::compute(&grid, area());

        let (cell, zone) = geo.hit(10, 2).unwrap();
        assert_eq!(cell.id, ItemId(1));
        assert_eq!(zone, HitZone::Body);

        let (cell, zone) = geo.hit(41, 2).unwrap();
        assert_eq!(cell.id, ItemId(1));
        assert_eq!(zone, HitZone::Handle);

        assert_eq!(geo.hit(42, 2).unwrap().0.id, ItemId(2));
        assert!(geo.hit(10, 9).is_none());
        assert!(geo.hit(0, 2).is_none());
    }

    #[test]
    fn renders_labels_and_handles() {
        let mut grid = GridModel::with_uniform(2, 6);
        grid.reorder().on_drag_start(ItemId(2)).unwrap();

        let area = Rect::new(0, 0, 24, ROW_HEIGHT);
        let mut buf = Buffer::empty(area);
        GridWidget::new(&grid).render(area, &mut buf);

        assert_eq!(buf[(1, 1)].symbol(), "I");
        assert_eq!(buf[(1, 2)].symbol(), "6");
        // Idle item shows its handle, the dragged one does not.
        assert_eq!(buf[(11, 1)].symbol(), HANDLE_SYMBOL);
        assert_ne!(buf[(23, 1)].symbol(), HANDLE_SYMBOL);
    }
}
