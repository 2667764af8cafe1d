//! Edge-handle resizing with column snapping.
//!
//! The rendering layer measures the item and its container once, when the
//! pointer goes down on the handle.  Every later pointer sample is turned
//! into a width relative to that fixed frame and snapped to a whole number
//! of columns out of 12.

use tracing::{debug, trace};

use super::error::{GridError, Result};
use super::grid::GridModel;
use super::item::{quantize_span, InteractionState, ItemId, Session, GRID_COLUMNS};

/// `width` as a fractional number of columns out of the 12 that fit in
/// `container_width`.
fn columns_for_width(width: f64, container_width: f64) -> f64 {
    width / container_width * f64::from(GRID_COLUMNS)
}

/// Snap a width to the nearest column count, given the width of all 12
/// columns.  `None` when the ratio is `NaN`, otherwise in `[1, 12]`.
pub fn span_for_width(width: f64, container_width: f64) -> Option<u8> {
    quantize_span(columns_for_width(width, container_width))
}

/// Drives one grid through resize sessions.  Borrow one with
/// [`GridModel::resize`].
pub struct ResizeController<'g> {
    grid: &'g mut GridModel,
}

impl<'g> ResizeController<'g> {
    pub fn new(grid: &'g mut GridModel) -> Self {
        Self { grid }
    }

    /// Open a resize session.  `container_width` is the width of the full
    /// 12-column row, in the same unit as `pointer_x` and `item_width`.
    pub fn on_resize_start(
        &mut self,
        id: ItemId,
        pointer_x: f64,
        item_width: f64,
        container_width: f64,
    ) -> Result<()> {
        if !(container_width.is_finite() && container_width > 0.0) {
            return Err(GridError::invalid_argument(format!(
                "container width must be positive, got {container_width}"
            )));
        }
        if !pointer_x.is_finite() || !item_width.is_finite() {
            return Err(GridError::invalid_argument(
                "pointer position and item width must be finite",
            ));
        }

        let item = self.grid.item_mut(id)?;
        let state = item.interaction_state();
        if state != InteractionState::Idle {
            return Err(GridError::InvalidState {
                id,
                state,
                operation: "start resizing",
            });
        }

        item.set_interaction_state(InteractionState::Resizing);
        item.set_session(Some(Session::Resize {
            start_pointer_x: pointer_x,
            start_width: item_width,
            container_width,
        }));
        debug!(%id, pointer_x, item_width, container_width, "resize started");
        Ok(())
    }

    /// Apply a pointer sample.  Returns the item's span afterwards.
    ///
    /// A `NaN` sample fails with [`GridError::InvalidArgument`] and leaves
    /// the span as it was.
    pub fn on_resize_move(&mut self, id: ItemId, pointer_x: f64) -> Result<u8> {
        let (item, _) = self.grid.find_by_id(id)?;
        let state = item.interaction_state();
        let Some(&Session::Resize {
            start_pointer_x,
            start_width,
            container_width,
        }) = item.session().filter(|_| state == InteractionState::Resizing)
        else {
            return Err(GridError::InvalidState {
                id,
                state,
                operation: "resize",
            });
        };

        let delta = pointer_x - start_pointer_x;
        let span = self
            .grid
            .set_column_span(id, columns_for_width(start_width + delta, container_width))?;
        trace!(%id, pointer_x, delta, span, "resize sample");
        Ok(span)
    }

    /// Close the resize session, keeping the last span.
    pub fn on_resize_end(&mut self, id: ItemId) -> Result<()> {
        let item = self.grid.item_mut(id)?;
        let state = item.interaction_state();
        if state != InteractionState::Resizing {
            return Err(GridError::InvalidState {
                id,
                state,
                operation: "end resizing",
            });
        }

        item.set_interaction_state(InteractionState::Idle);
        item.set_session(None);
        debug!(%id, span = item.column_span(), "resize ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ID: ItemId = ItemId(1);

    fn span(grid: &GridModel) -> u8 {
        grid.get(ID).unwrap().column_span()
    }

    #[test]
    fn snaps_pointer_delta_to_columns() {
        // 12 columns of 100px, item starts 4 columns wide.
        let mut grid = GridModel::with_uniform(1, 4);
        let mut resize = grid.resize();
        resize.on_resize_start(ID, 100.0, 400.0, 1200.0).unwrap();
        assert_eq!(resize.on_resize_move(ID, 300.0).unwrap(), 6);
        assert_eq!(span(&grid), 6);
    }

    #[test]
    fn widths_snap_to_nearest_column() {
        let mut grid = GridModel::with_uniform(1, 4);
        let mut resize = grid.resize();
        resize.on_resize_start(ID, 0.0, 400.0, 1200.0).unwrap();
        assert_eq!(resize.on_resize_move(ID, 49.0).unwrap(), 4);
        assert_eq!(resize.on_resize_move(ID, 50.0).unwrap(), 5);
        assert_eq!(resize.on_resize_move(ID, 51.0).unwrap(), 5);
        // Same span again is harmless.
        assert_eq!(resize.on_resize_move(ID, 60.0).unwrap(), 5);
    }

    #[test]
    fn span_is_clamped_at_both_ends() {
        let mut grid = GridModel::with_uniform(1, 4);
        let mut resize = grid.resize();
        resize.on_resize_start(ID, 500.0, 400.0, 1200.0).unwrap();
        assert_eq!(resize.on_resize_move(ID, -10_000.0).unwrap(), 1);
        assert_eq!(resize.on_resize_move(ID, 10_000.0).unwrap(), 12);
    }

    #[test]
    fn end_keeps_last_span() {
        let mut grid = GridModel::with_uniform(1, 4);
        grid.resize().on_resize_start(ID, 0.0, 400.0, 1200.0).unwrap();
        grid.resize().on_resize_move(ID, 500.0).unwrap();
        grid.resize().on_resize_end(ID).unwrap();

        let item = grid.get(ID).unwrap();
        assert_eq!(item.column_span(), 9);
        assert!(item.is_idle());
        assert!(item.session().is_none());
    }

    #[test]
    fn measurements_are_fixed_for_the_session() {
        let mut grid = GridModel::with_uniform(1, 4);
        grid.resize().on_resize_start(ID, 0.0, 400.0, 1200.0).unwrap();
        grid.resize().on_resize_move(ID, 200.0).unwrap();
        // Second sample is still measured from the original start point.
        assert_eq!(grid.resize().on_resize_move(ID, 100.0).unwrap(), 5);
    }

    #[test]
    fn dragging_item_cannot_be_resized() {
        let mut grid = GridModel::with_uniform(2, 4);
        grid.reorder().on_drag_start(ID).unwrap();
        let err = grid.resize().on_resize_start(ID, 0.0, 400.0, 1200.0).unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidState {
                id: ID,
                state: InteractionState::Dragging,
                operation: "start resizing",
            }
        );
        assert_eq!(
            grid.get(ID).unwrap().interaction_state(),
            InteractionState::Dragging
        );
    }

    #[test]
    fn bad_container_width_is_rejected() {
        let mut grid = GridModel::with_uniform(1, 4);
        for width in [0.0, -1200.0, f64::NAN, f64::INFINITY] {
            let err = grid.resize().on_resize_start(ID, 0.0, 400.0, width).unwrap_err();
            assert!(matches!(err, GridError::InvalidArgument { .. }));
        }
        assert!(grid.get(ID).unwrap().is_idle());
    }

    #[test]
    fn move_and_end_need_an_open_session() {
        let mut grid = GridModel::with_uniform(1, 4);
        assert!(matches!(
            grid.resize().on_resize_move(ID, 10.0),
            Err(GridError::InvalidState { .. })
        ));
        assert!(matches!(
            grid.resize().on_resize_end(ID),
            Err(GridError::InvalidState { .. })
        ));
        assert_eq!(span(&grid), 4);
    }

    #[test]
    fn nan_sample_is_rejected_and_keeps_span() {
        let mut grid = GridModel::with_uniform(1, 4);
        let mut resize = grid.resize();
        resize.on_resize_start(ID, 0.0, 800.0, 1200.0).unwrap();
        assert_eq!(resize.on_resize_move(ID, 100.0).unwrap(), 9);

        let err = resize.on_resize_move(ID, f64::NAN).unwrap_err();
        assert!(matches!(err, GridError::InvalidArgument { .. }));
        assert_eq!(span(&grid), 9);
        // The session survives a bad sample.
        assert_eq!(
            grid.get(ID).unwrap().interaction_state(),
            InteractionState::Resizing
        );
        assert_eq!(grid.resize().on_resize_move(ID, 0.0).unwrap(), 8);
    }

    #[test]
    fn infinite_samples_clamp() {
        let mut grid = GridModel::with_uniform(1, 4);
        let mut resize = grid.resize();
        resize.on_resize_start(ID, 0.0, 400.0, 1200.0).unwrap();
        assert_eq!(resize.on_resize_move(ID, f64::INFINITY).unwrap(), 12);
        assert_eq!(resize.on_resize_move(ID, f64::NEG_INFINITY).unwrap(), 1);
    }

    #[test]
    fn span_for_width_quantizes() {
        assert_eq!(span_for_width(600.0, 1200.0), Some(6));
        assert_eq!(span_for_width(650.0, 1200.0), Some(7));
        assert_eq!(span_for_width(0.0, 1200.0), Some(1));
        assert_eq!(span_for_width(f64::NAN, 1200.0), None);
    }

    #[test]
    fn unknown_item_is_stale() {
        let mut grid = GridModel::with_uniform(1, 4);
        let err = grid
            .resize()
            .on_resize_start(ItemId(2), 0.0, 1.0, 12.0)
            .unwrap_err();
        assert!(err.is_stale());
    }

    proptest! {
        #[test]
        fn every_sample_lands_in_range(
            start_x in -2000.0f64..2000.0,
            start_width in 0.0f64..2400.0,
            container in 1.0f64..4000.0,
            samples in prop::collection::vec(-5000.0f64..5000.0, 1..16),
        ) {
            let mut grid = GridModel::with_uniform(1, 4);
            let mut resize = grid.resize();
            resize.on_resize_start(ID, start_x, start_width, container).unwrap();
            for x in samples {
                let span = resize.on_resize_move(ID, x).unwrap();
                prop_assert!((1..=12).contains(&span));
                prop_assert_eq!(Some(span), span_for_width(start_width + (x - start_x), container));
            }
        }
    }
}
