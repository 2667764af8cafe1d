//! Live drag-and-drop reordering.
//!
//! Each hover event commits a move right away, so the grid order always
//! follows the pointer's current target rather than waiting for the drop.
//! An abandoned drag puts the item back where it started.

use tracing::{debug, trace};

use super::error::{GridError, Result};
use super::grid::GridModel;
use super::item::{InteractionState, ItemId, Session};

/// Drives one grid through drag sessions.  Borrow one with
/// [`GridModel::reorder`].
pub struct ReorderController<'g> {
    grid: &'g mut GridModel,
}

impl<'g> ReorderController<'g> {
    pub fn new(grid: &'g mut GridModel) -> Self {
        Self { grid }
    }

    /// Open a drag session for `id`, remembering its current index.
    ///
    /// Fails with [`GridError::InvalidState`] unless the item is idle.
    pub fn on_drag_start(&mut self, id: ItemId) -> Result<()> {
        let (item, original_index) = self.grid.find_by_id(id)?;
        let state = item.interaction_state();
        if state != InteractionState::Idle {
            return Err(GridError::InvalidState {
                id,
                state,
                operation: "start dragging",
            });
        }

        let item = self.grid.item_mut(id)?;
        item.set_interaction_state(InteractionState::Dragging);
        item.set_session(Some(Session::Drag { original_index }));
        debug!(%id, original_index, "drag started");
        Ok(())
    }

    /// The dragged item is over `over_id`: move it into that slot.
    ///
    /// Ignored when hovering itself, when `dragged_id` has no open drag
    /// session, or when the target is being resized.  Returns `true` if the
    /// order changed.
    pub fn on_hover(&mut self, dragged_id: ItemId, over_id: ItemId) -> Result<bool> {
        if dragged_id == over_id {
            return Ok(false);
        }

        let (dragged, _) = self.grid.find_by_id(dragged_id)?;
        if dragged.interaction_state() != InteractionState::Dragging {
            trace!(%dragged_id, %over_id, "hover without drag session ignored");
            return Ok(false);
        }

        let (over, over_index) = self.grid.find_by_id(over_id)?;
        if over.interaction_state() == InteractionState::Resizing {
            return Ok(false);
        }

        let moved = self.grid.move_item(dragged_id, over_index)?;
        trace!(%dragged_id, %over_id, over_index, moved, "hover");
        Ok(moved)
    }

    /// Close the drag session.  When `committed` is false the item returns
    /// to the index it had at drag start.
    pub fn on_drag_end(&mut self, id: ItemId, committed: bool) -> Result<()> {
        let item = self.grid.item_mut(id)?;
        let state = item.interaction_state();
        let original_index = match (state, item.session()) {
            (InteractionState::Dragging, Some(&Session::Drag { original_index })) => original_index,
            _ => {
                return Err(GridError::InvalidState {
                    id,
                    state,
                    operation: "end dragging",
                })
            }
        };

        item.set_interaction_state(InteractionState::Idle);
        item.set_session(None);

        if !committed {
            self.grid.move_item(id, original_index)?;
        }
        debug!(%id, committed, "drag ended");
        Ok(())
    }
}
