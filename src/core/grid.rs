//! The ordered grid of items.
//!
//! [`GridModel`] is a flat `Vec` in visual left-to-right order.  Positions
//! shift on every move, so nothing outside a single call holds an index:
//! callers look items up by [`ItemId`] each time.

use tracing::debug;

use super::error::{GridError, Result};
use super::item::{quantize_span, GridItem, InteractionState, ItemId};
use super::reorder::ReorderController;
use super::resize::ResizeController;

/// Ordered, id-addressed collection of [`GridItem`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridModel {
    items: Vec<GridItem>,
}

impl GridModel {
    /// An empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` items with ids `1..=count`, all `span` columns wide.
    pub fn with_uniform(count: u32, span: u8) -> Self {
        Self {
            items: (1..=count).map(|n| GridItem::new(ItemId(n), span)).collect(),
        }
    }

    /// Append a new idle item at the end of the grid.
    pub fn push_item(&mut self, id: ItemId, span: u8) -> Result<()> {
        if self.index_of(id).is_some() {
            return Err(GridError::DuplicateId { id });
        }
        self.items.push(GridItem::new(id, span));
        Ok(())
    }

    // ── read surface ────────────────────────────────────────────

    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ids in current visual order.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(GridItem::id)
    }

    pub fn get(&self, id: ItemId) -> Option<&GridItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Resolve an id to the item and its current index.
    ///
    /// The index is only meaningful until the next mutating call.
    pub fn find_by_id(&self, id: ItemId) -> Result<(&GridItem, usize)> {
        self.items
            .iter()
            .enumerate()
            .find(|(_, item)| item.id() == id)
            .map(|(index, item)| (item, index))
            .ok_or(GridError::NotFound { id })
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> Result<&mut GridItem> {
        self.items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or(GridError::NotFound { id })
    }

    // ── mutations ───────────────────────────────────────────────

    /// Relocate `id` to `target_index` (clamped to the valid range), keeping
    /// every other item in its relative order.
    ///
    /// Returns `true` if the order changed.
    pub fn move_item(&mut self, id: ItemId, target_index: usize) -> Result<bool> {
        let (_, from) = self.find_by_id(id)?;
        let to = target_index.min(self.items.len() - 1);
        if from == to {
            return Ok(false);
        }

        let item = self.items.remove(from);
        self.items.insert(to, item);
        debug!(%id, from, to, "moved grid item");
        Ok(true)
    }

    /// Set the span from a real value, rounded half away from zero and
    /// clamped to `[1, 12]`.  Returns the stored span.
    pub fn set_column_span(&mut self, id: ItemId, value: f64) -> Result<u8> {
        let span = quantize_span(value)
            .ok_or_else(|| GridError::invalid_argument("column span must not be NaN"))?;
        self.item_mut(id)?.set_column_span(span);
        Ok(span)
    }

    pub fn set_interaction_state(&mut self, id: ItemId, state: InteractionState) -> Result<()> {
        self.item_mut(id)?.set_interaction_state(state);
        Ok(())
    }

    // ── controllers ─────────────────────────────────────────────

    /// Drag-and-drop reordering over this grid.
    pub fn reorder(&mut self) -> ReorderController<'_> {
        ReorderController::new(self)
    }

    /// Edge-handle resizing over this grid.
    pub fn resize(&mut self) -> ResizeController<'_> {
        ResizeController::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn order(grid: &GridModel) -> Vec<u32> {
        grid.ids().map(|id| id.0).collect()
    }

    #[test]
    fn find_by_id_reports_index() {
        let grid = GridModel::with_uniform(3, 4);
        let (item, index) = grid.find_by_id(ItemId(2)).unwrap();
        assert_eq!(item.id(), ItemId(2));
        assert_eq!(index, 1);
        assert_eq!(
            grid.find_by_id(ItemId(9)).unwrap_err(),
            GridError::NotFound { id: ItemId(9) }
        );
    }

    #[test]
    fn move_is_a_relocation_not_a_swap() {
        let mut grid = GridModel::with_uniform(5, 2);
        assert!(grid.move_item(ItemId(1), 3).unwrap());
        assert_eq!(order(&grid), [2, 3, 4, 1, 5]);

        assert!(grid.move_item(ItemId(5), 0).unwrap());
        assert_eq!(order(&grid), [5, 2, 3, 4, 1]);
    }

    #[test]
    fn move_clamps_target_and_is_idempotent() {
        let mut grid = GridModel::with_uniform(3, 4);
        assert!(grid.move_item(ItemId(1), 99).unwrap());
        assert_eq!(order(&grid), [2, 3, 1]);
        assert!(!grid.move_item(ItemId(1), 99).unwrap());
        assert!(!grid.move_item(ItemId(1), 2).unwrap());
        assert_eq!(order(&grid), [2, 3, 1]);
    }

    #[test]
    fn move_unknown_id_fails() {
        let mut grid = GridModel::with_uniform(2, 6);
        assert!(grid.move_item(ItemId(3), 0).unwrap_err().is_stale());
        assert!(GridModel::new().move_item(ItemId(1), 0).is_err());
    }

    #[test]
    fn set_column_span_clamps_and_rounds() {
        let mut grid = GridModel::with_uniform(1, 4);
        let id = ItemId(1);
        assert_eq!(grid.set_column_span(id, -5.0).unwrap(), 1);
        assert_eq!(grid.set_column_span(id, 999.0).unwrap(), 12);
        assert_eq!(grid.set_column_span(id, 6.5).unwrap(), 7);
        assert_eq!(grid.get(id).unwrap().column_span(), 7);
    }

    #[test]
    fn nan_span_is_rejected_without_change() {
        let mut grid = GridModel::with_uniform(1, 4);
        let err = grid.set_column_span(ItemId(1), f64::NAN).unwrap_err();
        assert!(matches!(err, GridError::InvalidArgument { .. }));
        assert_eq!(grid.items()[0].column_span(), 4);
    }

    #[test]
    fn set_column_span_keeps_order() {
        let mut grid = GridModel::with_uniform(3, 4);
        grid.set_column_span(ItemId(2), 10.0).unwrap();
        assert_eq!(order(&grid), [1, 2, 3]);
    }

    #[test]
    fn set_interaction_state_overwrites() {
        let mut grid = GridModel::with_uniform(2, 6);
        grid.set_interaction_state(ItemId(2), InteractionState::Resizing)
            .unwrap();
        assert_eq!(
            grid.get(ItemId(2)).unwrap().interaction_state(),
            InteractionState::Resizing
        );
        assert!(grid
            .set_interaction_state(ItemId(5), InteractionState::Idle)
            .is_err());
    }

    #[test]
    fn push_rejects_duplicates() {
        let mut grid = GridModel::new();
        grid.push_item(ItemId(4), 3).unwrap();
        assert_eq!(
            grid.push_item(ItemId(4), 5).unwrap_err(),
            GridError::DuplicateId { id: ItemId(4) }
        );
        assert_eq!(grid.len(), 1);
    }

    proptest! {
        #[test]
        fn move_preserves_ids_and_length(
            count in 1u32..16,
            picks in prop::collection::vec((0u32..16, 0usize..20), 1..32),
        ) {
            let mut grid = GridModel::with_uniform(count, 3);
            for (raw_id, target) in picks {
                let id = ItemId(raw_id % count + 1);
                grid.move_item(id, target).unwrap();

                let mut ids = order(&grid);
                prop_assert_eq!(ids.len(), count as usize);
                ids.sort_unstable();
                prop_assert_eq!(ids, (1..=count).collect::<Vec<_>>());
                prop_assert_eq!(grid.index_of(id), Some((target).min(count as usize - 1)));
            }
        }

        #[test]
        fn span_is_always_in_range(value in prop::num::f64::ANY) {
            let mut grid = GridModel::with_uniform(1, 4);
            match grid.set_column_span(ItemId(1), value) {
                Ok(span) => prop_assert!((1..=12).contains(&span)),
                Err(_) => prop_assert!(value.is_nan()),
            }
            let span = grid.items()[0].column_span();
            prop_assert!((1..=12).contains(&span));
        }
    }
}
