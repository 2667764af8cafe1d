//! Grid items and the per-item interaction state machine.
//!
//! A [`GridItem`] carries its column span plus an [`InteractionState`] and an
//! optional [`Session`].  The session replaces the "remember where the gesture
//! started" values a callback-based UI would capture in closures: it is
//! created when a drag or resize begins and dropped when it ends.

use std::fmt;

// ───────────────────────────────────────── constants ─────────

/// Total number of columns in one grid row.
pub const GRID_COLUMNS: u8 = 12;
/// Narrowest span an item can have.
pub const MIN_SPAN: u8 = 1;
/// Widest span an item can have.
pub const MAX_SPAN: u8 = GRID_COLUMNS;

// ───────────────────────────────────────── id ────────────────

/// Stable identifier of a grid item.  Never reused while the item exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ───────────────────────────────────────── state ─────────────

/// Which gesture, if any, currently owns an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging,
    Resizing,
}

impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::Resizing => "resizing",
        })
    }
}

/// Values captured when a gesture starts and reused until it ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Session {
    Drag {
        /// Index the item occupied before the drag began.
        original_index: usize,
    },
    Resize {
        start_pointer_x: f64,
        start_width: f64,
        /// Reference width representing all 12 columns.
        container_width: f64,
    },
}

// ───────────────────────────────────────── item ──────────────

/// One entry of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridItem {
    id: ItemId,
    column_span: u8,
    interaction_state: InteractionState,
    session: Option<Session>,
}

impl GridItem {
    /// Create an idle item.  `column_span` is clamped to `[1, 12]`.
    pub fn new(id: ItemId, column_span: u8) -> Self {
        Self {
            id,
            column_span: column_span.clamp(MIN_SPAN, MAX_SPAN),
            interaction_state: InteractionState::Idle,
            session: None,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn column_span(&self) -> u8 {
        self.column_span
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.interaction_state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.interaction_state == InteractionState::Idle
    }

    pub(crate) fn set_column_span(&mut self, span: u8) {
        self.column_span = span.clamp(MIN_SPAN, MAX_SPAN);
    }

    pub(crate) fn set_interaction_state(&mut self, state: InteractionState) {
        self.interaction_state = state;
    }

    pub(crate) fn set_session(&mut self, session: Option<Session>) {
        self.session = session;
    }
}

/// Round a real-valued span to the nearest whole column and clamp it to
/// `[1, 12]`.  Halves round away from zero, so `6.5` becomes `7`.
///
/// Returns `None` for `NaN`.  Infinities clamp to the nearest bound.
pub fn quantize_span(value: f64) -> Option<u8> {
    if value.is_nan() {
        return None;
    }
    let span = value.round().clamp(f64::from(MIN_SPAN), f64::from(MAX_SPAN));
    Some(span as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_is_idle_and_clamped() {
        let item = GridItem::new(ItemId(1), 40);
        assert_eq!(item.column_span(), 12);
        assert!(item.is_idle());
        assert!(item.session().is_none());

        assert_eq!(GridItem::new(ItemId(2), 0).column_span(), 1);
    }

    #[test]
    fn quantize_rounds_half_up_and_clamps() {
        assert_eq!(quantize_span(6.5), Some(7));
        assert_eq!(quantize_span(6.49), Some(6));
        assert_eq!(quantize_span(-5.0), Some(1));
        assert_eq!(quantize_span(999.0), Some(12));
        assert_eq!(quantize_span(0.4), Some(1));
        assert_eq!(quantize_span(f64::INFINITY), Some(12));
        assert_eq!(quantize_span(f64::NEG_INFINITY), Some(1));
        assert_eq!(quantize_span(f64::NAN), None);
    }

    #[test]
    fn state_display_is_lowercase() {
        assert_eq!(InteractionState::Resizing.to_string(), "resizing");
        assert_eq!(ItemId(7).to_string(), "7");
    }
}
