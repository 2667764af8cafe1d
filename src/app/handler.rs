//! Input handling: maps key/mouse events onto the grid controllers.
//!
//! This is the event source the core expects: every pointer or key event
//! becomes at most one controller call, applied before the next event is
//! read.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::config::Action;
use crate::core::{GridError, ItemId, GRID_COLUMNS};
use crate::ui::grid_widget::HitZone;

use super::state::{AppState, Gesture};

/// Route a controller result.  Stale ids are dropped quietly, contract
/// violations are logged and shown on the status bar.
fn report<T>(state: &mut AppState, result: Result<T, GridError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) if err.is_stale() => {
            tracing::debug!(%err, "ignoring stale grid event");
            None
        }
        Err(err) => {
            tracing::warn!(%err, "grid interaction rejected");
            state.status_message = Some(err.to_string());
            None
        }
    }
}

// ── Keyboard ────────────────────────────────────────────────────

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;

    match action {
        Action::Quit => state.should_quit = true,
        Action::Cancel => {
            if let Some(gesture) = state.gesture.take() {
                end_gesture(state, gesture, false);
            }
        }
        Action::SelectPrev => select_relative(state, -1),
        Action::SelectNext => select_relative(state, 1),
        Action::MoveLeft => move_selected(state, -1),
        Action::MoveRight => move_selected(state, 1),
        Action::Widen => resize_selected(state, 1.0),
        Action::Narrow => resize_selected(state, -1.0),
    }
}

fn select_relative(state: &mut AppState, step: isize) {
    let len = state.grid.len();
    if len == 0 {
        return;
    }
    let current = state
        .selected
        .and_then(|id| state.grid.index_of(id))
        .unwrap_or(0);
    let next = current.saturating_add_signed(step).min(len - 1);
    state.selected = Some(state.grid.items()[next].id());
}

/// Keyboard reorder: a one-hover drag session onto the neighbour.
fn move_selected(state: &mut AppState, step: isize) {
    let Some(id) = state.selected else {
        return;
    };
    let Some(index) = state.grid.index_of(id) else {
        return;
    };
    let Some(neighbour) = index
        .checked_add_signed(step)
        .and_then(|i| state.grid.items().get(i))
        .map(|item| item.id())
    else {
        return;
    };

    let started = state.grid.reorder().on_drag_start(id);
    if report(state, started).is_none() {
        return;
    }
    let hovered = state.grid.reorder().on_hover(id, neighbour);
    let committed = report(state, hovered).is_some();
    let ended = state.grid.reorder().on_drag_end(id, committed);
    report(state, ended);
}

/// Keyboard resize: a one-sample resize session where each column is one
/// unit wide.
fn resize_selected(state: &mut AppState, columns: f64) {
    let Some(id) = state.selected else {
        return;
    };
    let Some(span) = state.grid.get(id).map(|item| f64::from(item.column_span())) else {
        return;
    };

    let started = state.grid.resize().on_resize_start(id, 0.0, span, f64::from(GRID_COLUMNS));
    if report(state, started).is_none() {
        return;
    }
    let moved = state.grid.resize().on_resize_move(id, columns);
    report(state, moved);
    let ended = state.grid.resize().on_resize_end(id);
    report(state, ended);
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let geometry = state.layout().grid_geometry(&state.grid);
    let hit = geometry.hit(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // A release outside the terminal never reaches us; a new press
            // ends whatever gesture was still open.  `hit` stays resolved
            // against the layout on screen, so the press grabs the item the
            // user clicked even if the cancel moves it.  Rollback never
            // changes spans, so the cell's width is still current.
            if let Some(gesture) = state.gesture.take() {
                end_gesture(state, gesture, false);
            }
            let Some((cell, zone)) = hit else {
                return;
            };
            state.selected = Some(cell.id);
            state.status_message = None;

            match zone {
                HitZone::Handle => {
                    let started = state.grid.resize().on_resize_start(
                        cell.id,
                        f64::from(mouse.column),
                        f64::from(cell.rect.width),
                        f64::from(geometry.container_width()),
                    );
                    if report(state, started).is_some() {
                        state.gesture = Some(Gesture::Resize(cell.id));
                    }
                }
                HitZone::Body => {
                    let started = state.grid.reorder().on_drag_start(cell.id);
                    if report(state, started).is_some() {
                        state.gesture = Some(Gesture::Drag(cell.id));
                    }
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => match state.gesture {
            Some(Gesture::Drag(id)) => {
                if let Some((over, _)) = hit {
                    let hovered = state.grid.reorder().on_hover(id, over.id);
                    report(state, hovered);
                }
            }
            Some(Gesture::Resize(id)) => {
                let moved = state.grid.resize().on_resize_move(id, f64::from(mouse.column));
                report(state, moved);
            }
            None => {}
        },
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(gesture) = state.gesture.take() {
                // Only a release over an item counts as a drop.
                end_gesture(state, gesture, hit.is_some());
            }
        }
        _ => {}
    }
}

/// Close the session behind `gesture`.  `committed` only matters for drags;
/// resizes keep their last span either way.
fn end_gesture(state: &mut AppState, gesture: Gesture, committed: bool) {
    let result = match gesture {
        Gesture::Drag(id) => state.grid.reorder().on_drag_end(id, committed),
        Gesture::Resize(id) => state.grid.resize().on_resize_end(id),
    };
    report(state, result);
}

/// Status-bar text for the selected item.
pub fn selection_summary(state: &AppState) -> Option<String> {
    let id: ItemId = state.selected?;
    let (item, index) = state.grid.find_by_id(id).ok()?;
    Some(format!(
        "Item {id} · {}/{GRID_COLUMNS} · position {} of {}",
        item.column_span(),
        index + 1,
        state.grid.len()
    ))
}
