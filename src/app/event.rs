//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  Events
//! are forwarded one by one in arrival order; the grid handler relies on that.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Translate a raw crossterm event.  Key releases and bare pointer motion
/// carry nothing the grid reacts to and are dropped here.
fn translate(ev: CtEvent) -> Option<AppEvent> {
    match ev {
        CtEvent::Key(k) if k.kind == KeyEventKind::Press => Some(AppEvent::Key(k)),
        CtEvent::Mouse(m) if m.kind != MouseEventKind::Moved => Some(AppEvent::Mouse(m)),
        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.  The task exits once the receiver is dropped.
pub fn spawn_event_reader(poll_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            // Poll with a timeout so a dropped receiver is noticed promptly.
            if !event::poll(poll_interval).unwrap_or(false) {
                continue;
            }
            match event::read() {
                Ok(ev) => {
                    if let Some(app_event) = translate(ev) {
                        if tx.send(app_event).is_err() {
                            break;
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!(%err, "failed to read terminal event");
                    break;
                }
            }
        }
    });

    rx
}
