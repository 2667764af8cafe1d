//! Error taxonomy for the interaction core.

use thiserror::Error;

use super::item::{InteractionState, ItemId};

pub type Result<T> = std::result::Result<T, GridError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// The id is not in the grid. Usually a late event after cancellation.
    #[error("no grid item with id {id}")]
    NotFound { id: ItemId },

    /// The item is in an interaction state that forbids `operation`.
    #[error("cannot {operation} item {id} while it is {state}")]
    InvalidState {
        id: ItemId,
        state: InteractionState,
        operation: &'static str,
    },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("duplicate grid item id {id}")]
    DuplicateId { id: ItemId },
}

impl GridError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// `true` for errors that only mean the event referred to an item that
    /// no longer exists. Event-source integrations drop these silently.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
