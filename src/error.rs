//! Error types for table operations.

use thiserror::Error;

use crate::game::GameState;
use crate::router::Control;

/// Errors that can occur while drawing from the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// No cards left in the deck.
    #[error("no cards left in the deck")]
    Empty,
}

/// Errors returned when a game cannot be started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartError {
    /// Another game is in progress.
    #[error("a game is already in progress")]
    AlreadyInProgress,
    /// The game surface could not be created.
    #[error("could not create the game surface: {0}")]
    Surface(#[from] SurfaceError),
    /// The table is no longer running.
    #[error("table is closed")]
    TableClosed,
}

/// Errors for inputs that have no effect in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The control is not accepted in this state.
    #[error("{control:?} is not accepted while {state:?}")]
    InvalidState {
        /// The control that was sent.
        control: Control,
        /// The state the game was in.
        state: GameState,
    },
    /// The input is not one of the table controls.
    #[error("unrecognized control")]
    UnrecognizedControl,
}

/// A failure reported by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SurfaceError(pub String);

impl SurfaceError {
    /// Creates a surface error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors that can occur when talking to a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// The table task has stopped.
    #[error("table is closed")]
    Closed,
}

/// Error returned when parsing an unknown rank symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown card rank")]
pub struct ParseRankError;
