//! Game state types.

use crate::router::Control;

/// Game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// No game is running.
    #[default]
    Idle,
    /// Cards are being dealt; player input is not accepted.
    Dealing,
    /// Waiting for the player to hit or stand.
    Waiting,
    /// The game has ended and may be restarted.
    Over,
}

impl GameState {
    /// Returns whether a game is running or waiting for a restart.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Returns whether the control is accepted in this state.
    #[must_use]
    pub const fn accepts(self, control: Control) -> bool {
        match control {
            Control::Hit | Control::Stand => matches!(self, Self::Waiting),
            Control::Restart => matches!(self, Self::Over),
            Control::Cancel => self.is_active(),
            Control::Unknown => false,
        }
    }

    /// Controls offered to the player in this state.
    #[must_use]
    pub const fn controls(self) -> &'static [Control] {
        match self {
            Self::Idle => &[],
            Self::Dealing | Self::Waiting => &[Control::Hit, Control::Stand, Control::Cancel],
            Self::Over => &[Control::Restart, Control::Cancel],
        }
    }
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The player won (blackjack or dealer bust).
    Win,
    /// The player lost (bust, or the dealer met or beat the player).
    Loss,
    /// The player stopped the game.
    Cancelled,
    /// The game was stopped after an engine error.
    Aborted,
    /// The game was stopped after a period without input.
    TimedOut,
}

/// The side of the table receiving a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Player,
    Dealer,
}
