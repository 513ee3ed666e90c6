//! Routing of reaction events to game transitions.

use crate::error::TransitionError;
use crate::game::GameSession;
use crate::presenter::{PlayerId, Presenter, SurfaceId};

/// A player input on a game surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Draw another card.
    Hit,
    /// Let the dealer play.
    Stand,
    /// Stop the game.
    Cancel,
    /// Play again after a finished game.
    Restart,
    /// Any input that is not a table control.
    Unknown,
}

impl Control {
    /// Maps a transport symbol to a control.
    ///
    /// Accepts the button ids used by the bot (`blackjack_hit`, ...), plain
    /// names in any case, and the button emoji.
    ///
    /// # Example
    ///
    /// ```
    /// use bjbot::Control;
    ///
    /// assert_eq!(Control::from_symbol("blackjack_stand"), Control::Stand);
    /// assert_eq!(Control::from_symbol("Hit"), Control::Hit);
    /// assert_eq!(Control::from_symbol("🔁"), Control::Restart);
    /// assert_eq!(Control::from_symbol("👍"), Control::Unknown);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Self {
        let symbol = symbol.trim();
        let name = symbol.strip_prefix("blackjack_").unwrap_or(symbol);

        match name.to_ascii_lowercase().as_str() {
            "hit" | "▶" | "▶\u{fe0f}" => Self::Hit,
            "stand" | "⏸" | "⏸\u{fe0f}" => Self::Stand,
            "cancel" | "exit" | "❌" => Self::Cancel,
            "restart" | "play_again" | "🔁" => Self::Restart,
            _ => Self::Unknown,
        }
    }

    /// Returns whether this is one of the four table controls.
    #[must_use]
    pub const fn is_recognized(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// A reaction delivered by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReactionEvent {
    /// The surface the reaction was placed on.
    pub surface: SurfaceId,
    /// The user who reacted.
    pub actor: PlayerId,
    /// The decoded input.
    pub control: Control,
}

impl ReactionEvent {
    /// Creates a new event.
    #[must_use]
    pub const fn new(surface: SurfaceId, actor: PlayerId, control: Control) -> Self {
        Self {
            surface,
            actor,
            control,
        }
    }
}

/// What the router did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The event targets another surface and was ignored.
    NotThisSurface,
    /// The event comes from someone other than the player and was ignored.
    NotThisPlayer,
    /// The event was applied to the game.
    Applied,
    /// The player's input had no effect; the transport was told so.
    Rejected(TransitionError),
}

impl<P: Presenter> GameSession<P> {
    /// Routes a reaction to the matching transition.
    ///
    /// Events for other surfaces or from other users are ignored without
    /// touching the session. Inputs from the player that the current state
    /// does not accept are reported through
    /// [`Presenter::notify_input_rejected`].
    pub async fn route(&mut self, event: ReactionEvent) -> RouteOutcome {
        let Some(surface) = self.surface().filter(|s| *s == event.surface) else {
            return RouteOutcome::NotThisSurface;
        };
        if self.player() != Some(event.actor) {
            log::debug!("ignoring {:?} from {} on {surface}", event.control, event.actor);
            return RouteOutcome::NotThisPlayer;
        }

        let result = match event.control {
            Control::Hit => self.hit().await,
            Control::Stand => self.stand().await,
            Control::Cancel => self.cancel().await,
            Control::Restart => self.restart().await,
            Control::Unknown => Err(TransitionError::UnrecognizedControl),
        };

        match result {
            Ok(()) => RouteOutcome::Applied,
            Err(err) => {
                log::debug!("rejecting input from {} on {surface}: {err}", event.actor);
                if let Err(notify_err) = self
                    .presenter_mut()
                    .notify_input_rejected(surface, event.actor)
                    .await
                {
                    log::warn!("failed to reject input on {surface}: {notify_err}");
                }
                RouteOutcome::Rejected(err)
            }
        }
    }
}
