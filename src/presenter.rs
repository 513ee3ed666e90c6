//! The presentation seam implemented by the chat transport.

use core::fmt;

use async_trait::async_trait;

use crate::card::Card;
use crate::error::SurfaceError;
use crate::game::{GameState, Outcome};
use crate::router::Control;

/// Identity of a chat user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

/// Identity of a rendered game surface (for example a chat message).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// A read-only picture of a session, handed to the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    /// Current state.
    pub state: GameState,
    /// The registered player, if any.
    pub player: Option<PlayerId>,
    /// The player's cards in deal order.
    pub player_cards: Vec<Card>,
    /// The dealer's cards in deal order.
    pub dealer_cards: Vec<Card>,
    /// The player's achievable totals, ascending.
    pub player_totals: Vec<u8>,
    /// The dealer's achievable totals, ascending.
    pub dealer_totals: Vec<u8>,
    /// Outcome of the last finished game.
    pub outcome: Option<Outcome>,
    /// Cards left in the deck.
    pub cards_remaining: usize,
}

/// Renders sessions and collects player input on behalf of the engine.
///
/// The engine calls these methods while it holds the session, so an
/// implementation must not call back into the same table.
#[async_trait]
pub trait Presenter: Send {
    /// Creates the surface showing a new game.
    async fn render_surface(&mut self, view: &GameView) -> Result<SurfaceId, SurfaceError>;

    /// Redraws the surface after the session changed.
    async fn update_surface(
        &mut self,
        surface: SurfaceId,
        view: &GameView,
    ) -> Result<(), SurfaceError>;

    /// Declares which controls the player may use on the surface.
    async fn set_controls(
        &mut self,
        surface: SurfaceId,
        controls: &[Control],
    ) -> Result<(), SurfaceError>;

    /// Signals that an input from `actor` had no effect.
    async fn notify_input_rejected(
        &mut self,
        surface: SurfaceId,
        actor: PlayerId,
    ) -> Result<(), SurfaceError>;

    /// Replaces the game with a closing notice. `view` shows the session as
    /// it was just before it was cleared.
    async fn close_surface(
        &mut self,
        surface: SurfaceId,
        view: &GameView,
        outcome: Outcome,
    ) -> Result<(), SurfaceError>;
}
