//! Game session and state management.

use core::time::Duration;

use crate::deck::Deck;
use crate::error::DeckError;
use crate::hand::Hand;
use crate::options::TableOptions;
use crate::presenter::{GameView, PlayerId, Presenter, SurfaceId};
use crate::router::Control;

mod actions;
mod deal;
pub mod state;

pub use state::{GameState, Outcome};
use state::Side;

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// A single blackjack game between one player and the dealer.
///
/// The session owns the deck, both hands, and the presenter that renders
/// them. Every transition takes `&mut self`, so transitions on one session
/// never overlap; pacing delays inside a transition hold the session.
pub struct GameSession<P> {
    /// Current game state.
    state: GameState,
    /// The registered player.
    player: Option<PlayerId>,
    /// The player's hand.
    player_hand: Hand,
    /// The dealer's hand.
    dealer_hand: Hand,
    /// Undealt cards.
    deck: Deck,
    /// The surface the game is rendered on.
    surface: Option<SurfaceId>,
    /// Outcome of the last finished game.
    outcome: Option<Outcome>,
    /// Table options.
    options: TableOptions,
    /// Presentation layer.
    presenter: P,
}

impl<P: Presenter> GameSession<P> {
    /// Creates an idle session.
    ///
    /// The deck is seeded from [`TableOptions::seed`], or from the thread
    /// RNG when no seed is set.
    #[must_use]
    pub fn new(options: TableOptions, presenter: P) -> Self {
        let deck = options.seed.map_or_else(Deck::from_entropy, Deck::new);

        Self {
            state: GameState::Idle,
            player: None,
            player_hand: Hand::new(),
            dealer_hand: Hand::new(),
            deck,
            surface: None,
            outcome: None,
            options,
            presenter,
        }
    }

    /// Returns the current game state.
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Returns the registered player.
    pub const fn player(&self) -> Option<PlayerId> {
        self.player
    }

    /// Returns the player's hand.
    pub const fn player_hand(&self) -> &Hand {
        &self.player_hand
    }

    /// Returns the dealer's hand.
    pub const fn dealer_hand(&self) -> &Hand {
        &self.dealer_hand
    }

    /// Returns the deck.
    pub const fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Returns the deck mutably, e.g. to [`prearrange`](Deck::prearrange)
    /// the next game.
    pub const fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    /// Returns the surface of the current game.
    pub const fn surface(&self) -> Option<SurfaceId> {
        self.surface
    }

    /// Returns how the last game ended.
    ///
    /// `None` while a game is being played.
    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns the table options.
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Returns the presenter.
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Returns the presenter mutably.
    pub const fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Returns a read-only view of the session.
    pub fn snapshot(&self) -> GameView {
        GameView {
            state: self.state,
            player: self.player,
            player_cards: self.player_hand.cards().to_vec(),
            dealer_cards: self.dealer_hand.cards().to_vec(),
            player_totals: self.player_hand.totals().copied().collect(),
            dealer_totals: self.dealer_hand.totals().copied().collect(),
            outcome: self.outcome,
            cards_remaining: self.deck.remaining(),
        }
    }

    /// Draws a card for one side, waits the deal delay, then renders.
    async fn deal_to(&mut self, side: Side) -> Result<(), DeckError> {
        let card = self.deck.draw()?;
        match side {
            Side::Player => self.player_hand.add_card(card),
            Side::Dealer => self.dealer_hand.add_card(card),
        }
        log::debug!("dealt {card} to {side:?}");

        pause(self.options.deal_delay).await;
        self.render().await;
        Ok(())
    }

    async fn render(&mut self) {
        let Some(surface) = self.surface else {
            return;
        };
        let view = self.snapshot();
        if let Err(err) = self.presenter.update_surface(surface, &view).await {
            log::warn!("failed to update {surface}: {err}");
        }
    }

    async fn offer(&mut self, controls: &[Control]) {
        let Some(surface) = self.surface else {
            return;
        };
        if let Err(err) = self.presenter.set_controls(surface, controls).await {
            log::warn!("failed to set controls on {surface}: {err}");
        }
    }

    /// Ends the game with a decided outcome and offers a restart.
    async fn finish(&mut self, outcome: Outcome) {
        if let Some(player) = self.player {
            log::info!("{player} finished a blackjack game: {outcome:?}");
        }
        self.state = GameState::Over;
        self.outcome = Some(outcome);
        self.render().await;
        self.offer(GameState::Over.controls()).await;
    }

    /// Returns the session to idle and shows the closing notice.
    async fn close(&mut self, outcome: Outcome) {
        let view = self.snapshot();
        let surface = self.surface.take();

        if let Some(player) = self.player.take() {
            log::info!("{player} left the blackjack table: {outcome:?}");
        }
        self.player_hand.clear();
        self.dealer_hand.clear();
        self.state = GameState::Idle;
        self.outcome = Some(outcome);

        if let Some(surface) = surface {
            if let Err(err) = self.presenter.set_controls(surface, &[]).await {
                log::warn!("failed to clear controls on {surface}: {err}");
            }
            if let Err(err) = self.presenter.close_surface(surface, &view, outcome).await {
                log::warn!("failed to close {surface}: {err}");
            }
        }
    }

    /// Stops the game after a deck error.
    async fn abort(&mut self, err: DeckError) {
        log::warn!("aborting blackjack game: {err}");
        self.close(Outcome::Aborted).await;
    }
}
