use crate::error::{DeckError, StartError, TransitionError};
use crate::presenter::{PlayerId, Presenter};
use crate::router::Control;

use super::{GameSession, GameState, Outcome, Side};

impl<P: Presenter> GameSession<P> {
    /// Starts a game for `actor`.
    ///
    /// This is the entry point for the command layer. A new game may start
    /// when the table is idle; a finished game may be restarted by its own
    /// player. The call returns once the initial deal is complete.
    ///
    /// # Errors
    ///
    /// Returns [`StartError::AlreadyInProgress`] while another game is
    /// running, and [`StartError::Surface`] if the game surface could not be
    /// created (the session stays idle).
    pub async fn request_start(&mut self, actor: PlayerId) -> Result<(), StartError> {
        match self.state {
            GameState::Idle => {}
            GameState::Over if self.player == Some(actor) => {}
            GameState::Dealing | GameState::Waiting | GameState::Over => {
                return Err(StartError::AlreadyInProgress);
            }
        }

        self.start(actor).await
    }

    /// Restarts a finished game with the same player and surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not over.
    pub async fn restart(&mut self) -> Result<(), TransitionError> {
        let player = match (self.state, self.player) {
            (GameState::Over, Some(player)) => player,
            (state, _) => {
                return Err(TransitionError::InvalidState {
                    control: Control::Restart,
                    state,
                });
            }
        };

        // The surface already exists, so starting cannot fail.
        if let Err(err) = self.start(player).await {
            log::warn!("restart failed: {err}");
        }
        Ok(())
    }

    async fn start(&mut self, player: PlayerId) -> Result<(), StartError> {
        self.player = Some(player);
        self.deck.reset();
        self.player_hand.clear();
        self.dealer_hand.clear();
        self.outcome = None;
        self.state = GameState::Dealing;

        if self.surface.is_none() {
            let view = self.snapshot();
            match self.presenter.render_surface(&view).await {
                Ok(surface) => self.surface = Some(surface),
                Err(err) => {
                    self.player = None;
                    self.state = GameState::Idle;
                    return Err(err.into());
                }
            }
        } else {
            self.render().await;
        }
        self.offer(GameState::Dealing.controls()).await;
        log::info!("{player} started a blackjack game");

        if let Err(err) = self.initial_deal().await {
            self.abort(err).await;
        }
        Ok(())
    }

    /// Deals player, player, dealer, then checks for a natural.
    async fn initial_deal(&mut self) -> Result<(), DeckError> {
        self.deal_to(Side::Player).await?;
        self.deal_to(Side::Player).await?;
        self.deal_to(Side::Dealer).await?;

        if self.player_hand.has_blackjack() {
            self.finish(Outcome::Win).await;
        } else {
            self.state = GameState::Waiting;
            self.render().await;
        }
        Ok(())
    }
}
