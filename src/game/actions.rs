use crate::error::TransitionError;
use crate::presenter::Presenter;
use crate::router::Control;

use super::{GameSession, GameState, Outcome, Side};

impl<P: Presenter> GameSession<P> {
    fn ensure_accepts(&self, control: Control) -> Result<(), TransitionError> {
        if self.state.accepts(control) {
            Ok(())
        } else {
            Err(TransitionError::InvalidState {
                control,
                state: self.state,
            })
        }
    }

    /// Player action: Hit (draw a card).
    ///
    /// A bust loses the game and a total of 21 wins it; otherwise the game
    /// keeps waiting for the player.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not waiting for the player.
    pub async fn hit(&mut self) -> Result<(), TransitionError> {
        self.ensure_accepts(Control::Hit)?;

        self.state = GameState::Dealing;
        self.render().await;

        if let Err(err) = self.deal_to(Side::Player).await {
            self.abort(err).await;
            return Ok(());
        }

        if self.player_hand.is_bust() {
            self.finish(Outcome::Loss).await;
        } else if self.player_hand.has_blackjack() {
            self.finish(Outcome::Win).await;
        } else {
            self.state = GameState::Waiting;
            self.render().await;
        }

        Ok(())
    }

    /// Player action: Stand (play out the dealer's hand).
    ///
    /// The dealer draws while below the player's best total. A dealer bust
    /// wins the game for the player; a dealer total that meets or beats the
    /// player's loses it, so ties go to the dealer.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not waiting for the player.
    pub async fn stand(&mut self) -> Result<(), TransitionError> {
        self.ensure_accepts(Control::Stand)?;

        self.state = GameState::Dealing;
        self.render().await;

        // Waiting implies the player is not bust.
        let target = self.player_hand.best_total().unwrap_or_default();

        while self
            .dealer_hand
            .best_total()
            .is_some_and(|total| total < target)
        {
            if let Err(err) = self.deal_to(Side::Dealer).await {
                self.abort(err).await;
                return Ok(());
            }
        }

        let outcome = if self.dealer_hand.is_bust() {
            Outcome::Win
        } else {
            Outcome::Loss
        };
        self.finish(outcome).await;

        Ok(())
    }

    /// Player action: Cancel (stop the game and return to idle).
    ///
    /// # Errors
    ///
    /// Returns an error if no game is running.
    pub async fn cancel(&mut self) -> Result<(), TransitionError> {
        self.ensure_accepts(Control::Cancel)?;
        self.close(Outcome::Cancelled).await;
        Ok(())
    }

    /// Stops a game that received no input for too long.
    ///
    /// Returns `false` if no game was running.
    pub async fn expire(&mut self) -> bool {
        if !self.state.is_active() {
            return false;
        }
        self.close(Outcome::TimedOut).await;
        true
    }
}
