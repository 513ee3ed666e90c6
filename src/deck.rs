//! The pool of undealt cards.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{COPIES_PER_RANK, Card, DECK_SIZE, Rank};
use crate::error::DeckError;

/// The undealt cards of the current game.
///
/// The pool is shuffled on every [`reset`](Deck::reset) and cards are taken
/// from the top, so each draw is uniform over the cards that remain.
#[derive(Debug, Clone)]
pub struct Deck {
    /// Remaining cards; the top of the deck is the end of the vector.
    cards: Vec<Card>,
    /// Cards moved to the top on the next reset, in draw order.
    arranged: Vec<Card>,
    /// Random number generator.
    rng: ChaCha8Rng,
}

impl Deck {
    /// Creates a full, shuffled deck from the given seed.
    ///
    /// # Example
    ///
    /// ```
    /// use bjbot::{DECK_SIZE, Deck};
    ///
    /// let deck = Deck::new(7);
    /// assert_eq!(deck.remaining(), DECK_SIZE);
    /// ```
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(DECK_SIZE),
            arranged: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        deck.reset();
        deck
    }

    /// Creates a full deck seeded from the thread-local generator.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Refills the deck with four copies of every rank and shuffles it.
    ///
    /// Cards registered with [`prearrange`](Deck::prearrange) are placed on
    /// top afterwards and the arrangement is consumed.
    pub fn reset(&mut self) {
        self.cards.clear();
        for rank in Rank::ALL {
            for _ in 0..COPIES_PER_RANK {
                self.cards.push(Card::new(rank));
            }
        }
        self.cards.shuffle(&mut self.rng);

        let arranged = core::mem::take(&mut self.arranged);
        let mut top = Vec::with_capacity(arranged.len());
        for card in arranged {
            // A fifth copy of a rank cannot be honored.
            if let Some(pos) = self.cards.iter().position(|c| *c == card) {
                top.push(self.cards.remove(pos));
            }
        }
        self.cards.extend(top.into_iter().rev());
    }

    /// Arranges the next game: after the next [`reset`](Deck::reset), the
    /// given cards are drawn first, in order.
    ///
    /// The deck still holds exactly four copies of each rank.
    pub fn prearrange<I>(&mut self, cards: I)
    where
        I: IntoIterator,
        I::Item: Into<Card>,
    {
        self.arranged = cards.into_iter().map(Into::into).collect();
    }

    /// Removes and returns the top card.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Empty`] if no cards remain.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Empty)
    }

    /// Returns the number of undealt cards.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether every card has been dealt.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Counts the undealt cards of the given rank.
    #[must_use]
    pub fn count(&self, rank: Rank) -> usize {
        self.cards.iter().filter(|c| c.rank == rank).count()
    }
}
