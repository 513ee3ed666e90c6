//! Hands and scoring.

use std::collections::BTreeSet;

use crate::card::Card;

/// The highest total a hand may reach without busting.
pub const BLACKJACK: u8 = 21;

const ACE_HIGH: u8 = 11;
const ACE_LOW: u8 = 1;

/// The cards dealt to one side of the table.
///
/// Besides the cards, a hand tracks every total it can reach when each Ace
/// is counted as either 1 or 11, keeping only totals of 21 or less. An empty
/// set of totals means the hand is bust.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    /// Cards in the hand, in the order they were dealt.
    cards: Vec<Card>,
    /// Achievable totals not above 21.
    totals: BTreeSet<u8>,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            totals: BTreeSet::from([0]),
        }
    }

    /// Adds a card to the hand and recomputes its totals.
    ///
    /// # Example
    ///
    /// ```
    /// use bjbot::{Card, Hand, Rank};
    ///
    /// let mut hand = Hand::new();
    /// hand.add_card(Card::new(Rank::Ace));
    /// hand.add_card(Card::new(Rank::King));
    /// assert!(hand.has_blackjack());
    /// assert_eq!(hand.totals().copied().collect::<Vec<_>>(), [11, 21]);
    /// ```
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);

        let candidates: Vec<u8> = match card.rank.fixed_value() {
            Some(value) => self.totals.iter().map(|t| t + value).collect(),
            None => self
                .totals
                .iter()
                .flat_map(|t| [t + ACE_HIGH, t + ACE_LOW])
                .collect(),
        };

        self.totals = candidates.into_iter().filter(|t| *t <= BLACKJACK).collect();
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the achievable totals in ascending order.
    pub fn totals(&self) -> impl Iterator<Item = &u8> {
        self.totals.iter()
    }

    /// Returns whether no total of 21 or less remains.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.totals.is_empty()
    }

    /// Returns whether the hand can count exactly 21.
    #[must_use]
    pub fn has_blackjack(&self) -> bool {
        self.totals.contains(&BLACKJACK)
    }

    /// Returns the highest achievable total, or `None` if the hand is bust.
    #[must_use]
    pub fn best_total(&self) -> Option<u8> {
        self.totals.last().copied()
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Clears the hand for a new game.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.totals = BTreeSet::from([0]);
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}
