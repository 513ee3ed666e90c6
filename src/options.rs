//! Table configuration options.

use core::time::Duration;

/// Default pause between two dealt cards.
pub const DEFAULT_DEAL_DELAY: Duration = Duration::from_millis(250);

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use std::time::Duration;
///
/// use bjbot::TableOptions;
///
/// let options = TableOptions::default()
///     .with_deal_delay(Duration::from_millis(100))
///     .with_idle_timeout(Some(Duration::from_secs(15)))
///     .with_seed(Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Pause after every dealt card so observers see cards appear one by one.
    pub deal_delay: Duration,
    /// Ends a game that receives no accepted input for this long.
    /// `None` keeps games open indefinitely.
    pub idle_timeout: Option<Duration>,
    /// Seed for the deck shuffle. `None` draws a seed from the thread RNG.
    pub seed: Option<u64>,
    /// Capacity of the table inbox.
    pub inbox_capacity: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            deal_delay: DEFAULT_DEAL_DELAY,
            idle_timeout: None,
            seed: None,
            inbox_capacity: 32,
        }
    }
}

impl TableOptions {
    /// Sets the pause between dealt cards.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use bjbot::TableOptions;
    ///
    /// let options = TableOptions::default().with_deal_delay(Duration::ZERO);
    /// assert_eq!(options.deal_delay, Duration::ZERO);
    /// ```
    #[must_use]
    pub const fn with_deal_delay(mut self, delay: Duration) -> Self {
        self.deal_delay = delay;
        self
    }

    /// Sets the inactivity timeout.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use bjbot::TableOptions;
    ///
    /// let options = TableOptions::default().with_idle_timeout(Some(Duration::from_secs(15)));
    /// assert_eq!(options.idle_timeout, Some(Duration::from_secs(15)));
    /// ```
    #[must_use]
    pub const fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Sets the shuffle seed.
    ///
    /// # Example
    ///
    /// ```
    /// use bjbot::TableOptions;
    ///
    /// let options = TableOptions::default().with_seed(Some(7));
    /// assert_eq!(options.seed, Some(7));
    /// ```
    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the inbox capacity. Values below 1 are raised to 1.
    ///
    /// # Example
    ///
    /// ```
    /// use bjbot::TableOptions;
    ///
    /// let options = TableOptions::default().with_inbox_capacity(8);
    /// assert_eq!(options.inbox_capacity, 8);
    /// ```
    #[must_use]
    pub const fn with_inbox_capacity(mut self, capacity: usize) -> Self {
        self.inbox_capacity = if capacity == 0 { 1 } else { capacity };
        self
    }
}
