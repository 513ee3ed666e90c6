//! A reaction-driven blackjack table for chat bots.
//!
//! The crate provides a [`GameSession`] state machine that deals a game of
//! blackjack between one player and the dealer, and a [`TableActor`] that
//! feeds it reaction events one at a time. Rendering and input collection
//! belong to the chat transport, which implements [`Presenter`].
//!
//! # Example
//!
//! ```no_run
//! use bjbot::{Control, PlayerId, ReactionEvent, TableActor, TableOptions};
//! # use bjbot::{GameView, Outcome, Presenter, SurfaceError, SurfaceId};
//! # struct Chat;
//! # #[async_trait::async_trait]
//! # impl Presenter for Chat {
//! #     async fn render_surface(&mut self, _: &GameView) -> Result<SurfaceId, SurfaceError> { Ok(SurfaceId(1)) }
//! #     async fn update_surface(&mut self, _: SurfaceId, _: &GameView) -> Result<(), SurfaceError> { Ok(()) }
//! #     async fn set_controls(&mut self, _: SurfaceId, _: &[Control]) -> Result<(), SurfaceError> { Ok(()) }
//! #     async fn notify_input_rejected(&mut self, _: SurfaceId, _: PlayerId) -> Result<(), SurfaceError> { Ok(()) }
//! #     async fn close_surface(&mut self, _: SurfaceId, _: &GameView, _: Outcome) -> Result<(), SurfaceError> { Ok(()) }
//! # }
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let table = TableActor::spawn(TableOptions::default(), Chat);
//! let player = PlayerId(42);
//! table.request_start(player).await?;
//!
//! let view = table.snapshot().await?;
//! assert_eq!(view.player, Some(player));
//! let event = ReactionEvent::new(SurfaceId(1), player, Control::from_symbol("blackjack_stand"));
//! table.dispatch(event).await?;
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod presenter;
pub mod registry;
pub mod router;
pub mod table;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank};
pub use deck::Deck;
pub use error::{DeckError, ParseRankError, StartError, SurfaceError, TableError, TransitionError};
pub use game::{GameSession, GameState, Outcome};
pub use hand::{BLACKJACK, Hand};
pub use options::{DEFAULT_DEAL_DELAY, TableOptions};
pub use presenter::{GameView, PlayerId, Presenter, SurfaceId};
pub use registry::TableRegistry;
pub use router::{Control, ReactionEvent, RouteOutcome};
pub use table::{TableActor, TableHandle, TableMessage};
