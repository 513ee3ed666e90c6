//! Table actor: serializes events for one game session.

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep_until};

use crate::error::{StartError, TableError};
use crate::game::GameSession;
use crate::options::TableOptions;
use crate::presenter::{GameView, PlayerId, Presenter};
use crate::router::{ReactionEvent, RouteOutcome};

/// Messages that can be sent to a [`TableActor`].
#[derive(Debug)]
pub enum TableMessage {
    /// Start (or restart) a game for a player.
    Start {
        /// The player asking to play.
        actor: PlayerId,
        /// Receives the result once the initial deal is done.
        response: oneshot::Sender<Result<(), StartError>>,
    },
    /// A reaction from the transport.
    Reaction {
        /// The decoded reaction.
        event: ReactionEvent,
        /// Receives what the router did, if the sender wants to know.
        response: Option<oneshot::Sender<RouteOutcome>>,
    },
    /// Read the current session.
    Snapshot {
        /// Receives the view.
        response: oneshot::Sender<GameView>,
    },
    /// Stop the actor.
    Shutdown,
}

/// Handle for sending messages to a table.
#[derive(Debug, Clone)]
pub struct TableHandle {
    sender: mpsc::Sender<TableMessage>,
}

impl TableHandle {
    /// Asks the table to start a game for `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`StartError::AlreadyInProgress`] if a game is running,
    /// [`StartError::Surface`] if the surface could not be created, and
    /// [`StartError::TableClosed`] if the table has stopped.
    pub async fn request_start(&self, actor: PlayerId) -> Result<(), StartError> {
        let (response, rx) = oneshot::channel();
        self.sender
            .send(TableMessage::Start { actor, response })
            .await
            .map_err(|_| StartError::TableClosed)?;
        rx.await.map_err(|_| StartError::TableClosed)?
    }

    /// Delivers a reaction and waits until it has been handled.
    ///
    /// # Errors
    ///
    /// Returns an error if the table has stopped.
    pub async fn dispatch(&self, event: ReactionEvent) -> Result<RouteOutcome, TableError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::Reaction {
            event,
            response: Some(response),
        })
        .await?;
        rx.await.map_err(|_| TableError::Closed)
    }

    /// Queues a reaction without waiting for it to be handled.
    ///
    /// # Errors
    ///
    /// Returns an error if the table has stopped.
    pub async fn post(&self, event: ReactionEvent) -> Result<(), TableError> {
        self.send(TableMessage::Reaction {
            event,
            response: None,
        })
        .await
    }

    /// Returns a view of the session once all earlier messages are handled.
    ///
    /// # Errors
    ///
    /// Returns an error if the table has stopped.
    pub async fn snapshot(&self) -> Result<GameView, TableError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::Snapshot { response }).await?;
        rx.await.map_err(|_| TableError::Closed)
    }

    /// Stops the table after the messages already queued.
    ///
    /// # Errors
    ///
    /// Returns an error if the table has already stopped.
    pub async fn shutdown(&self) -> Result<(), TableError> {
        self.send(TableMessage::Shutdown).await
    }

    /// Returns whether the table has stopped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Send a message to the table
    async fn send(&self, message: TableMessage) -> Result<(), TableError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| TableError::Closed)
    }
}

/// Actor owning a single [`GameSession`].
///
/// Messages are handled one at a time, to completion. A reaction that
/// arrives while the dealer is drawing waits in the inbox.
pub struct TableActor<P> {
    /// The game.
    session: GameSession<P>,
    /// Message inbox.
    inbox: mpsc::Receiver<TableMessage>,
    /// When the running game expires, if a timeout is configured.
    deadline: Option<Instant>,
}

impl<P: Presenter + 'static> TableActor<P> {
    /// Creates a table actor and the handle for talking to it.
    #[must_use]
    pub fn new(options: TableOptions, presenter: P) -> (Self, TableHandle) {
        let (sender, inbox) = mpsc::channel(options.inbox_capacity.max(1));
        let actor = Self {
            session: GameSession::new(options, presenter),
            inbox,
            deadline: None,
        };
        (actor, TableHandle { sender })
    }

    /// Creates a table actor and runs it on the current tokio runtime.
    #[must_use]
    pub fn spawn(options: TableOptions, presenter: P) -> TableHandle {
        let (actor, handle) = Self::new(options, presenter);
        tokio::spawn(actor.run());
        handle
    }

    /// Returns the session, e.g. to arrange the deck before [`run`](Self::run).
    pub const fn session_mut(&mut self) -> &mut GameSession<P> {
        &mut self.session
    }

    /// Run the table event loop until shutdown or until every handle is dropped.
    pub async fn run(mut self) {
        log::debug!("blackjack table starting");

        loop {
            let message = match self.deadline {
                Some(deadline) => {
                    tokio::select! {
                        message = self.inbox.recv() => message,
                        () = sleep_until(deadline) => {
                            self.deadline = None;
                            if self.session.expire().await {
                                log::info!("blackjack game timed out");
                            }
                            continue;
                        }
                    }
                }
                None => self.inbox.recv().await,
            };

            let Some(message) = message else {
                break;
            };
            if !self.handle_message(message).await {
                break;
            }
        }

        if self.session.state().is_active() {
            let _ = self.session.cancel().await;
        }
        log::debug!("blackjack table closed");
    }

    /// Handles one message. Returns `false` on shutdown.
    async fn handle_message(&mut self, message: TableMessage) -> bool {
        match message {
            TableMessage::Start { actor, response } => {
                let result = self.session.request_start(actor).await;
                if result.is_ok() {
                    self.touch();
                }
                let _ = response.send(result);
            }
            TableMessage::Reaction { event, response } => {
                let outcome = self.session.route(event).await;
                if outcome == RouteOutcome::Applied {
                    self.touch();
                }
                if let Some(response) = response {
                    let _ = response.send(outcome);
                }
            }
            TableMessage::Snapshot { response } => {
                let _ = response.send(self.session.snapshot());
            }
            TableMessage::Shutdown => return false,
        }
        true
    }

    /// Restarts the inactivity timer after accepted input.
    fn touch(&mut self) {
        self.deadline = match self.session.options().idle_timeout {
            Some(timeout) if self.session.state().is_active() => Some(Instant::now() + timeout),
            _ => None,
        };
    }
}
