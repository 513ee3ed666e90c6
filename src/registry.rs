//! Registry of tables keyed by deployment scope.

use std::collections::HashMap;
use std::hash::Hash;

use tokio::sync::RwLock;

use crate::error::{StartError, TableError};
use crate::options::TableOptions;
use crate::presenter::{PlayerId, Presenter};
use crate::router::{ReactionEvent, RouteOutcome};
use crate::table::{TableActor, TableHandle};

type PresenterFactory<K, P> = Box<dyn Fn(&K) -> P + Send + Sync>;

/// Spawns and tracks one table per scope (for example per chat channel).
///
/// Each scope allows a single active game; different scopes play
/// independently. Tables are created on the first start request.
pub struct TableRegistry<K, P> {
    /// Options for new tables.
    options: TableOptions,
    /// Creates the presenter for a new table.
    factory: PresenterFactory<K, P>,
    /// Active table handles.
    tables: RwLock<HashMap<K, TableHandle>>,
}

impl<K, P> TableRegistry<K, P>
where
    K: Eq + Hash + Clone + Send + Sync,
    P: Presenter + 'static,
{
    /// Creates an empty registry.
    pub fn new<F>(options: TableOptions, factory: F) -> Self
    where
        F: Fn(&K) -> P + Send + Sync + 'static,
    {
        Self {
            options,
            factory: Box::new(factory),
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the table for `scope`, spawning it if needed.
    pub async fn table(&self, scope: &K) -> TableHandle {
        if let Some(handle) = self.tables.read().await.get(scope) {
            if !handle.is_closed() {
                return handle.clone();
            }
        }

        let mut tables = self.tables.write().await;
        if let Some(handle) = tables.get(scope) {
            if !handle.is_closed() {
                return handle.clone();
            }
        }

        let handle = TableActor::spawn(self.options.clone(), (self.factory)(scope));
        tables.insert(scope.clone(), handle.clone());
        log::info!("Created blackjack table ({} active)", tables.len());
        handle
    }

    /// Starts a game in `scope`.
    ///
    /// # Errors
    ///
    /// See [`TableHandle::request_start`].
    pub async fn request_start(&self, scope: &K, actor: PlayerId) -> Result<(), StartError> {
        self.table(scope).await.request_start(actor).await
    }

    /// Delivers a reaction to the table of `scope`.
    ///
    /// Scopes without a table have no game surface, so the event is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the table has stopped.
    pub async fn dispatch(
        &self,
        scope: &K,
        event: ReactionEvent,
    ) -> Result<RouteOutcome, TableError> {
        let handle = self.tables.read().await.get(scope).cloned();
        match handle {
            Some(handle) => handle.dispatch(event).await,
            None => Ok(RouteOutcome::NotThisSurface),
        }
    }

    /// Stops and forgets the table of `scope`.
    ///
    /// Returns `false` if the scope had no table.
    pub async fn close(&self, scope: &K) -> bool {
        let Some(handle) = self.tables.write().await.remove(scope) else {
            return false;
        };
        if handle.shutdown().await.is_err() {
            log::debug!("table was already closed");
        }
        log::info!("Closed blackjack table");
        true
    }

    /// Stops every table.
    pub async fn close_all(&self) {
        let tables: Vec<TableHandle> = self.tables.write().await.drain().map(|(_, h)| h).collect();
        for handle in tables {
            if handle.shutdown().await.is_err() {
                log::debug!("table was already closed");
            }
        }
        log::info!("Closed all blackjack tables");
    }

    /// Returns the number of tables.
    pub async fn len(&self) -> usize {
        self.tables.read().await.len()
    }

    /// Returns whether no table exists.
    pub async fn is_empty(&self) -> bool {
        self.tables.read().await.is_empty()
    }
}
