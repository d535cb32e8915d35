use crate::config::SyncConfig;
use crate::storage::LocalStorage;
use crate::watchlist::WatchlistStore;
use leptos::prelude::*;

#[derive(Clone)]
pub(crate) struct AppState {
    pub config: SyncConfig,

    /// Restored from localStorage at startup; lives for the whole session.
    pub watchlist: WatchlistStore,
}

impl AppState {
    pub fn new() -> Self {
        let config = SyncConfig::from_env();
        let watchlist = WatchlistStore::load(LocalStorage, config.storage_key.clone());
        Self { config, watchlist }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);

pub(crate) fn use_watchlist() -> WatchlistStore {
    expect_context::<AppContext>().0.watchlist
}
