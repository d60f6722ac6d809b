pub mod api;
pub mod checkout;
pub mod config;
pub mod models;
pub mod selection;
pub mod session;
pub mod storage;
pub mod views;

use std::sync::Arc;

// Shared state для всего клиента
pub struct App {
    pub config: config::Config,
    pub store: storage::LocalStore,
    pub session: session::SessionStore,
    pub api: api::ApiClient,
}

impl App {
    pub fn new(config: config::Config) -> anyhow::Result<Arc<Self>> {
        let store = storage::LocalStore::open(&config.storage.session_file)?;
        let session = session::SessionStore::new(store.clone());
        let api = api::ApiClient::from_config(&config.api, store.clone());

        Ok(Arc::new(Self {
            config,
            store,
            session,
            api,
        }))
    }
}
