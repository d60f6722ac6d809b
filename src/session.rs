//! session.rs
//!
//! Хранилище текущей личности пользователя - единственный источник правды
//! для экранов. Подписчики получают изменения через watch-канал.
//!
//! Известная особенность, унаследованная от оригинала: HTTP-слой читает
//! токен напрямую из LocalStore при сборке каждого запроса, а не через
//! этот модуль. Logout стирает токен, но уже отправленные запросы уйдут
//! со старым - это осознанная щель в консистентности, не гарантия.

use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::{ApiClient, ApiResult};
use crate::models::{AuthData, LoginRequest, RegisterRequest, User};
use crate::storage::{
    LocalStore, KEY_CURRENT_USER, KEY_EMAIL, KEY_TOKEN, KEY_USERNAME, KEY_USER_ID,
};

#[derive(Clone)]
pub struct SessionStore {
    store: LocalStore,
    current_user: watch::Sender<Option<User>>,
}

impl SessionStore {
    pub fn new(store: LocalStore) -> Self {
        let initial = Self::user_from_storage(&store);
        let (tx, _rx) = watch::channel(initial);
        Self {
            store,
            current_user: tx,
        }
    }

    fn user_from_storage(store: &LocalStore) -> Option<User> {
        let raw = store.get_item(KEY_CURRENT_USER)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Stored currentUser is unreadable ({}), ignoring", e);
                None
            }
        }
    }

    pub async fn login(&self, api: &ApiClient, credentials: &LoginRequest) -> ApiResult<AuthData> {
        let auth: AuthData = api.post("/auth/login", credentials).await?;
        self.persist(&auth);
        info!("Logged in as {} ({})", auth.user.name, auth.user.role);
        Ok(auth)
    }

    pub async fn register(&self, api: &ApiClient, data: &RegisterRequest) -> ApiResult<AuthData> {
        let auth: AuthData = api.post("/auth/register", data).await?;
        self.persist(&auth);
        info!("Registered and logged in as {}", auth.user.name);
        Ok(auth)
    }

    pub fn logout(&self) {
        self.store.remove_item(KEY_TOKEN);
        self.store.remove_item(KEY_CURRENT_USER);
        self.store.remove_item(KEY_USERNAME);
        self.store.remove_item(KEY_EMAIL);
        self.store.remove_item(KEY_USER_ID);
        let _ = self.current_user.send(None);
        info!("Logged out");
    }

    pub fn current_user(&self) -> Option<User> {
        self.current_user.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.token().is_some()
    }

    /// Чистый предикат над текущей личностью.
    pub fn is_admin(&self) -> bool {
        self.current_user().map(|u| u.is_admin()).unwrap_or(false)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.current_user.subscribe()
    }

    fn persist(&self, auth: &AuthData) {
        self.store.set_item(KEY_TOKEN, &auth.token);
        match serde_json::to_string(&auth.user) {
            Ok(raw) => self.store.set_item(KEY_CURRENT_USER, &raw),
            Err(e) => warn!("Failed to serialize user: {}", e),
        }
        // Отдельные ключи, которые часть экранов читает напрямую
        self.store.set_item(KEY_USERNAME, &auth.user.name);
        self.store.set_item(KEY_EMAIL, &auth.user.email);
        self.store.set_item(KEY_USER_ID, &auth.user.id.to_string());
        let _ = self.current_user.send(Some(auth.user.clone()));
    }
}
