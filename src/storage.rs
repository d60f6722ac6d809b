use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Ключи, которые использует клиент. `username`/`email`/`user_id` читаются
/// некоторыми экранами напрямую, минуя SessionStore - так делал и оригинал.
pub const KEY_TOKEN: &str = "token";
pub const KEY_CURRENT_USER: &str = "currentUser";
pub const KEY_USERNAME: &str = "username";
pub const KEY_EMAIL: &str = "email";
pub const KEY_USER_ID: &str = "userId";

/// Локальное персистентное хранилище строковых пар - аналог localStorage.
/// Каждая запись сразу сбрасывается на диск; один процесс, одна "вкладка".
#[derive(Clone)]
pub struct LocalStore {
    path: PathBuf,
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl LocalStore {
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let items = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                // Повреждённый файл сессии не фатален - начинаем с чистого листа
                warn!("Session file {} is corrupt ({}), starting empty", path.display(), e);
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Ok(Self {
            path,
            items: Arc::new(Mutex::new(items)),
        })
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().unwrap().get(key).cloned()
    }

    pub fn set_item(&self, key: &str, value: &str) {
        let mut items = self.items.lock().unwrap();
        items.insert(key.to_string(), value.to_string());
        self.flush(&items);
    }

    pub fn remove_item(&self, key: &str) {
        let mut items = self.items.lock().unwrap();
        items.remove(key);
        self.flush(&items);
    }

    pub fn clear(&self) {
        let mut items = self.items.lock().unwrap();
        items.clear();
        self.flush(&items);
    }

    /// Токен авторизации. Все HTTP-вызовы читают его отсюда напрямую,
    /// а не через SessionStore - logout не отменяет уже запущенные запросы.
    pub fn token(&self) -> Option<String> {
        self.get_item(KEY_TOKEN)
    }

    fn flush(&self, items: &HashMap<String, String>) {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                let _ = fs::create_dir_all(dir);
            }
        }
        let raw = match serde_json::to_string_pretty(items) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize session store: {}", e);
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, raw) {
            warn!("Failed to write session file {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("session.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn set_get_remove_roundtrip() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get_item(KEY_TOKEN), None);

        store.set_item(KEY_TOKEN, "abc123");
        assert_eq!(store.token().as_deref(), Some("abc123"));

        store.remove_item(KEY_TOKEN);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = LocalStore::open(&path).unwrap();
        store.set_item(KEY_EMAIL, "user@example.com");
        drop(store);

        let reopened = LocalStore::open(&path).unwrap();
        assert_eq!(
            reopened.get_item(KEY_EMAIL).as_deref(),
            Some("user@example.com")
        );
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = LocalStore::open(&path).unwrap();
        assert_eq!(store.get_item(KEY_TOKEN), None);
    }
}
