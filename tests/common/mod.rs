#![allow(dead_code)] // каждый тестовый бинарник использует свою часть хелперов

use revtickets_client::api::ApiClient;
use revtickets_client::config::{ApiConfig, AppConfig, Config, PaymentConfig, StorageConfig};
use revtickets_client::session::SessionStore;
use revtickets_client::storage::LocalStore;

/// Собирает клиентскую связку поверх wiremock-сервера.
pub struct TestHarness {
    pub store: LocalStore,
    pub session: SessionStore,
    pub api: ApiClient,
    _dir: tempfile::TempDir,
}

pub fn config(base_url: &str, session_file: &str) -> Config {
    Config {
        app: AppConfig {
            environment: "test".to_string(),
            rust_log: "warn".to_string(),
        },
        api: ApiConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 5,
        },
        storage: StorageConfig {
            session_file: session_file.to_string(),
        },
        payment: PaymentConfig {
            checkout_url: "https://checkout.example/v1/checkout.js".to_string(),
            currency: "INR".to_string(),
            merchant_name: "RevTickets".to_string(),
        },
    }
}

pub fn harness(base_url: &str) -> TestHarness {
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let config = config(base_url, session_file.to_str().unwrap());

    let store = LocalStore::open(&config.storage.session_file).unwrap();
    let session = SessionStore::new(store.clone());
    let api = ApiClient::from_config(&config.api, store.clone());

    TestHarness {
        store,
        session,
        api,
        _dir: dir,
    }
}

/// Конверт успешного ответа.
pub fn envelope(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "message": "OK",
        "data": data
    })
}
