use serde::Deserialize;
use std::env;

// Главная структура конфигурации - контейнер для всех настроек клиента
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub payment: PaymentConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
}

// Настройки удалённого REST API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

// Настройки локального хранилища сессии (аналог localStorage браузера)
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub session_file: String,
}

// Настройки платёжного чекаута
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    pub checkout_url: String,
    pub currency: String,
    pub merchant_name: String,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "revtickets_client=debug".to_string()),
            },
            api: ApiConfig {
                base_url: env::var("REVTICKETS_API_URL")
                    .unwrap_or_else(|_| "http://localhost:8080/api".to_string()),
                timeout_seconds: env::var("HTTP_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .expect("HTTP_TIMEOUT_SECONDS must be a valid number"),
            },
            storage: StorageConfig {
                session_file: env::var("SESSION_FILE")
                    .unwrap_or_else(|_| ".revtickets/session.json".to_string()),
            },
            payment: PaymentConfig {
                checkout_url: env::var("CHECKOUT_URL")
                    .unwrap_or_else(|_| "https://checkout.razorpay.com/v1/checkout.js".to_string()),
                currency: env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "INR".to_string()),
                merchant_name: env::var("MERCHANT_NAME")
                    .unwrap_or_else(|_| "RevTickets".to_string()),
            },
        }
    }
}
