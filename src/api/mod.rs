//! api
//!
//! Тонкий типизированный клиент REST-бэкенда RevTickets.
//!
//! Все вызовы проходят через общий `reqwest::Client` с таймаутом из
//! конфигурации. Bearer-токен читается из локального хранилища при сборке
//! каждого запроса - разлогин не влияет на уже отправленные запросы.
//! Ответы приходят в едином конверте `{success, message, data}`;
//! повторов и отмены запросов нет.

pub mod admin;
pub mod bookings;
pub mod catalog;
pub mod payments;
pub mod shows;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::models::ApiResponse;
use crate::storage::LocalStore;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Транспортная ошибка: DNS, соединение, таймаут, обрыв тела.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Бэкенд ответил, но с ошибкой (не-2xx или success=false в конверте).
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Конверт успешный, но поле data отсутствует там, где ожидалось.
    #[error("Response envelope is missing data")]
    MissingData,
}

impl ApiError {
    /// HTTP-статус, если бэкенд вообще ответил.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: LocalStore,
}

impl ApiClient {
    pub fn from_config(config: &ApiConfig, store: LocalStore) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_seconds))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Собирает запрос: request-id для трассировки и bearer-токен
    /// напрямую из хранилища (см. заметку о консистентности в session.rs).
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, self.url(path))
            .header("x-request-id", Uuid::new_v4().to_string());
        if let Some(token) = self.store.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Выполняет запрос и разворачивает конверт до `data`.
    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            // Сообщение об ошибке бэкенд кладёт в тот же конверт
            let message = match response.json::<ApiResponse<serde_json::Value>>().await {
                Ok(envelope) if !envelope.message.is_empty() => envelope.message,
                _ => default_status_message(status),
            };
            error!("API error {}: {}", status.as_u16(), message);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiResponse<T> = response.json().await?;
        if !envelope.success {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: envelope.message,
            });
        }
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// То же, но для операций, у которых data может быть null.
    /// Возвращает сообщение конверта.
    async fn execute_unit(&self, builder: RequestBuilder) -> ApiResult<String> {
        let response = builder.send().await?;
        let status = response.status();

        let envelope = match response.json::<ApiResponse<serde_json::Value>>().await {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                // Пустое тело при 2xx считаем успехом
                debug!("Empty success body: {}", e);
                return Ok(String::new());
            }
            Err(e) => return Err(ApiError::Transport(e)),
        };

        if !status.is_success() || !envelope.success {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: if envelope.message.is_empty() {
                    default_status_message(status)
                } else {
                    envelope.message
                },
            });
        }
        Ok(envelope.message)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        debug!("GET {}", path);
        self.execute(self.request(Method::GET, path)).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ApiResult<T> {
        debug!("GET {} (query)", path);
        self.execute(self.request(Method::GET, path).query(query))
            .await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        debug!("POST {}", path);
        self.execute(self.request(Method::POST, path).json(body))
            .await
    }

    pub(crate) async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<String> {
        debug!("POST {}", path);
        self.execute_unit(self.request(Method::POST, path).json(body))
            .await
    }

    pub(crate) async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        debug!("PUT {}", path);
        self.execute(self.request(Method::PUT, path).json(body))
            .await
    }

    pub(crate) async fn put_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<String> {
        debug!("PUT {}", path);
        self.execute_unit(self.request(Method::PUT, path).json(body))
            .await
    }

    pub(crate) async fn delete_unit(&self, path: &str) -> ApiResult<String> {
        debug!("DELETE {}", path);
        self.execute_unit(self.request(Method::DELETE, path)).await
    }
}

impl ApiClient {
    /// Профиль текущего пользователя.
    pub async fn profile(&self) -> ApiResult<crate::models::User> {
        self.get("/auth/profile").await
    }
}

fn default_status_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}
