use super::{ApiClient, ApiResult};
use crate::models::{Booking, OrderResponse, PaymentRequest, PaymentVerifyRequest};

impl ApiClient {
    /// Создаёт заказ: бэкенд заводит PENDING-бронирование и возвращает
    /// параметры для платёжного виджета.
    pub async fn create_order(&self, request: &PaymentRequest) -> ApiResult<OrderResponse> {
        self.post("/payments/create-order", request).await
    }

    /// Отправляет идентификаторы успешного платежа на сверку.
    pub async fn verify_payment(&self, request: &PaymentVerifyRequest) -> ApiResult<Booking> {
        self.post("/payments/verify", request).await
    }

    /// Отмена ещё не оплаченного заказа. Вызывается только по явному
    /// действию пользователя, не автоматически.
    pub async fn cancel_payment(&self, booking_id: i64) -> ApiResult<Booking> {
        self.post(&format!("/payments/cancel/{}", booking_id), &serde_json::json!({}))
            .await
    }
}
