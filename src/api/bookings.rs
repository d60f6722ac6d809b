use super::{ApiClient, ApiResult};
use crate::models::{Booking, BookingRequest};

impl ApiClient {
    /// Прямое создание бронирования по идентификаторам мест.
    /// Канонический путь оформления - через /payments/create-order;
    /// эта операция оставлена как отдельная поверхность API.
    pub async fn create_booking(&self, request: &BookingRequest) -> ApiResult<Booking> {
        self.post("/bookings", request).await
    }

    pub async fn my_bookings(&self) -> ApiResult<Vec<Booking>> {
        self.get("/bookings/my-bookings").await
    }

    pub async fn booking(&self, id: i64) -> ApiResult<Booking> {
        self.get(&format!("/bookings/{}", id)).await
    }

    pub async fn booking_by_reference(&self, reference: &str) -> ApiResult<Booking> {
        self.get(&format!("/bookings/reference/{}", reference)).await
    }
}
