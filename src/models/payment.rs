use serde::{Deserialize, Serialize};

use super::ZoneBooking;

/// Запрос на создание заказа: либо обычный сеанс с местами,
/// либо открытый сеанс с разбивкой по зонам.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_show_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_open_event: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat_numbers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_bookings: Option<Vec<ZoneBooking>>,
    pub total_amount: f64,
}

/// Параметры шлюза, возвращаемые /payments/create-order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: String,
    pub booking_id: i64,
    pub amount: String, // в пайсах, строкой - как отдаёт бэкенд
    pub currency: String,
    pub key: String,
}

/// Подтверждение платежа: идентификаторы, которые шлюз передал
/// обработчику успеха.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerifyRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    pub booking_id: i64,
}
