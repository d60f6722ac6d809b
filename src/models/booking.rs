use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{OpenEventShow, Show};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: i64,
    pub booking_reference: String,
    #[serde(default)]
    pub show: Option<Show>,
    #[serde(default)]
    pub open_event_show: Option<OpenEventShow>,
    #[serde(default)]
    pub total_seats: i32,
    pub total_amount: f64,
    pub booking_status: String, // PENDING, CONFIRMED, CANCELLED, COMPLETED
    #[serde(default)]
    pub payment_status: Option<String>, // PENDING, PAID, FAILED, REFUNDED
    #[serde(default)]
    pub seat_numbers: Option<Vec<String>>,
    #[serde(default)]
    pub zone_bookings: Option<Vec<ZoneBooking>>,
    #[serde(default)]
    pub booking_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub qr_code_url: Option<String>,
}

impl Booking {
    pub fn title(&self) -> &str {
        self.show
            .as_ref()
            .map(|s| s.title())
            .or_else(|| {
                self.open_event_show
                    .as_ref()
                    .and_then(|os| os.event.as_ref())
                    .map(|e| e.title.as_str())
            })
            .unwrap_or("Untitled")
    }
}

/// Билеты по одной ценовой зоне внутри бронирования открытого сеанса.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZoneBooking {
    pub zone_name: String,
    pub quantity: i32,
    pub price_per_ticket: f64,
}

/// POST /bookings - прямое создание бронирования по идентификаторам мест.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub show_id: i64,
    pub seat_ids: Vec<i64>,
}
