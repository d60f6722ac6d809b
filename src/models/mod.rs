pub mod booking;
pub mod event;
pub mod movie;
pub mod payment;
pub mod seat;
pub mod show;
pub mod user;
pub mod venue;

pub use booking::{Booking, BookingRequest, ZoneBooking};
pub use event::Event;
pub use movie::Movie;
pub use payment::{OrderResponse, PaymentRequest, PaymentVerifyRequest};
pub use seat::Seat;
pub use show::{EventShows, OpenEventShow, PricingZone, Show};
pub use user::{AuthData, LoginRequest, RegisterRequest, User};
pub use venue::{Screen, SeatLayoutConfig, Venue};

use serde::{Deserialize, Serialize};

/// Единый конверт всех ответов бэкенда.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}
