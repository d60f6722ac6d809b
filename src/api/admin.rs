use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiResult};
use crate::models::{Booking, Event, Movie, OpenEventShow, Screen, Show, Venue};

// --- Request/Response структуры админки ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_users: i64,
    #[serde(default)]
    pub total_movies: i64,
    #[serde(default)]
    pub total_bookings: i64,
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub bookings_by_status: BookingsByStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingsByStatus {
    #[serde(default)]
    pub confirmed: i64,
    #[serde(default)]
    pub pending: i64,
    #[serde(default)]
    pub cancelled: i64,
}

/// Пользователь в админском списке. Сюда приходит сырой серверный
/// объект (userId/fullName), а не та форма, что отдаёт /auth/login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub user_id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: String,
    #[serde(default = "crate::models::show::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieUpsert {
    pub title: String,
    pub description: String,
    pub genre: String,
    pub language: String,
    pub duration_minutes: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parental_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crew: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpsert {
    pub title: String,
    pub description: String,
    pub category: String,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub duration_minutes: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_or_team: Option<String>,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_restriction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueUpsert {
    pub name: String,
    pub address: String,
    pub city: String,
    pub total_screens: usize,
    pub screens: Vec<Screen>,
}

/// Зона в форме создания открытого сеанса.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoneSpec {
    pub name: String,
    pub price: f64,
    pub capacity: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowUpsert {
    pub show_type: String, // movie | event
    pub movie_id: Option<i64>,
    pub event_id: Option<i64>,
    pub venue_id: Option<i64>,
    pub screen_id: Option<i64>,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    pub is_open_ground: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing_zones: Option<Vec<ZoneSpec>>,
    pub standard_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vip_price: Option<f64>,
}

// --- Админские вызовы ---

impl ApiClient {
    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.get("/admin/dashboard/stats").await
    }

    // Movies

    pub async fn admin_movies(&self) -> ApiResult<Vec<Movie>> {
        self.get("/admin/movies").await
    }

    pub async fn admin_movie(&self, id: i64) -> ApiResult<Movie> {
        self.get(&format!("/admin/movies/{}", id)).await
    }

    pub async fn admin_create_movie(&self, movie: &MovieUpsert) -> ApiResult<Movie> {
        self.post("/admin/movies", movie).await
    }

    pub async fn admin_update_movie(&self, id: i64, movie: &MovieUpsert) -> ApiResult<Movie> {
        self.put(&format!("/admin/movies/{}", id), movie).await
    }

    pub async fn admin_delete_movie(&self, id: i64) -> ApiResult<String> {
        self.delete_unit(&format!("/admin/movies/{}", id)).await
    }

    pub async fn admin_activate_movie(&self, id: i64) -> ApiResult<String> {
        self.put_unit(&format!("/admin/movies/{}/activate", id), &serde_json::json!({}))
            .await
    }

    // Events

    pub async fn admin_events(&self) -> ApiResult<Vec<Event>> {
        self.get("/admin/events").await
    }

    pub async fn admin_event(&self, id: i64) -> ApiResult<Event> {
        self.get(&format!("/admin/events/{}", id)).await
    }

    pub async fn admin_create_event(&self, event: &EventUpsert) -> ApiResult<Event> {
        self.post("/admin/events", event).await
    }

    pub async fn admin_update_event(&self, id: i64, event: &EventUpsert) -> ApiResult<Event> {
        self.put(&format!("/admin/events/{}", id), event).await
    }

    pub async fn admin_delete_event(&self, id: i64) -> ApiResult<String> {
        self.delete_unit(&format!("/admin/events/{}", id)).await
    }

    pub async fn admin_activate_event(&self, id: i64) -> ApiResult<String> {
        self.put_unit(&format!("/admin/events/{}/activate", id), &serde_json::json!({}))
            .await
    }

    // Venues

    pub async fn admin_venues(&self) -> ApiResult<Vec<Venue>> {
        self.get("/admin/venues").await
    }

    pub async fn admin_venue(&self, id: i64) -> ApiResult<Venue> {
        self.get(&format!("/admin/venues/{}", id)).await
    }

    pub async fn admin_create_venue(&self, venue: &VenueUpsert) -> ApiResult<Venue> {
        self.post("/admin/venues", venue).await
    }

    pub async fn admin_update_venue(&self, id: i64, venue: &VenueUpsert) -> ApiResult<Venue> {
        self.put(&format!("/admin/venues/{}", id), venue).await
    }

    pub async fn admin_delete_venue(&self, id: i64) -> ApiResult<String> {
        self.delete_unit(&format!("/admin/venues/{}", id)).await
    }

    // Shows

    pub async fn admin_shows(&self) -> ApiResult<Vec<Show>> {
        self.get("/admin/shows").await
    }

    pub async fn admin_show(&self, id: i64) -> ApiResult<Show> {
        self.get(&format!("/admin/shows/{}", id)).await
    }

    pub async fn admin_create_show(&self, show: &ShowUpsert) -> ApiResult<serde_json::Value> {
        self.post("/admin/shows", show).await
    }

    pub async fn admin_update_show(&self, id: i64, show: &ShowUpsert) -> ApiResult<serde_json::Value> {
        self.put(&format!("/admin/shows/{}", id), show).await
    }

    /// Мягкое удаление и активация - отдельные эндпоинты, не общий PATCH.
    pub async fn soft_delete_show(&self, id: i64) -> ApiResult<String> {
        self.put_unit(&format!("/shows/{}/soft-delete", id), &serde_json::json!({}))
            .await
    }

    pub async fn activate_show(&self, id: i64) -> ApiResult<String> {
        self.put_unit(&format!("/shows/{}/activate", id), &serde_json::json!({}))
            .await
    }

    pub async fn soft_delete_open_event_show(&self, id: i64) -> ApiResult<String> {
        self.put_unit(
            &format!("/shows/open-event-shows/{}/soft-delete", id),
            &serde_json::json!({}),
        )
        .await
    }

    pub async fn activate_open_event_show(&self, id: i64) -> ApiResult<String> {
        self.put_unit(
            &format!("/shows/open-event-shows/{}/activate", id),
            &serde_json::json!({}),
        )
        .await
    }

    pub async fn generate_seats(&self, show_id: i64) -> ApiResult<String> {
        self.post_unit(&format!("/shows/{}/generate-seats", show_id), &serde_json::json!({}))
            .await
    }

    pub async fn admin_open_event_show(&self, id: i64) -> ApiResult<OpenEventShow> {
        self.get(&format!("/admin/open-event-shows/{}", id)).await
    }

    pub async fn admin_delete_open_event_show(&self, id: i64) -> ApiResult<String> {
        self.delete_unit(&format!("/admin/open-event-shows/{}", id))
            .await
    }

    // Users / Bookings

    pub async fn admin_users(&self) -> ApiResult<Vec<AdminUser>> {
        self.get("/admin/users").await
    }

    pub async fn admin_bookings(&self) -> ApiResult<Vec<Booking>> {
        self.get("/admin/bookings").await
    }
}
