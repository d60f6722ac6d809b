use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Event, Movie, Screen, Venue};

pub(crate) fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    pub show_id: i64,
    #[serde(default)]
    pub movie: Option<Movie>,
    #[serde(default)]
    pub event: Option<Event>,
    #[serde(default)]
    pub venue: Option<Venue>,
    #[serde(default)]
    pub screen: Option<Screen>,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    pub base_price: f64,
    #[serde(default)]
    pub pricing_tiers: Option<HashMap<String, f64>>,
    #[serde(default)]
    pub total_seats: i32,
    #[serde(default)]
    pub available_seats: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Show {
    pub fn title(&self) -> &str {
        self.movie
            .as_ref()
            .map(|m| m.title.as_str())
            .or_else(|| self.event.as_ref().map(|e| e.title.as_str()))
            .unwrap_or("Untitled")
    }
}

/// Сеанс на открытой площадке: вместо отдельных мест - ценовые зоны.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenEventShow {
    pub open_show_id: i64,
    #[serde(default)]
    pub event: Option<Event>,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    #[serde(default)]
    pub pricing_zones: Vec<PricingZone>,
    #[serde(default)]
    pub total_capacity: i32,
    #[serde(default)]
    pub available_capacity: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl OpenEventShow {
    /// Минимальная цена среди зон - показывается в списке как "от ₹N".
    pub fn base_price(&self) -> f64 {
        self.pricing_zones
            .iter()
            .map(|z| z.price)
            .fold(None::<f64>, |min, p| Some(min.map_or(p, |m| m.min(p))))
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingZone {
    pub name: String,
    pub price: f64,
    pub capacity: i32,
    // Бэкенд может не прислать availableCapacity для новых зон
    #[serde(default)]
    pub available_capacity: Option<i32>,
}

impl PricingZone {
    pub fn effective_capacity(&self) -> i32 {
        self.available_capacity.unwrap_or(self.capacity)
    }
}

/// Ответ /shows/event/:id - регулярные сеансы и сеансы на открытой площадке
/// приходят раздельно.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventShows {
    #[serde(default)]
    pub regular_shows: Vec<Show>,
    #[serde(default)]
    pub open_event_shows: Vec<OpenEventShow>,
}
