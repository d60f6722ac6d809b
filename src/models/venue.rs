use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub venue_id: i64,
    pub venue_name: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub total_screens: i32,
    #[serde(default)]
    pub facilities: Option<serde_json::Value>,
    #[serde(default)]
    pub screens: Option<Vec<Screen>>,
    #[serde(default = "super::show::default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    #[serde(default)]
    pub screen_id: Option<i64>,
    pub screen_number: i32,
    pub screen_type: String, // 2D, 3D, IMAX, 4DX
    pub sound_system: String, // Dolby Atmos, DTS, Standard
    #[serde(default)]
    pub seat_layout: Option<SeatLayoutConfig>,
    #[serde(default)]
    pub total_seats: i32,
    #[serde(default = "super::show::default_true")]
    pub is_active: bool,
}

/// Конфигурация зала: ряды, места в ряду, проходы и выключенные места.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatLayoutConfig {
    pub rows: Vec<String>,
    pub seats_per_row: HashMap<String, u32>,
    #[serde(default)]
    pub aisles: HashMap<String, Vec<u32>>,
    #[serde(default)]
    pub total_seats: u32,
    #[serde(default)]
    pub disabled_seats: Vec<String>,
}

impl SeatLayoutConfig {
    /// Пересчитать итоговое количество мест с учётом выключенных.
    pub fn recompute_total(&mut self) {
        let raw: u32 = self
            .rows
            .iter()
            .map(|r| self.seats_per_row.get(r).copied().unwrap_or(0))
            .sum();
        self.total_seats = raw.saturating_sub(self.disabled_seats.len() as u32);
    }
}
