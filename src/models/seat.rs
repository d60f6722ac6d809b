use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub seat_id: i64,
    pub row_label: String,
    pub seat_number: i32,
    #[serde(default)]
    pub seat_type: Option<String>, // PREMIUM, REGULAR, ECONOMY, RECLINER, VIP
    pub price: f64,
    pub is_available: bool,
    #[serde(default)]
    pub is_blocked: bool,
}

impl Seat {
    /// Ключ места в формате интерфейса: "A1", "B10".
    pub fn label(&self) -> String {
        format!("{}{}", self.row_label, self.seat_number)
    }
}
