use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub event_time: Option<NaiveTime>,
    pub duration_minutes: i32,
    #[serde(default)]
    pub artist_or_team: Option<String>,
    pub language: String,
    #[serde(default)]
    pub age_restriction: Option<String>,
    #[serde(default)]
    pub display_image_url: Option<String>,
    #[serde(default)]
    pub banner_image_url: Option<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
    #[serde(default = "super::show::default_true")]
    pub is_active: bool,
}
