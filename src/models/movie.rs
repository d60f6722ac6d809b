use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub genre: String,
    pub language: String,
    pub duration_minutes: i32,
    #[serde(default)]
    pub parental_rating: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub display_image_url: Option<String>,
    #[serde(default)]
    pub banner_image_url: Option<String>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub crew: Option<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default = "super::show::default_true")]
    pub is_active: bool,
}
