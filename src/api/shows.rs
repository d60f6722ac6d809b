use chrono::NaiveDate;

use super::{ApiClient, ApiResult};
use crate::models::{EventShows, OpenEventShow, Seat, Show};

impl ApiClient {
    /// Сеансы фильма на дату.
    pub async fn shows_for_movie(&self, movie_id: i64, date: NaiveDate) -> ApiResult<Vec<Show>> {
        self.get_with_query(
            &format!("/shows/movie/{}", movie_id),
            &[("date", date.format("%Y-%m-%d").to_string())],
        )
        .await
    }

    /// Сеансы мероприятия на дату: регулярные и открытые приходят раздельно.
    pub async fn shows_for_event(&self, event_id: i64, date: NaiveDate) -> ApiResult<EventShows> {
        self.get_with_query(
            &format!("/shows/event/{}", event_id),
            &[("date", date.format("%Y-%m-%d").to_string())],
        )
        .await
    }

    /// Даты, на которые у фильма есть хотя бы один сеанс.
    pub async fn movie_show_dates(&self, movie_id: i64) -> ApiResult<Vec<NaiveDate>> {
        self.get(&format!("/shows/movie/{}/dates", movie_id)).await
    }

    pub async fn event_show_dates(&self, event_id: i64) -> ApiResult<Vec<NaiveDate>> {
        self.get(&format!("/shows/event/{}/dates", event_id)).await
    }

    pub async fn show(&self, id: i64) -> ApiResult<Show> {
        self.get(&format!("/shows/{}", id)).await
    }

    pub async fn open_event_show(&self, id: i64) -> ApiResult<OpenEventShow> {
        self.get(&format!("/shows/open-event-shows/{}", id)).await
    }

    pub async fn seats_for_show(&self, show_id: i64) -> ApiResult<Vec<Seat>> {
        self.get(&format!("/seats/show/{}", show_id)).await
    }
}
