use super::{ApiClient, ApiResult};
use crate::models::{Event, Movie};

impl ApiClient {
    pub async fn movies(&self) -> ApiResult<Vec<Movie>> {
        self.get("/movies").await
    }

    pub async fn movie(&self, id: i64) -> ApiResult<Movie> {
        self.get(&format!("/movies/{}", id)).await
    }

    pub async fn now_showing(&self) -> ApiResult<Vec<Movie>> {
        self.get("/movies/now-showing").await
    }

    pub async fn coming_soon(&self) -> ApiResult<Vec<Movie>> {
        self.get("/movies/coming-soon").await
    }

    pub async fn search_movies(&self, title: &str) -> ApiResult<Vec<Movie>> {
        self.get_with_query("/movies/search", &[("title", title)])
            .await
    }

    pub async fn events(&self) -> ApiResult<Vec<Event>> {
        self.get("/events").await
    }

    pub async fn event(&self, id: i64) -> ApiResult<Event> {
        self.get(&format!("/events/{}", id)).await
    }

    pub async fn upcoming_events(&self) -> ApiResult<Vec<Event>> {
        self.get("/events/upcoming").await
    }
}
