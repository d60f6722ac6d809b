use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::warn;

use crate::models::{Event, EventShows, Movie, OpenEventShow, Show};
use crate::App;

use super::booking::{self, BookingTarget};
use super::{money, Term};

/// Сеанс в списке выбора: обычный или на открытой площадке.
#[derive(Debug, Clone)]
pub enum ShowChoice {
    Regular(Show),
    Open(OpenEventShow),
}

impl ShowChoice {
    pub fn show_date(&self) -> NaiveDate {
        match self {
            ShowChoice::Regular(s) => s.show_date,
            ShowChoice::Open(s) => s.show_date,
        }
    }

    pub fn show_time(&self) -> NaiveTime {
        match self {
            ShowChoice::Regular(s) => s.show_time,
            ShowChoice::Open(s) => s.show_time,
        }
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.show_date().and_time(self.show_time())
    }

    pub fn base_price(&self) -> f64 {
        match self {
            ShowChoice::Regular(s) => s.base_price,
            ShowChoice::Open(s) => s.base_price(),
        }
    }
}

/// Объединяет раздельные списки ответа /shows/event/:id в один,
/// как это делал интерфейс: открытые сеансы приводятся к общему виду.
pub fn merge_event_shows(shows: EventShows) -> Vec<ShowChoice> {
    let mut merged: Vec<ShowChoice> = shows
        .regular_shows
        .into_iter()
        .map(ShowChoice::Regular)
        .collect();
    merged.extend(shows.open_event_shows.into_iter().map(ShowChoice::Open));
    merged
}

/// Сеансы, которые уже начались, в списке не показываются.
pub fn filter_past(shows: Vec<ShowChoice>, now: NaiveDateTime) -> Vec<ShowChoice> {
    shows.into_iter().filter(|s| s.starts_at() > now).collect()
}

/// Запасная сетка дат, когда эндпоинт дат недоступен:
/// 7 дней для фильмов, 30 для мероприятий.
pub fn generate_dates(today: NaiveDate, is_event: bool) -> Vec<NaiveDate> {
    let days: i64 = if is_event { 30 } else { 7 };
    (0..days)
        .map(|offset| today + Duration::days(offset))
        .collect()
}

#[derive(Debug)]
pub struct VenueGroup {
    pub venue_name: String,
    pub city: String,
    pub shows: Vec<ShowChoice>,
}

/// Группировка по площадке для вывода; открытые сеансы идут отдельной
/// группой "Open Ground".
pub fn group_by_venue(shows: Vec<ShowChoice>) -> Vec<VenueGroup> {
    let mut groups: Vec<VenueGroup> = Vec::new();
    for show in shows {
        let (name, city) = match &show {
            ShowChoice::Regular(s) => match &s.venue {
                Some(v) => (v.venue_name.clone(), v.city.clone()),
                None => ("Unknown venue".to_string(), String::new()),
            },
            ShowChoice::Open(_) => ("Open Ground".to_string(), String::new()),
        };
        match groups.iter_mut().find(|g| g.venue_name == name) {
            Some(group) => group.shows.push(show),
            None => groups.push(VenueGroup {
                venue_name: name,
                city,
                shows: vec![show],
            }),
        }
    }
    groups
}

/// 12-часовой формат времени сеанса: "7:30 PM".
pub fn format_show_time(time: NaiveTime) -> String {
    use chrono::Timelike;
    let hour = time.hour();
    let ampm = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, time.minute(), ampm)
}

// --- Экраны каталога ---

pub async fn browse_movies(app: &App, term: &mut Term) -> anyhow::Result<()> {
    // Обе витрины запрашиваются параллельно
    let (now_showing, coming_soon) =
        futures::try_join!(app.api.now_showing(), app.api.coming_soon())?;

    println!("\n--- Now Showing ---");
    print_movies(&now_showing);
    println!("\n--- Coming Soon ---");
    print_movies(&coming_soon);

    let input = term
        .prompt_optional("Movie id to book, or \"search <title>\" (empty to go back): ")
        .await?;
    let Some(input) = input else {
        return Ok(());
    };

    let id = if let Some(query) = input.strip_prefix("search ") {
        let found = app.api.search_movies(query.trim()).await?;
        if found.is_empty() {
            println!("Nothing found for \"{}\".", query.trim());
            return Ok(());
        }
        print_movies(&found);
        let picked = term
            .prompt_optional("Movie id to book (empty to go back): ")
            .await?;
        match picked.and_then(|s| s.parse::<i64>().ok()) {
            Some(id) => id,
            None => return Ok(()),
        }
    } else {
        match input.parse::<i64>() {
            Ok(id) => id,
            Err(_) => {
                println!("Unknown option.");
                return Ok(());
            }
        }
    };

    let movie = app.api.movie(id).await?;
    println!(
        "\n{} | {} | {} min | {}",
        movie.title, movie.genre, movie.duration_minutes, movie.language
    );
    if let Some(description) = &movie.description {
        println!("{}", description);
    }

    select_show(app, term, Target::Movie(movie)).await
}

pub async fn browse_events(app: &App, term: &mut Term) -> anyhow::Result<()> {
    let events = app.api.upcoming_events().await?;
    if events.is_empty() {
        println!("No upcoming events.");
        return Ok(());
    }
    for event in &events {
        println!(
            "  #{} {} [{}] {} min, {}",
            event.id,
            event.title,
            event.category,
            event.duration_minutes,
            event.language
        );
    }

    let input = term
        .prompt_optional("Event id to book (empty to go back): ")
        .await?;
    let Some(id) = input.and_then(|s| s.parse::<i64>().ok()) else {
        return Ok(());
    };

    let event = app.api.event(id).await?;
    select_show(app, term, Target::Event(event)).await
}

fn print_movies(movies: &[Movie]) {
    if movies.is_empty() {
        println!("  (nothing here)");
        return;
    }
    for movie in movies {
        println!(
            "  #{} {} [{}] {} min, {}",
            movie.id, movie.title, movie.genre, movie.duration_minutes, movie.language
        );
    }
}

enum Target {
    Movie(Movie),
    Event(Event),
}

/// Выбор даты и сеанса. Каждая смена даты - новый запрос, ничего
/// не кешируется.
async fn select_show(app: &App, term: &mut Term, target: Target) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let dates = match &target {
        Target::Movie(movie) => match app.api.movie_show_dates(movie.id).await {
            Ok(dates) => dates,
            Err(e) => {
                warn!("Dates endpoint failed ({}), falling back to a generated week", e);
                generate_dates(today, false)
            }
        },
        Target::Event(event) => match app.api.event_show_dates(event.id).await {
            Ok(dates) => dates,
            Err(e) => {
                warn!("Dates endpoint failed ({}), falling back to a generated month", e);
                generate_dates(today, true)
            }
        },
    };

    if dates.is_empty() {
        println!("No shows scheduled. Please check back later.");
        return Ok(());
    }

    println!("\nAvailable dates:");
    for (index, date) in dates.iter().enumerate() {
        println!("  {}) {}", index + 1, date.format("%a, %d %b %Y"));
    }
    let picked = term.prompt("Pick a date: ").await?;
    let date = match picked
        .parse::<usize>()
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| dates.get(i))
    {
        Some(date) => *date,
        None => {
            println!("No such date.");
            return Ok(());
        }
    };

    let shows = match &target {
        Target::Movie(movie) => app
            .api
            .shows_for_movie(movie.id, date)
            .await?
            .into_iter()
            .map(ShowChoice::Regular)
            .collect(),
        Target::Event(event) => merge_event_shows(app.api.shows_for_event(event.id, date).await?),
    };
    let shows = filter_past(shows, Local::now().naive_local());

    if shows.is_empty() {
        println!("No shows available for this date. Please try another date.");
        return Ok(());
    }

    let groups = group_by_venue(shows);
    let mut flat: Vec<&ShowChoice> = Vec::new();
    for group in &groups {
        if group.city.is_empty() {
            println!("\n{}", group.venue_name);
        } else {
            println!("\n{} — {}", group.venue_name, group.city);
        }
        for show in &group.shows {
            flat.push(show);
            let tag = match show {
                ShowChoice::Regular(_) => "",
                ShowChoice::Open(_) => " (zones)",
            };
            println!(
                "  {}) {} from {}{}",
                flat.len(),
                format_show_time(show.show_time()),
                money(show.base_price()),
                tag
            );
        }
    }
    let picked = term.prompt("Pick a show: ").await?;
    let choice = match picked
        .parse::<usize>()
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| flat.get(i))
    {
        Some(choice) => (*choice).clone(),
        None => {
            println!("No such show.");
            return Ok(());
        }
    };

    let booking_target = match choice {
        ShowChoice::Regular(show) => BookingTarget::Show(show.show_id),
        ShowChoice::Open(show) => BookingTarget::OpenShow(show.open_show_id),
    };
    booking::run(app, term, booking_target).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricingZone;

    fn regular(id: i64, venue: &str, city: &str, date: NaiveDate, time: NaiveTime) -> ShowChoice {
        ShowChoice::Regular(Show {
            show_id: id,
            movie: None,
            event: None,
            venue: Some(crate::models::Venue {
                venue_id: 1,
                venue_name: venue.to_string(),
                address: String::new(),
                city: city.to_string(),
                state: None,
                pincode: None,
                total_screens: 1,
                facilities: None,
                screens: None,
                is_active: true,
            }),
            screen: None,
            show_date: date,
            show_time: time,
            base_price: 200.0,
            pricing_tiers: None,
            total_seats: 100,
            available_seats: 50,
            is_active: true,
        })
    }

    fn open(id: i64, date: NaiveDate, time: NaiveTime, prices: &[f64]) -> OpenEventShow {
        OpenEventShow {
            open_show_id: id,
            event: None,
            show_date: date,
            show_time: time,
            pricing_zones: prices
                .iter()
                .enumerate()
                .map(|(i, p)| PricingZone {
                    name: format!("Z{}", i),
                    price: *p,
                    capacity: 100,
                    available_capacity: None,
                })
                .collect(),
            total_capacity: 100,
            available_capacity: 100,
            is_active: true,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn merge_combines_both_show_kinds() {
        let merged = merge_event_shows(EventShows {
            regular_shows: vec![match regular(1, "V", "C", date(2026, 9, 1), time(18, 0)) {
                ShowChoice::Regular(s) => s,
                _ => unreachable!(),
            }],
            open_event_shows: vec![open(2, date(2026, 9, 1), time(20, 0), &[500.0, 300.0])],
        });
        assert_eq!(merged.len(), 2);
        // базовая цена открытого сеанса - минимум по зонам
        assert_eq!(merged[1].base_price(), 300.0);
    }

    #[test]
    fn past_shows_are_filtered_out() {
        let now = date(2026, 9, 1).and_time(time(19, 0));
        let shows = vec![
            regular(1, "V", "C", date(2026, 9, 1), time(18, 0)), // уже идёт
            regular(2, "V", "C", date(2026, 9, 1), time(21, 0)),
            regular(3, "V", "C", date(2026, 9, 2), time(10, 0)),
        ];
        let left = filter_past(shows, now);
        let ids: Vec<i64> = left
            .iter()
            .map(|s| match s {
                ShowChoice::Regular(s) => s.show_id,
                ShowChoice::Open(s) => s.open_show_id,
            })
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn generated_window_is_seven_or_thirty_days() {
        let today = date(2026, 9, 1);
        assert_eq!(generate_dates(today, false).len(), 7);
        assert_eq!(generate_dates(today, true).len(), 30);
        assert_eq!(generate_dates(today, false)[0], today);
    }

    #[test]
    fn grouping_keeps_venues_together_and_opens_separate() {
        let shows = vec![
            regular(1, "PVR", "Chennai", date(2026, 9, 1), time(18, 0)),
            ShowChoice::Open(open(5, date(2026, 9, 1), time(20, 0), &[400.0])),
            regular(2, "PVR", "Chennai", date(2026, 9, 1), time(21, 0)),
        ];
        let groups = group_by_venue(shows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].venue_name, "PVR");
        assert_eq!(groups[0].shows.len(), 2);
        assert_eq!(groups[1].venue_name, "Open Ground");
    }

    #[test]
    fn show_time_is_twelve_hour() {
        assert_eq!(format_show_time(time(19, 30)), "7:30 PM");
        assert_eq!(format_show_time(time(0, 5)), "12:05 AM");
        assert_eq!(format_show_time(time(12, 0)), "12:00 PM");
        assert_eq!(format_show_time(time(9, 15)), "9:15 AM");
    }
}
