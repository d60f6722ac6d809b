use chrono::{NaiveDate, NaiveTime};
use validator::{Validate, ValidationError};

use crate::api::admin::{ShowUpsert, ZoneSpec};
use crate::views::{money, validation_messages, Term};
use crate::App;

/// Форма сеанса. Условные требования повторяют оригинал: тип выбирает
/// между фильмом и мероприятием, открытая площадка меняет зал и цену
/// на набор зон.
#[derive(Debug, Validate)]
#[validate(schema(function = validate_show_form))]
pub struct ShowForm {
    pub show_type: String, // movie | event
    pub movie_id: Option<i64>,
    pub event_id: Option<i64>,
    pub open_ground: bool,
    pub venue_id: Option<i64>,
    pub screen_id: Option<i64>,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    pub price: f64,
    pub zones: Vec<ZoneSpec>,
}

fn validate_show_form(form: &ShowForm) -> Result<(), ValidationError> {
    match form.show_type.as_str() {
        "movie" => {
            if form.movie_id.is_none() {
                return Err(ValidationError::new("movie_id")
                    .with_message("A movie must be selected".into()));
            }
        }
        "event" => {
            if form.event_id.is_none() {
                return Err(ValidationError::new("event_id")
                    .with_message("An event must be selected".into()));
            }
        }
        _ => {
            return Err(
                ValidationError::new("show_type").with_message("Show type is required".into())
            )
        }
    }

    if form.open_ground {
        if form.zones.is_empty() {
            return Err(ValidationError::new("zones")
                .with_message("Open-ground shows need at least one pricing zone".into()));
        }
    } else {
        if form.venue_id.is_none() || form.screen_id.is_none() {
            return Err(ValidationError::new("venue")
                .with_message("Venue and screen are required".into()));
        }
        if form.price < 0.0 {
            return Err(
                ValidationError::new("price").with_message("Price cannot be negative".into())
            );
        }
    }
    Ok(())
}

impl ShowForm {
    /// Payload в формате бэкенда. Для открытых площадок базовая цена -
    /// цена первой зоны, залы обнуляются.
    pub fn into_upsert(self) -> ShowUpsert {
        let standard_price = if self.open_ground {
            self.zones.first().map(|z| z.price).unwrap_or(200.0)
        } else {
            self.price
        };
        ShowUpsert {
            show_type: self.show_type,
            movie_id: self.movie_id,
            event_id: self.event_id,
            venue_id: if self.open_ground { None } else { self.venue_id },
            screen_id: if self.open_ground { None } else { self.screen_id },
            show_date: self.show_date,
            show_time: self.show_time,
            is_open_ground: self.open_ground,
            pricing_zones: if self.open_ground {
                Some(self.zones)
            } else {
                None
            },
            standard_price,
            premium_price: if self.open_ground {
                None
            } else {
                Some(self.price)
            },
            vip_price: if self.open_ground { None } else { Some(self.price) },
        }
    }
}

/// Ссылка на сеанс в командах списка: обычный id или "open-<id>".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowRef {
    Regular(i64),
    Open(i64),
}

pub fn parse_show_ref(raw: &str) -> Option<ShowRef> {
    if let Some(rest) = raw.strip_prefix("open-") {
        return rest.parse().ok().map(ShowRef::Open);
    }
    raw.parse().ok().map(ShowRef::Regular)
}

/// Сводка по зонам для формы: общая ёмкость и разброс цен.
pub fn zone_stats(zones: &[ZoneSpec]) -> (i32, f64, f64, f64) {
    let capacity = zones.iter().map(|z| z.capacity).sum();
    if zones.is_empty() {
        return (capacity, 0.0, 0.0, 0.0);
    }
    let min = zones.iter().map(|z| z.price).fold(f64::INFINITY, f64::min);
    let max = zones.iter().map(|z| z.price).fold(0.0, f64::max);
    let avg = (zones.iter().map(|z| z.price).sum::<f64>() / zones.len() as f64).round();
    (capacity, min, max, avg)
}

pub async fn run(app: &App, term: &mut Term) -> anyhow::Result<()> {
    loop {
        let shows = app.api.admin_shows().await?;
        println!("\n--- Shows ---");
        for show in &shows {
            println!(
                "  #{} {} — {} {} at {}{}",
                show.show_id,
                show.title(),
                show.show_date,
                show.show_time.format("%H:%M"),
                show.venue
                    .as_ref()
                    .map(|v| v.venue_name.as_str())
                    .unwrap_or("Open Ground"),
                if show.is_active { "" } else { " [inactive]" }
            );
        }
        println!(
            "Commands: new | edit <id> | delete <id> | activate <id> | seats <id> | \
             open <id> | delopen <id> | back"
        );
        let input = term.prompt("shows> ").await?;
        let mut parts = input.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("back"), _) | (None, _) => return Ok(()),
            (Some("new"), _) => create(app, term).await?,
            (Some("edit"), Some(id)) => {
                if let Ok(id) = id.parse() {
                    edit(app, term, id).await?;
                }
            }
            (Some("open"), Some(id)) => {
                if let Ok(id) = id.parse() {
                    match app.api.admin_open_event_show(id).await {
                        Ok(show) => {
                            println!(
                                "Open show #{} — {} {} | capacity {}/{}",
                                show.open_show_id,
                                show.show_date,
                                show.show_time.format("%H:%M"),
                                show.available_capacity,
                                show.total_capacity
                            );
                            for zone in &show.pricing_zones {
                                println!(
                                    "  {} — {} × {}",
                                    zone.name,
                                    money(zone.price),
                                    zone.effective_capacity()
                                );
                            }
                        }
                        Err(e) => println!("Failed to load open show: {}", e),
                    }
                }
            }
            (Some("delopen"), Some(id)) => {
                if let Ok(id) = id.parse() {
                    if term.confirm("Delete this open-ground show?").await? {
                        match app.api.admin_delete_open_event_show(id).await {
                            Ok(_) => println!("Open show deleted."),
                            Err(e) => println!("Failed to delete open show: {}", e),
                        }
                    }
                }
            }
            // Идентификаторы вида "open-7" адресуют сеансы открытых площадок
            (Some("delete"), Some(id)) => {
                if term.confirm("Are you sure you want to delete this show?").await? {
                    let result = match parse_show_ref(id) {
                        Some(ShowRef::Open(id)) => app.api.soft_delete_open_event_show(id).await,
                        Some(ShowRef::Regular(id)) => app.api.soft_delete_show(id).await,
                        None => {
                            println!("Bad show id.");
                            continue;
                        }
                    };
                    match result {
                        Ok(_) => println!("Show deactivated."),
                        Err(e) => println!("Failed to delete show: {}", e),
                    }
                }
            }
            (Some("activate"), Some(id)) => {
                let result = match parse_show_ref(id) {
                    Some(ShowRef::Open(id)) => app.api.activate_open_event_show(id).await,
                    Some(ShowRef::Regular(id)) => app.api.activate_show(id).await,
                    None => {
                        println!("Bad show id.");
                        continue;
                    }
                };
                match result {
                    Ok(_) => println!("Show activated."),
                    Err(e) => println!("Failed to activate show: {}", e),
                }
            }
            (Some("seats"), Some(id)) => {
                if let Ok(id) = id.parse() {
                    match app.api.generate_seats(id).await {
                        Ok(message) => println!("{}", message),
                        Err(e) => println!("Failed to generate seats: {}", e),
                    }
                }
            }
            _ => println!("Unknown command."),
        }
    }
}

async fn create(app: &App, term: &mut Term) -> anyhow::Result<()> {
    let show_type = term.prompt("Show type (movie/event): ").await?;

    let (movie_id, event_id) = match show_type.as_str() {
        "movie" => {
            for movie in app.api.admin_movies().await? {
                println!("  #{} {}", movie.id, movie.title);
            }
            let id = term.prompt("Movie id: ").await?.parse().ok();
            (id, None)
        }
        "event" => {
            for event in app.api.admin_events().await? {
                println!("  #{} {}", event.id, event.title);
            }
            let id = term.prompt("Event id: ").await?.parse().ok();
            (None, id)
        }
        _ => (None, None),
    };

    let open_ground = term.confirm("Open ground (zones instead of seats)?").await?;

    let (venue_id, screen_id, price, zones) = if open_ground {
        let mut zones: Vec<ZoneSpec> = Vec::new();
        loop {
            let Some(name) = term.prompt_optional("Zone name (empty to finish): ").await? else {
                break;
            };
            let price: f64 = term
                .prompt_optional("Zone price [200]: ")
                .await?
                .and_then(|s| s.parse().ok())
                .unwrap_or(200.0);
            let capacity: i32 = term
                .prompt_optional("Zone capacity [100]: ")
                .await?
                .and_then(|s| s.parse().ok())
                .unwrap_or(100);
            zones.push(ZoneSpec {
                name,
                price,
                capacity,
            });

            let (capacity, min, max, avg) = zone_stats(&zones);
            println!(
                "  {} zone(s), capacity {}, prices {}–{} (avg {})",
                zones.len(),
                capacity,
                money(min),
                money(max),
                money(avg)
            );
        }
        (None, None, 0.0, zones)
    } else {
        for venue in app.api.admin_venues().await? {
            println!("  #{} {} — {}", venue.venue_id, venue.venue_name, venue.city);
        }
        let venue_id = term.prompt("Venue id: ").await?.parse().ok();
        let screen_id = term.prompt("Screen id: ").await?.parse().ok();
        let price: f64 = term
            .prompt_optional("Base price [200]: ")
            .await?
            .and_then(|s| s.parse().ok())
            .unwrap_or(200.0);
        (venue_id, screen_id, price, Vec::new())
    };

    let show_date = match term.prompt("Date (YYYY-MM-DD): ").await?.parse() {
        Ok(date) => date,
        Err(_) => {
            println!("Invalid date.");
            return Ok(());
        }
    };
    let show_time = match NaiveTime::parse_from_str(&term.prompt("Time (HH:MM): ").await?, "%H:%M")
    {
        Ok(time) => time,
        Err(_) => {
            println!("Invalid time.");
            return Ok(());
        }
    };

    let form = ShowForm {
        show_type,
        movie_id,
        event_id,
        open_ground,
        venue_id,
        screen_id,
        show_date,
        show_time,
        price,
        zones,
    };
    if let Err(errors) = form.validate() {
        for message in validation_messages(&errors) {
            println!("  {}", message);
        }
        return Ok(());
    }

    match app.api.admin_create_show(&form.into_upsert()).await {
        Ok(_) => println!("Show scheduled."),
        Err(e) => println!("Failed to create show: {}", e),
    }
    Ok(())
}

/// Перенос сеанса: привязки к фильму/залу не трогаем, меняются только
/// дата, время и цена.
async fn edit(app: &App, term: &mut Term, id: i64) -> anyhow::Result<()> {
    let show = app.api.admin_show(id).await?;
    println!(
        "Editing #{} {} — {} {} (empty input keeps current value)",
        show.show_id,
        show.title(),
        show.show_date,
        show.show_time.format("%H:%M")
    );

    let show_date = term
        .prompt_optional("Date (YYYY-MM-DD): ")
        .await?
        .and_then(|s| s.parse().ok())
        .unwrap_or(show.show_date);
    let show_time = term
        .prompt_optional("Time (HH:MM): ")
        .await?
        .and_then(|s| NaiveTime::parse_from_str(&s, "%H:%M").ok())
        .unwrap_or(show.show_time);
    let price = term
        .prompt_optional("Base price: ")
        .await?
        .and_then(|s| s.parse().ok())
        .unwrap_or(show.base_price);

    let upsert = ShowUpsert {
        show_type: if show.movie.is_some() { "movie" } else { "event" }.to_string(),
        movie_id: show.movie.as_ref().map(|m| m.id),
        event_id: show.event.as_ref().map(|e| e.id),
        venue_id: show.venue.as_ref().map(|v| v.venue_id),
        screen_id: show.screen.as_ref().and_then(|s| s.screen_id),
        show_date,
        show_time,
        is_open_ground: show.venue.is_none(),
        pricing_zones: None,
        standard_price: price,
        premium_price: Some(price),
        vip_price: Some(price),
    };
    match app.api.admin_update_show(id, &upsert).await {
        Ok(_) => println!("Show updated."),
        Err(e) => println!("Failed to update show: {}", e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> ShowForm {
        ShowForm {
            show_type: "movie".into(),
            movie_id: Some(1),
            event_id: None,
            open_ground: false,
            venue_id: Some(2),
            screen_id: Some(3),
            show_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            show_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            price: 200.0,
            zones: Vec::new(),
        }
    }

    #[test]
    fn movie_show_requires_movie_id() {
        let mut form = base_form();
        form.movie_id = None;
        assert!(form.validate().is_err());
        form.movie_id = Some(5);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn event_show_requires_event_id() {
        let mut form = base_form();
        form.show_type = "event".into();
        assert!(form.validate().is_err());
        form.event_id = Some(9);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn regular_show_requires_venue_and_screen() {
        let mut form = base_form();
        form.screen_id = None;
        assert!(form.validate().is_err());
    }

    #[test]
    fn open_ground_requires_zones_and_ignores_venue() {
        let mut form = base_form();
        form.open_ground = true;
        form.venue_id = None;
        form.screen_id = None;
        assert!(form.validate().is_err());

        form.zones.push(ZoneSpec {
            name: "VIP".into(),
            price: 1500.0,
            capacity: 50,
        });
        assert!(form.validate().is_ok());

        let upsert = form.into_upsert();
        assert!(upsert.is_open_ground);
        assert_eq!(upsert.venue_id, None);
        assert_eq!(upsert.standard_price, 1500.0); // цена первой зоны
        assert!(upsert.premium_price.is_none());
    }

    #[test]
    fn regular_upsert_mirrors_price_into_tiers() {
        let upsert = base_form().into_upsert();
        assert_eq!(upsert.standard_price, 200.0);
        assert_eq!(upsert.premium_price, Some(200.0));
        assert_eq!(upsert.vip_price, Some(200.0));
    }

    #[test]
    fn show_refs_parse_both_kinds() {
        assert_eq!(parse_show_ref("15"), Some(ShowRef::Regular(15)));
        assert_eq!(parse_show_ref("open-7"), Some(ShowRef::Open(7)));
        assert_eq!(parse_show_ref("open-"), None);
        assert_eq!(parse_show_ref("abc"), None);
    }

    #[test]
    fn zone_stats_summarize() {
        let zones = vec![
            ZoneSpec {
                name: "VIP".into(),
                price: 1500.0,
                capacity: 50,
            },
            ZoneSpec {
                name: "Gold".into(),
                price: 700.0,
                capacity: 150,
            },
        ];
        let (capacity, min, max, avg) = zone_stats(&zones);
        assert_eq!(capacity, 200);
        assert_eq!(min, 700.0);
        assert_eq!(max, 1500.0);
        assert_eq!(avg, 1100.0);
    }
}
