use validator::Validate;

use crate::api::admin::VenueUpsert;
use crate::models::{Screen, SeatLayoutConfig};
use crate::views::{validation_messages, Term};
use crate::App;

#[derive(Debug, Validate)]
pub struct VenueForm {
    #[validate(length(min = 1, message = "Venue name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
}

pub async fn run(app: &App, term: &mut Term) -> anyhow::Result<()> {
    loop {
        let venues = app.api.admin_venues().await?;
        println!("\n--- Venues ---");
        for venue in &venues {
            println!(
                "  #{} {} — {} ({} screen(s)){}",
                venue.venue_id,
                venue.venue_name,
                venue.city,
                venue.total_screens,
                if venue.is_active { "" } else { " [inactive]" }
            );
        }
        println!("Commands: new | edit <id> | delete <id> | back");
        let input = term.prompt("venues> ").await?;
        let mut parts = input.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("back"), _) | (None, _) => return Ok(()),
            (Some("new"), _) => create(app, term).await?,
            (Some("edit"), Some(id)) => {
                if let Ok(id) = id.parse() {
                    edit(app, term, id).await?;
                }
            }
            (Some("delete"), Some(id)) => {
                if let Ok(id) = id.parse::<i64>() {
                    if term.confirm("Are you sure you want to delete this venue?").await? {
                        match app.api.admin_delete_venue(id).await {
                            Ok(_) => println!("Venue deleted."),
                            Err(e) => println!("Failed to delete venue: {}", e),
                        }
                    }
                }
            }
            _ => println!("Unknown command."),
        }
    }
}

async fn create(app: &App, term: &mut Term) -> anyhow::Result<()> {
    let Some(request) = venue_form(app, term, None).await? else {
        return Ok(());
    };
    match app.api.admin_create_venue(&request).await {
        Ok(venue) => println!("Venue #{} created.", venue.venue_id),
        Err(e) => println!("Failed to create venue: {}", e),
    }
    Ok(())
}

async fn edit(app: &App, term: &mut Term, id: i64) -> anyhow::Result<()> {
    let existing = app.api.admin_venue(id).await?;
    println!("Editing #{} {} (empty input keeps current value)", id, existing.venue_name);
    let Some(request) = venue_form(app, term, Some(&existing)).await? else {
        return Ok(());
    };
    match app.api.admin_update_venue(id, &request).await {
        Ok(_) => println!("Venue updated."),
        Err(e) => println!("Failed to update venue: {}", e),
    }
    Ok(())
}

async fn venue_form(
    _app: &App,
    term: &mut Term,
    existing: Option<&crate::models::Venue>,
) -> anyhow::Result<Option<VenueUpsert>> {
    let keep = |current: Option<String>, entered: String| {
        if entered.is_empty() {
            current.unwrap_or_default()
        } else {
            entered
        }
    };

    let form = VenueForm {
        name: keep(
            existing.map(|v| v.venue_name.clone()),
            term.prompt("Name: ").await?,
        ),
        address: keep(
            existing.map(|v| v.address.clone()),
            term.prompt("Address: ").await?,
        ),
        city: keep(
            existing.map(|v| v.city.clone()),
            term.prompt("City: ").await?,
        ),
    };
    if let Err(errors) = form.validate() {
        for message in validation_messages(&errors) {
            println!("  {}", message);
        }
        return Ok(None);
    }

    // Залы: существующие сохраняются, новые добираются интерактивно
    let mut screens: Vec<Screen> = existing
        .and_then(|v| v.screens.clone())
        .unwrap_or_default();
    while term.confirm("Add a screen?").await? {
        let number = screens.len() as i32 + 1;
        let screen_type = term
            .prompt_optional("Screen type [2D]: ")
            .await?
            .unwrap_or_else(|| "2D".to_string());
        let sound_system = term
            .prompt_optional("Sound system [Dolby Atmos]: ")
            .await?
            .unwrap_or_else(|| "Dolby Atmos".to_string());
        let layout = author_seat_layout(term).await?;
        screens.push(Screen {
            screen_id: None,
            screen_number: number,
            screen_type,
            sound_system,
            total_seats: layout.total_seats as i32,
            seat_layout: Some(layout),
            is_active: true,
        });
    }

    Ok(Some(VenueUpsert {
        name: form.name,
        address: form.address,
        city: form.city,
        total_screens: screens.len(),
        screens,
    }))
}

/// Редактор схемы зала: ряды × мест в ряду, плюс выключенные места.
async fn author_seat_layout(term: &mut Term) -> anyhow::Result<SeatLayoutConfig> {
    let rows: usize = term
        .prompt_optional("Rows [10]: ")
        .await?
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);
    let per_row: u32 = term
        .prompt_optional("Seats per row [10]: ")
        .await?
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);

    let mut layout = default_layout(rows, per_row);

    if let Some(disabled) = term
        .prompt_optional("Disabled seats (comma separated, e.g. A1,B2): ")
        .await?
    {
        layout.disabled_seats = disabled
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        layout.recompute_total();
    }
    Ok(layout)
}

/// Сетка по умолчанию: ряды A, B, C... по `per_row` мест.
pub fn default_layout(rows: usize, per_row: u32) -> SeatLayoutConfig {
    let labels: Vec<String> = (0..rows).map(row_label).collect();
    let mut layout = SeatLayoutConfig {
        seats_per_row: labels.iter().map(|l| (l.clone(), per_row)).collect(),
        rows: labels,
        ..Default::default()
    };
    layout.recompute_total();
    layout
}

/// 0 -> A, 25 -> Z, 26 -> AA - как колонки в таблицах.
pub fn row_label(index: usize) -> String {
    let mut index = index;
    let mut label = String::new();
    loop {
        label.insert(0, (b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_labels_extend_past_z() {
        assert_eq!(row_label(0), "A");
        assert_eq!(row_label(9), "J");
        assert_eq!(row_label(25), "Z");
        assert_eq!(row_label(26), "AA");
        assert_eq!(row_label(27), "AB");
    }

    #[test]
    fn default_layout_counts_seats() {
        let layout = default_layout(10, 10);
        assert_eq!(layout.rows.len(), 10);
        assert_eq!(layout.total_seats, 100);
        assert_eq!(layout.seats_per_row.get("A"), Some(&10));
    }

    #[test]
    fn disabled_seats_reduce_total() {
        let mut layout = default_layout(2, 5);
        layout.disabled_seats = vec!["A1".into(), "B5".into()];
        layout.recompute_total();
        assert_eq!(layout.total_seats, 8);
    }

    #[test]
    fn venue_form_requires_all_fields() {
        let form = VenueForm {
            name: String::new(),
            address: "addr".into(),
            city: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(crate::views::validation_messages(&errors).len(), 2);
    }
}
