use chrono::{NaiveDate, NaiveTime};
use validator::Validate;

use crate::api::admin::{EventUpsert, MovieUpsert};
use crate::views::{validation_messages, Term};
use crate::App;

#[derive(Debug, Validate)]
pub struct MovieForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Genre is required"))]
    pub genre: String,
    #[validate(length(min = 1, message = "Language is required"))]
    pub language: String,
    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub duration_minutes: i32,
}

#[derive(Debug, Validate)]
pub struct EventForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "Language is required"))]
    pub language: String,
    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub duration_minutes: i32,
}

pub async fn movies(app: &App, term: &mut Term) -> anyhow::Result<()> {
    loop {
        let movies = app.api.admin_movies().await?;
        println!("\n--- Movies ---");
        for movie in &movies {
            println!(
                "  #{} {} [{}]{}",
                movie.id,
                movie.title,
                movie.genre,
                if movie.is_active { "" } else { " [inactive]" }
            );
        }
        println!("Commands: new | edit <id> | delete <id> | activate <id> | back");
        let input = term.prompt("movies> ").await?;
        let mut parts = input.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("back"), _) | (None, _) => return Ok(()),
            (Some("new"), _) => create_movie(app, term).await?,
            (Some("edit"), Some(id)) => {
                if let Ok(id) = id.parse() {
                    edit_movie(app, term, id).await?;
                }
            }
            (Some("delete"), Some(id)) => {
                if let Ok(id) = id.parse() {
                    if term.confirm("Delete this movie?").await? {
                        match app.api.admin_delete_movie(id).await {
                            Ok(_) => println!("Movie deactivated."),
                            Err(e) => println!("Failed to delete movie: {}", e),
                        }
                    }
                }
            }
            (Some("activate"), Some(id)) => {
                if let Ok(id) = id.parse() {
                    match app.api.admin_activate_movie(id).await {
                        Ok(_) => println!("Movie activated."),
                        Err(e) => println!("Failed to activate movie: {}", e),
                    }
                }
            }
            _ => println!("Unknown command."),
        }
    }
}

async fn create_movie(app: &App, term: &mut Term) -> anyhow::Result<()> {
    let form = MovieForm {
        title: term.prompt("Title: ").await?,
        genre: term.prompt("Genre: ").await?,
        language: term.prompt("Language: ").await?,
        duration_minutes: term
            .prompt("Duration (minutes): ")
            .await?
            .parse()
            .unwrap_or(0),
    };
    if let Err(errors) = form.validate() {
        for message in validation_messages(&errors) {
            println!("  {}", message);
        }
        return Ok(());
    }

    let release_date: Option<NaiveDate> = term
        .prompt_optional("Release date (YYYY-MM-DD, optional): ")
        .await?
        .and_then(|s| s.parse().ok());

    let request = MovieUpsert {
        title: form.title,
        description: term.prompt("Description: ").await?,
        genre: form.genre,
        language: form.language,
        duration_minutes: form.duration_minutes,
        parental_rating: term.prompt_optional("Parental rating (optional): ").await?,
        release_date,
        // Терминальному клиенту файлы не загрузить - изображения ссылками
        display_image_url: term.prompt_optional("Poster URL (optional): ").await?,
        banner_image_url: None,
        cast: term.prompt_optional("Cast (optional): ").await?,
        crew: None,
        trailer_url: None,
    };
    match app.api.admin_create_movie(&request).await {
        Ok(movie) => println!("Movie #{} created.", movie.id),
        Err(e) => println!("Failed to create movie: {}", e),
    }
    Ok(())
}

/// Правка существующего фильма: пустой ввод оставляет текущее значение.
async fn edit_movie(app: &App, term: &mut Term, id: i64) -> anyhow::Result<()> {
    let movie = app.api.admin_movie(id).await?;
    println!("Editing #{} {}", movie.id, movie.title);

    let keep = |current: String, entered: Option<String>| entered.unwrap_or(current);

    let request = MovieUpsert {
        title: keep(movie.title, term.prompt_optional("Title: ").await?),
        description: keep(
            movie.description.unwrap_or_default(),
            term.prompt_optional("Description: ").await?,
        ),
        genre: keep(movie.genre, term.prompt_optional("Genre: ").await?),
        language: keep(movie.language, term.prompt_optional("Language: ").await?),
        duration_minutes: term
            .prompt_optional("Duration (minutes): ")
            .await?
            .and_then(|s| s.parse().ok())
            .unwrap_or(movie.duration_minutes),
        parental_rating: movie.parental_rating,
        release_date: movie.release_date,
        display_image_url: term
            .prompt_optional("Poster URL: ")
            .await?
            .or(movie.display_image_url),
        banner_image_url: movie.banner_image_url,
        cast: movie.cast,
        crew: movie.crew,
        trailer_url: movie.trailer_url,
    };
    match app.api.admin_update_movie(id, &request).await {
        Ok(_) => println!("Movie updated."),
        Err(e) => println!("Failed to update movie: {}", e),
    }
    Ok(())
}

pub async fn events(app: &App, term: &mut Term) -> anyhow::Result<()> {
    loop {
        let events = app.api.admin_events().await?;
        println!("\n--- Events ---");
        for event in &events {
            println!(
                "  #{} {} [{}]{}",
                event.id,
                event.title,
                event.category,
                if event.is_active { "" } else { " [inactive]" }
            );
        }
        println!("Commands: new | edit <id> | delete <id> | activate <id> | back");
        let input = term.prompt("events> ").await?;
        let mut parts = input.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("back"), _) | (None, _) => return Ok(()),
            (Some("new"), _) => create_event(app, term).await?,
            (Some("edit"), Some(id)) => {
                if let Ok(id) = id.parse() {
                    edit_event(app, term, id).await?;
                }
            }
            (Some("delete"), Some(id)) => {
                if let Ok(id) = id.parse() {
                    if term.confirm("Delete this event?").await? {
                        match app.api.admin_delete_event(id).await {
                            Ok(_) => println!("Event deactivated."),
                            Err(e) => println!("Failed to delete event: {}", e),
                        }
                    }
                }
            }
            (Some("activate"), Some(id)) => {
                if let Ok(id) = id.parse() {
                    match app.api.admin_activate_event(id).await {
                        Ok(_) => println!("Event activated."),
                        Err(e) => println!("Failed to activate event: {}", e),
                    }
                }
            }
            _ => println!("Unknown command."),
        }
    }
}

async fn create_event(app: &App, term: &mut Term) -> anyhow::Result<()> {
    let form = EventForm {
        title: term.prompt("Title: ").await?,
        category: term.prompt("Category: ").await?,
        language: term.prompt("Language: ").await?,
        duration_minutes: term
            .prompt("Duration (minutes): ")
            .await?
            .parse()
            .unwrap_or(0),
    };
    if let Err(errors) = form.validate() {
        for message in validation_messages(&errors) {
            println!("  {}", message);
        }
        return Ok(());
    }

    let event_date: NaiveDate = match term.prompt("Event date (YYYY-MM-DD): ").await?.parse() {
        Ok(date) => date,
        Err(_) => {
            println!("Invalid date.");
            return Ok(());
        }
    };
    let event_time =
        match NaiveTime::parse_from_str(&term.prompt("Event time (HH:MM): ").await?, "%H:%M") {
            Ok(time) => time,
            Err(_) => {
                println!("Invalid time.");
                return Ok(());
            }
        };

    let request = EventUpsert {
        title: form.title,
        description: term.prompt("Description: ").await?,
        category: form.category,
        event_date,
        event_time,
        duration_minutes: form.duration_minutes,
        artist_or_team: term.prompt_optional("Artist/team (optional): ").await?,
        language: form.language,
        age_restriction: term.prompt_optional("Age restriction (optional): ").await?,
        display_image_url: term.prompt_optional("Poster URL (optional): ").await?,
        banner_image_url: None,
        trailer_url: None,
    };
    match app.api.admin_create_event(&request).await {
        Ok(event) => println!("Event #{} created.", event.id),
        Err(e) => println!("Failed to create event: {}", e),
    }
    Ok(())
}

/// Правка мероприятия: пустой ввод оставляет текущее значение.
async fn edit_event(app: &App, term: &mut Term, id: i64) -> anyhow::Result<()> {
    let event = app.api.admin_event(id).await?;
    println!("Editing #{} {}", event.id, event.title);

    let keep = |current: String, entered: Option<String>| entered.unwrap_or(current);

    let event_date = match event.event_date {
        Some(date) => term
            .prompt_optional("Event date (YYYY-MM-DD): ")
            .await?
            .and_then(|s| s.parse().ok())
            .unwrap_or(date),
        None => match term.prompt("Event date (YYYY-MM-DD): ").await?.parse() {
            Ok(date) => date,
            Err(_) => {
                println!("Invalid date.");
                return Ok(());
            }
        },
    };
    let event_time = match event.event_time {
        Some(time) => term
            .prompt_optional("Event time (HH:MM): ")
            .await?
            .and_then(|s| NaiveTime::parse_from_str(&s, "%H:%M").ok())
            .unwrap_or(time),
        None => match NaiveTime::parse_from_str(&term.prompt("Event time (HH:MM): ").await?, "%H:%M")
        {
            Ok(time) => time,
            Err(_) => {
                println!("Invalid time.");
                return Ok(());
            }
        },
    };

    let request = EventUpsert {
        title: keep(event.title, term.prompt_optional("Title: ").await?),
        description: keep(
            event.description.unwrap_or_default(),
            term.prompt_optional("Description: ").await?,
        ),
        category: keep(event.category, term.prompt_optional("Category: ").await?),
        event_date,
        event_time,
        duration_minutes: term
            .prompt_optional("Duration (minutes): ")
            .await?
            .and_then(|s| s.parse().ok())
            .unwrap_or(event.duration_minutes),
        artist_or_team: event.artist_or_team,
        language: keep(event.language, term.prompt_optional("Language: ").await?),
        age_restriction: event.age_restriction,
        display_image_url: event.display_image_url,
        banner_image_url: event.banner_image_url,
        trailer_url: event.trailer_url,
    };
    match app.api.admin_update_event(id, &request).await {
        Ok(_) => println!("Event updated."),
        Err(e) => println!("Failed to update event: {}", e),
    }
    Ok(())
}
