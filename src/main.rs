use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use revtickets_client::{
    config::Config,
    views::{self, Term},
    App,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting RevTickets terminal client");

    let app = App::new(config)?;
    let mut term = Term::new();

    if let Some(user) = app.session.current_user() {
        println!("Welcome back, {}!", user.name);
    }

    loop {
        println!();
        println!("=== RevTickets ===");
        println!("  1) Movies");
        println!("  2) Events");
        println!("  3) My bookings");
        println!("  4) Profile");
        if app.session.is_authenticated() {
            println!("  5) Logout");
        } else {
            println!("  5) Login");
            println!("  6) Register");
        }
        if app.session.is_admin() {
            println!("  9) Admin back-office");
        }
        println!("  0) Exit");

        let choice = match term.prompt("> ").await {
            Ok(choice) => choice,
            Err(_) => break, // stdin закрыт
        };

        // Любая ошибка экрана локальна: печатаем и возвращаемся в меню
        let result = match choice.as_str() {
            "1" => views::catalog::browse_movies(&app, &mut term).await,
            "2" => views::catalog::browse_events(&app, &mut term).await,
            "3" => views::account::my_bookings(&app).await,
            "4" => views::account::profile(&app).await,
            "5" => {
                if app.session.is_authenticated() {
                    app.session.logout();
                    println!("Logged out.");
                    Ok(())
                } else {
                    views::account::login(&app, &mut term).await
                }
            }
            "6" if !app.session.is_authenticated() => {
                views::account::register(&app, &mut term).await
            }
            "9" if app.session.is_admin() => views::admin::back_office(&app, &mut term).await,
            "0" => break,
            _ => {
                println!("Unknown option.");
                Ok(())
            }
        };

        if let Err(e) = result {
            error!("Screen error: {:#}", e);
            println!("Error: {}", e);
        }
    }

    println!("Goodbye!");
    Ok(())
}
