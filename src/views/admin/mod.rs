//! Админские экраны. Доступ закрыт ролью ADMIN; каждый экран - это
//! список/форма поверх соответствующего /admin/* эндпоинта.

pub mod bookings;
pub mod catalog;
pub mod dashboard;
pub mod shows;
pub mod users;
pub mod venues;

use crate::App;

use super::Term;

pub async fn back_office(app: &App, term: &mut Term) -> anyhow::Result<()> {
    // Навигация закрыта ролью, сами эндпоинты дополнительно закрыты бэкендом
    if !app.session.is_admin() {
        println!("Admin access required.");
        return Ok(());
    }

    loop {
        println!("\n=== Admin back-office ===");
        println!("  1) Dashboard");
        println!("  2) Movies");
        println!("  3) Events");
        println!("  4) Venues");
        println!("  5) Shows");
        println!("  6) Users");
        println!("  7) Bookings");
        println!("  0) Back");

        let choice = term.prompt("admin> ").await?;
        let result = match choice.as_str() {
            "1" => dashboard::show(app).await,
            "2" => catalog::movies(app, term).await,
            "3" => catalog::events(app, term).await,
            "4" => venues::run(app, term).await,
            "5" => shows::run(app, term).await,
            "6" => users::list(app).await,
            "7" => bookings::list(app).await,
            "0" => return Ok(()),
            _ => {
                println!("Unknown option.");
                Ok(())
            }
        };
        if let Err(e) = result {
            println!("Error: {}", e);
        }
    }
}
