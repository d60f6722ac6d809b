use validator::{Validate, ValidationError};

use crate::models::{LoginRequest, RegisterRequest};
use crate::App;

use super::catalog::format_show_time;
use super::{money, validation_messages, Term};

/// Форма входа. Валидация срабатывает до любого сетевого вызова.
#[derive(Debug, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Valid email required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password required"))]
    pub password: String,
}

/// Форма регистрации: обязательное имя, email, 10-значный телефон,
/// пароль не короче 6 символов.
#[derive(Debug, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Valid email required"))]
    pub email: String,
    #[validate(custom(function = validate_phone))]
    pub phone: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message("Phone must be exactly 10 digits".into()))
    }
}

pub async fn login(app: &App, term: &mut Term) -> anyhow::Result<()> {
    let form = LoginForm {
        email: term.prompt("Email: ").await?,
        password: term.prompt("Password: ").await?,
    };
    if let Err(errors) = form.validate() {
        for message in validation_messages(&errors) {
            println!("  {}", message);
        }
        return Ok(());
    }

    let credentials = LoginRequest {
        email: form.email,
        password: form.password,
    };
    match app.session.login(&app.api, &credentials).await {
        Ok(auth) => {
            println!("Welcome, {}!", auth.user.name);
            if auth.user.is_admin() {
                println!("Admin back-office is available from the main menu.");
            }
        }
        Err(e) => println!("Invalid email or password ({})", e),
    }
    Ok(())
}

pub async fn register(app: &App, term: &mut Term) -> anyhow::Result<()> {
    let form = RegisterForm {
        full_name: term.prompt("Full name: ").await?,
        email: term.prompt("Email: ").await?,
        phone: term.prompt("Phone (10 digits): ").await?,
        password: term.prompt("Password: ").await?,
    };
    if let Err(errors) = form.validate() {
        for message in validation_messages(&errors) {
            println!("  {}", message);
        }
        return Ok(());
    }

    let request = RegisterRequest {
        email: form.email,
        password: form.password,
        full_name: form.full_name,
        phone: form.phone,
    };
    match app.session.register(&app.api, &request).await {
        Ok(auth) => println!("Account created. Welcome, {}!", auth.user.name),
        Err(e) => println!("Registration failed: {}", e),
    }
    Ok(())
}

pub async fn profile(app: &App) -> anyhow::Result<()> {
    if !app.session.is_authenticated() {
        println!("Please login first.");
        return Ok(());
    }
    // Профиль всегда перечитывается с бэкенда
    let user = app.api.profile().await?;
    println!("\n{} <{}>", user.name, user.email);
    if let Some(phone) = &user.phone {
        println!("Phone: {}", phone);
    }
    println!("Role: {}", user.role);
    Ok(())
}

pub async fn my_bookings(app: &App) -> anyhow::Result<()> {
    if !app.session.is_authenticated() {
        println!("Please login first.");
        return Ok(());
    }
    let bookings = app.api.my_bookings().await?;
    if bookings.is_empty() {
        println!("You have no bookings yet.");
        return Ok(());
    }

    println!("\n--- My Bookings ---");
    for booking in &bookings {
        println!(
            "\n{} — {} [{}]",
            booking.booking_reference,
            booking.title(),
            booking.booking_status
        );
        if let Some(show) = &booking.show {
            print!(
                "  {} {}",
                show.show_date.format("%d %b %Y"),
                format_show_time(show.show_time)
            );
            if let Some(venue) = &show.venue {
                print!(" @ {}, {}", venue.venue_name, venue.city);
            }
            println!();
        } else if let Some(open) = &booking.open_event_show {
            println!(
                "  {} {} @ Open Ground",
                open.show_date.format("%d %b %Y"),
                format_show_time(open.show_time)
            );
        }
        if let Some(seats) = &booking.seat_numbers {
            if !seats.is_empty() {
                println!("  Seats: {}", seats.join(", "));
            }
        }
        if let Some(zones) = &booking.zone_bookings {
            for zone in zones {
                println!(
                    "  {} × {} ({} each)",
                    zone.zone_name,
                    zone.quantity,
                    money(zone.price_per_ticket)
                );
            }
        }
        println!(
            "  Total {} | payment: {}",
            money(booking.total_amount),
            booking.payment_status.as_deref().unwrap_or("—")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_form_requires_valid_email_and_password() {
        let bad = LoginForm {
            email: "not-an-email".into(),
            password: String::new(),
        };
        let errors = bad.validate().unwrap_err();
        let messages = validation_messages(&errors);
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().any(|m| m.contains("Valid email required")));
        assert!(messages.iter().any(|m| m.contains("Password required")));

        let good = LoginForm {
            email: "user@example.com".into(),
            password: "secret".into(),
        };
        assert!(good.validate().is_ok());
    }

    #[test]
    fn register_form_checks_phone_and_password_length() {
        let form = RegisterForm {
            full_name: "Test User".into(),
            email: "user@example.com".into(),
            phone: "12345".into(),
            password: "123".into(),
        };
        let errors = form.validate().unwrap_err();
        let messages = validation_messages(&errors);
        assert!(messages.iter().any(|m| m.contains("10 digits")));
        assert!(messages.iter().any(|m| m.contains("at least 6")));

        let ok = RegisterForm {
            full_name: "Test User".into(),
            email: "user@example.com".into(),
            phone: "9876543210".into(),
            password: "secret".into(),
        };
        assert!(ok.validate().is_ok());
    }
}
