use crate::views::money;
use crate::App;

pub async fn list(app: &App) -> anyhow::Result<()> {
    let bookings = app.api.admin_bookings().await?;
    println!("\n--- Bookings ---");
    for booking in &bookings {
        println!(
            "  {} — {} | {} | {} | payment: {}",
            booking.booking_reference,
            booking.title(),
            money(booking.total_amount),
            booking.booking_status,
            booking.payment_status.as_deref().unwrap_or("—")
        );
    }
    println!("{} booking(s)", bookings.len());
    Ok(())
}
