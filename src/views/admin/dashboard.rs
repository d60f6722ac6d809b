use crate::views::money;
use crate::App;

pub async fn show(app: &App) -> anyhow::Result<()> {
    let stats = app.api.dashboard_stats().await?;

    println!("\n--- Dashboard ---");
    println!("  Users:    {}", stats.total_users);
    println!("  Movies:   {}", stats.total_movies);
    println!("  Bookings: {}", stats.total_bookings);
    println!("  Revenue:  {}", money(stats.total_revenue));
    println!(
        "  By status: {} confirmed / {} pending / {} cancelled",
        stats.bookings_by_status.confirmed,
        stats.bookings_by_status.pending,
        stats.bookings_by_status.cancelled
    );
    Ok(())
}
