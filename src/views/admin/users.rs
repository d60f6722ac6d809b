use crate::App;

pub async fn list(app: &App) -> anyhow::Result<()> {
    let users = app.api.admin_users().await?;
    println!("\n--- Users ---");
    for user in &users {
        println!(
            "  #{} {} <{}> {}{}",
            user.user_id,
            user.full_name,
            user.email,
            user.role,
            if user.is_active { "" } else { " [inactive]" }
        );
    }
    println!("{} user(s)", users.len());
    Ok(())
}
