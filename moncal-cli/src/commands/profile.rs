use anyhow::Result;
use moncal_core::config::MoncalConfig;
use moncal_core::profile::{Profile, ProfileClient, parse_hex_color};
use moncal_core::session::Session;
use owo_colors::OwoColorize;

pub async fn run(
    session: Session,
    first_name: Option<String>,
    username: Option<String>,
    color: Option<String>,
) -> Result<()> {
    let config = MoncalConfig::load()?;
    let client = ProfileClient::new(&config, &session);

    let mut profile = client
        .fetch_profile(&session.user_id)
        .await
        .unwrap_or_default();

    let updating = first_name.is_some() || username.is_some() || color.is_some();

    if let Some(name) = first_name {
        if name.trim().is_empty() {
            anyhow::bail!("First name must not be empty");
        }
        profile.first_name = name.trim().to_string();
    }
    if let Some(username) = username {
        profile.username = if username.is_empty() { None } else { Some(username) };
    }
    if let Some(color) = color {
        if parse_hex_color(&color).is_none() {
            anyhow::bail!("Invalid color '{}'. Expected \"#RRGGBB\"", color);
        }
        profile.color = color;
    }

    if updating && !client.upsert_profile(&session.user_id, &profile).await {
        anyhow::bail!("Profile could not be saved");
    }

    if updating {
        println!("{}\n", "  Profile saved".green());
    }

    let (r, g, b) = profile.rgb();
    println!("  Email:      {}", session.email);
    println!("  First name: {}", profile.first_name);
    if let Some(username) = &profile.username {
        println!("  Username:   {username}");
    }
    println!("  Color:      {} {}", profile.color, "●".truecolor(r, g, b));

    Ok(())
}
