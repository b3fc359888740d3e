use anyhow::Result;
use chrono::Local;
use moncal_core::config::MoncalConfig;
use moncal_core::controller::EventController;
use moncal_core::event::NewEvent;
use moncal_core::session::Session;
use moncal_core::store::RemoteStore;
use owo_colors::OwoColorize;

use super::{parse_date_arg, reload_spinner};

pub async fn run(
    session: Session,
    name: String,
    date: Option<String>,
    half_day: bool,
) -> Result<()> {
    let config = MoncalConfig::load()?;

    let date = match date {
        Some(s) => parse_date_arg(&s)?,
        None => Local::now().date_naive(),
    };

    let time = if half_day { "Half Day" } else { "All Day" };

    // Midday anchor: the stored timestamp only exists for date-bucketing,
    // and noon keeps the date stable however the string is read back.
    let datetime = format!("{}T12:00:00", date.format("%Y-%m-%d"));

    let store = RemoteStore::new(&config, &session);
    let mut controller = EventController::new(store, &session.user_id);

    let spinner = reload_spinner();
    let created = controller
        .add_event(NewEvent::new(name.trim(), time, datetime))
        .await;
    spinner.finish_and_clear();

    let created = created?;

    println!(
        "{}",
        format!(
            "  Created: {} ({}, {})",
            created.name,
            date.format("%b %-d, %Y"),
            created.time
        )
        .green()
    );

    Ok(())
}
