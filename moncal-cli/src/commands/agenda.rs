use anyhow::Result;
use chrono::Local;
use moncal_core::config::MoncalConfig;
use moncal_core::controller::EventController;
use moncal_core::grid::MonthView;
use moncal_core::grouping::CalendarDay;
use moncal_core::profile::ProfileClient;
use moncal_core::session::Session;
use moncal_core::store::RemoteStore;
use owo_colors::OwoColorize;

use super::{parse_month_arg, reload_spinner};
use crate::render::render_agenda;

pub async fn run(session: Session, month: Option<String>) -> Result<()> {
    let config = MoncalConfig::load()?;
    let today = Local::now().date_naive();

    let view = match month {
        Some(s) => MonthView::new(parse_month_arg(&s)?),
        None => MonthView::new(today),
    };

    let store = RemoteStore::new(&config, &session);
    let mut controller = EventController::new(store, &session.user_id);

    let spinner = reload_spinner();
    controller.reload().await?;
    let profile = ProfileClient::new(&config, &session)
        .fetch_profile(&session.user_id)
        .await
        .unwrap_or_default();
    spinner.finish_and_clear();

    let month_days: Vec<CalendarDay> = controller
        .days()
        .iter()
        .filter(|d| view.contains(d.day))
        .cloned()
        .collect();

    println!("{}\n", view.reference().format("%B %Y").to_string().bold());

    if month_days.is_empty() {
        println!("{}", "No events this month".dimmed());
        return Ok(());
    }

    println!("{}", render_agenda(&month_days, today, profile.rgb()));

    Ok(())
}
