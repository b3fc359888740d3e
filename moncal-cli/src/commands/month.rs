use anyhow::Result;
use chrono::Local;
use moncal_core::config::MoncalConfig;
use moncal_core::controller::EventController;
use moncal_core::grid::{MonthView, month_grid};
use moncal_core::profile::ProfileClient;
use moncal_core::session::Session;
use moncal_core::store::RemoteStore;

use super::{parse_date_arg, parse_month_arg, reload_spinner};
use crate::render::render_month;

pub async fn run(
    session: Session,
    month: Option<String>,
    prev: bool,
    next: bool,
    select: Option<String>,
) -> Result<()> {
    let config = MoncalConfig::load()?;
    let today = Local::now().date_naive();

    let mut view = match month {
        Some(s) => MonthView::new(parse_month_arg(&s)?),
        None => MonthView::new(today),
    };
    if prev {
        view.previous_month();
    }
    if next {
        view.next_month();
    }

    let selected = select.as_deref().map(parse_date_arg).transpose()?;

    let store = RemoteStore::new(&config, &session);
    let mut controller = EventController::new(store, &session.user_id);

    let spinner = reload_spinner();
    controller.reload().await?;
    let profile = ProfileClient::new(&config, &session)
        .fetch_profile(&session.user_id)
        .await
        .unwrap_or_default();
    spinner.finish_and_clear();

    let cells = month_grid(&view, today, selected, controller.days());
    println!("{}", render_month(&view, &cells, profile.rgb()));

    let in_month: usize = cells
        .iter()
        .filter(|c| c.in_current_month)
        .map(|c| c.events.len())
        .sum();
    if in_month > 0 {
        println!("\n{in_month} event(s) this month. See them with `moncal agenda`.");
    }

    Ok(())
}
