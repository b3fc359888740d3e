use anyhow::Result;
use dialoguer::Confirm;
use moncal_core::config::MoncalConfig;
use moncal_core::controller::EventController;
use moncal_core::session::Session;
use moncal_core::store::RemoteStore;
use owo_colors::OwoColorize;

use super::reload_spinner;

pub async fn run(session: Session, event_id: String, yes: bool) -> Result<()> {
    let config = MoncalConfig::load()?;

    let store = RemoteStore::new(&config, &session);
    let mut controller = EventController::new(store, &session.user_id);

    let spinner = reload_spinner();
    controller.reload().await?;
    spinner.finish_and_clear();

    // Name the event in the prompt when we still have it; an id the store
    // no longer knows deletes as a no-op either way.
    let label = controller
        .find_event(&event_id)
        .map(|e| format!("\"{}\"", e.name))
        .unwrap_or_else(|| format!("event {event_id}"));

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("  Delete {label}?"))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    controller.delete_event(&event_id).await?;

    println!("{}", format!("  Deleted {label}").green());

    Ok(())
}
