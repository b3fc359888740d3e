use anyhow::Result;
use dialoguer::Input;
use moncal_core::auth::AuthClient;
use moncal_core::config::MoncalConfig;
use moncal_core::controller::EventController;
use moncal_core::store::RemoteStore;
use owo_colors::OwoColorize;

use super::reload_spinner;

pub async fn run() -> Result<()> {
    let config = MoncalConfig::load()?;
    let auth = AuthClient::new(&config);

    let email: String = Input::new().with_prompt("  Email").interact_text()?;
    let password = rpassword::prompt_password("  Password: ")?;

    let session = auth.sign_in(&email, &password).await?;
    session.save()?;

    println!("{}", format!("Signed in as {}", session.email).green());

    // Login is a reload trigger: warm the grouped cache right away so the
    // first render matches server state.
    let store = RemoteStore::new(&config, &session);
    let mut controller = EventController::new(store, &session.user_id);

    let spinner = reload_spinner();
    controller.reload().await?;
    spinner.finish_and_clear();

    let count: usize = controller.days().iter().map(|d| d.events.len()).sum();
    match count {
        0 => println!("Your calendar is empty. Add something with `moncal new`."),
        1 => println!("1 event on your calendar."),
        n => println!("{n} events on your calendar."),
    }

    Ok(())
}
