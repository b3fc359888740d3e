use anyhow::Result;
use moncal_core::auth::AuthClient;
use moncal_core::config::MoncalConfig;
use moncal_core::session::Session;
use tracing::warn;

pub async fn run() -> Result<()> {
    if !Session::exists() {
        println!("Not signed in.");
        return Ok(());
    }

    let session = Session::load()?;

    // Best-effort server-side revocation; removing the local session is
    // what actually signs the user out.
    let config = MoncalConfig::load()?;
    if let Err(e) = AuthClient::new(&config).sign_out(&session).await {
        warn!("remote sign-out failed: {e}");
    }

    Session::clear()?;

    println!("Signed out {}.", session.email);

    Ok(())
}
