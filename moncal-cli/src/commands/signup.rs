use anyhow::Result;
use dialoguer::Input;
use moncal_core::auth::AuthClient;
use moncal_core::config::MoncalConfig;
use owo_colors::OwoColorize;

pub async fn run() -> Result<()> {
    let config = MoncalConfig::load()?;
    let auth = AuthClient::new(&config);

    let email: String = Input::new().with_prompt("  Email").interact_text()?;
    let password = rpassword::prompt_password("  Password: ")?;
    let confirm = rpassword::prompt_password("  Confirm password: ")?;

    if password != confirm {
        anyhow::bail!("Passwords do not match");
    }

    match auth.sign_up(&email, &password).await? {
        Some(session) => {
            session.save()?;
            println!("{}", format!("Account created. Signed in as {}", session.email).green());
            println!("Run `moncal month` to see your calendar.");
        }
        None => {
            println!("Account created. Check your email for the confirmation link,");
            println!("then sign in with `moncal login`.");
        }
    }

    Ok(())
}
