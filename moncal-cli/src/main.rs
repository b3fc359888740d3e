mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use moncal_core::session::Session;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "moncal")]
#[command(about = "View your month grid and manage your events from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in
    Signup,
    /// Sign in with email and password
    Login,
    /// Sign out and remove the local session
    Logout,
    /// Render the month grid
    Month {
        /// Month to display (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Show the month before the one that would be displayed
        #[arg(long, conflicts_with = "next")]
        prev: bool,

        /// Show the month after the one that would be displayed
        #[arg(long)]
        next: bool,

        /// Mark this date as selected (YYYY-MM-DD)
        #[arg(long)]
        select: Option<String>,
    },
    /// List the month's events grouped by day
    Agenda {
        /// Month to list (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Create a new event
    New {
        name: String,

        /// Event date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Mark the event as half-day instead of all-day
        #[arg(long)]
        half_day: bool,
    },
    /// Delete an event by id
    Delete {
        event_id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show or update your profile
    Profile {
        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        username: Option<String>,

        /// Display color for your events ("#RRGGBB")
        #[arg(long)]
        color: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Signup => commands::signup::run().await,
        Commands::Login => commands::login::run().await,
        Commands::Logout => commands::logout::run().await,
        Commands::Month {
            month,
            prev,
            next,
            select,
        } => commands::month::run(require_session()?, month, prev, next, select).await,
        Commands::Agenda { month } => commands::agenda::run(require_session()?, month).await,
        Commands::New {
            name,
            date,
            half_day,
        } => commands::new::run(require_session()?, name, date, half_day).await,
        Commands::Delete { event_id, yes } => {
            commands::delete::run(require_session()?, event_id, yes).await
        }
        Commands::Profile {
            first_name,
            username,
            color,
        } => commands::profile::run(require_session()?, first_name, username, color).await,
    }
}

fn require_session() -> Result<Session> {
    if !Session::exists() {
        anyhow::bail!(
            "Not signed in.\n\n\
            Sign in with:\n  \
            moncal login\n\n\
            Or create an account with:\n  \
            moncal signup"
        );
    }

    Ok(Session::load()?)
}
