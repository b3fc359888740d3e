pub mod agenda;
pub mod delete;
pub mod login;
pub mod logout;
pub mod month;
pub mod new;
pub mod profile;
pub mod signup;

use anyhow::Result;
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while a reload is in flight.
pub fn reload_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"])
            .template("{spinner} {msg}")
            .unwrap(),
    );
    spinner.set_message("Loading events");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Parse a YYYY-MM month argument into the first day of that month.
pub fn parse_month_arg(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid month '{}'. Expected YYYY-MM", s))
}

/// Parse a YYYY-MM-DD date argument.
pub fn parse_date_arg(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date '{}'. Expected YYYY-MM-DD", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_arg_parses_to_first_of_month() {
        let date = parse_month_arg("2024-12").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
    }

    #[test]
    fn month_arg_rejects_bad_input() {
        assert!(parse_month_arg("2024").is_err());
        assert!(parse_month_arg("2024-13").is_err());
        assert!(parse_month_arg("December").is_err());
    }

    #[test]
    fn date_arg_parses_and_validates() {
        assert!(parse_date_arg("2024-12-21").is_ok());
        assert!(parse_date_arg("2024-02-30").is_err());
        assert!(parse_date_arg("tomorrow").is_err());
    }
}
