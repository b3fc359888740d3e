//! Event records and timestamp handling.
//!
//! Event timestamps are stored and interpreted as local wall-clock strings.
//! The date portion is always taken verbatim from the string — never parsed
//! through an epoch or converted across timezones — so an event created on
//! 2024-12-21 stays on 2024-12-21 no matter where it is read back.

use serde::{Deserialize, Serialize};

use crate::error::{MoncalError, MoncalResult};

/// A dated event owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Opaque, server-assigned id.
    pub id: String,
    /// Display name (non-empty).
    pub name: String,
    /// Free-form display label, e.g. "All Day" or "10:00 AM".
    pub time: String,
    /// Local timestamp with the `YYYY-MM-DDTHH:MM:SS` shape. Used only for
    /// date-bucketing and ordering.
    pub datetime: String,
    pub user_id: String,
}

/// Input half of an event, before the server has assigned an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub time: String,
    pub datetime: String,
}

impl NewEvent {
    pub fn new(
        name: impl Into<String>,
        time: impl Into<String>,
        datetime: impl Into<String>,
    ) -> Self {
        NewEvent {
            name: name.into(),
            time: time.into(),
            datetime: datetime.into(),
        }
    }
}

/// Extract the `YYYY-MM-DD` date key from an event timestamp.
///
/// The key is the first 10 characters of the string, taken verbatim.
/// Fails with `MalformedTimestamp` when the timestamp does not have the
/// `YYYY-MM-DDTHH:MM:SS` shape.
pub fn date_key(datetime: &str) -> MoncalResult<&str> {
    if !has_timestamp_shape(datetime) {
        return Err(MoncalError::MalformedTimestamp(datetime.to_string()));
    }
    Ok(&datetime[..10])
}

/// Check for the `YYYY-MM-DDTHH:MM:SS` shape (trailing characters such as
/// fractional seconds are tolerated).
fn has_timestamp_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() < 19 {
        return false;
    }

    bytes[..19].iter().enumerate().all(|(i, &b)| match i {
        4 | 7 => b == b'-',
        10 => b == b'T',
        13 | 16 => b == b':',
        _ => b.is_ascii_digit(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_key_takes_prefix_verbatim() {
        assert_eq!(date_key("2024-12-21T10:00:00").unwrap(), "2024-12-21");
        assert_eq!(date_key("2024-12-21T23:59:59").unwrap(), "2024-12-21");
    }

    #[test]
    fn date_key_tolerates_fractional_seconds() {
        assert_eq!(date_key("2024-12-21T10:00:00.123").unwrap(), "2024-12-21");
    }

    #[test]
    fn date_key_rejects_missing_separator() {
        assert!(matches!(
            date_key("2024-12-21 10:00:00"),
            Err(MoncalError::MalformedTimestamp(_))
        ));
    }

    #[test]
    fn date_key_rejects_short_and_garbled_input() {
        assert!(date_key("2024-12-21").is_err());
        assert!(date_key("").is_err());
        assert!(date_key("yyyy-mm-ddThh:mm:ss").is_err());
        assert!(date_key("2024/12/21T10:00:00").is_err());
    }
}
