use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::{Time, Weekday};
use validator::{Validate, ValidationError};

/// Weekly booking window for a service. `weekday` is 0-based starting on
/// Monday, matching `Weekday::number_days_from_monday`.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct TimeFrame {
    pub id: Uuid,
    pub service_id: Uuid,
    pub weekday: i16,
    #[serde(with = "hms")]
    pub start_time: Time,
    #[serde(with = "hms")]
    pub end_time: Time,
    pub is_enabled: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = end_after_start))]
pub struct TimeFrameInput {
    #[validate(range(min = 0, max = 6, message = "Weekday must be between 0 and 6"))]
    pub weekday: i16,
    #[serde(with = "hms")]
    pub start_time: Time,
    #[serde(with = "hms")]
    pub end_time: Time,
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
}

fn default_enabled() -> bool {
    true
}

fn end_after_start(frame: &TimeFrameInput) -> Result<(), ValidationError> {
    if frame.end_time <= frame.start_time {
        return Err(ValidationError::new("end_before_start")
            .with_message("The end time must be later than the start time".into()));
    }
    Ok(())
}

pub fn weekday_index(weekday: Weekday) -> i16 {
    weekday.number_days_from_monday() as i16
}

/// `HH:MM:SS` serde representation for times of day.
pub mod hms {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::{format_description::FormatItem, macros::format_description, Time};

    pub const FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second]");

    pub fn serialize<S: Serializer>(time: &Time, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = time.format(FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Time, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Time::parse(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::time;

    #[test]
    fn weekday_index_starts_on_monday() {
        assert_eq!(weekday_index(Weekday::Monday), 0);
        assert_eq!(weekday_index(Weekday::Sunday), 6);
    }

    #[test]
    fn rejects_inverted_frames() {
        let frame = TimeFrameInput {
            weekday: 0,
            start_time: time!(10:00),
            end_time: time!(09:00),
            is_enabled: true,
        };
        assert!(frame.validate().is_err());

        let equal = TimeFrameInput {
            weekday: 0,
            start_time: time!(09:00),
            end_time: time!(09:00),
            is_enabled: true,
        };
        assert!(equal.validate().is_err());
    }

    #[test]
    fn hms_round_trips() {
        let parsed = Time::parse("07:30:00", hms::FORMAT).unwrap();
        assert_eq!(parsed, time!(07:30));
        assert_eq!(parsed.format(hms::FORMAT).unwrap(), "07:30:00");
    }
}
