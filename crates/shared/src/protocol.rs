use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::AttendanceAnswer;

pub const NOT_ATTENDING_MEALS: &str = "Not attending";
const MEAL_SEPARATOR: &str = "; ";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GuestContact {
    pub guest_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealPreference {
    pub guest: u32,
    pub option: String,
}

impl fmt::Display for MealPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guest {}: {}", self.guest, self.option)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttendingDetails {
    pub guest_count: u32,
    pub guest_names: String,
    pub meals: Vec<MealPreference>,
    pub dietary_restrictions: String,
    pub special_requests: String,
}

/// Body posted to the form-intake endpoint. Key names are part of the
/// contract with the intake script and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub timestamp: String,
    pub guest_name: String,
    pub email: String,
    pub phone: String,
    pub attending: AttendanceAnswer,
    pub guest_count: u32,
    pub guest_names: String,
    pub meal_preferences: String,
    pub dietary_restrictions: String,
    pub special_requests: String,
}

impl SubmissionPayload {
    pub fn accepted(contact: GuestContact, details: AttendingDetails, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: format_timestamp(at),
            guest_name: contact.guest_name,
            email: contact.email,
            phone: contact.phone,
            attending: AttendanceAnswer::Yes,
            guest_count: details.guest_count,
            guest_names: details.guest_names,
            meal_preferences: join_meal_preferences(&details.meals),
            dietary_restrictions: details.dietary_restrictions,
            special_requests: details.special_requests,
        }
    }

    pub fn declined(contact: GuestContact, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: format_timestamp(at),
            guest_name: contact.guest_name,
            email: contact.email,
            phone: contact.phone,
            attending: AttendanceAnswer::No,
            guest_count: 0,
            guest_names: String::new(),
            meal_preferences: NOT_ATTENDING_MEALS.to_string(),
            dietary_restrictions: String::new(),
            special_requests: String::new(),
        }
    }

    pub fn is_attending(&self) -> bool {
        self.attending == AttendanceAnswer::Yes
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn join_meal_preferences(meals: &[MealPreference]) -> String {
    meals
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(MEAL_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn contact() -> GuestContact {
        GuestContact {
            guest_name: "Alex Smith".to_string(),
            email: "alex@example.com".to_string(),
            phone: "5551234567".to_string(),
        }
    }

    #[test]
    fn declined_payload_blanks_attending_only_fields() {
        let at = Utc.with_ymd_and_hms(2026, 5, 1, 12, 30, 0).unwrap();
        let payload = SubmissionPayload::declined(contact(), at);

        assert_eq!(payload.guest_count, 0);
        assert_eq!(payload.meal_preferences, NOT_ATTENDING_MEALS);
        assert_eq!(payload.dietary_restrictions, "");
        assert_eq!(payload.timestamp, "2026-05-01T12:30:00.000Z");
    }

    #[test]
    fn wire_keys_are_camel_case() {
        let at = Utc.with_ymd_and_hms(2026, 5, 1, 12, 30, 0).unwrap();
        let payload = SubmissionPayload::accepted(
            contact(),
            AttendingDetails {
                guest_count: 2,
                meals: vec![
                    MealPreference {
                        guest: 1,
                        option: "Beef".to_string(),
                    },
                    MealPreference {
                        guest: 2,
                        option: "Chicken".to_string(),
                    },
                ],
                ..AttendingDetails::default()
            },
            at,
        );

        let value = serde_json::to_value(&payload).expect("json");
        assert_eq!(value["guestName"], "Alex Smith");
        assert_eq!(value["attending"], "yes");
        assert_eq!(value["guestCount"], 2);
        assert_eq!(value["mealPreferences"], "Guest 1: Beef; Guest 2: Chicken");
        assert_eq!(value["specialRequests"], "");
        assert_eq!(value.as_object().expect("object").len(), 10);
    }
}
