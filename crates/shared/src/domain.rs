use std::fmt;

use serde::{Deserialize, Serialize};

/// Named inputs of the RSVP form, declared in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    GuestName,
    Email,
    Phone,
    GuestCount,
    GuestNames,
    DietaryRestrictions,
    SpecialRequests,
}

impl FieldName {
    pub const ALL: [FieldName; 7] = [
        FieldName::GuestName,
        FieldName::Email,
        FieldName::Phone,
        FieldName::GuestCount,
        FieldName::GuestNames,
        FieldName::DietaryRestrictions,
        FieldName::SpecialRequests,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::GuestName => "guestName",
            FieldName::Email => "email",
            FieldName::Phone => "phone",
            FieldName::GuestCount => "guestCount",
            FieldName::GuestNames => "guestNames",
            FieldName::DietaryRestrictions => "dietaryRestrictions",
            FieldName::SpecialRequests => "specialRequests",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }

    /// Fields that are required no matter what the guest answered.
    pub fn is_always_required(self) -> bool {
        matches!(self, FieldName::GuestName | FieldName::Email)
    }

    /// Fields living inside the fieldset that only shows for attending guests.
    pub fn in_conditional_fieldset(self) -> bool {
        matches!(self, FieldName::GuestCount)
    }

    /// Fields whose values only reach the payload when the guest attends.
    pub fn is_attending_only(self) -> bool {
        matches!(
            self,
            FieldName::GuestCount
                | FieldName::GuestNames
                | FieldName::DietaryRestrictions
                | FieldName::SpecialRequests
        )
    }

    pub fn error_id(self) -> String {
        format!("{}-error", self.as_str())
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceState {
    #[default]
    Unknown,
    Attending,
    NotAttending,
}

impl AttendanceState {
    /// Maps the value of the `attending` radio input.
    pub fn from_radio_value(value: &str) -> Option<Self> {
        match value.trim() {
            "yes" => Some(AttendanceState::Attending),
            "no" => Some(AttendanceState::NotAttending),
            _ => None,
        }
    }

    pub fn answer(self) -> Option<AttendanceAnswer> {
        match self {
            AttendanceState::Unknown => None,
            AttendanceState::Attending => Some(AttendanceAnswer::Yes),
            AttendanceState::NotAttending => Some(AttendanceAnswer::No),
        }
    }

    pub fn is_attending(self) -> bool {
        self == AttendanceState::Attending
    }
}

/// The attending value as it travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceAnswer {
    Yes,
    No,
}

impl AttendanceAnswer {
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceAnswer::Yes => "yes",
            AttendanceAnswer::No => "no",
        }
    }
}

impl fmt::Display for AttendanceAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "✓",
            Severity::Error => "✗",
            Severity::Warning => "⚠",
            Severity::Info => "ℹ",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip_through_form_names() {
        for field in FieldName::ALL {
            assert_eq!(FieldName::parse(field.as_str()), Some(field));
        }
        assert_eq!(FieldName::parse("attending"), None);
    }

    #[test]
    fn field_order_follows_document_order() {
        let mut sorted = FieldName::ALL;
        sorted.sort();
        assert_eq!(sorted, FieldName::ALL);
        assert!(FieldName::Email < FieldName::GuestCount);
    }

    #[test]
    fn radio_values_map_to_attendance() {
        assert_eq!(
            AttendanceState::from_radio_value("yes"),
            Some(AttendanceState::Attending)
        );
        assert_eq!(
            AttendanceState::from_radio_value("no"),
            Some(AttendanceState::NotAttending)
        );
        assert_eq!(AttendanceState::from_radio_value("maybe"), None);
        assert_eq!(AttendanceState::Unknown.answer(), None);
    }

    #[test]
    fn attendance_answer_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AttendanceAnswer::Yes).expect("json"),
            "\"yes\""
        );
    }
}
