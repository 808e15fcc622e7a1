//! Field-level rules for the RSVP form.

use std::sync::OnceLock;

use regex::Regex;
use shared::{domain::FieldName, error::ValidationError};

pub const REQUIRED_MESSAGE: &str = "This field is required.";
const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
const INVALID_PHONE_MESSAGE: &str = "Please enter a valid phone number.";
const NAME_TOO_SHORT_MESSAGE: &str = "Name must be at least 2 characters.";
const NAME_TOO_LONG_MESSAGE: &str = "Name must be less than 100 characters.";

const MIN_NAME_CHARS: usize = 2;
const MAX_NAME_CHARS: usize = 100;
const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 15;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"))
}

pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

/// Accepts any formatting as long as 10 to 15 digits remain.
pub fn is_valid_phone(value: &str) -> bool {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

/// Parses the leading integer of `value` the way browsers read number inputs
/// typed as free text: leading whitespace and sign are allowed, parsing stops
/// at the first non-digit, and no digits at all yields `None`.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| &rest[..end]);
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Guest count as committed by the number input; anything unparseable or
/// negative counts as zero.
pub fn guest_count_from(value: &str) -> u32 {
    parse_leading_int(value)
        .map(|count| count.clamp(0, i64::from(u32::MAX)) as u32)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    Email,
    Phone,
    GuestName,
    GuestCount { max_guests: u32 },
}

impl Validator {
    pub fn for_field(field: FieldName, max_guests: u32) -> Option<Self> {
        match field {
            FieldName::Email => Some(Validator::Email),
            FieldName::Phone => Some(Validator::Phone),
            FieldName::GuestName => Some(Validator::GuestName),
            FieldName::GuestCount => Some(Validator::GuestCount { max_guests }),
            FieldName::GuestNames | FieldName::DietaryRestrictions | FieldName::SpecialRequests => {
                None
            }
        }
    }

    /// `value` must already be trimmed.
    pub fn check(self, value: &str) -> Result<(), String> {
        match self {
            Validator::Email if !is_valid_email(value) => Err(INVALID_EMAIL_MESSAGE.to_string()),
            Validator::Phone if !is_valid_phone(value) => Err(INVALID_PHONE_MESSAGE.to_string()),
            Validator::GuestName => {
                let chars = value.chars().count();
                if chars < MIN_NAME_CHARS {
                    Err(NAME_TOO_SHORT_MESSAGE.to_string())
                } else if chars > MAX_NAME_CHARS {
                    Err(NAME_TOO_LONG_MESSAGE.to_string())
                } else {
                    Ok(())
                }
            }
            Validator::GuestCount { max_guests } => match parse_leading_int(value) {
                Some(count) if (1..=i64::from(max_guests)).contains(&count) => Ok(()),
                _ => Err(format!("Guest count must be between 1 and {max_guests}.")),
            },
            Validator::Email | Validator::Phone => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: FieldName,
    pub required: bool,
    pub validator: Option<Validator>,
}

impl FieldRule {
    pub fn new(field: FieldName, required: bool, max_guests: u32) -> Self {
        Self {
            field,
            required,
            validator: Validator::for_field(field, max_guests),
        }
    }

    pub fn validate(&self, raw: &str) -> Result<(), ValidationError> {
        let value = raw.trim();
        if value.is_empty() {
            return if self.required {
                Err(ValidationError::new(self.field, REQUIRED_MESSAGE))
            } else {
                Ok(())
            };
        }

        match self.validator {
            Some(validator) => validator
                .check(value)
                .map_err(|message| ValidationError::new(self.field, message)),
            None => Ok(()),
        }
    }
}
