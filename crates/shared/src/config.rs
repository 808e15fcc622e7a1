use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Value shipped in the site template until the intake script is deployed.
pub const PLACEHOLDER_INTAKE_URL: &str = "YOUR_APPS_SCRIPT_URL_HERE";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Venue {
    pub name: String,
    pub address: String,
    pub time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub registry: bool,
    pub gallery: bool,
}

/// Empty strings hide the matching link.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub instagram_handle: String,
    pub facebook_url: String,
    pub wedding_hashtag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub intake_url: String,
    /// Local wall-clock time of the ceremony.
    pub wedding_date: NaiveDateTime,
    pub couple_names: String,
    pub bride_name: String,
    pub groom_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub max_guests: u32,
    pub meal_options: Vec<String>,
    pub ceremony: Venue,
    pub reception: Venue,
    pub features: FeatureFlags,
    pub social: SocialLinks,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            intake_url: PLACEHOLDER_INTAKE_URL.into(),
            wedding_date: NaiveDateTime::parse_from_str("2026-08-15T16:00:00", "%Y-%m-%dT%H:%M:%S")
                .unwrap_or_default(),
            couple_names: "Jane & John".into(),
            bride_name: "Jane".into(),
            groom_name: "John".into(),
            contact_email: "wedding@example.com".into(),
            contact_phone: "(555) 123-4567".into(),
            max_guests: 10,
            meal_options: ["Beef", "Chicken", "Fish", "Vegetarian", "Vegan"]
                .into_iter()
                .map(String::from)
                .collect(),
            ceremony: Venue {
                name: "Beautiful Garden Chapel".into(),
                address: "123 Wedding Lane, City, State 12345".into(),
                time: "4:00 PM".into(),
            },
            reception: Venue {
                name: "Grand Ballroom".into(),
                address: "456 Celebration Ave, City, State 12345".into(),
                time: "6:00 PM".into(),
            },
            features: FeatureFlags::default(),
            social: SocialLinks::default(),
        }
    }
}

impl SiteConfig {
    /// False while the intake URL is blank or still the template placeholder.
    pub fn is_intake_configured(&self) -> bool {
        let url = self.intake_url.trim();
        !url.is_empty() && url != PLACEHOLDER_INTAKE_URL
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_guests == 0 {
            return Err(ConfigError::NoGuestsAllowed);
        }
        if self.meal_options.is_empty() {
            return Err(ConfigError::NoMealOptions);
        }

        let mut seen = HashSet::new();
        for (idx, option) in self.meal_options.iter().enumerate() {
            if option.trim().is_empty() {
                return Err(ConfigError::BlankMealOption(idx));
            }
            // Option ids are lowercased, so "Beef" and "beef" would collide.
            if !seen.insert(option.to_lowercase()) {
                return Err(ConfigError::DuplicateMealOption(option.clone()));
            }
        }

        if self.is_intake_configured() {
            Url::parse(self.intake_url.trim()).map_err(|err| ConfigError::InvalidIntakeUrl {
                url: self.intake_url.clone(),
                reason: err.to_string(),
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn defaults_are_valid_but_unconfigured() {
        let config = SiteConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.is_intake_configured());
        assert_eq!(config.max_guests, 10);
        assert_eq!(config.meal_options.len(), 5);
        assert_eq!(
            config.wedding_date.format("%Y-%m-%d %H:%M").to_string(),
            "2026-08-15 16:00"
        );
    }

    #[test]
    fn blank_intake_url_is_unconfigured() {
        let config = SiteConfig {
            intake_url: "   ".into(),
            ..SiteConfig::default()
        };
        assert!(!config.is_intake_configured());
    }

    #[test]
    fn rejects_case_insensitive_duplicate_meals() {
        let config = SiteConfig {
            meal_options: vec!["Beef".into(), "beef".into()],
            ..SiteConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateMealOption("beef".into()))
        );
    }

    #[test]
    fn rejects_malformed_intake_url() {
        let config = SiteConfig {
            intake_url: "not a url".into(),
            ..SiteConfig::default()
        };
        let err = config.validate().expect_err("malformed url");
        assert!(matches!(err, ConfigError::InvalidIntakeUrl { .. }));
        assert_eq!(err.code(), ErrorCode::Configuration);
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let config: SiteConfig =
            serde_json::from_str(r#"{"max_guests": 4, "ceremony": {"name": "Chapel"}}"#)
                .expect("config json");
        assert_eq!(config.max_guests, 4);
        assert_eq!(config.ceremony.name, "Chapel");
        assert_eq!(config.ceremony.address, "");
        assert_eq!(config.meal_options.len(), 5);
    }
}
