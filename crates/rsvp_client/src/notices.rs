//! Transient alerts and the page-wide loading overlay.

use std::time::{Duration, Instant};

use shared::domain::Severity;

pub const ALERT_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub severity: Severity,
    shown_at: Instant,
}

impl Alert {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= ALERT_LIFETIME
    }
}

/// Alerts are kept newest first, the way they stack at the top of the form.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    alerts: Vec<Alert>,
}

impl Notices {
    pub fn show(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.prune(now);
        self.alerts.insert(
            0,
            Alert {
                message: message.into(),
                severity,
                shown_at: now,
            },
        );
    }

    pub fn active(&self, now: Instant) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(move |alert| !alert.is_expired(now))
    }

    pub fn prune(&mut self, now: Instant) {
        self.alerts.retain(|alert| !alert.is_expired(now));
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingOverlay {
    pub visible: bool,
    pub message: String,
}

impl LoadingOverlay {
    pub fn show(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alerts_expire_after_five_seconds() {
        let start = Instant::now();
        let mut notices = Notices::default();
        notices.show("first", Severity::Error, start);
        notices.show("second", Severity::Info, start + Duration::from_secs(3));

        let visible: Vec<_> = notices
            .active(start + Duration::from_secs(4))
            .map(|alert| alert.message.as_str())
            .collect();
        assert_eq!(visible, vec!["second", "first"]);

        let later = start + Duration::from_secs(5);
        assert_eq!(notices.active(later).count(), 1);

        notices.prune(start + Duration::from_secs(9));
        assert!(notices.is_empty());
    }

    #[test]
    fn showing_an_alert_drops_expired_ones() {
        let start = Instant::now();
        let mut notices = Notices::default();
        for _ in 0..50 {
            notices.show("blocked", Severity::Error, start);
        }

        notices.show("fresh", Severity::Info, start + Duration::from_secs(60));

        assert_eq!(notices.len(), 1);
        let visible: Vec<_> = notices
            .active(start + Duration::from_secs(60))
            .map(|alert| alert.message.as_str())
            .collect();
        assert_eq!(visible, vec!["fresh"]);
    }

    #[test]
    fn overlay_keeps_latest_message() {
        let mut overlay = LoadingOverlay::default();
        overlay.show("Loading...");
        overlay.hide();
        overlay.show("Submitting your RSVP...");
        assert!(overlay.visible);
        assert_eq!(overlay.message, "Submitting your RSVP...");
    }
}
