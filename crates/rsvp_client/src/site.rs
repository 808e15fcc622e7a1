//! Page widgets outside the RSVP form: countdown, mobile navigation, anchor
//! scrolling and active-link highlighting.

use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

pub const HEADER_OFFSET_PX: f64 = 80.0;
const HEADER_HIDE_THRESHOLD_PX: f64 = 100.0;
const DEFAULT_PAGE: &str = "index.html";

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Resolves the configured local wall-clock time to an instant. Ambiguous
/// local times take the earlier reading; nonexistent ones fall back to UTC.
pub fn wedding_instant(local: NaiveDateTime) -> DateTime<Utc> {
    Local
        .from_local_datetime(&local)
        .earliest()
        .map(|at| at.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&local))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Remaining {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
    Arrived,
}

impl Countdown {
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let left = (target - now).num_milliseconds();
        if left <= 0 {
            return Countdown::Arrived;
        }

        Countdown::Remaining {
            days: left / MS_PER_DAY,
            hours: (left % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (left % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (left % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Arrived => f.write_str("The wedding day is here!"),
            Countdown::Remaining {
                days,
                hours,
                minutes,
                seconds,
            } => write!(
                f,
                "{days} Days {hours} Hours {minutes} Minutes {seconds} Seconds"
            ),
        }
    }
}

/// Mobile menu and auto-hiding header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Navigation {
    pub menu_open: bool,
    pub header_hidden: bool,
    last_scroll: f64,
}

impl Navigation {
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn link_clicked(&mut self) {
        self.menu_open = false;
    }

    pub fn document_clicked(&mut self, inside_nav: bool) {
        if !inside_nav {
            self.menu_open = false;
        }
    }

    /// The page body must not scroll behind an open menu.
    pub fn body_scroll_locked(&self) -> bool {
        self.menu_open
    }

    pub fn scrolled_to(&mut self, offset: f64) {
        if offset <= 0.0 {
            self.header_hidden = false;
            return;
        }

        self.header_hidden = offset > self.last_scroll && offset > HEADER_HIDE_THRESHOLD_PX;
        self.last_scroll = offset;
    }
}

/// Scroll position that puts an anchor target just below the fixed header.
/// Returns `None` for the bare `#` anchor.
pub fn anchor_scroll_offset(href: &str, element_top: f64, page_offset: f64) -> Option<f64> {
    if href == "#" || !href.starts_with('#') {
        return None;
    }
    Some(element_top + page_offset - HEADER_OFFSET_PX)
}

pub fn current_page(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(page) if !page.is_empty() => page,
        _ => DEFAULT_PAGE,
    }
}

pub fn is_active_link(path: &str, href: &str) -> bool {
    current_page(path) == href
}
