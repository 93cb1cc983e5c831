//! # Event Model
//!
//! One catalogue entry. Everything here is display metadata: nothing is
//! validated beyond what rendering needs, and the ISO date text is kept as-is
//! so the stored value is never rewritten by presentation.

use chrono::NaiveDate;
use std::fmt;

/// Date layout of the `date` field.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Identifies an event within its catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub u32);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Symbolic colour used for the fallback panel when an image can't be shown.
///
/// Kept UI-agnostic; the TUI maps each token to a terminal colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailColor {
    Purple,
    Blue,
    Red,
    Indigo,
    Green,
    Yellow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    /// ISO calendar date (`YYYY-MM-DD`)
    pub date: String,
    /// `HH:MM`, display only
    pub time: String,
    pub location: String,
    pub description: String,
    /// Opaque image locator; may fail to resolve
    pub image: String,
    pub category: String,
    pub thumbnail_color: ThumbnailColor,
}

impl Event {
    /// Parses the ISO date, if it is one.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, ISO_DATE_FORMAT).ok()
    }

    /// Formats the date for display with a strftime pattern.
    ///
    /// Falls back to the raw text when the stored date doesn't parse. The
    /// pattern must already be validated (see `core::config`), since chrono
    /// panics when displaying an invalid one.
    pub fn formatted_date(&self, pattern: &str) -> String {
        match self.calendar_date() {
            Some(date) => date.format(pattern).to_string(),
            None => self.date.clone(),
        }
    }

    /// Case-insensitive substring match against name or location.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.location.to_lowercase().contains(needle)
    }
}
