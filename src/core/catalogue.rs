//! # Catalogue
//!
//! The fixed, ordered list of events. Built once at startup and shared
//! read-only; cloning a `Catalogue` shares the same backing slice.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::core::event::{Event, EventId, ThumbnailColor};

const PLACEHOLDER_IMAGE: &str = "/api/placeholder/800/600";

#[derive(Debug, Clone)]
pub struct Catalogue {
    events: Arc<[Event]>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CatalogueError {
    DuplicateId(EventId),
}

impl fmt::Display for CatalogueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogueError::DuplicateId(id) => write!(f, "duplicate event id {id}"),
        }
    }
}

impl std::error::Error for CatalogueError {}

impl Catalogue {
    /// Builds a catalogue, rejecting duplicate ids.
    pub fn new(events: Vec<Event>) -> Result<Self, CatalogueError> {
        let mut seen = HashSet::new();
        for event in &events {
            if !seen.insert(event.id) {
                return Err(CatalogueError::DuplicateId(event.id));
            }
        }
        Ok(Self {
            events: events.into(),
        })
    }

    /// The built-in event listing.
    pub fn builtin() -> Self {
        Self {
            events: builtin_events().into(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn entry(
    id: u32,
    name: &str,
    date: &str,
    time: &str,
    location: &str,
    description: &str,
    category: &str,
    thumbnail_color: ThumbnailColor,
) -> Event {
    Event {
        id: EventId(id),
        name: name.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        location: location.to_string(),
        description: description.to_string(),
        image: PLACEHOLDER_IMAGE.to_string(),
        category: category.to_string(),
        thumbnail_color,
    }
}

fn builtin_events() -> Vec<Event> {
    vec![
        entry(
            1,
            "Summer Music Festival",
            "2024-11-15",
            "18:00",
            "Central Park, New York",
            "Join us for an evening of live music featuring local and international artists. \
             Food trucks and refreshments will be available.",
            "Music",
            ThumbnailColor::Purple,
        ),
        entry(
            2,
            "Tech Conference 2024",
            "2024-11-20",
            "09:00",
            "Convention Center, San Francisco",
            "A day full of inspiring talks from industry leaders, networking opportunities, \
             and hands-on workshops.",
            "Technology",
            ThumbnailColor::Blue,
        ),
        entry(
            3,
            "Food & Wine Festival",
            "2024-11-25",
            "12:00",
            "Downtown Square, Chicago",
            "Sample dishes from top local restaurants and enjoy wine tastings from regional \
             vineyards.",
            "Food",
            ThumbnailColor::Red,
        ),
        entry(
            4,
            "Art Exhibition Opening",
            "2024-12-01",
            "19:00",
            "Modern Art Gallery, Los Angeles",
            "Opening night of our new contemporary art exhibition featuring works from \
             emerging artists.",
            "Art",
            ThumbnailColor::Indigo,
        ),
        entry(
            5,
            "Marathon 2024",
            "2024-12-05",
            "07:00",
            "City Center, Boston",
            "Annual marathon event with both professional and amateur categories. \
             Register now to participate!",
            "Sports",
            ThumbnailColor::Green,
        ),
        entry(
            6,
            "Comedy Night Special",
            "2024-12-10",
            "20:00",
            "Laugh Factory, Chicago",
            "A night of non-stop laughter with top comedians from around the country.",
            "Entertainment",
            ThumbnailColor::Yellow,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_six_events_in_order() {
        let catalogue = Catalogue::builtin();
        let ids: Vec<u32> = catalogue.events().iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(catalogue.len(), 6);
        assert!(!catalogue.is_empty());
    }

    #[test]
    fn test_builtin_passes_validation() {
        let rebuilt = Catalogue::new(builtin_events());
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_builtin_dates_all_parse() {
        for event in Catalogue::builtin().events() {
            assert!(event.calendar_date().is_some(), "bad date on {}", event.name);
            assert!(!event.name.is_empty());
            assert!(!event.location.is_empty());
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut events = builtin_events();
        events[1].id = EventId(1);
        let err = Catalogue::new(events).unwrap_err();
        assert_eq!(err, CatalogueError::DuplicateId(EventId(1)));
        assert_eq!(err.to_string(), "duplicate event id #1");
    }

    #[test]
    fn test_get_by_id() {
        let catalogue = Catalogue::builtin();
        assert_eq!(catalogue.get(EventId(5)).map(|e| e.name.as_str()), Some("Marathon 2024"));
        assert!(catalogue.get(EventId(42)).is_none());
    }

    #[test]
    fn test_clone_shares_events() {
        let catalogue = Catalogue::builtin();
        let cloned = catalogue.clone();
        assert!(std::ptr::eq(catalogue.events(), cloned.events()));
    }
}
