//! # Application State
//!
//! Core browsing state. Domain only: focus, scroll positions and image load
//! flags are presentation state and live in the `tui` module.
//!
//! ```text
//! App
//! ├── catalogue: Catalogue             // injected, read-only
//! ├── search_term: String              // last term from the search input
//! ├── visible_events: Vec<EventId>     // filter(catalogue, search_term)
//! ├── selected_event: Option<EventId>  // detail overlay target
//! └── is_loading: bool                 // startup delay pending
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::catalogue::Catalogue;
use crate::core::event::{Event, EventId};

pub struct App {
    pub catalogue: Catalogue,
    pub search_term: String,
    pub visible_events: Vec<EventId>,
    /// References a catalogue event; never a copy of it.
    pub selected_event: Option<EventId>,
    pub is_loading: bool,
}

impl App {
    /// Starts in the loading state with the whole catalogue visible.
    pub fn new(catalogue: Catalogue) -> Self {
        let visible_events = catalogue.events().iter().map(|e| e.id).collect();
        Self {
            catalogue,
            search_term: String::new(),
            visible_events,
            selected_event: None,
            is_loading: true,
        }
    }

    /// The visible events, resolved against the catalogue, in display order.
    pub fn visible(&self) -> Vec<&Event> {
        self.visible_events
            .iter()
            .filter_map(|id| self.catalogue.get(*id))
            .collect()
    }

    pub fn selected(&self) -> Option<&Event> {
        self.selected_event.and_then(|id| self.catalogue.get(id))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.is_loading);
        assert!(app.search_term.is_empty());
        assert!(app.selected().is_none());
        assert_eq!(app.visible().len(), 6);
    }

    #[test]
    fn test_visible_preserves_catalogue_order() {
        let app = test_app();
        let names: Vec<&str> = app.visible().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names[0], "Summer Music Festival");
        assert_eq!(names[5], "Comedy Night Special");
    }
}
