//! # Search Filter
//!
//! Pure mapping from (catalogue, search term) to the matching events.
//!
//! The result is always re-derived from the full catalogue, never from a
//! previously filtered list, so the same inputs always give the same output.
//! The term is used literally: a whitespace-only term is a real substring and
//! is not trimmed.

use crate::core::catalogue::Catalogue;
use crate::core::event::Event;

/// Returns the events whose name or location contains `term`, ignoring case.
///
/// An empty term returns the whole catalogue. Catalogue order is preserved.
pub fn filter_events<'a>(catalogue: &'a Catalogue, term: &str) -> Vec<&'a Event> {
    if term.is_empty() {
        return catalogue.events().iter().collect();
    }

    let needle = term.to_lowercase();
    catalogue
        .events()
        .iter()
        .filter(|event| event.matches_lowercase(&needle))
        .collect()
}
