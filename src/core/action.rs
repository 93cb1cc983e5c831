//! # Actions
//!
//! Everything that can happen in the browser becomes an `Action`.
//! User edits the search box? That's `Action::SearchChanged(term)`.
//! Startup delay elapses? That's `Action::LoadingFinished`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` for the event loop. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State (+ Effect)
//! ```

use log::{debug, info, warn};

use crate::core::event::EventId;
use crate::core::filter::filter_events;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The startup delay elapsed
    LoadingFinished,
    /// The search input reported its full current text
    SearchChanged(String),
    /// A card was activated
    SelectEvent(EventId),
    /// The detail overlay was dismissed
    DismissDetail,
    Quit,
}

/// What the event loop should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::LoadingFinished => {
            if app.is_loading {
                info!("Loading finished, showing {} events", app.catalogue.len());
            }
            app.is_loading = false;
            Effect::None
        }
        Action::SearchChanged(term) => {
            // Always re-derive from the full catalogue
            app.visible_events = filter_events(&app.catalogue, &term)
                .iter()
                .map(|event| event.id)
                .collect();
            debug!(
                "Search {:?} matched {} of {} events",
                term,
                app.visible_events.len(),
                app.catalogue.len()
            );
            app.search_term = term;
            Effect::None
        }
        Action::SelectEvent(id) => {
            if app.is_loading {
                debug!("Ignoring selection of {} while loading", id);
            } else if let Some(event) = app.catalogue.get(id) {
                info!("Selected event {} ({})", id, event.name);
                app.selected_event = Some(id);
            } else {
                warn!("Ignoring selection of unknown event {}", id);
            }
            Effect::None
        }
        Action::DismissDetail => {
            if let Some(id) = app.selected_event.take() {
                info!("Dismissed detail for event {}", id);
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
