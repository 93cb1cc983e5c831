//! # TUI Components
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as props:
//! - `TitleBar`: app name and result count
//! - `LoadingView`: spinner shown during the startup delay
//! - `EventCard`, `ImagePanel`: widgets drawn by the grid and overlay
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `SearchBar`: text field, emits `SearchEvent::Changed`
//! - `EventGrid`: card grid with per-card state, emits `GridEvent::Open`
//! - `DetailOverlay`: modal detail view, emits `OverlayEvent::Dismiss`
//!
//! Stateful components split into a persistent `...State` owned by `TuiState`
//! and a transient wrapper built each frame from borrowed state and props.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs      (app name and count)
//! ├── loading.rs        (startup spinner)
//! ├── search_bar.rs     (search text field)
//! ├── image_panel.rs    (image or fallback panel)
//! ├── event_card.rs     (one event tile)
//! ├── event_grid.rs     (scrollable card grid)
//! └── detail_overlay.rs (modal detail view)
//! ```

pub mod detail_overlay;
pub mod event_card;
pub mod event_grid;
pub mod image_panel;
pub mod loading;
pub mod search_bar;
mod title_bar;

pub use detail_overlay::{DetailOverlay, DetailOverlayState, OverlayEvent};
pub use event_grid::{EventGrid, EventGridState, GridEvent};
pub use loading::LoadingView;
pub use search_bar::{SearchBar, SearchEvent};
pub use title_bar::TitleBar;
