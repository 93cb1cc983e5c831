//! # Core Application Logic
//!
//! This module contains EventSpot's browsing logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Catalogue (data)     │
//!                    │  • filter (search)      │
//!                    │  • State + Action       │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalogue`]: the fixed event list
//! - [`event`]: the `Event` record
//! - [`filter`]: name/location search
//! - [`state`]: the `App` struct, all browsing state in one place
//! - [`action`]: the `Action` enum and `update()` reducer
//! - [`schedule`]: cancelable delayed actions (startup delay)
//! - [`image`]: image locator resolution and per-instance load state
//! - [`config`]: settings and their override order

pub mod action;
pub mod catalogue;
pub mod config;
pub mod event;
pub mod filter;
pub mod image;
pub mod schedule;
pub mod state;
