//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::core::action::{Action, update};
use crate::core::catalogue::Catalogue;
use crate::core::config::DEFAULT_DATE_FORMAT;
use crate::core::image::{ImageError, ImageInfo, ImageSource};
use crate::core::state::App;
use crate::tui::TuiState;

/// An image source where nothing resolves, like the placeholder URLs.
pub struct NoImages;

impl ImageSource for NoImages {
    fn resolve(&self, locator: &str) -> Result<ImageInfo, ImageError> {
        Err(ImageError::Unsupported(locator.to_string()))
    }
}

/// An image source where only the listed locators resolve.
pub struct StubImages {
    available: Vec<String>,
}

impl StubImages {
    pub fn with(locators: &[&str]) -> Self {
        Self {
            available: locators.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl ImageSource for StubImages {
    fn resolve(&self, locator: &str) -> Result<ImageInfo, ImageError> {
        if !self.available.iter().any(|l| l == locator) {
            return Err(ImageError::NotFound(locator.into()));
        }
        let file_name = locator.rsplit('/').next().unwrap_or(locator).to_string();
        Ok(ImageInfo {
            file_name,
            size_bytes: 2048,
        })
    }
}

/// A fresh App over the built-in catalogue, still loading.
pub fn test_app() -> App {
    App::new(Catalogue::builtin())
}

/// A fresh App with the startup delay already elapsed.
pub fn loaded_app() -> App {
    let mut app = test_app();
    update(&mut app, Action::LoadingFinished);
    app
}

/// TUI state with no resolvable images, synced to `app`.
pub fn test_tui(app: &App) -> TuiState {
    let mut tui = TuiState::new(Box::new(NoImages), DEFAULT_DATE_FORMAT.to_string());
    tui.sync(app);
    tui
}

/// Draws the whole UI and returns the screen as one string per row.
pub fn draw_rows(
    terminal: &mut Terminal<TestBackend>,
    app: &App,
    tui: &mut TuiState,
) -> Vec<String> {
    terminal
        .draw(|f| crate::tui::ui::draw_ui(f, app, tui, 0))
        .unwrap();
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}
