//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates terminal events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resize or a
//!   background action.
//!
//! ## Input Routing
//!
//! ```text
//! ForceQuit ──────────────────────────────▶ Action::Quit (always)
//! overlay open ──▶ DetailOverlayState ────▶ Action::DismissDetail
//! mouse / scroll ─▶ EventGridState ───────▶ Action::SelectEvent
//! Focus::Search ──▶ SearchBar ────────────▶ Action::SearchChanged
//! Focus::Grid ────▶ EventGridState ───────▶ Action::SelectEvent
//! ```

mod component;
mod components;
pub mod event;
pub(crate) mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use ratatui::layout::{Position, Rect};

use crate::core::action::{Action, Effect, update};
use crate::core::catalogue::Catalogue;
use crate::core::config::ResolvedConfig;
use crate::core::image::{FileImageSource, ImageSource};
use crate::core::schedule::ScheduledAction;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    DetailOverlayState, EventGridState, GridEvent, OverlayEvent, SearchBar, SearchEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// Where keystrokes go when no overlay is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Typing edits the search text. Down/Tab/Enter move to the grid.
    Search,
    /// Arrows move between cards. Typing switches back to Search.
    Grid,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub search_bar: SearchBar,
    pub grid: EventGridState,
    /// Detail overlay (None = closed)
    pub overlay: Option<DetailOverlayState>,
    pub focus: Focus,
    /// Search box area from the last render, for click-to-focus
    pub search_area: Rect,
    pub date_format: String,
    images: Box<dyn ImageSource>,
}

impl TuiState {
    pub fn new(images: Box<dyn ImageSource>, date_format: String) -> Self {
        Self {
            search_bar: SearchBar::new(),
            grid: EventGridState::new(),
            overlay: None,
            focus: Focus::Search, // User expects to type immediately
            search_area: Rect::default(),
            date_format,
            images,
        }
    }

    /// Brings component state in line with the app after an update.
    ///
    /// Mounts and unmounts cards, and opens or closes the overlay to match
    /// `selected_event`.
    pub fn sync(&mut self, app: &App) {
        self.grid.sync(&app.visible(), self.images.as_ref());
        if self.grid.order().is_empty() && self.focus == Focus::Grid {
            self.focus = Focus::Search;
        }

        match app.selected() {
            Some(event) => {
                let already_open = self
                    .overlay
                    .as_ref()
                    .is_some_and(|overlay| overlay.event_id == event.id);
                if !already_open {
                    self.overlay = Some(DetailOverlayState::open(event, self.images.as_ref()));
                }
            }
            None => self.overlay = None,
        }
    }

    /// Routes one terminal event to the component that owns it.
    pub fn handle_event(&mut self, app: &App, event: &TuiEvent) -> Option<Action> {
        if matches!(event, TuiEvent::ForceQuit) {
            return Some(Action::Quit);
        }
        if app.is_loading || matches!(event, TuiEvent::Resize) {
            return None;
        }

        // The overlay is modal
        if let Some(overlay) = self.overlay.as_mut() {
            return match overlay.handle_event(event)? {
                OverlayEvent::Dismiss => Some(Action::DismissDetail),
            };
        }

        match event {
            TuiEvent::MouseClick(column, row)
                if self.search_area.contains(Position::new(*column, *row)) =>
            {
                self.focus = Focus::Search;
                return None;
            }
            TuiEvent::MouseClick(..) => {
                let opened = self.grid_event(event);
                if opened.is_some() {
                    self.focus = Focus::Grid;
                }
                return opened;
            }
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown => return self.grid_event(event),
            _ => {}
        }

        match self.focus {
            Focus::Search => match event {
                TuiEvent::SwitchFocus | TuiEvent::CursorDown | TuiEvent::Submit => {
                    if !self.grid.order().is_empty() {
                        self.focus = Focus::Grid;
                        self.grid.scroll_to_focused();
                    }
                    None
                }
                _ => self.search_event(event),
            },
            Focus::Grid => match event {
                TuiEvent::SwitchFocus | TuiEvent::Escape => {
                    self.focus = Focus::Search;
                    None
                }
                TuiEvent::CursorUp if self.grid.is_on_top_row() => {
                    self.focus = Focus::Search;
                    None
                }
                // Typing auto-switches to Search and forwards the event
                TuiEvent::InputChar(_) | TuiEvent::Paste(_) | TuiEvent::Backspace => {
                    self.focus = Focus::Search;
                    self.search_event(event)
                }
                _ => self.grid_event(event),
            },
        }
    }

    fn search_event(&mut self, event: &TuiEvent) -> Option<Action> {
        match self.search_bar.handle_event(event)? {
            SearchEvent::Changed(text) => Some(Action::SearchChanged(text)),
        }
    }

    fn grid_event(&mut self, event: &TuiEvent) -> Option<Action> {
        match self.grid.handle_event(event)? {
            GridEvent::Open(id) => Some(Action::SelectEvent(id)),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for search editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Applies an action and re-syncs component state.
fn dispatch(app: &mut App, tui: &mut TuiState, action: Action) -> Effect {
    let effect = update(app, action);
    tui.sync(app);
    effect
}

pub fn run(config: ResolvedConfig, catalogue: Catalogue) -> std::io::Result<()> {
    let mut app = App::new(catalogue);
    let images = FileImageSource::new(config.asset_dir.clone());
    let mut tui = TuiState::new(Box::new(images), config.date_format.clone());
    tui.sync(&app);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let startup = ScheduledAction::schedule(config.loading_delay, Action::LoadingFinished, tx);

    let result = event_loop(&mut terminal, &mut app, &mut tui, &rx);

    // Nothing may fire into a torn-down loop
    startup.cancel();
    ratatui::restore();
    info!("EventSpot shut down");
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
    rx: &mpsc::Receiver<Action>,
) -> std::io::Result<()> {
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.is_loading;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, app, tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = tui.handle_event(app, &event)
                && dispatch(app, tui, action) == Effect::Quit
            {
                return Ok(());
            }
        }

        // Handle background task actions (startup delay)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(app, tui, action) == Effect::Quit {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::EventId;
    use crate::core::config::DEFAULT_DATE_FORMAT;
    use crate::test_support::{StubImages, draw_rows, loaded_app, test_app, test_tui};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(100, 40)).unwrap()
    }

    /// Feeds an event through routing and the reducer, like the event loop.
    fn send(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Option<Effect> {
        let action = tui.handle_event(app, &event)?;
        Some(dispatch(app, tui, action))
    }

    fn type_text(app: &mut App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            send(app, tui, TuiEvent::InputChar(c));
        }
    }

    fn visible_names(app: &App) -> Vec<&str> {
        app.visible().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_input_ignored_while_loading() {
        let mut app = test_app();
        let mut tui = test_tui(&app);
        type_text(&mut app, &mut tui, "Chicago");
        assert!(app.search_term.is_empty());
        assert!(tui.search_bar.text().is_empty());
        assert_eq!(tui.handle_event(&app, &TuiEvent::ForceQuit), Some(Action::Quit));
    }

    #[test]
    fn test_typing_filters_on_every_keystroke() {
        let mut app = loaded_app();
        let mut tui = test_tui(&app);

        type_text(&mut app, &mut tui, "Chi");
        assert_eq!(app.search_term, "Chi");
        assert_eq!(
            visible_names(&app),
            vec!["Food & Wine Festival", "Comedy Night Special"]
        );
        assert_eq!(tui.grid.order(), &[EventId(3), EventId(6)]);

        for _ in 0..3 {
            send(&mut app, &mut tui, TuiEvent::Backspace);
        }
        assert_eq!(app.visible().len(), 6);
    }

    #[test]
    fn test_no_match_keeps_focus_on_search() {
        let mut app = loaded_app();
        let mut tui = test_tui(&app);
        type_text(&mut app, &mut tui, "zzz-no-match");
        assert!(app.visible().is_empty());

        send(&mut app, &mut tui, TuiEvent::SwitchFocus);
        assert_eq!(tui.focus, Focus::Search);
    }

    #[test]
    fn test_keyboard_open_and_dismiss() {
        let mut app = loaded_app();
        let mut tui = test_tui(&app);
        let mut terminal = terminal();
        draw_rows(&mut terminal, &app, &mut tui);

        send(&mut app, &mut tui, TuiEvent::SwitchFocus);
        assert_eq!(tui.focus, Focus::Grid);
        send(&mut app, &mut tui, TuiEvent::CursorRight);
        send(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(app.selected_event, Some(EventId(2)));
        assert!(tui.overlay.is_some());

        send(&mut app, &mut tui, TuiEvent::Escape);
        assert_eq!(app.selected_event, None);
        assert!(tui.overlay.is_none());
        // Esc closed the overlay only; focus stays on the grid
        assert_eq!(tui.focus, Focus::Grid);
    }

    #[test]
    fn test_typing_in_grid_returns_to_search() {
        let mut app = loaded_app();
        let mut tui = test_tui(&app);
        send(&mut app, &mut tui, TuiEvent::CursorDown);
        assert_eq!(tui.focus, Focus::Grid);

        send(&mut app, &mut tui, TuiEvent::InputChar('B'));
        assert_eq!(tui.focus, Focus::Search);
        assert_eq!(app.search_term, "B");
    }

    #[test]
    fn test_click_marathon_opens_details() {
        let mut app = loaded_app();
        let mut tui = test_tui(&app);
        let mut terminal = terminal();
        draw_rows(&mut terminal, &app, &mut tui);

        let card = tui.grid.card_area(EventId(5)).unwrap();
        send(&mut app, &mut tui, TuiEvent::MouseClick(card.x + 3, card.y + 3));
        assert_eq!(app.selected().map(|e| e.name.as_str()), Some("Marathon 2024"));

        let text = draw_rows(&mut terminal, &app, &mut tui).join("\n");
        assert!(text.contains("Annual marathon event"));
        assert!(text.contains("12/5/2024"));
        assert!(text.contains("07:00"));
    }

    #[test]
    fn test_overlay_blocks_grid_and_search() {
        let mut app = loaded_app();
        let mut tui = test_tui(&app);
        let mut terminal = terminal();
        draw_rows(&mut terminal, &app, &mut tui);

        let card = tui.grid.card_area(EventId(1)).unwrap();
        send(&mut app, &mut tui, TuiEvent::MouseClick(card.x + 3, card.y + 3));
        draw_rows(&mut terminal, &app, &mut tui);

        type_text(&mut app, &mut tui, "Boston");
        assert!(app.search_term.is_empty());
        send(&mut app, &mut tui, TuiEvent::ScrollDown);
        assert_eq!(app.selected_event, Some(EventId(1)));
    }

    #[test]
    fn test_close_button_dismisses_and_grid_is_unchanged() {
        let mut app = loaded_app();
        let mut tui = test_tui(&app);
        let mut terminal = terminal();
        type_text(&mut app, &mut tui, "Boston");
        draw_rows(&mut terminal, &app, &mut tui);
        let before = app.visible_events.clone();

        let card = tui.grid.card_area(EventId(5)).unwrap();
        send(&mut app, &mut tui, TuiEvent::MouseClick(card.x + 3, card.y + 3));
        draw_rows(&mut terminal, &app, &mut tui);

        let close = tui.overlay.as_ref().unwrap().close_area();
        send(&mut app, &mut tui, TuiEvent::MouseClick(close.x, close.y));

        assert_eq!(app.selected_event, None);
        assert!(tui.overlay.is_none());
        assert_eq!(app.visible_events, before);
        assert_eq!(app.search_term, "Boston");

        let text = draw_rows(&mut terminal, &app, &mut tui).join("\n");
        assert!(!text.contains("Annual marathon event"));
        assert!(text.contains("Marathon 2024"));
    }

    #[test]
    fn test_overlay_image_is_separate_from_card() {
        let mut app = loaded_app();
        let images = StubImages::with(&["/api/placeholder/800/600"]);
        let mut tui = TuiState::new(Box::new(images), DEFAULT_DATE_FORMAT.to_string());
        tui.sync(&app);
        send(&mut app, &mut tui, TuiEvent::CursorDown);
        send(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(app.selected_event, Some(EventId(1)));

        // The card for the open event fails after the overlay loaded its own copy
        tui.grid.card_image_mut(EventId(1)).unwrap().report_load_failure();
        assert!(tui.grid.card_image(EventId(1)).unwrap().has_load_failed());
        assert!(!tui.overlay.as_ref().unwrap().image.has_load_failed());

        // And the other way round
        tui.overlay.as_mut().unwrap().image.report_load_failure();
        assert!(!tui.grid.card_image(EventId(2)).unwrap().has_load_failed());
    }


    #[test]
    fn test_force_quit_from_overlay() {
        let mut app = loaded_app();
        let mut tui = test_tui(&app);
        send(&mut app, &mut tui, TuiEvent::CursorDown);
        send(&mut app, &mut tui, TuiEvent::Submit);
        assert!(tui.overlay.is_some());

        assert_eq!(send(&mut app, &mut tui, TuiEvent::ForceQuit), Some(Effect::Quit));
    }
}
