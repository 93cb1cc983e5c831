//! # EventGrid Component
//!
//! Scrollable, responsive grid of event cards.
//!
//! ## Responsibilities
//!
//! - Lay out cards in 1, 2 or 3 columns depending on width
//! - Own each card's local state (its image load flag), keyed by event id
//! - Keyboard focus, scrolling and mouse hit testing
//! - Show the "no results" message instead of an empty grid
//!
//! ## Architecture
//!
//! `EventGrid` is a transient component (created each frame) that wraps
//! `&'a mut EventGridState` (persistent state) and the visible events (props).
//! Card positions are recorded during render so later mouse clicks can be
//! resolved to an event.
//!
//! Per-card state follows the cards: when the visible list changes, cards
//! that stay keep their state, cards that leave drop it, and new cards start
//! fresh with their own load attempt.

use std::collections::HashMap;

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::event::{Event, EventId};
use crate::core::image::{ImageSource, ImageState};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::event_card::{CARD_HEIGHT, EventCard};
use crate::tui::event::TuiEvent;

pub const NO_RESULTS_MESSAGE: &str = "No events found matching your search.";

const COLUMN_GAP: u16 = 2;
const ROW_GAP: u16 = 1;
/// Widths at which the grid gains a column
const TWO_COLUMN_WIDTH: u16 = 60;
const THREE_COLUMN_WIDTH: u16 = 100;

/// High-level events emitted by the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    /// A card was clicked, or Enter was pressed on the focused card
    Open(EventId),
}

pub fn column_count(width: u16) -> usize {
    if width >= THREE_COLUMN_WIDTH {
        3
    } else if width >= TWO_COLUMN_WIDTH {
        2
    } else {
        1
    }
}

/// Card rectangles in content coordinates (origin at the grid's top-left).
pub fn layout_cards(count: usize, width: u16) -> Vec<Rect> {
    let columns = column_count(width);
    let gaps = COLUMN_GAP * (columns as u16 - 1);
    let card_width = width.saturating_sub(gaps) / columns as u16;

    (0..count)
        .map(|i| {
            let col = (i % columns) as u16;
            let row = (i / columns) as u16;
            Rect::new(
                col * (card_width + COLUMN_GAP),
                row * (CARD_HEIGHT + ROW_GAP),
                card_width,
                CARD_HEIGHT,
            )
        })
        .collect()
}

/// Persistent grid state. Must live in the parent TuiState.
pub struct EventGridState {
    pub scroll_state: ScrollViewState,
    /// Index into the visible list of the keyboard-focused card
    pub focused: usize,
    /// Local state of each mounted card
    cards: HashMap<EventId, ImageState>,
    /// Ids of the mounted cards, in display order
    order: Vec<EventId>,
    /// Card areas from the last render, in content coordinates
    layout: Vec<Rect>,
    columns: usize,
    /// Screen area of the grid from the last render
    viewport: Rect,
}

impl Default for EventGridState {
    fn default() -> Self {
        Self::new()
    }
}

impl EventGridState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            focused: 0,
            cards: HashMap::new(),
            order: Vec::new(),
            layout: Vec::new(),
            columns: 1,
            viewport: Rect::default(),
        }
    }

    /// Mounts and unmounts cards to match `visible`.
    ///
    /// A no-op when the visible list hasn't changed.
    pub fn sync(&mut self, visible: &[&Event], images: &dyn ImageSource) {
        let ids: Vec<EventId> = visible.iter().map(|event| event.id).collect();
        if ids == self.order {
            return;
        }

        self.cards.retain(|id, _| ids.contains(id));
        for event in visible {
            self.cards
                .entry(event.id)
                .or_insert_with(|| ImageState::load(images, &event.image));
        }

        self.order = ids;
        self.layout.clear();
        self.focused = 0;
        self.scroll_state.scroll_to_top();
    }

    pub fn order(&self) -> &[EventId] {
        &self.order
    }

    pub fn card_image(&self, id: EventId) -> Option<&ImageState> {
        self.cards.get(&id)
    }

    pub fn card_image_mut(&mut self, id: EventId) -> Option<&mut ImageState> {
        self.cards.get_mut(&id)
    }

    pub fn focused_id(&self) -> Option<EventId> {
        self.order.get(self.focused).copied()
    }

    pub fn is_on_top_row(&self) -> bool {
        self.focused < self.columns
    }

    /// Screen area of a card as last rendered, if any part is visible.
    pub fn card_area(&self, id: EventId) -> Option<Rect> {
        let index = self.order.iter().position(|o| *o == id)?;
        let content = self.layout.get(index)?;
        let offset_y = self.scroll_state.offset().y;
        if content.bottom() <= offset_y {
            return None;
        }
        let y = content.y.saturating_sub(offset_y);
        let on_screen = Rect::new(
            self.viewport.x + content.x,
            self.viewport.y + y,
            content.width,
            content.bottom() - offset_y - y,
        );
        Some(on_screen.intersection(self.viewport)).filter(|r| !r.is_empty())
    }

    /// Finds the card under a screen position.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<EventId> {
        if !self.viewport.contains(Position::new(column, row)) {
            return None;
        }
        let content = Position::new(
            column - self.viewport.x,
            row - self.viewport.y + self.scroll_state.offset().y,
        );
        self.layout
            .iter()
            .position(|rect| rect.contains(content))
            .and_then(|index| self.order.get(index).copied())
    }

    fn move_focus(&mut self, target: Option<usize>) {
        if let Some(index) = target
            && index < self.order.len()
        {
            self.focused = index;
            self.scroll_to_focused();
        }
    }

    /// Scroll so the focused card is fully visible.
    pub fn scroll_to_focused(&mut self) {
        let Some(rect) = self.layout.get(self.focused) else {
            return;
        };
        let offset_y = self.scroll_state.offset().y;
        let height = self.viewport.height;

        if rect.y < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: rect.y });
        } else if rect.bottom() > offset_y + height {
            let new_y = rect.bottom().saturating_sub(height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }
}

impl EventHandler for EventGridState {
    type Event = GridEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorLeft => {
                self.move_focus(self.focused.checked_sub(1));
                None
            }
            TuiEvent::CursorRight => {
                self.move_focus(Some(self.focused + 1));
                None
            }
            TuiEvent::CursorUp => {
                self.move_focus(self.focused.checked_sub(self.columns));
                None
            }
            TuiEvent::CursorDown => {
                self.move_focus(Some(self.focused + self.columns));
                None
            }
            TuiEvent::Submit => self.focused_id().map(GridEvent::Open),
            TuiEvent::MouseClick(column, row) => {
                let id = self.hit_test(*column, *row)?;
                if let Some(index) = self.order.iter().position(|o| *o == id) {
                    self.focused = index;
                }
                Some(GridEvent::Open(id))
            }
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the grid.
pub struct EventGrid<'a> {
    state: &'a mut EventGridState,
    events: &'a [&'a Event],
    date_format: &'a str,
    show_focus: bool,
}

impl<'a> EventGrid<'a> {
    pub fn new(
        state: &'a mut EventGridState,
        events: &'a [&'a Event],
        date_format: &'a str,
        show_focus: bool,
    ) -> Self {
        Self {
            state,
            events,
            date_format,
            show_focus,
        }
    }
}

impl Component for EventGrid<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.viewport = area;

        if self.events.is_empty() {
            self.state.layout.clear();
            let message = Paragraph::new(NO_RESULTS_MESSAGE)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray));
            let middle = Rect::new(area.x, area.y + area.height / 3, area.width, 1);
            frame.render_widget(message, middle.intersection(area));
            return;
        }

        // Leave a column for the scrollbar
        let content_width = area.width.saturating_sub(1);
        let layout = layout_cards(self.events.len(), content_width);
        let total_height = layout.last().map(|r| r.bottom()).unwrap_or(0);

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let unmounted = ImageState::default();
        for (index, (event, rect)) in self.events.iter().zip(&layout).enumerate() {
            let image = self.state.cards.get(&event.id).unwrap_or(&unmounted);
            let is_focused = self.show_focus && index == self.state.focused;
            scroll_view.render_widget(
                EventCard::new(event, image, self.date_format, is_focused),
                *rect,
            );
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        self.state.columns = column_count(content_width);
        self.state.layout = layout;

        // Keep the scroll offset inside the content after a resize
        let max_y = total_height.saturating_sub(area.height);
        let offset = self.state.scroll_state.offset();
        if offset.y > max_y {
            self.state.scroll_state.set_offset(Position { x: 0, y: max_y });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalogue::Catalogue;
    use crate::core::config::DEFAULT_DATE_FORMAT;
    use crate::core::event::{Event, EventId, ThumbnailColor};
    use crate::core::filter::filter_events;
    use crate::test_support::{NoImages, StubImages};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn custom_event(id: u32, image: &str) -> Event {
        Event {
            id: EventId(id),
            name: format!("Event {id}"),
            date: "2024-12-01".to_string(),
            time: "10:00".to_string(),
            location: "Somewhere".to_string(),
            description: String::new(),
            image: image.to_string(),
            category: "Misc".to_string(),
            thumbnail_color: ThumbnailColor::Blue,
        }
    }

    fn render_grid(state: &mut EventGridState, events: &[&Event], width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                EventGrid::new(state, events, DEFAULT_DATE_FORMAT, true).render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_column_count_breakpoints() {
        assert_eq!(column_count(40), 1);
        assert_eq!(column_count(60), 2);
        assert_eq!(column_count(99), 2);
        assert_eq!(column_count(120), 3);
    }

    #[test]
    fn test_layout_cards_fills_rows_left_to_right() {
        let rects = layout_cards(4, 100);
        assert_eq!(rects[0].x, 0);
        assert_eq!(rects[1].y, 0);
        assert!(rects[1].x > rects[0].x);
        assert_eq!(rects[3].x, 0);
        assert_eq!(rects[3].y, CARD_HEIGHT + ROW_GAP);
        assert!(rects.iter().all(|r| r.height == CARD_HEIGHT));
    }

    #[test]
    fn test_empty_list_shows_no_results_message() {
        let mut state = EventGridState::new();
        let text = render_grid(&mut state, &[], 80, 20);
        assert!(text.contains(NO_RESULTS_MESSAGE));
        assert!(state.hit_test(5, 5).is_none());
    }

    #[test]
    fn test_sync_keeps_state_for_cards_that_stay() {
        let catalogue = Catalogue::builtin();
        let mut state = EventGridState::new();
        state.sync(&filter_events(&catalogue, ""), &NoImages);
        assert_eq!(state.order().len(), 6);

        // Pretend card 3 recovered; it stays mounted through the next search
        let id = EventId(3);
        *state.card_image_mut(id).unwrap() = ImageState::default();
        state.sync(&filter_events(&catalogue, "Chicago"), &NoImages);
        assert_eq!(state.order(), &[EventId(3), EventId(6)]);
        assert!(!state.card_image(id).unwrap().has_load_failed());
        assert!(state.card_image(EventId(1)).is_none());
    }

    #[test]
    fn test_image_failure_is_local_to_one_card() {
        let good = custom_event(1, "/img/good.png");
        let bad = custom_event(2, "/img/missing.png");
        let events = vec![&good, &bad];
        let mut state = EventGridState::new();
        state.sync(&events, &StubImages::with(&["/img/good.png"]));

        assert!(!state.card_image(EventId(1)).unwrap().has_load_failed());
        assert!(state.card_image(EventId(2)).unwrap().has_load_failed());

        state.card_image_mut(EventId(1)).unwrap().report_load_failure();
        state.card_image_mut(EventId(2)).unwrap().report_load_failure();
        assert!(state.card_image(EventId(1)).unwrap().has_load_failed());
        assert!(state.card_image(EventId(2)).unwrap().has_load_failed());

        // A third card mounted later starts with its own attempt
        let third = custom_event(3, "/img/good.png");
        state.sync(&[&good, &bad, &third], &StubImages::with(&["/img/good.png"]));
        assert!(!state.card_image(EventId(3)).unwrap().has_load_failed());
    }

    #[test]
    fn test_keyboard_focus_moves_across_columns_and_rows() {
        let catalogue = Catalogue::builtin();
        let events = filter_events(&catalogue, "");
        let mut state = EventGridState::new();
        state.sync(&events, &NoImages);
        render_grid(&mut state, &events, 101, 40);

        assert_eq!(state.focused_id(), Some(EventId(1)));
        state.handle_event(&TuiEvent::CursorRight);
        assert_eq!(state.focused_id(), Some(EventId(2)));
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.focused_id(), Some(EventId(5)));
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.focused_id(), Some(EventId(5)));
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.focused_id(), Some(EventId(2)));
        assert!(state.is_on_top_row());
        state.handle_event(&TuiEvent::CursorLeft);
        state.handle_event(&TuiEvent::CursorLeft);
        assert_eq!(state.focused_id(), Some(EventId(1)));

        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(GridEvent::Open(EventId(1)))
        );
    }

    #[test]
    fn test_click_opens_card_under_pointer() {
        let catalogue = Catalogue::builtin();
        let events = filter_events(&catalogue, "");
        let mut state = EventGridState::new();
        state.sync(&events, &NoImages);
        render_grid(&mut state, &events, 101, 40);

        let area = state.card_area(EventId(5)).unwrap();
        let event = state.handle_event(&TuiEvent::MouseClick(area.x + 2, area.y + 2));
        assert_eq!(event, Some(GridEvent::Open(EventId(5))));
        assert_eq!(state.focused_id(), Some(EventId(5)));

        // The gap between rows belongs to no card
        let gap_row = area.y - 1;
        assert_eq!(state.hit_test(area.x + 2, gap_row), None);
    }

    #[test]
    fn test_scrolling_shifts_hit_test() {
        let catalogue = Catalogue::builtin();
        let events = filter_events(&catalogue, "");
        let mut state = EventGridState::new();
        state.sync(&events, &NoImages);
        // One column, short viewport: cards stack vertically
        render_grid(&mut state, &events, 40, 12);

        assert_eq!(state.hit_test(3, 3), Some(EventId(1)));
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.focused_id(), Some(EventId(2)));
        // Focus scrolled the second card into view
        assert_eq!(state.scroll_state.offset().y, CARD_HEIGHT + ROW_GAP + CARD_HEIGHT - 12);
        let text = render_grid(&mut state, &events, 40, 12);
        assert!(text.contains("Tech Conference"));
    }
}
