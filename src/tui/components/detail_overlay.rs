//! # Detail Overlay Component
//!
//! Modal overlay showing everything about one event.
//! Opened by selecting a card, dismissed with Esc or the `[X]` control.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `DetailOverlayState` lives in `TuiState` while the overlay is open
//! - `DetailOverlay` is created each frame with borrowed state
//!
//! The overlay owns its own `ImageState`. It loads the image independently of
//! the card that opened it, so a card's failure never carries over.
//!
//! Everything below the image scrolls, so the full description stays
//! reachable on short terminals. The image shrinks to a third of the height
//! when space is tight.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Position, Rect, Size};
use ratatui::style::palette::tailwind;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Widget};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::event::{Event, EventId};
use crate::core::image::{ImageSource, ImageState};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::event_card::{CALENDAR_ICON, CLOCK_ICON, PIN_ICON};
use crate::tui::components::image_panel::{ImagePanel, category_badge, thumbnail_color};
use crate::tui::event::TuiEvent;

pub const CLOSE_LABEL: &str = "[X]";
const IMAGE_HEIGHT: u16 = 9;
const MAX_WIDTH: u16 = 90;

/// Events emitted by the detail overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    Dismiss,
}

/// Persistent state for the detail overlay.
pub struct DetailOverlayState {
    pub event_id: EventId,
    pub image: ImageState,
    pub scroll_state: ScrollViewState,
    /// Screen area of the close control from the last render
    close_area: Rect,
}

impl DetailOverlayState {
    /// Opens the overlay for `event`, making a fresh image attempt.
    pub fn open(event: &Event, images: &dyn ImageSource) -> Self {
        Self {
            event_id: event.id,
            image: ImageState::load(images, &event.image),
            scroll_state: ScrollViewState::default(),
            close_area: Rect::default(),
        }
    }

    pub fn close_area(&self) -> Rect {
        self.close_area
    }
}

impl EventHandler for DetailOverlayState {
    type Event = OverlayEvent;

    /// The overlay is modal: anything it doesn't act on is swallowed.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => Some(OverlayEvent::Dismiss),
            TuiEvent::MouseClick(column, row)
                if self.close_area.contains((*column, *row).into()) =>
            {
                Some(OverlayEvent::Dismiss)
            }
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                None
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
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

/// Transient render wrapper for the detail overlay.
pub struct DetailOverlay<'a> {
    state: &'a mut DetailOverlayState,
    event: &'a Event,
    date_format: &'a str,
}

impl<'a> DetailOverlay<'a> {
    pub fn new(state: &'a mut DetailOverlayState, event: &'a Event, date_format: &'a str) -> Self {
        Self {
            state,
            event,
            date_format,
        }
    }
}

impl Component for DetailOverlay<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        dim(frame.buffer_mut(), area);

        let mut overlay = centered_rect(70, 80, area);
        if overlay.width > MAX_WIDTH {
            overlay.x += (overlay.width - MAX_WIDTH) / 2;
            overlay.width = MAX_WIDTH;
        }
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Gray))
            .title_bottom(Line::from(" Esc Close ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let image_height = IMAGE_HEIGHT.min(inner.height / 3);
        let [image_area, _, details_area] = Layout::vertical([
            Constraint::Length(image_height),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        ImagePanel::new(self.event, &self.state.image).render(image_area, frame.buffer_mut());

        // Close control in the top-right corner, drawn even when the image is squeezed out
        let close_width = CLOSE_LABEL.len() as u16;
        self.state.close_area = if inner.width > close_width && inner.height > 0 {
            Rect::new(inner.right() - close_width, inner.y, close_width, 1)
        } else {
            Rect::default()
        };
        let close = Paragraph::new(CLOSE_LABEL).style(
            Style::default()
                .fg(Color::White)
                .bg(tailwind::GRAY.c800)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(close, self.state.close_area);

        // Leave a column for the scrollbar
        let content_width = details_area.width.saturating_sub(1);
        if content_width == 0 || details_area.height == 0 {
            return;
        }
        let lines = self.detail_lines(content_width as usize);
        let content_height = lines.len() as u16;

        // Keep the offset inside the content after a resize
        let max_y = content_height.saturating_sub(details_area.height);
        if self.state.scroll_state.offset().y > max_y {
            self.state.scroll_state.set_offset(Position { x: 0, y: max_y });
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            Paragraph::new(lines),
            Rect::new(0, 0, content_width, content_height),
        );
        frame.render_stateful_widget(scroll_view, details_area, &mut self.state.scroll_state);
    }
}

impl DetailOverlay<'_> {
    /// Heading, date/time, location and the description, pre-wrapped to `width`.
    fn detail_lines(&self, width: usize) -> Vec<Line<'static>> {
        let badge_style = Style::default()
            .fg(Color::White)
            .bg(thumbnail_color(self.event.thumbnail_color));
        let mut lines = vec![Line::from(vec![
            Span::styled(
                self.event.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            category_badge(&self.event.category, badge_style),
        ])];

        let muted = Style::default().fg(Color::Gray);
        lines.push(Line::from(vec![
            Span::styled(format!("{CALENDAR_ICON} "), muted),
            Span::raw(self.event.formatted_date(self.date_format)),
            Span::styled(format!("   {CLOCK_ICON} "), muted),
            Span::raw(self.event.time.clone()),
        ]));

        let place = format!("{PIN_ICON} {}", self.event.location);
        lines.extend(wrap(&place, width).into_iter().map(|l| Line::styled(l, muted)));

        lines.push(Line::default());
        lines.extend(wrap(&self.event.description, width).into_iter().map(Line::from));
        lines
    }
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    textwrap::wrap(text, width)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Fades whatever is already drawn behind the overlay.
fn dim(buf: &mut Buffer, area: Rect) {
    buf.set_style(area, Style::default().add_modifier(Modifier::DIM));
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
