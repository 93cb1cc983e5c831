//! # TitleBar Component
//!
//! Application name and a count of the events currently shown.
//!
//! Stateless: every field is a prop set by the parent each frame.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub const APP_TITLE: &str = "EventSpot Lite";

pub struct TitleBar {
    /// Events passing the current search
    pub shown: usize,
    /// Size of the whole catalogue
    pub total: usize,
}

impl TitleBar {
    pub fn new(shown: usize, total: usize) -> Self {
        Self { shown, total }
    }

    fn count_text(&self) -> String {
        if self.shown == self.total {
            format!("{} events", self.total)
        } else {
            format!("{} of {} events", self.shown, self.total)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                APP_TITLE,
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", self.count_text()), Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
