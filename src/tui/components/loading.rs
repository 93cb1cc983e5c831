//! # Loading Component
//!
//! Shown on its own while the startup delay is running.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub const LOADING_MESSAGE: &str = "Loading events...";
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct LoadingView {
    frame_index: usize,
}

impl LoadingView {
    pub fn new(frame_index: usize) -> Self {
        Self { frame_index }
    }

    fn spinner(&self) -> &'static str {
        SPINNER[self.frame_index % SPINNER.len()]
    }
}

impl Component for LoadingView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                self.spinner(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(LOADING_MESSAGE, Style::default().fg(Color::Gray))),
        ];

        let [center] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(LoadingView::new(0).spinner(), LoadingView::new(SPINNER.len()).spinner());
        assert_ne!(LoadingView::new(0).spinner(), LoadingView::new(1).spinner());
    }

    #[test]
    fn test_renders_message() {
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|f| LoadingView::new(3).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains(LOADING_MESSAGE));
    }
}
