//! # SearchBar Component
//!
//! Single-line free-text search field.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, backspace, delete)
//! - Report the full text after every edit, with no debounce or minimum length
//! - Cursor movement within the line (Left/Right/Home/End), which doesn't report
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `focused` is a prop from the
//! parent: it only changes how the box is drawn.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const PLACEHOLDER: &str = "Search events by name or location...";
const SEARCH_ICON: &str = "⌕ ";
/// Borders (2) + icon
const HORIZONTAL_OVERHEAD: u16 = 2 + 2;
pub const HEIGHT: u16 = 3;

/// High-level events emitted by the SearchBar
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// The text changed; carries the full current value
    Changed(String),
}

pub struct SearchBar {
    /// Text buffer (Internal State)
    buffer: String,
    /// Cursor position as byte offset in buffer
    cursor: usize,
    /// Whether keystrokes go here (Prop)
    pub focused: bool,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            focused: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    fn changed(&self) -> Option<SearchEvent> {
        Some(SearchEvent::Changed(self.buffer.clone()))
    }

    /// Visible slice of the buffer and the cursor column within it.
    ///
    /// When the text is wider than the box, the view scrolls so the cursor
    /// stays on screen.
    fn visible_window(&self, inner_width: usize) -> (&str, usize) {
        if inner_width == 0 {
            return ("", 0);
        }
        let before = &self.buffer[..self.cursor];
        let cursor_col = before.width();
        if cursor_col < inner_width {
            return (&self.buffer, cursor_col);
        }

        // Drop leading chars until the cursor fits; never past the cursor
        let mut start = 0;
        let mut dropped = 0;
        for (i, c) in before.char_indices() {
            if cursor_col - dropped < inner_width {
                break;
            }
            dropped += c.width().unwrap_or(0);
            start = i + c.len_utf8();
        }
        (&self.buffer[start..], cursor_col.saturating_sub(dropped))
    }
}

impl Component for SearchBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Blue)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style);

        let inner_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD) as usize;
        let icon = Span::styled(SEARCH_ICON, Style::default().fg(Color::Gray));

        let (line, cursor_col) = if self.buffer.is_empty() {
            let placeholder = Span::styled(
                PLACEHOLDER,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            );
            (Line::from(vec![icon, placeholder]), 0)
        } else {
            let (visible, col) = self.visible_window(inner_width);
            (Line::from(vec![icon, Span::raw(visible.to_string())]), col)
        };

        frame.render_widget(Paragraph::new(line).block(block), area);

        if self.focused {
            let x = area.x + HORIZONTAL_OVERHEAD - 1 + cursor_col as u16;
            frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }
}

impl EventHandler for SearchBar {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.changed()
            }
            TuiEvent::Paste(text) => {
                let line: String = text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
                if line.is_empty() {
                    return None;
                }
                self.buffer.insert_str(self.cursor, &line);
                self.cursor += line.len();
                self.changed()
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    self.changed()
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(self.cursor..next);
                    self.changed()
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            _ => None,
        }
    }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
