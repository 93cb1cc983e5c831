use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::event::Event;
use crate::core::image::ImageState;
use crate::tui::components::image_panel::ImagePanel;

pub const CALENDAR_ICON: &str = "▦";
pub const CLOCK_ICON: &str = "◷";
pub const PIN_ICON: &str = "⌖";

const IMAGE_HEIGHT: u16 = 5;
const NAME_LINES: usize = 2;
/// Borders (2) + image + name + date/time row + location row
pub const CARD_HEIGHT: u16 = 2 + IMAGE_HEIGHT + NAME_LINES as u16 + 1 + 1;

/// A compact summary tile for one event.
///
/// # Design
///
/// `EventCard` is a **transient component**: built fresh each frame from
/// borrowed data. Its image load flag is owned by the grid's per-card state
/// and passed in, so a failure on one card never reaches another.
///
/// Activation (click or Enter) is resolved by the parent `EventGrid`, which
/// knows where each card was drawn.
pub struct EventCard<'a> {
    pub event: &'a Event,
    pub image: &'a ImageState,
    /// strftime pattern for the date row
    pub date_format: &'a str,
    pub is_focused: bool,
}

impl<'a> EventCard<'a> {
    pub fn new(event: &'a Event, image: &'a ImageState, date_format: &'a str, is_focused: bool) -> Self {
        Self {
            event,
            image,
            date_format,
            is_focused,
        }
    }
}

impl Widget for EventCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.is_focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let [image_area, name_area, when_area, where_area] = Layout::vertical([
            Constraint::Length(IMAGE_HEIGHT),
            Constraint::Length(NAME_LINES as u16),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        ImagePanel::new(self.event, self.image)
            .with_badge()
            .render(image_area, buf);

        let width = inner.width as usize;
        let name_style = if self.is_focused {
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let name_lines: Vec<Line> = clamp_lines(&self.event.name, width, NAME_LINES)
            .into_iter()
            .map(|line| Line::styled(line, name_style))
            .collect();
        Paragraph::new(name_lines).render(name_area, buf);

        let muted = Style::default().fg(Color::Gray);
        let when = Line::from(vec![
            Span::styled(format!("{CALENDAR_ICON} "), muted),
            Span::styled(self.event.formatted_date(self.date_format), muted),
            Span::styled(format!("  {CLOCK_ICON} "), muted),
            Span::styled(self.event.time.as_str(), muted),
        ]);
        Paragraph::new(when).render(when_area, buf);

        let location = truncate_to_width(&self.event.location, width.saturating_sub(2));
        let place = Line::from(vec![
            Span::styled(format!("{PIN_ICON} "), muted),
            Span::styled(location, muted),
        ]);
        Paragraph::new(place).render(where_area, buf);
    }
}

/// Truncate a string to fit within `max_width` columns, ending in "…" if cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Word-wrap `text` to `width` and keep at most `max_lines`, marking the cut
/// on the last kept line.
pub fn clamp_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }
    let options = textwrap::Options::new(width)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    let wrapped = textwrap::wrap(text, options);

    let mut lines: Vec<String> = wrapped
        .iter()
        .take(max_lines)
        .map(|line| line.to_string())
        .collect();
    if wrapped.len() > max_lines
        && let Some(last) = lines.last_mut()
    {
        *last = truncate_to_width(&format!("{last}…"), width);
    }
    lines
}
