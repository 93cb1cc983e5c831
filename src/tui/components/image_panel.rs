//! # ImagePanel Component
//!
//! The picture area at the top of a card or the detail overlay.
//!
//! A terminal can't show the picture itself, so a resolved image is drawn as
//! a shaded panel naming the file. When the owning instance's `ImageState`
//! reports a load failure, the panel switches to the fallback visual: a solid
//! block in the event's thumbnail colour with a placeholder icon.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::palette::tailwind;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::core::event::{Event, ThumbnailColor};
use crate::core::image::ImageState;

pub const PLACEHOLDER_ICON: &str = "▨";
const PANEL_BG: Color = tailwind::SLATE.c700;

/// Maps the symbolic thumbnail colour to a terminal colour.
pub fn thumbnail_color(color: ThumbnailColor) -> Color {
    match color {
        ThumbnailColor::Purple => tailwind::PURPLE.c500,
        ThumbnailColor::Blue => tailwind::BLUE.c500,
        ThumbnailColor::Red => tailwind::RED.c500,
        ThumbnailColor::Indigo => tailwind::INDIGO.c500,
        ThumbnailColor::Green => tailwind::GREEN.c500,
        ThumbnailColor::Yellow => tailwind::YELLOW.c500,
    }
}

/// Pill-style category label.
pub fn category_badge(category: &str, style: Style) -> Span<'static> {
    Span::styled(format!(" {category} "), style.add_modifier(Modifier::BOLD))
}

pub struct ImagePanel<'a> {
    event: &'a Event,
    image: &'a ImageState,
    /// Overlay the category badge in the top-right corner
    show_badge: bool,
}

impl<'a> ImagePanel<'a> {
    pub fn new(event: &'a Event, image: &'a ImageState) -> Self {
        Self {
            event,
            image,
            show_badge: false,
        }
    }

    pub fn with_badge(mut self) -> Self {
        self.show_badge = true;
        self
    }

    fn render_fallback(&self, area: Rect, buf: &mut Buffer) {
        let color = thumbnail_color(self.event.thumbnail_color);
        Block::new().style(Style::default().bg(color)).render(area, buf);

        let icon = Paragraph::new(PLACEHOLDER_ICON)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White).bg(color));
        icon.render(middle_row(area), buf);
    }

    fn render_picture(&self, area: Rect, buf: &mut Buffer) {
        Block::new().style(Style::default().bg(PANEL_BG)).render(area, buf);

        let label = match self.image.info() {
            Some(info) => format!("▣ {} ({} KB)", info.file_name, info.size_bytes.div_ceil(1024)),
            None => "▣".to_string(),
        };
        let caption = Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(Style::default().fg(tailwind::SLATE.c200).bg(PANEL_BG));
        caption.render(middle_row(area), buf);
    }

    fn render_badge(&self, area: Rect, buf: &mut Buffer) {
        let badge = category_badge(
            &self.event.category,
            Style::default().fg(tailwind::GRAY.c800).bg(tailwind::GRAY.c100),
        );
        let width = badge.content.width() as u16;
        // One column of margin from the right edge
        if area.width < width + 2 || area.height == 0 {
            return;
        }
        let badge_area = Rect::new(area.right() - width - 1, area.y, width, 1);
        Paragraph::new(Line::from(badge)).render(badge_area, buf);
    }
}

impl Widget for ImagePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        if self.image.has_load_failed() {
            self.render_fallback(area, buf);
        } else {
            self.render_picture(area, buf);
        }
        if self.show_badge {
            self.render_badge(area, buf);
        }
    }
}

fn middle_row(area: Rect) -> Rect {
    Rect::new(area.x, area.y + area.height / 2, area.width, 1)
}
