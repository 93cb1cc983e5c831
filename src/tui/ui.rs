use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::search_bar;
use crate::tui::components::{DetailOverlay, EventGrid, LoadingView, TitleBar};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const SEARCH_MAX_WIDTH: u16 = 50;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let area = frame.area();

    if app.is_loading {
        LoadingView::new(spinner_frame).render(frame, area);
        return;
    }

    use Constraint::{Length, Min};
    let [nav_area, grid_area, footer_area] =
        Layout::vertical([Length(search_bar::HEIGHT), Min(0), Length(1)]).areas(area);

    let search_width = SEARCH_MAX_WIDTH.min(area.width / 2);
    let [title_area, search_area] =
        Layout::horizontal([Min(0), Length(search_width)]).areas(nav_area);

    // Title sits on the search box's text row
    let title_row = Rect::new(title_area.x + 1, title_area.y + 1, title_area.width.saturating_sub(1), 1)
        .intersection(title_area);
    TitleBar::new(app.visible_events.len(), app.catalogue.len()).render(frame, title_row);

    let overlay_open = tui.overlay.is_some();
    tui.search_bar.focused = tui.focus == Focus::Search && !overlay_open;
    tui.search_bar.render(frame, search_area);
    tui.search_area = search_area;

    let visible = app.visible();
    let show_focus = tui.focus == Focus::Grid && !overlay_open;
    EventGrid::new(&mut tui.grid, &visible, &tui.date_format, show_focus).render(frame, grid_area);

    frame.render_widget(Paragraph::new(help_line(tui)), footer_area);

    if let (Some(state), Some(event)) = (tui.overlay.as_mut(), app.selected()) {
        DetailOverlay::new(state, event, &tui.date_format).render(frame, area);
    }
}

fn help_line(tui: &TuiState) -> Line<'static> {
    let hints: &[(&str, &str)] = if tui.overlay.is_some() {
        &[("Esc", "close")]
    } else {
        match tui.focus {
            Focus::Search => &[("type", "search"), ("Tab/↓", "browse"), ("^Q", "quit")],
            Focus::Grid => &[
                ("←↑↓→", "move"),
                ("Enter", "open"),
                ("Tab", "search"),
                ("^Q", "quit"),
            ],
        }
    };

    let key = Style::default().fg(Color::Blue);
    let label = Style::default().fg(Color::DarkGray);
    let spans = hints.iter().flat_map(|(k, l)| {
        [
            Span::styled(format!(" {k} "), key),
            Span::styled(format!("{l} "), label),
        ]
    });
    Line::from(spans.collect::<Vec<_>>())
}
