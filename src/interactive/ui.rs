use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::app::{Focus, InteractiveApp};
use super::panels;
use crate::store::AppState;

pub fn draw(frame: &mut Frame, app: &InteractiveApp, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], state);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(40),
            Constraint::Percentage(40),
        ])
        .split(chunks[1]);

    panels::users::draw(frame, panes[0], app, state);
    panels::addresses::draw(frame, panes[1], app, state);
    panels::events::draw(frame, panes[2], app, state);

    draw_footer(frame, chunks[2], app);

    if state.comparing_events {
        panels::comparison::draw(frame, frame.size(), state);
    }
}

fn draw_header(frame: &mut Frame, area: ratatui::layout::Rect, state: &AppState) {
    let mut lines = vec![Line::from(Span::styled(
        " evlens | address events",
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    if let Some(error) = &state.last_error {
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_footer(frame: &mut Frame, area: ratatui::layout::Rect, app: &InteractiveApp) {
    let help = match app.focus {
        Focus::Users => " Tab: switch pane │ j/k: move │ Enter: load addresses │ r: reload users │ q: quit",
        Focus::Addresses => " Tab: switch pane │ j/k: move │ Enter: load events │ q: quit",
        Focus::Events => " Tab: switch pane │ j/k: move │ Space: select │ c: compare │ q: quit",
    };

    frame.render_widget(
        Paragraph::new(Span::styled(help, Style::default().fg(Color::DarkGray))),
        area,
    );
}
