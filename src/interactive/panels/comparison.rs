use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::diff::{diff_lines, render_value};
use crate::interactive::layout::centered_rect;
use crate::store::selectors::selected_event;
use crate::store::AppState;

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup = centered_rect(90, 80, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Comparing events (Esc to close) ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if state.comparison_json.len() < 2 {
        let message = state
            .last_error
            .clone()
            .unwrap_or_else(|| "Loading event details...".to_string());
        frame.render_widget(
            Paragraph::new(message).style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    draw_side(frame, columns[0], state, 0);
    draw_side(frame, columns[1], state, 1);
}

/// One comparison column: the slot's event header plus its fields,
/// highlighting every field that disagrees with the other slot.
fn draw_side(frame: &mut Frame, area: Rect, state: &AppState, slot: usize) {
    let other = if slot == 1 { 0 } else { 1 };
    let source = &state.comparison_json[slot];
    let comparison = &state.comparison_json[other];

    let mut lines: Vec<Line> = Vec::new();

    if let Some(event) = selected_event(state, slot) {
        lines.push(Line::from(Span::styled(
            event.event_type.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            event.created_at.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from("{"));
    for diff_line in diff_lines(source, comparison) {
        let value = render_value(&diff_line.value);
        let value_style = if diff_line.differs {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::raw(format!("  \"{}\": ", diff_line.name)),
            Span::styled(value, value_style),
        ]));
    }
    lines.push(Line::from("}"));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}
