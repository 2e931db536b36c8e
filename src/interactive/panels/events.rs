use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::interactive::app::{Focus, InteractiveApp};
use crate::store::selectors::{can_compare, can_select_events, event_key};
use crate::store::AppState;

pub fn draw(frame: &mut Frame, area: Rect, app: &InteractiveApp, state: &AppState) {
    let focused = app.focus == Focus::Events;
    let title = if can_compare(&state.selected_events) {
        " Events (press c to compare) "
    } else {
        " Events "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    if state.events.is_empty() {
        let message = if state.selected_address_id.is_some() {
            "No events found."
        } else {
            "Select an address to see events."
        };
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let selection_open = can_select_events(&state.selected_events);

    let items: Vec<ListItem> = state
        .events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let selected = state
                .selected_events
                .get(&event_key(event))
                .copied()
                .unwrap_or(false);
            let checkbox = if selected { "[x]" } else { "[ ]" };

            let mut style = if selected {
                Style::default().fg(Color::Yellow)
            } else if selection_open {
                Style::default()
            } else {
                // Two already chosen; the rest are off-limits until one
                // is unchecked.
                Style::default().fg(Color::DarkGray)
            };
            if focused && i == app.event_index {
                style = style.add_modifier(Modifier::REVERSED);
            }

            ListItem::new(Line::styled(
                format!(" {} {} | {}", checkbox, event.event_type, event.created_at),
                style,
            ))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
