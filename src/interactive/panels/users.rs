use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::interactive::app::{Focus, InteractiveApp};
use crate::store::AppState;

pub fn draw(frame: &mut Frame, area: Rect, app: &InteractiveApp, state: &AppState) {
    let focused = app.focus == Focus::Users;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Users ")
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    if state.user_ids.is_empty() {
        let message = Paragraph::new("No user ids loaded.\nPress r to reload.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    let items: Vec<ListItem> = state
        .user_ids
        .iter()
        .enumerate()
        .map(|(i, user_id)| {
            let selected = state.selected_user_id.as_ref() == Some(user_id);
            let mut style = if selected {
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            if focused && i == app.user_index {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(Line::styled(format!(" {}", user_id), style))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
