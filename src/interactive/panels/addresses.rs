use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::interactive::app::{Focus, InteractiveApp};
use crate::store::selectors::undeleted_addresses;
use crate::store::AppState;

pub fn draw(frame: &mut Frame, area: Rect, app: &InteractiveApp, state: &AppState) {
    let focused = app.focus == Focus::Addresses;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Address Information ")
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    let addresses = undeleted_addresses(&state.addresses);

    if addresses.is_empty() {
        let message = if state.selected_user_id.is_some() {
            "No addresses found."
        } else {
            "Choose a user ID from the pane on the left."
        };
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = addresses
        .iter()
        .enumerate()
        .map(|(i, address)| {
            let selected = state.selected_address_id.as_deref() == Some(address.id.as_str());
            let mut style = if selected {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            if focused && i == app.address_index {
                style = style.add_modifier(Modifier::REVERSED);
            }

            let rendered =
                serde_json::to_string(*address).unwrap_or_else(|_| address.id.clone());
            ListItem::new(Line::styled(format!(" {}", rendered), style))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
