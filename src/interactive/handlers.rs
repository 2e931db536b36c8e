use super::app::{Focus, InteractiveApp};
use super::event::{Event, EventHandler};
use crate::logging::{log_debug, log_error, log_info};
use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

pub async fn run_interactive_mode() -> Result<(), Box<dyn std::error::Error>> {
    log_info("Starting interactive mode");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    log_debug("Terminal initialized");

    let mut app = match InteractiveApp::new().await {
        Ok(app) => {
            log_info("InteractiveApp created successfully");
            app
        }
        Err(e) => {
            log_error(&format!("Failed to create InteractiveApp: {}", e));
            restore_terminal(&mut terminal)?;
            return Err(e);
        }
    };
    let events = EventHandler::new(100);

    // Main loop
    loop {
        // Expired user-ids retry timers run before the next frame.
        app.drain_retry_ticks().await;

        let state = app.state();
        if let Err(e) = terminal.draw(|f| super::ui::draw(f, &app, &state)) {
            log_error(&format!("Error drawing UI: {}", e));
            restore_terminal(&mut terminal)?;
            return Err(Box::new(e));
        }

        match events.recv()? {
            Event::Key(key_event) => {
                handle_key(&mut app, key_event).await;
            }
            Event::Tick => {}
        }

        if app.should_quit {
            break;
        }
    }

    restore_terminal(&mut terminal)?;
    log_info("Interactive mode ended");
    Ok(())
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn std::error::Error>> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn handle_key(app: &mut InteractiveApp, key_event: KeyEvent) {
    let state = app.state();
    log_debug(&format!(
        "Key pressed: {:?}, Focus: {:?}",
        key_event.code, app.focus
    ));

    // The comparison overlay swallows everything except close keys.
    if state.comparing_events {
        if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('q')) {
            app.cancel_compare();
        }
        return;
    }

    match key_event.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Tab => app.next_focus(),
        KeyCode::BackTab => app.prev_focus(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('r') => {
            log_debug("Refreshing user ids");
            app.refresh_user_ids().await;
        }
        KeyCode::Enter => match app.focus {
            Focus::Users => app.select_focused_user().await,
            Focus::Addresses => app.select_focused_address().await,
            Focus::Events => app.toggle_focused_event(),
        },
        KeyCode::Char(' ') if app.focus == Focus::Events => {
            app.toggle_focused_event();
        }
        KeyCode::Char('c') if app.focus == Focus::Events => {
            log_debug("Comparing selected events");
            app.compare_selected().await;
        }
        _ => {}
    }
}
