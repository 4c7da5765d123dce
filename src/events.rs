use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // Step the hover cursor through samples (tooltip navigation)
        KeyCode::Left | KeyCode::Char('h') => app.hover_prev(),
        KeyCode::Right | KeyCode::Char('l') => app.hover_next(),
        KeyCode::Home => app.hover_first(),
        KeyCode::End => app.hover_last(),

        // Dismiss the tooltip
        KeyCode::Esc => app.clear_hover(),

        // Reload
        KeyCode::Char('r') => {
            let _ = app.reload_data();
        }

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Export
        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from("health_export.json");
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        // Scroll wheel steps through samples
        MouseEventKind::ScrollUp => app.hover_prev(),
        MouseEventKind::ScrollDown => app.hover_next(),

        // Hovering or clicking inside the plot selects the nearest sample
        MouseEventKind::Moved | MouseEventKind::Down(MouseButton::Left) => {
            app.hover_at(mouse.column, mouse.row);
        }

        // Right-click dismisses the tooltip
        MouseEventKind::Down(MouseButton::Right) => app.clear_hover(),

        _ => {}
    }
}
