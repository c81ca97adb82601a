//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Char('l') => app.next_location(),
        KeyCode::Char('h') => app.toggle_heatwave(),
        KeyCode::Char('i') => app.cycle_intensity(),
        KeyCode::Char('g') => app.toggle_mode(),
        KeyCode::Char('b') => app.toggle_generators(),
        KeyCode::Char('s') => app.toggle_load_shifting(),
        KeyCode::Char('m') => app.toggle_monitoring(),
        KeyCode::Char('+' | '=') | KeyCode::Right => app.adjust_renewables(1.0),
        KeyCode::Char('-') | KeyCode::Left => app.adjust_renewables(-1.0),
        KeyCode::Char(']') | KeyCode::Up => app.adjust_battery(1.0),
        KeyCode::Char('[') | KeyCode::Down => app.adjust_battery(-1.0),
        KeyCode::Char('p') => app.cycle_plan(),
        KeyCode::Char('1') => app.switch_preset("baseline"),
        KeyCode::Char('2') => app.switch_preset("moderate_heatwave"),
        KeyCode::Char('3') => app.switch_preset("extreme_heatwave"),
        KeyCode::Char('4') => app.switch_preset("islanded"),
        KeyCode::Char('r') => app.restart(),
        _ => {}
    }
}
