/// Terminal key events to scene commands
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tk3d_core::{command_for_key, Command};

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Scene(Command),
}

/// Map a key event onto an action. Key releases map to nothing, so each
/// press applies once.
pub fn action_for(event: &KeyEvent) -> Option<Action> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    match event.code {
        KeyCode::Esc | KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Action::Quit)
        }
        _ => {}
    }

    let name = match event.code {
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Char(c) => c.to_string(),
        _ => return None,
    };
    command_for_key(&name).map(Action::Scene)
}
