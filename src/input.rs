use std::sync::mpsc::Sender;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::AppError;
use crate::AppEvent;

/// User-facing actions, independent of how they were triggered.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    ToggleRun,
    Reset,
    Lap,
    ClearLaps,
    Save,
    ToggleSound,
    ToggleTheme,
    ToggleFullscreen,
    Help,
    Quit,
}

impl Command {
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            ' ' | '\n' | '\r' => Some(Command::ToggleRun),
            'r' => Some(Command::Reset),
            'l' => Some(Command::Lap),
            'c' => Some(Command::ClearLaps),
            's' => Some(Command::Save),
            'm' => Some(Command::ToggleSound),
            't' => Some(Command::ToggleTheme),
            'f' => Some(Command::ToggleFullscreen),
            'h' | '?' => Some(Command::Help),
            'q' => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Reduce a terminal key event to the character the main loop works with.
/// Only presses count; Ctrl-C quits since raw mode swallows SIGINT.
pub fn key_from_event(key: &KeyEvent) -> Option<char> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some('q'),
        KeyCode::Char(c) => Some(c),
        KeyCode::Enter => Some('\n'),
        KeyCode::Esc => Some('\x1b'),
        KeyCode::Tab => Some('\t'),
        _ => None,
    }
}

/// Forward terminal key presses to the main loop. A read failure ends
/// input and is turned into a quit request.
pub fn spawn_reader(events: Sender<AppEvent>) -> Result<(), AppError> {
    std::thread::Builder::new()
        .name("input".into())
        .spawn(move || {
            loop {
                match event::read() {
                    Ok(Event::Key(key)) => {
                        let Some(c) = key_from_event(&key) else {
                            continue;
                        };
                        if events.send(AppEvent::Key(c)).is_err() {
                            return;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        log::error!("terminal read failed: {}", e);
                        break;
                    }
                }
            }
            events.send(AppEvent::Quit).ok();
        })
        .map(|_| ())
        .map_err(|e| AppError::Spawn("input", e))
}
