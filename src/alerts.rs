use std::io::{self, Write};

use stopwatch_core::Notification;

#[derive(Clone)]
pub struct AlertConfig {
    pub sound: bool,
}

impl AlertConfig {
    pub fn new(sound: bool) -> Self {
        Self { sound }
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound = !self.sound;
        self.sound
    }
}

/// Whether a state change gets audible feedback. Clearing laps is silent.
pub fn wants_feedback(notification: &Notification) -> bool {
    !matches!(notification, Notification::LapsCleared)
}

/// Terminal bell stands in for the beep tone.
pub fn fire_alert<W: Write>(config: &AlertConfig, out: &mut W) -> io::Result<()> {
    if config.sound {
        out.write_all(b"\x07")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_is_silent() {
        let mut out = Vec::new();
        fire_alert(&AlertConfig::new(false), &mut out).unwrap();
        assert!(out.is_empty());
        fire_alert(&AlertConfig::new(true), &mut out).unwrap();
        assert_eq!(out, b"\x07");
    }

    #[test]
    fn test_toggle_sound() {
        let mut config = AlertConfig::new(true);
        assert!(!config.toggle_sound());
        assert!(config.toggle_sound());
    }

    #[test]
    fn test_feedback_policy() {
        assert!(wants_feedback(&Notification::Started));
        assert!(wants_feedback(&Notification::Reset));
        assert!(!wants_feedback(&Notification::LapsCleared));
    }
}
