use core::fmt;

use crate::input::ButtonLevels;

/// Remote action triggered by a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Prev,
    Next,
    Play,
}

impl Command {
    #[cfg(test)]
    pub const ALL: [Command; 3] = [Command::Prev, Command::Next, Command::Play];

    /// Path segment appended to the API base path.
    pub fn name(self) -> &'static str {
        match self {
            Command::Prev => "prev",
            Command::Next => "next",
            Command::Play => "play",
        }
    }

    /// Request body. The server only looks at the path, the body repeats it.
    pub fn body(self) -> &'static str {
        self.name()
    }

    /// Selects the command for exactly one pressed button.
    ///
    /// No button or several buttons at once select nothing.
    pub fn from_levels(levels: ButtonLevels) -> Option<Self> {
        match (levels.prev, levels.next, levels.play) {
            (false, true, true) => Some(Command::Prev),
            (true, false, true) => Some(Command::Next),
            (true, true, false) => Some(Command::Play),
            _ => None,
        }
    }

    /// Level of this command's own pin in `levels`.
    pub fn pin_level(self, levels: ButtonLevels) -> bool {
        match self {
            Command::Prev => levels.prev,
            Command::Next => levels.next,
            Command::Play => levels.play,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_press_selects_matching_command() {
        assert_eq!(
            Command::from_levels(ButtonLevels::pressed(true, false, false)),
            Some(Command::Prev)
        );
        assert_eq!(
            Command::from_levels(ButtonLevels::pressed(false, true, false)),
            Some(Command::Next)
        );
        assert_eq!(
            Command::from_levels(ButtonLevels::pressed(false, false, true)),
            Some(Command::Play)
        );
    }

    #[test]
    fn released_and_chords_select_nothing() {
        assert_eq!(Command::from_levels(ButtonLevels::RELEASED), None);
        assert_eq!(
            Command::from_levels(ButtonLevels::pressed(true, true, false)),
            None
        );
        assert_eq!(
            Command::from_levels(ButtonLevels::pressed(true, false, true)),
            None
        );
        assert_eq!(
            Command::from_levels(ButtonLevels::pressed(false, true, true)),
            None
        );
        assert_eq!(
            Command::from_levels(ButtonLevels::pressed(true, true, true)),
            None
        );
    }

    #[test]
    fn body_matches_path_segment() {
        for command in Command::ALL {
            assert_eq!(command.body(), command.name());
        }
        assert_eq!(Command::Play.to_string(), "play");
    }

    #[test]
    fn pin_level_reads_the_command_pin() {
        for command in Command::ALL {
            let levels = ButtonLevels::pressed(
                command == Command::Prev,
                command == Command::Next,
                command == Command::Play,
            );
            assert_eq!(Command::from_levels(levels), Some(command));
            assert!(!command.pin_level(levels));
        }

        assert!(Command::Next.pin_level(ButtonLevels::pressed(true, false, true)));
    }
}
