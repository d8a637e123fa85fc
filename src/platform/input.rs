//! Input normalization

use crate::sim::{GameSession, HoldSource, Side, TickInput};

/// What the player asked for, independent of the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Side),
    ToggleDayNight,
    Restart,
}

impl Command {
    /// Deliver the command to the session immediately
    pub fn send<S: HoldSource>(self, session: &mut GameSession<S>) {
        match self {
            Command::Move(side) => session.on_move(side),
            Command::ToggleDayNight => session.on_toggle_day_night(),
            Command::Restart => session.on_restart(),
        }
    }

    /// Record the command for the next frame
    pub fn apply(self, input: &mut TickInput) {
        match self {
            Command::Move(side) => input.movement = Some(side),
            Command::ToggleDayNight => input.toggle_day_night = !input.toggle_day_night,
            Command::Restart => input.restart = true,
        }
    }
}

/// Map a `KeyboardEvent.key` value to a command
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "ArrowLeft" | "a" => Some(Command::Move(Side::Left)),
        "ArrowRight" | "d" => Some(Command::Move(Side::Right)),
        "t" | "T" => Some(Command::ToggleDayNight),
        _ => None,
    }
}
