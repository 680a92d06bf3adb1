//! Commands the host can invoke and events it delivers.

use std::fmt;
use std::str::FromStr;

/// Host-facing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Enable levels, or refresh them when already enabled.
    Update,
    /// Disable levels; only enabled while a session is active.
    Off,
}

impl Command {
    pub const ALL: [Command; 2] = [Command::Update, Command::Off];

    /// Name the host binds the command under.
    pub fn name(self) -> &'static str {
        match self {
            Command::Update => "levels_update",
            Command::Off => "levels_off",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command: {}", self.0)
    }
}

impl std::error::Error for UnknownCommand {}

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|command| command.name() == s)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// Document events consumed from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentEvent {
    Modified,
    Saved,
}
