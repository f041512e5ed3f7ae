use derive_more::{AsRef, Deref, Display, From, Into};
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

pub const DEFAULT_SOCKET_PATH: &str = "/tmp/dotloader.sock";
pub const SOCKET_ENV: &str = "DOTLOADER_SOCKET";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct SocketPath(String);

crate::impl_string_newtype!(SocketPath);

impl SocketPath {
    /// `$DOTLOADER_SOCKET`, or the default path.
    pub fn resolve() -> Self {
        std::env::var(SOCKET_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .map(Self::new)
            .unwrap_or_else(|| Self::new(DEFAULT_SOCKET_PATH))
    }
}

/// One line on the control socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, StrumDisplay)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ControlCommand {
    Start,
    Stop,
    Restart,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControlError {
    #[error("Unknown control command '{0}'")]
    Unknown(String),
}

impl ControlCommand {
    pub fn parse_line(line: &str) -> Result<Self, ControlError> {
        let line = line.trim();
        Self::from_str(line).map_err(|_| ControlError::Unknown(line.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_control_lines() {
        assert_eq!(ControlCommand::parse_line("start\n"), Ok(ControlCommand::Start));
        assert_eq!(ControlCommand::parse_line("  STOP "), Ok(ControlCommand::Stop));
        assert_eq!(
            ControlCommand::parse_line("show"),
            Err(ControlError::Unknown("show".to_string()))
        );
    }

    #[test]
    fn test_display_matches_wire_format() {
        for command in ControlCommand::iter() {
            let line = command.to_string();
            assert_eq!(line, line.to_lowercase());
            assert_eq!(ControlCommand::parse_line(&line), Ok(command));
        }
    }
}
