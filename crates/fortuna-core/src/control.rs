//! Line protocol spoken between `fortunactl` and the running wheel.

use directories::ProjectDirs;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

const FALLBACK_SOCKET_PATH: &str = "/tmp/fortuna.sock";

pub fn socket_path() -> PathBuf {
    ProjectDirs::from("org", "fortuna", "fortuna")
        .and_then(|dirs| dirs.runtime_dir().map(|d| d.join("fortuna.sock")))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_SOCKET_PATH))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Spin(f64),
    Stop,
    Reload,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' is not a valid spin impulse")]
    BadImpulse(String),
    #[error("'spin' needs an impulse")]
    MissingImpulse,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        match words.next() {
            None => Err(CommandError::Empty),
            Some("spin") => {
                let raw = words.next().ok_or(CommandError::MissingImpulse)?;
                raw.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(Command::Spin)
                    .ok_or_else(|| CommandError::BadImpulse(raw.to_string()))
            }
            Some("stop") => Ok(Command::Stop),
            Some("reload") => Ok(Command::Reload),
            Some(other) => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Spin(impulse) => write!(f, "spin {impulse}"),
            Command::Stop => write!(f, "stop"),
            Command::Reload => write!(f, "reload"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("spin 120".parse::<Command>(), Ok(Command::Spin(120.0)));
        assert_eq!("  spin   -40.5 ".parse::<Command>(), Ok(Command::Spin(-40.5)));
        assert_eq!("stop".parse::<Command>(), Ok(Command::Stop));
        assert_eq!("reload".parse::<Command>(), Ok(Command::Reload));
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!("spin".parse::<Command>(), Err(CommandError::MissingImpulse));
        assert_eq!(
            "spin fast".parse::<Command>(),
            Err(CommandError::BadImpulse("fast".into()))
        );
        assert_eq!(
            "spin NaN".parse::<Command>(),
            Err(CommandError::BadImpulse("NaN".into()))
        );
        assert_eq!(
            "show".parse::<Command>(),
            Err(CommandError::Unknown("show".into()))
        );
    }

    #[test]
    fn test_display_parses_back() {
        let cmd = Command::Spin(75.25);
        assert_eq!(cmd.to_string().parse::<Command>(), Ok(cmd));
    }
}
