//! Connection state as reported by the driver.
//!
//! Only [`ConnectionState::Open`] counts as "open and available": a connection
//! that is mid-execute or mid-fetch is busy and cannot serve metadata
//! requests.
//!
//! ```text
//! Closed -> Connecting -> Open
//! Open -> Executing -> Open
//! Open -> Fetching -> Open
//! any -> Broken (unrecoverable)
//! Open | Broken -> Closed
//! ```

use std::fmt;

/// Runtime state of a driver connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    /// Not connected.
    #[default]
    Closed,
    /// Connecting to the data source.
    Connecting,
    /// Connected and idle.
    Open,
    /// Executing a command.
    Executing,
    /// Fetching rows.
    Fetching,
    /// Connection lost; must be closed and reopened.
    Broken,
}

impl ConnectionState {
    /// Check if the connection can serve a request right now.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Check if the connection is doing work on behalf of another request.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Connecting | Self::Executing | Self::Fetching)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Closed => "closed",
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Executing => "executing",
            Self::Fetching => "fetching",
            Self::Broken => "broken",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_open_is_available() {
        assert!(ConnectionState::Open.is_available());
        for state in [
            ConnectionState::Closed,
            ConnectionState::Connecting,
            ConnectionState::Executing,
            ConnectionState::Fetching,
            ConnectionState::Broken,
        ] {
            assert!(!state.is_available(), "{state} should not be available");
        }
    }

    #[test]
    fn test_busy_states() {
        assert!(ConnectionState::Fetching.is_busy());
        assert!(!ConnectionState::Broken.is_busy());
        assert!(!ConnectionState::Open.is_busy());
    }

    #[test]
    fn test_display_lowercase() {
        assert_eq!(ConnectionState::Closed.to_string(), "closed");
        assert_eq!(ConnectionState::default(), ConnectionState::Closed);
    }
}
