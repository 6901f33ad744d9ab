//! Command precondition checks.
//!
//! Each operation that reaches the driver through a command runs an ordered
//! list of [`Gate`]s first. Gates are evaluated in sequence and the first one
//! that fails decides the error; later gates never see a command that an
//! earlier gate rejected.
//!
//! | Operation | Gates |
//! |-----------|-------|
//! | `derive_parameters` | command present, stored procedure, text, open connection |
//! | statement generation | select command present, text, open connection |

use crate::command::{Command, CommandType};
use crate::connection::SharedConnection;
use crate::error::{Error, InvalidOperation, Operation, Result};
use crate::state::ConnectionState;

/// A single precondition on a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// The command reference is present.
    CommandPresent,
    /// The command type is `StoredProcedure`.
    StoredProcedure,
    /// The command text is non-empty.
    CommandText,
    /// A connection is attached and open.
    OpenConnection,
}

/// Why a gate refused a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// No command.
    MissingCommand,
    /// Wrong command type.
    NotStoredProcedure(CommandType),
    /// Empty command text.
    MissingCommandText,
    /// No connection attached.
    MissingConnection,
    /// Connection attached but not open.
    ConnectionNotOpen(ConnectionState),
}

/// Gates run by `derive_parameters`.
pub const DERIVE_PARAMETERS: &[Gate] = &[
    Gate::CommandPresent,
    Gate::StoredProcedure,
    Gate::CommandText,
    Gate::OpenConnection,
];

/// Gates run on the select command before generating a statement.
pub const GENERATE_STATEMENT: &[Gate] =
    &[Gate::CommandPresent, Gate::CommandText, Gate::OpenConnection];

impl Gate {
    /// Check this gate against `command`.
    ///
    /// Gates other than [`Gate::CommandPresent`] pass an absent command; the
    /// presence gate runs first in every pipeline.
    #[must_use]
    pub fn check(self, command: Option<&Command>) -> Option<Violation> {
        let Some(command) = command else {
            return (self == Self::CommandPresent).then_some(Violation::MissingCommand);
        };
        match self {
            Self::CommandPresent => None,
            Self::StoredProcedure => {
                let actual = command.command_type();
                (actual != CommandType::StoredProcedure)
                    .then_some(Violation::NotStoredProcedure(actual))
            }
            Self::CommandText => command
                .text()
                .is_empty()
                .then_some(Violation::MissingCommandText),
            Self::OpenConnection => match command.connection() {
                None => Some(Violation::MissingConnection),
                Some(connection) => {
                    let state = connection.state();
                    (!state.is_available()).then_some(Violation::ConnectionNotOpen(state))
                }
            },
        }
    }
}

impl Violation {
    /// Convert into the error reported for `operation`.
    #[must_use]
    pub fn into_error(self, operation: Operation) -> Error {
        let invalid = match self {
            Self::MissingCommand if operation.is_generation() => {
                InvalidOperation::MissingSelectCommand
            }
            Self::MissingCommand => return Error::null_argument("command"),
            Self::NotStoredProcedure(actual) => InvalidOperation::UnsupportedCommandType {
                operation,
                actual,
            },
            Self::MissingCommandText => InvalidOperation::CommandTextRequired { operation },
            Self::MissingConnection => InvalidOperation::ConnectionRequired { operation },
            Self::ConnectionNotOpen(state) => {
                InvalidOperation::OpenConnectionRequired { operation, state }
            }
        };
        invalid.into()
    }
}

/// Run `gates` in order against `command`, stopping at the first violation.
///
/// Returns the command's connection. [`DERIVE_PARAMETERS`] and
/// [`GENERATE_STATEMENT`] end with [`Gate::OpenConnection`], so a command
/// that passes them always carries one.
pub fn run(
    gates: &[Gate],
    operation: Operation,
    command: Option<&Command>,
) -> Result<SharedConnection> {
    if let Some(violation) = gates.iter().find_map(|gate| gate.check(command)) {
        tracing::debug!(%operation, ?violation, "precondition failed");
        return Err(violation.into_error(operation));
    }
    command
        .and_then(Command::connection)
        .cloned()
        .ok_or_else(|| Violation::MissingConnection.into_error(operation))
}
