//! Client error types.

use std::fmt;

use thiserror::Error;

use crate::command::CommandType;
use crate::state::ConnectionState;

/// Caller-visible operation that can be refused by a precondition check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `CommandBuilder::quote_identifier`.
    QuoteIdentifier,
    /// `CommandBuilder::unquote_identifier`.
    UnquoteIdentifier,
    /// `CommandBuilder::derive_parameters`.
    DeriveParameters,
    /// `CommandBuilder::get_insert_command`.
    GetInsertCommand,
    /// `CommandBuilder::get_update_command`.
    GetUpdateCommand,
    /// `CommandBuilder::get_delete_command`.
    GetDeleteCommand,
}

impl Operation {
    /// Whether this operation generates a statement from a select command.
    #[must_use]
    pub fn is_generation(self) -> bool {
        matches!(
            self,
            Self::GetInsertCommand | Self::GetUpdateCommand | Self::GetDeleteCommand
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::QuoteIdentifier => "QuoteIdentifier",
            Self::UnquoteIdentifier => "UnquoteIdentifier",
            Self::DeriveParameters => "DeriveParameters",
            Self::GetInsertCommand => "GetInsertCommand",
            Self::GetUpdateCommand => "GetUpdateCommand",
            Self::GetDeleteCommand => "GetDeleteCommand",
        };
        f.write_str(name)
    }
}

/// Kind of statement generated from a select command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// `INSERT`.
    Insert,
    /// `UPDATE`.
    Update,
    /// `DELETE`.
    Delete,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => f.write_str("InsertCommand"),
            Self::Update => f.write_str("UpdateCommand"),
            Self::Delete => f.write_str("DeleteCommand"),
        }
    }
}

/// A state precondition that refused an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum InvalidOperation {
    /// Parameter derivation on something other than a stored procedure.
    #[error(
        "{operation} only supports CommandType.StoredProcedure, not CommandType.{actual}."
    )]
    UnsupportedCommandType {
        /// Refused operation.
        operation: Operation,
        /// The command's actual type.
        actual: CommandType,
    },

    /// The command has no text.
    #[error("{operation}: CommandText property has not been initialized")]
    CommandTextRequired {
        /// Refused operation.
        operation: Operation,
    },

    /// The command has no connection.
    #[error("{operation}: Connection property has not been initialized.")]
    ConnectionRequired {
        /// Refused operation.
        operation: Operation,
    },

    /// The command's connection is present but not open.
    #[error(
        "{operation} requires an open and available Connection. The connection's current state is {state}."
    )]
    OpenConnectionRequired {
        /// Refused operation.
        operation: Operation,
        /// Observed connection state.
        state: ConnectionState,
    },

    /// No quote prefix configured and no open connection to ask.
    #[error("{operation} requires open connection when the quote prefix has not been set.")]
    QuotePrefixNotSet {
        /// Refused operation.
        operation: Operation,
    },

    /// Quote characters changed after a statement was generated.
    #[error(
        "The QuotePrefix and QuoteSuffix properties cannot be changed once an Insert, Update, or Delete command has been generated."
    )]
    QuoteChangeAfterGeneration,

    /// The driver does not know the procedure.
    #[error("The stored procedure '{0}' doesn't exist.")]
    NoStoredProcedureExists(String),

    /// Statement generation without a data adapter.
    #[error("{operation}: DataAdapter property has not been initialized.")]
    MissingDataAdapter {
        /// Refused operation.
        operation: Operation,
    },

    /// Statement generation without a select command.
    #[error("The DataAdapter.SelectCommand property needs to be initialized.")]
    MissingSelectCommand,

    /// The select command reads from no base table.
    #[error(
        "Dynamic SQL generation is not supported against a SelectCommand that does not return any base table information."
    )]
    NoBaseTable,

    /// The select command reads from more than one base table.
    #[error("Dynamic SQL generation is not supported against multiple base tables.")]
    MultipleBaseTables,

    /// Update/delete generation without key columns.
    #[error(
        "Dynamic SQL generation for the {statement} is not supported against a SelectCommand that does not return any key column information."
    )]
    NoKeyInfo {
        /// Statement being generated.
        statement: StatementKind,
    },

    /// Row-version concurrency requested but no row-version column exists.
    #[error(
        "Dynamic SQL generation for the {statement} is not supported against a SelectCommand that does not contain a row version column."
    )]
    NoRowVersion {
        /// Statement being generated.
        statement: StatementKind,
    },

    /// The select command returns no column that can be written.
    #[error("Dynamic SQL generation for the {statement} failed: no updatable columns.")]
    NoUpdatableColumns {
        /// Statement being generated.
        statement: StatementKind,
    },
}

impl InvalidOperation {
    /// The operation named in the message, when there is one.
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::UnsupportedCommandType { operation, .. }
            | Self::CommandTextRequired { operation }
            | Self::ConnectionRequired { operation }
            | Self::OpenConnectionRequired { operation, .. }
            | Self::QuotePrefixNotSet { operation }
            | Self::MissingDataAdapter { operation } => Some(*operation),
            _ => None,
        }
    }
}

/// Errors that can occur during client operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A required argument was absent.
    #[error("value cannot be null (parameter '{param}')")]
    InvalidArgument {
        /// Name of the absent parameter.
        param: &'static str,
    },

    /// A state precondition was not met.
    #[error(transparent)]
    InvalidOperation(#[from] InvalidOperation),

    /// A multipart identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The driver collaborator reported a failure.
    #[error("driver error: {0}")]
    Driver(String),

    /// Type metadata from the driver could not be interpreted.
    #[error("type error: {0}")]
    Type(#[from] oledb_types::TypeError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create an [`Error::InvalidArgument`] naming `param`.
    #[must_use]
    pub fn null_argument(param: &'static str) -> Self {
        Self::InvalidArgument { param }
    }

    /// Check if this error reports a bad or absent argument.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::InvalidIdentifier(_))
    }

    /// Check if this error reports a violated state precondition.
    #[must_use]
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, Self::InvalidOperation(_))
    }

    /// Name of the absent parameter, for [`Error::InvalidArgument`].
    #[must_use]
    pub fn param_name(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument { param } => Some(*param),
            _ => None,
        }
    }

    /// The refused operation, for precondition errors that name one.
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::InvalidOperation(inner) => inner.operation(),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
