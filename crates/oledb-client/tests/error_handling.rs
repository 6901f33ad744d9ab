//! Error handling path tests for oledb-client.
//!
//! Tests for error creation, conversion, categorization, and display.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use oledb_client::{
    CommandType, ConnectionState, Error, InvalidOperation, Operation, StatementKind,
};
use oledb_types::TypeError;

// =============================================================================
// Error Display Tests
// =============================================================================

#[test]
fn test_invalid_argument_display() {
    let err = Error::null_argument("unquotedIdentifier");
    let msg = err.to_string();
    assert!(msg.contains("cannot be null"));
    assert!(msg.contains("unquotedIdentifier"));
}

#[test]
fn test_unsupported_command_type_display() {
    let err: Error = InvalidOperation::UnsupportedCommandType {
        operation: Operation::DeriveParameters,
        actual: CommandType::Text,
    }
    .into();
    assert_eq!(
        err.to_string(),
        "DeriveParameters only supports CommandType.StoredProcedure, not CommandType.Text."
    );
}

#[test]
fn test_table_direct_command_type_display() {
    let err = InvalidOperation::UnsupportedCommandType {
        operation: Operation::DeriveParameters,
        actual: CommandType::TableDirect,
    };
    assert!(err.to_string().ends_with("not CommandType.TableDirect."));
}

#[test]
fn test_command_text_required_display() {
    let err = InvalidOperation::CommandTextRequired {
        operation: Operation::DeriveParameters,
    };
    assert_eq!(
        err.to_string(),
        "DeriveParameters: CommandText property has not been initialized"
    );
}

#[test]
fn test_connection_required_display() {
    let err = InvalidOperation::ConnectionRequired {
        operation: Operation::DeriveParameters,
    };
    assert_eq!(
        err.to_string(),
        "DeriveParameters: Connection property has not been initialized."
    );
}

#[test]
fn test_open_connection_required_display() {
    let err = InvalidOperation::OpenConnectionRequired {
        operation: Operation::DeriveParameters,
        state: ConnectionState::Closed,
    };
    assert_eq!(
        err.to_string(),
        "DeriveParameters requires an open and available Connection. \
         The connection's current state is closed."
    );

    let err = InvalidOperation::OpenConnectionRequired {
        operation: Operation::DeriveParameters,
        state: ConnectionState::Connecting,
    };
    assert!(err.to_string().ends_with("current state is connecting."));
}

#[test]
fn test_quote_prefix_not_set_display() {
    let err = InvalidOperation::QuotePrefixNotSet {
        operation: Operation::QuoteIdentifier,
    };
    assert_eq!(
        err.to_string(),
        "QuoteIdentifier requires open connection when the quote prefix has not been set."
    );

    let err = InvalidOperation::QuotePrefixNotSet {
        operation: Operation::UnquoteIdentifier,
    };
    assert!(err.to_string().starts_with("UnquoteIdentifier requires"));
}

#[test]
fn test_no_stored_procedure_display() {
    let err = InvalidOperation::NoStoredProcedureExists("dbo.Missing".into());
    assert_eq!(
        err.to_string(),
        "The stored procedure 'dbo.Missing' doesn't exist."
    );
}

#[test]
fn test_generation_error_display() {
    let err = InvalidOperation::NoKeyInfo {
        statement: StatementKind::Update,
    };
    let msg = err.to_string();
    assert!(msg.contains("UpdateCommand"));
    assert!(msg.contains("key column information"));

    let err = InvalidOperation::NoRowVersion {
        statement: StatementKind::Delete,
    };
    assert!(err.to_string().contains("DeleteCommand"));

    assert!(
        InvalidOperation::MultipleBaseTables
            .to_string()
            .contains("multiple base tables")
    );
}

#[test]
fn test_driver_error_display() {
    let err = Error::Driver("provider not registered".into());
    let msg = err.to_string();
    assert!(msg.contains("driver error"));
    assert!(msg.contains("provider not registered"));
}

#[test]
fn test_config_error_display() {
    let err = Error::Config("invalid timeout: abc".into());
    let msg = err.to_string();
    assert!(msg.contains("configuration error"));
    assert!(msg.contains("abc"));
}

// =============================================================================
// Conversion Tests
// =============================================================================

#[test]
fn test_from_invalid_operation() {
    let err: Error = InvalidOperation::MissingSelectCommand.into();
    assert!(matches!(
        err,
        Error::InvalidOperation(InvalidOperation::MissingSelectCommand)
    ));
    // Transparent: no extra wrapping text.
    assert_eq!(
        err.to_string(),
        "The DataAdapter.SelectCommand property needs to be initialized."
    );
}

#[test]
fn test_from_type_error() {
    let err: Error = TypeError::UnknownTypeCode(9999).into();
    assert!(matches!(err, Error::Type(_)));
    assert!(err.to_string().contains("9999"));
}

// =============================================================================
// Classification Tests
// =============================================================================

#[test]
fn test_invalid_argument_classification() {
    let err = Error::null_argument("command");
    assert!(err.is_invalid_argument());
    assert!(!err.is_invalid_operation());
    assert_eq!(err.param_name(), Some("command"));
    assert_eq!(err.operation(), None);

    let err = Error::InvalidIdentifier("unterminated bracket".into());
    assert!(err.is_invalid_argument());
    assert_eq!(err.param_name(), None);
}

#[test]
fn test_invalid_operation_classification() {
    let err: Error = InvalidOperation::OpenConnectionRequired {
        operation: Operation::DeriveParameters,
        state: ConnectionState::Broken,
    }
    .into();
    assert!(err.is_invalid_operation());
    assert!(!err.is_invalid_argument());
    assert_eq!(err.operation(), Some(Operation::DeriveParameters));
}

#[test]
fn test_operation_absent_for_unnamed_errors() {
    let err: Error = InvalidOperation::QuoteChangeAfterGeneration.into();
    assert!(err.is_invalid_operation());
    assert_eq!(err.operation(), None);

    assert_eq!(Error::Driver("x".into()).operation(), None);
}

#[test]
fn test_generation_operations() {
    assert!(Operation::GetInsertCommand.is_generation());
    assert!(Operation::GetUpdateCommand.is_generation());
    assert!(Operation::GetDeleteCommand.is_generation());
    assert!(!Operation::DeriveParameters.is_generation());
    assert!(!Operation::QuoteIdentifier.is_generation());
}

#[test]
fn test_invalid_operation_equality() {
    let a = InvalidOperation::CommandTextRequired {
        operation: Operation::DeriveParameters,
    };
    let b = a.clone();
    assert_eq!(a, b);
    assert_ne!(
        a,
        InvalidOperation::CommandTextRequired {
            operation: Operation::GetInsertCommand,
        }
    );
}
