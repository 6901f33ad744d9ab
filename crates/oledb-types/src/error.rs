//! Type metadata error types.

use thiserror::Error;

/// Errors produced while interpreting driver-reported type metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TypeError {
    /// The numeric type indicator is not a known `DBTYPE`.
    #[error("unknown OLE DB type code: {0}")]
    UnknownTypeCode(u16),

    /// The type name does not match any `OleDbType`.
    #[error("unknown OLE DB type name: {0}")]
    UnknownTypeName(String),

    /// The numeric parameter type indicator is not a known `DBPARAMTYPE`.
    #[error("unknown parameter direction code: {0}")]
    UnknownDirection(u16),
}
