//! The driver collaborator.
//!
//! Everything this crate needs from the native provider goes through the
//! [`Connection`] trait: the connection state, the provider's literal quote
//! characters, stored procedure parameter metadata and select schema
//! metadata. Provider bindings implement it; tests use the mock in
//! `oledb-testing`.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::identifier::ProcedureName;
use crate::parameter::Parameter;
use crate::quote::QuoteSpec;
use crate::schema::TableSchema;
use crate::state::ConnectionState;

/// A connection to an OLE DB data source.
///
/// The methods other than [`Connection::state`] are only called while the
/// state is [`ConnectionState::Open`]; the callers in this crate check first.
pub trait Connection: fmt::Debug {
    /// Current connection state.
    fn state(&self) -> ConnectionState;

    /// The provider's identifier quote characters (`DBLITERAL_QUOTE_PREFIX`
    /// and `DBLITERAL_QUOTE_SUFFIX`).
    ///
    /// A missing suffix should be reported as an empty string; the caller
    /// defaults it to the prefix.
    fn literal_quotes(&self) -> Result<QuoteSpec>;

    /// Parameter metadata of a stored procedure, in call order.
    ///
    /// Returns `Ok(None)` when the provider knows no such procedure.
    fn discover_parameters(&self, procedure: &ProcedureName) -> Result<Option<Vec<Parameter>>>;

    /// Column metadata of the result set `select_text` would produce,
    /// fetched without reading rows.
    fn select_schema(&self, select_text: &str) -> Result<TableSchema>;

    /// Check if the connection is open and available.
    fn is_open(&self) -> bool {
        self.state().is_available()
    }
}

/// Shared handle to a connection, as held by commands.
pub type SharedConnection = Arc<dyn Connection>;
