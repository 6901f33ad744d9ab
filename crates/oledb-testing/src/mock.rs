//! Mock provider connection for unit testing.
//!
//! [`MockConnection`] implements [`Connection`] in memory. It is a cheap
//! handle: clones share one state, so a test can hand a clone to a command
//! and keep its own to change the connection state or inspect the calls the
//! command builder made.
//!
//! ## Example
//!
//! ```rust
//! use oledb_client::{CommandBuilder, ConnectionState, QuoteSpec};
//! use oledb_testing::{MockCall, MockConnection};
//!
//! let connection = MockConnection::builder()
//!     .with_quotes(QuoteSpec::brackets())
//!     .build();
//!
//! let mut builder = CommandBuilder::new();
//! let quoted = builder.quote_identifier_with(Some("Order Details"), Some(&connection)).unwrap();
//! assert_eq!(quoted, "[Order Details]");
//! assert_eq!(connection.calls(), vec![MockCall::LiteralQuotes]);
//!
//! connection.close();
//! assert_eq!(connection.current_state(), ConnectionState::Closed);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use oledb_client::{
    Connection, ConnectionConfig, ConnectionState, Parameter, ProcedureName, QuoteSpec,
    SharedConnection, TableSchema,
};
use parking_lot::Mutex;
use thiserror::Error;

/// Error type for mock connection operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockError {
    /// The mock was configured without literal quote information.
    #[error("provider does not report literal quote characters")]
    LiteralsUnsupported,

    /// No schema registered for the select text.
    #[error("no schema registered for select command: {0}")]
    UnknownSelect(String),

    /// A provider call arrived while the connection was not open.
    #[error("provider called while connection is {0}")]
    NotOpen(ConnectionState),

    /// Failure injected with [`MockConnection::fail_next`].
    #[error("{0}")]
    Injected(String),
}

impl From<MockError> for oledb_client::Error {
    fn from(err: MockError) -> Self {
        Self::Driver(err.to_string())
    }
}

/// A provider call recorded by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// [`Connection::literal_quotes`].
    LiteralQuotes,
    /// [`Connection::discover_parameters`], with the rendered procedure name.
    DiscoverParameters(String),
    /// [`Connection::select_schema`], with the select text.
    SelectSchema(String),
}

#[derive(Debug)]
struct MockState {
    state: ConnectionState,
    quotes: Option<QuoteSpec>,
    procedures: Vec<(ProcedureName, Vec<Parameter>)>,
    schemas: HashMap<String, TableSchema>,
    calls: Vec<MockCall>,
    fail_next: Option<String>,
}

impl MockState {
    fn begin(&mut self, call: MockCall) -> Result<(), MockError> {
        tracing::trace!(?call, state = %self.state, "mock provider call");
        self.calls.push(call);
        if !self.state.is_available() {
            return Err(MockError::NotOpen(self.state));
        }
        match self.fail_next.take() {
            Some(message) => Err(MockError::Injected(message)),
            None => Ok(()),
        }
    }

    fn find_procedure(&self, wanted: &ProcedureName) -> Option<&[Parameter]> {
        self.procedures
            .iter()
            .find(|(name, _)| procedure_matches(name, wanted))
            .map(|(_, parameters)| parameters.as_slice())
    }
}

fn procedure_matches(registered: &ProcedureName, wanted: &ProcedureName) -> bool {
    let part_matches = |a: &Option<String>, b: &Option<String>| match (a, b) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => true,
    };
    registered.name.eq_ignore_ascii_case(&wanted.name)
        && part_matches(&registered.schema, &wanted.schema)
        && part_matches(&registered.catalog, &wanted.catalog)
}

/// In-memory provider connection.
#[derive(Debug, Clone)]
pub struct MockConnection {
    inner: Arc<Mutex<MockState>>,
}

impl Default for MockConnection {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MockConnection {
    /// Create an open connection reporting backtick quotes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for configuring the mock.
    #[must_use]
    pub fn builder() -> MockConnectionBuilder {
        MockConnectionBuilder::new()
    }

    /// Create an open connection whose quote characters follow the provider
    /// named in `config`.
    ///
    /// Jet and ACE providers quote with backticks, SQL Server providers with
    /// brackets; anything else gets ANSI double quotes.
    #[must_use]
    pub fn from_config(config: &ConnectionConfig) -> Self {
        let provider = config
            .provider
            .as_deref()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let quotes = if provider.starts_with("microsoft.ace.oledb")
            || provider.starts_with("microsoft.jet.oledb")
        {
            QuoteSpec::backtick()
        } else if provider.starts_with("sqloledb")
            || provider.starts_with("sqlncli")
            || provider.starts_with("msoledbsql")
        {
            QuoteSpec::brackets()
        } else {
            QuoteSpec::double_quote()
        };
        tracing::debug!(%provider, %quotes, "configured mock provider");
        Self::builder().with_quotes(quotes).build()
    }

    /// Parse a connection string and create a mock for its provider.
    pub fn from_connection_string(conn_str: &str) -> oledb_client::Result<Self> {
        Ok(Self::from_config(&ConnectionConfig::from_connection_string(
            conn_str,
        )?))
    }

    /// A shared handle suitable for [`oledb_client::Command::with_connection`].
    #[must_use]
    pub fn shared(&self) -> SharedConnection {
        Arc::new(self.clone())
    }

    /// Current state.
    #[must_use]
    pub fn current_state(&self) -> ConnectionState {
        self.inner.lock().state
    }

    /// Change the state.
    pub fn set_state(&self, state: ConnectionState) {
        self.inner.lock().state = state;
    }

    /// Move to [`ConnectionState::Open`].
    pub fn open(&self) {
        self.set_state(ConnectionState::Open);
    }

    /// Move to [`ConnectionState::Closed`].
    pub fn close(&self) {
        self.set_state(ConnectionState::Closed);
    }

    /// Register or replace a stored procedure.
    pub fn add_procedure(&self, name: &str, parameters: Vec<Parameter>) {
        let name = parse_procedure(name);
        let mut inner = self.inner.lock();
        inner.procedures.retain(|(existing, _)| *existing != name);
        inner.procedures.push((name, parameters));
    }

    /// Register or replace the schema returned for `select_text`.
    pub fn add_select_schema(&self, select_text: &str, schema: TableSchema) {
        self.inner
            .lock()
            .schemas
            .insert(select_text.trim().to_string(), schema);
    }

    /// Make the next provider call fail with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.inner.lock().fail_next = Some(message.into());
    }

    /// Provider calls made so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<MockCall> {
        self.inner.lock().calls.clone()
    }

    /// Number of provider calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.inner.lock().calls.len()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.inner.lock().calls.clear();
    }
}

fn parse_procedure(name: &str) -> ProcedureName {
    ProcedureName::parse(name).unwrap_or_else(|_| ProcedureName::new(name))
}

impl Connection for MockConnection {
    fn state(&self) -> ConnectionState {
        self.current_state()
    }

    fn literal_quotes(&self) -> oledb_client::Result<QuoteSpec> {
        let mut inner = self.inner.lock();
        inner.begin(MockCall::LiteralQuotes)?;
        inner
            .quotes
            .clone()
            .ok_or_else(|| MockError::LiteralsUnsupported.into())
    }

    fn discover_parameters(
        &self,
        procedure: &ProcedureName,
    ) -> oledb_client::Result<Option<Vec<Parameter>>> {
        let mut inner = self.inner.lock();
        inner.begin(MockCall::DiscoverParameters(procedure.to_string()))?;
        Ok(inner.find_procedure(procedure).map(<[Parameter]>::to_vec))
    }

    fn select_schema(&self, select_text: &str) -> oledb_client::Result<TableSchema> {
        let mut inner = self.inner.lock();
        inner.begin(MockCall::SelectSchema(select_text.to_string()))?;
        let schema = inner
            .schemas
            .get(select_text.trim())
            .cloned()
            .ok_or_else(|| MockError::UnknownSelect(select_text.to_string()))?;
        Ok(schema)
    }
}

/// Builder for [`MockConnection`].
#[derive(Debug)]
pub struct MockConnectionBuilder {
    state: ConnectionState,
    quotes: Option<QuoteSpec>,
    procedures: Vec<(ProcedureName, Vec<Parameter>)>,
    schemas: HashMap<String, TableSchema>,
}

impl Default for MockConnectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnectionBuilder {
    /// Create a builder for an open connection reporting backtick quotes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ConnectionState::Open,
            quotes: Some(QuoteSpec::backtick()),
            procedures: Vec::new(),
            schemas: HashMap::new(),
        }
    }

    /// Set the initial state.
    #[must_use]
    pub fn with_state(mut self, state: ConnectionState) -> Self {
        self.state = state;
        self
    }

    /// Set the reported quote characters.
    #[must_use]
    pub fn with_quotes(mut self, quotes: QuoteSpec) -> Self {
        self.quotes = Some(quotes);
        self
    }

    /// Report a prefix with an empty suffix, as some providers do.
    #[must_use]
    pub fn with_prefix_only(mut self, prefix: impl Into<String>) -> Self {
        self.quotes = Some(QuoteSpec::new(prefix, ""));
        self
    }

    /// Fail literal quote requests.
    #[must_use]
    pub fn without_literal_quotes(mut self) -> Self {
        self.quotes = None;
        self
    }

    /// Register a stored procedure and its parameters.
    ///
    /// `name` may be qualified (`dbo.GetOrders`); unqualified lookups still
    /// match a qualified registration.
    #[must_use]
    pub fn with_procedure(mut self, name: &str, parameters: Vec<Parameter>) -> Self {
        self.procedures.push((parse_procedure(name), parameters));
        self
    }

    /// Register the schema returned for `select_text`.
    #[must_use]
    pub fn with_select_schema(mut self, select_text: &str, schema: TableSchema) -> Self {
        self.schemas.insert(select_text.trim().to_string(), schema);
        self
    }

    /// Build the connection.
    #[must_use]
    pub fn build(self) -> MockConnection {
        MockConnection {
            inner: Arc::new(Mutex::new(MockState {
                state: self.state,
                quotes: self.quotes,
                procedures: self.procedures,
                schemas: self.schemas,
                calls: Vec::new(),
                fail_next: None,
            })),
        }
    }
}
