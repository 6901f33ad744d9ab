//! The command builder.
//!
//! [`CommandBuilder`] quotes and unquotes identifiers, derives stored
//! procedure parameters, and generates `INSERT`/`UPDATE`/`DELETE` commands
//! for a [`DataAdapter`]'s select command.
//!
//! ## Quote resolution
//!
//! With a non-empty configured prefix, the configured pair is used as-is.
//! Otherwise the pair is asked from a connection, in this order:
//!
//! 1. the connection passed to the call, which must be open;
//! 2. the pair cached by an earlier resolution;
//! 3. the data adapter's select command connection, which must be open.
//!
//! A resolved pair is cached until the quote properties or the data adapter
//! change.
//!
//! ## Example
//!
//! ```rust
//! use oledb_client::{CommandBuilder, QuoteSpec};
//!
//! let mut builder = CommandBuilder::new().with_quotes(QuoteSpec::new("'", "'"));
//! assert_eq!(builder.quote_identifier(Some("Te'st")).unwrap(), "'Te''st'");
//! assert_eq!(builder.unquote_identifier(Some("'Te''st'")).unwrap(), "Te'st");
//! ```

use crate::adapter::DataAdapter;
use crate::command::Command;
use crate::connection::{Connection, SharedConnection};
use crate::error::{Error, InvalidOperation, Operation, Result, StatementKind};
use crate::generate::{self, CatalogLocation, ConflictOption, Naming, Statement};
use crate::identifier::ProcedureName;
use crate::quote::QuoteSpec;
use crate::schema::TableSchema;
use crate::validate;

/// Default separator between name parts.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Builds identifier quoting, derived parameters and generated statements.
///
/// Not thread-safe: the resolved quote cache is mutated through `&mut self`,
/// so callers share one builder by serializing access to it.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    quotes: QuoteSpec,
    resolved: Option<QuoteSpec>,
    catalog_separator: String,
    schema_separator: String,
    catalog_location: CatalogLocation,
    conflict_option: ConflictOption,
    data_adapter: Option<DataAdapter>,
    schema: Option<TableSchema>,
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Self {
            quotes: QuoteSpec::empty(),
            resolved: None,
            catalog_separator: DEFAULT_SEPARATOR.to_string(),
            schema_separator: DEFAULT_SEPARATOR.to_string(),
            catalog_location: CatalogLocation::default(),
            conflict_option: ConflictOption::default(),
            data_adapter: None,
            schema: None,
        }
    }
}

impl CommandBuilder {
    /// Create a builder with no quote characters and no data adapter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for `adapter`.
    #[must_use]
    pub fn for_adapter(adapter: DataAdapter) -> Self {
        Self::new().with_data_adapter(adapter)
    }

    /// Set the quote characters.
    #[must_use]
    pub fn with_quotes(mut self, quotes: QuoteSpec) -> Self {
        self.quotes = quotes;
        self.resolved = None;
        self
    }

    /// Attach a data adapter.
    #[must_use]
    pub fn with_data_adapter(mut self, adapter: DataAdapter) -> Self {
        self.set_data_adapter(Some(adapter));
        self
    }

    /// Set the conflict detection used by generated updates and deletes.
    #[must_use]
    pub fn with_conflict_option(mut self, option: ConflictOption) -> Self {
        self.conflict_option = option;
        self
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// The configured quote prefix (empty when unset).
    #[must_use]
    pub fn quote_prefix(&self) -> &str {
        self.quotes.prefix()
    }

    /// The configured quote suffix (empty when unset).
    #[must_use]
    pub fn quote_suffix(&self) -> &str {
        self.quotes.suffix()
    }

    /// Set the quote prefix.
    ///
    /// Refused once a statement has been generated, until
    /// [`refresh_schema`](Self::refresh_schema).
    pub fn set_quote_prefix(&mut self, prefix: impl Into<String>) -> Result<()> {
        self.ensure_quotes_mutable()?;
        self.quotes = QuoteSpec::new(prefix, self.quotes.suffix());
        self.resolved = None;
        Ok(())
    }

    /// Set the quote suffix.
    ///
    /// Refused once a statement has been generated, until
    /// [`refresh_schema`](Self::refresh_schema).
    pub fn set_quote_suffix(&mut self, suffix: impl Into<String>) -> Result<()> {
        self.ensure_quotes_mutable()?;
        self.quotes = QuoteSpec::new(self.quotes.prefix(), suffix);
        self.resolved = None;
        Ok(())
    }

    /// The quote pair resolved from a connection, if one has been.
    #[must_use]
    pub fn resolved_quotes(&self) -> Option<&QuoteSpec> {
        self.resolved.as_ref()
    }

    /// Separator after the catalog in qualified table names.
    #[must_use]
    pub fn catalog_separator(&self) -> &str {
        &self.catalog_separator
    }

    /// Set the catalog separator.
    pub fn set_catalog_separator(&mut self, separator: impl Into<String>) {
        let separator = separator.into();
        self.catalog_separator = if separator.is_empty() {
            DEFAULT_SEPARATOR.to_string()
        } else {
            separator
        };
    }

    /// Separator after the schema in qualified table names.
    #[must_use]
    pub fn schema_separator(&self) -> &str {
        &self.schema_separator
    }

    /// Set the schema separator.
    pub fn set_schema_separator(&mut self, separator: impl Into<String>) {
        let separator = separator.into();
        self.schema_separator = if separator.is_empty() {
            DEFAULT_SEPARATOR.to_string()
        } else {
            separator
        };
    }

    /// Position of the catalog in qualified table names.
    #[must_use]
    pub fn catalog_location(&self) -> CatalogLocation {
        self.catalog_location
    }

    /// Set the catalog position.
    pub fn set_catalog_location(&mut self, location: CatalogLocation) {
        self.catalog_location = location;
    }

    /// Conflict detection for generated updates and deletes.
    #[must_use]
    pub fn conflict_option(&self) -> ConflictOption {
        self.conflict_option
    }

    /// Set conflict detection.
    pub fn set_conflict_option(&mut self, option: ConflictOption) {
        self.conflict_option = option;
    }

    /// The attached data adapter.
    #[must_use]
    pub fn data_adapter(&self) -> Option<&DataAdapter> {
        self.data_adapter.as_ref()
    }

    /// The attached data adapter, mutably.
    ///
    /// Changing the select command through this reference does not discard
    /// a cached schema; call [`refresh_schema`](Self::refresh_schema).
    pub fn data_adapter_mut(&mut self) -> Option<&mut DataAdapter> {
        self.data_adapter.as_mut()
    }

    /// Attach or detach a data adapter.
    ///
    /// Discards the cached schema and any resolved quote pair.
    pub fn set_data_adapter(&mut self, adapter: Option<DataAdapter>) {
        self.data_adapter = adapter;
        self.schema = None;
        self.resolved = None;
    }

    /// Discard the cached select schema so the next generation fetches it
    /// again.
    pub fn refresh_schema(&mut self) {
        self.schema = None;
    }

    // =========================================================================
    // Identifier quoting
    // =========================================================================

    /// Quote an identifier with the configured or cached quote pair.
    pub fn quote_identifier(&mut self, identifier: Option<&str>) -> Result<String> {
        self.quote_identifier_with(identifier, None)
    }

    /// Quote an identifier, resolving the quote pair from `connection` when
    /// no prefix is configured.
    pub fn quote_identifier_with(
        &mut self,
        identifier: Option<&str>,
        connection: Option<&dyn Connection>,
    ) -> Result<String> {
        let identifier = identifier.ok_or(Error::null_argument("unquotedIdentifier"))?;
        let quotes = self.resolve_quotes(Operation::QuoteIdentifier, connection)?;
        Ok(quotes.quote(identifier))
    }

    /// Unquote an identifier with the configured or cached quote pair.
    ///
    /// An identifier that is not quoted is returned unchanged.
    pub fn unquote_identifier(&mut self, quoted: Option<&str>) -> Result<String> {
        self.unquote_identifier_with(quoted, None)
    }

    /// Unquote an identifier, resolving the quote pair from `connection`
    /// when no prefix is configured.
    pub fn unquote_identifier_with(
        &mut self,
        quoted: Option<&str>,
        connection: Option<&dyn Connection>,
    ) -> Result<String> {
        let quoted = quoted.ok_or(Error::null_argument("quotedIdentifier"))?;
        let quotes = self.resolve_quotes(Operation::UnquoteIdentifier, connection)?;
        Ok(quotes.unquote(quoted))
    }

    fn resolve_quotes(
        &mut self,
        operation: Operation,
        connection: Option<&dyn Connection>,
    ) -> Result<QuoteSpec> {
        if !self.quotes.is_empty() {
            return Ok(self.quotes.clone());
        }
        if let Some(connection) = connection {
            return self.resolve_from(operation, connection);
        }
        if let Some(resolved) = &self.resolved {
            return Ok(resolved.clone());
        }
        match self.adapter_connection() {
            Some(connection) => self.resolve_from(operation, connection.as_ref()),
            None => Err(InvalidOperation::QuotePrefixNotSet { operation }.into()),
        }
    }

    fn resolve_from(
        &mut self,
        operation: Operation,
        connection: &dyn Connection,
    ) -> Result<QuoteSpec> {
        if !connection.is_open() {
            tracing::debug!(
                %operation,
                state = %connection.state(),
                "cannot resolve literal quotes from a connection that is not open"
            );
            return Err(InvalidOperation::QuotePrefixNotSet { operation }.into());
        }

        let reported = connection.literal_quotes()?;
        let quotes = QuoteSpec::from_literal_info(
            reported.prefix(),
            Some(reported.suffix().to_string()),
        );
        tracing::debug!(
            prefix = quotes.prefix(),
            suffix = quotes.suffix(),
            "resolved literal quotes from connection"
        );
        self.resolved = Some(quotes.clone());
        Ok(quotes)
    }

    fn adapter_connection(&self) -> Option<SharedConnection> {
        self.data_adapter
            .as_ref()
            .and_then(DataAdapter::select_command)
            .and_then(Command::connection)
            .cloned()
    }

    // =========================================================================
    // Parameter derivation
    // =========================================================================

    /// Replace `command`'s parameters with those the driver reports for the
    /// stored procedure it names.
    ///
    /// The command must be a stored procedure command with non-empty text
    /// and an open connection. The parameter collection is only touched once
    /// the driver has answered.
    pub fn derive_parameters(command: Option<&mut Command>) -> Result<()> {
        let operation = Operation::DeriveParameters;
        let connection =
            validate::run(validate::DERIVE_PARAMETERS, operation, command.as_deref())?;
        // The presence gate refused an absent command.
        let Some(command) = command else {
            return Err(Error::null_argument("command"));
        };

        let procedure = ProcedureName::parse(command.text())?;
        tracing::debug!(%procedure, "deriving parameters");

        let parameters = connection
            .discover_parameters(&procedure)?
            .ok_or_else(|| {
                InvalidOperation::NoStoredProcedureExists(command.text().to_string())
            })?;
        tracing::debug!(%procedure, count = parameters.len(), "derived parameters");

        command.parameters_mut().replace(parameters);
        Ok(())
    }

    // =========================================================================
    // Statement generation
    // =========================================================================

    /// Generate the insert command for the adapter's select command.
    pub fn get_insert_command(&mut self) -> Result<Command> {
        self.generate(StatementKind::Insert)
    }

    /// Generate the update command for the adapter's select command.
    pub fn get_update_command(&mut self) -> Result<Command> {
        self.generate(StatementKind::Update)
    }

    /// Generate the delete command for the adapter's select command.
    pub fn get_delete_command(&mut self) -> Result<Command> {
        self.generate(StatementKind::Delete)
    }

    fn generate(&mut self, kind: StatementKind) -> Result<Command> {
        let operation = match kind {
            StatementKind::Insert => Operation::GetInsertCommand,
            StatementKind::Update => Operation::GetUpdateCommand,
            StatementKind::Delete => Operation::GetDeleteCommand,
        };
        let adapter = self
            .data_adapter
            .as_ref()
            .ok_or(InvalidOperation::MissingDataAdapter { operation })?;
        let select = adapter.select_command();
        let connection = validate::run(validate::GENERATE_STATEMENT, operation, select)?;
        // The presence gate refused an absent select command.
        let Some(select_text) = select.map(|select| select.text().to_string()) else {
            return Err(InvalidOperation::MissingSelectCommand.into());
        };

        let quotes = self.resolve_quotes(operation, Some(connection.as_ref()))?;
        let schema = self.load_schema(connection.as_ref(), &select_text)?;
        let naming = Naming {
            quotes: &quotes,
            catalog_separator: &self.catalog_separator,
            schema_separator: &self.schema_separator,
            catalog_location: self.catalog_location,
        };

        let Statement { text, parameters } = match kind {
            StatementKind::Insert => generate::insert(&schema, &naming)?,
            StatementKind::Update => generate::update(&schema, &naming, self.conflict_option)?,
            StatementKind::Delete => generate::delete(&schema, &naming, self.conflict_option)?,
        };
        tracing::trace!(statement = %kind, sql = %text, "generated statement");

        let mut command = Command::new(text).with_connection(connection);
        command.parameters_mut().replace(parameters);
        Ok(command)
    }

    fn load_schema(
        &mut self,
        connection: &dyn Connection,
        select_text: &str,
    ) -> Result<TableSchema> {
        if let Some(schema) = &self.schema {
            return Ok(schema.clone());
        }
        let schema = connection.select_schema(select_text)?;
        tracing::debug!(
            columns = schema.columns().len(),
            "fetched select command schema"
        );
        self.schema = Some(schema.clone());
        Ok(schema)
    }

    fn ensure_quotes_mutable(&self) -> Result<()> {
        if self.schema.is_some() {
            return Err(InvalidOperation::QuoteChangeAfterGeneration.into());
        }
        Ok(())
    }
}
