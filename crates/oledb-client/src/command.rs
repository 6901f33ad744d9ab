//! Commands.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::connection::SharedConnection;
use crate::parameter::ParameterCollection;

/// How a command's text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CommandType {
    /// A SQL statement.
    #[default]
    Text,
    /// The name of a stored procedure.
    StoredProcedure,
    /// The name of a table whose rows are all returned.
    TableDirect,
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "Text",
            Self::StoredProcedure => "StoredProcedure",
            Self::TableDirect => "TableDirect",
        };
        f.write_str(name)
    }
}

/// Default command timeout.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// A command against a data source: text, type, connection and parameters.
///
/// The command itself never talks to the driver; the command builder reads
/// its state to decide whether parameter derivation is allowed.
#[derive(Debug, Clone)]
pub struct Command {
    text: String,
    command_type: CommandType,
    connection: Option<SharedConnection>,
    parameters: ParameterCollection,
    timeout: Duration,
}

impl Default for Command {
    fn default() -> Self {
        Self {
            text: String::new(),
            command_type: CommandType::default(),
            connection: None,
            parameters: ParameterCollection::new(),
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }
}

impl Command {
    /// Create a text command.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Create a stored procedure command.
    #[must_use]
    pub fn stored_procedure(name: impl Into<String>) -> Self {
        Self::new(name).with_type(CommandType::StoredProcedure)
    }

    /// Set the command type.
    #[must_use]
    pub fn with_type(mut self, command_type: CommandType) -> Self {
        self.command_type = command_type;
        self
    }

    /// Attach a connection.
    #[must_use]
    pub fn with_connection(mut self, connection: SharedConnection) -> Self {
        self.connection = Some(connection);
        self
    }

    /// Set the command timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The command text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the command text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// The command type.
    #[must_use]
    pub fn command_type(&self) -> CommandType {
        self.command_type
    }

    /// Replace the command type.
    pub fn set_command_type(&mut self, command_type: CommandType) {
        self.command_type = command_type;
    }

    /// The attached connection, if any.
    #[must_use]
    pub fn connection(&self) -> Option<&SharedConnection> {
        self.connection.as_ref()
    }

    /// Attach or detach a connection.
    pub fn set_connection(&mut self, connection: Option<SharedConnection>) {
        self.connection = connection;
    }

    /// Whether this command and `other` share the same connection object.
    #[must_use]
    pub fn shares_connection(&self, other: &Command) -> bool {
        match (&self.connection, &other.connection) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// The parameters.
    #[must_use]
    pub fn parameters(&self) -> &ParameterCollection {
        &self.parameters
    }

    /// The parameters, mutably.
    pub fn parameters_mut(&mut self) -> &mut ParameterCollection {
        &mut self.parameters
    }

    /// The command timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Replace the command timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_defaults() {
        let command = Command::default();
        assert_eq!(command.text(), "");
        assert_eq!(command.command_type(), CommandType::Text);
        assert!(command.connection().is_none());
        assert!(command.parameters().is_empty());
        assert_eq!(command.timeout(), DEFAULT_COMMAND_TIMEOUT);
    }

    #[test]
    fn test_stored_procedure_constructor() {
        let command = Command::stored_procedure("dbo.GetOrders");
        assert_eq!(command.text(), "dbo.GetOrders");
        assert_eq!(command.command_type(), CommandType::StoredProcedure);
    }

    #[test]
    fn test_setters() {
        let mut command = Command::new("SELECT 1");
        command.set_text("GetOrders");
        command.set_command_type(CommandType::TableDirect);
        command.set_timeout(Duration::from_secs(5));
        assert_eq!(command.text(), "GetOrders");
        assert_eq!(command.command_type(), CommandType::TableDirect);
        assert_eq!(command.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_command_type_display() {
        assert_eq!(CommandType::StoredProcedure.to_string(), "StoredProcedure");
        assert_eq!(CommandType::TableDirect.to_string(), "TableDirect");
    }

    #[test]
    fn test_no_shared_connection_without_connections() {
        let a = Command::new("a");
        let b = Command::new("b");
        assert!(!a.shares_connection(&b));
    }
}
