//! # oledb-client
//!
//! Command builder for OLE DB data sources.
//!
//! The native provider does the real work: executing SQL, reporting
//! parameter and column metadata, and telling which characters quote an
//! identifier. This crate sits in front of it and owns the parts that are
//! pure logic:
//!
//! - **Identifier quoting**: wrap identifiers in a prefix/suffix pair with
//!   doubled-suffix escaping, and undo it.
//! - **Precondition checks**: refuse parameter derivation and statement
//!   generation unless the command type, command text and connection state
//!   allow it, before the provider is ever called.
//! - **Statement generation**: `INSERT`/`UPDATE`/`DELETE` text for a data
//!   adapter's select command, with optimistic concurrency predicates.
//!
//! The provider is reached through the [`Connection`] trait.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use oledb_client::{Command, CommandBuilder};
//!
//! let connection: oledb_client::SharedConnection = Arc::new(open_provider_connection()?);
//!
//! // Quote with the provider's own quote characters.
//! let mut builder = CommandBuilder::new();
//! let quoted = builder.quote_identifier_with(Some("Order Details"), Some(connection.as_ref()))?;
//! assert_eq!(quoted, "`Order Details`");
//!
//! // Ask the provider for a stored procedure's parameters.
//! let mut command = Command::stored_procedure("dbo.GetOrders").with_connection(connection);
//! CommandBuilder::derive_parameters(Some(&mut command))?;
//! for parameter in command.parameters() {
//!     println!("{} {} {}", parameter.name, parameter.db_type, parameter.direction);
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod adapter;
pub mod builder;
pub mod command;
pub mod config;
pub mod connection;
pub mod error;
pub mod generate;
pub mod identifier;
pub mod parameter;
pub mod quote;
pub mod schema;
pub mod state;
pub mod validate;

// Re-export commonly used types
pub use adapter::DataAdapter;
pub use builder::CommandBuilder;
pub use command::{Command, CommandType};
pub use config::ConnectionConfig;
pub use connection::{Connection, SharedConnection};
pub use error::{Error, InvalidOperation, Operation, Result, StatementKind};
pub use generate::{CatalogLocation, ConflictOption};
pub use identifier::ProcedureName;
pub use oledb_types::{OleDbType, ParameterDirection, RowVersion};
pub use parameter::{Parameter, ParameterCollection};
pub use quote::QuoteSpec;
pub use schema::{BaseTable, SchemaColumn, TableSchema};
pub use state::ConnectionState;
