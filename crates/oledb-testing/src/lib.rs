//! # oledb-testing
//!
//! Test infrastructure for OLE DB command builder development.
//!
//! The command builder only talks to a provider through
//! [`oledb_client::Connection`]. This crate supplies an in-memory
//! implementation so quoting, parameter derivation and statement generation
//! can be tested without a registered provider.
//!
//! ## Features
//!
//! - Mock connection with configurable state, quote characters, stored
//!   procedures and select schemas
//! - Call recording, to assert which provider calls a test triggered
//! - Ready-made fixtures for an orders database
//!
//! ## Example
//!
//! ```rust
//! use oledb_client::{Command, CommandBuilder, OleDbType, Parameter};
//! use oledb_testing::MockConnection;
//!
//! let connection = MockConnection::builder()
//!     .with_procedure("GetOrders", vec![Parameter::new("@CustomerId", OleDbType::Integer)])
//!     .build()
//!     .shared();
//!
//! let mut command = Command::stored_procedure("GetOrders").with_connection(connection);
//! CommandBuilder::derive_parameters(Some(&mut command)).unwrap();
//! assert!(command.parameters().contains("@CustomerId"));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod fixtures;
pub mod mock;

pub use fixtures::TestFixture;
pub use mock::{MockCall, MockConnection, MockConnectionBuilder, MockError};
