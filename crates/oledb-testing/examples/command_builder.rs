//! Command builder walkthrough against the in-memory provider.
//!
//! Quotes identifiers with the provider's quote characters, derives a stored
//! procedure's parameters and generates the adapter commands for a table.
//!
//! # Running
//!
//! ```bash
//! RUST_LOG=debug cargo run -p oledb-testing --example command_builder
//! ```

// Allow common patterns in example code
#![allow(clippy::unwrap_used, clippy::expect_used)]

use oledb_client::{Command, CommandBuilder, ConflictOption, DataAdapter, Error};
use oledb_testing::TestFixture;
use oledb_testing::fixtures::SELECT_ORDERS;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let fixture = TestFixture::orders();
    let connection = fixture.connection();

    println!("=== Identifier quoting ===");
    let mut builder = CommandBuilder::new();
    for name in ["Orders", "Order Details", "odd]name"] {
        let quoted = builder.quote_identifier_with(Some(name), Some(&connection))?;
        let unquoted = builder.unquote_identifier(Some(&quoted))?;
        println!("  {name:<16} -> {quoted:<18} -> {unquoted}");
    }

    println!("\n=== Parameter derivation ===");
    let mut command =
        Command::stored_procedure("dbo.GetOrders").with_connection(connection.shared());
    CommandBuilder::derive_parameters(Some(&mut command))?;
    for parameter in command.parameters() {
        println!(
            "  {:<14} {:<10} {}",
            parameter.name, parameter.db_type, parameter.direction
        );
    }

    connection.close();
    match CommandBuilder::derive_parameters(Some(&mut command)) {
        Ok(()) => println!("  unexpected success on a closed connection"),
        Err(e) => println!("  closed connection: {e}"),
    }
    connection.open();

    println!("\n=== Statement generation ===");
    let select = Command::new(SELECT_ORDERS).with_connection(connection.shared());
    let mut builder = CommandBuilder::for_adapter(DataAdapter::new(select))
        .with_conflict_option(ConflictOption::CompareRowVersion);
    for command in [
        builder.get_insert_command()?,
        builder.get_update_command()?,
        builder.get_delete_command()?,
    ] {
        println!("  {}", command.text());
        for parameter in command.parameters() {
            println!(
                "    {:<4} {:<12} {}",
                parameter.name, parameter.source_column, parameter.source_version
            );
        }
    }

    Ok(())
}
