//! Insert, update and delete generation from a data adapter's select command.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use oledb_client::{
    CatalogLocation, Command, CommandBuilder, CommandType, ConflictOption, DataAdapter, Error,
    InvalidOperation, OleDbType, Operation, QuoteSpec, RowVersion, SchemaColumn, StatementKind,
    TableSchema,
};
use oledb_testing::fixtures::{SELECT_CUSTOMERS, SELECT_ORDERS};
use oledb_testing::{MockCall, MockConnection, TestFixture};

fn builder_for(connection: &MockConnection, select_text: &str) -> CommandBuilder {
    let select = Command::new(select_text).with_connection(connection.shared());
    CommandBuilder::for_adapter(DataAdapter::new(select))
}

// =============================================================================
// Generated Text
// =============================================================================

#[test]
fn test_customers_insert() {
    let connection = TestFixture::orders().connection();
    let mut builder = builder_for(&connection, SELECT_CUSTOMERS);
    let insert = builder.get_insert_command().unwrap();
    assert_eq!(
        insert.text(),
        "INSERT INTO [Customers] ([CustomerID], [CompanyName], [ContactName], [Phone]) \
         VALUES (?, ?, ?, ?)"
    );
    assert_eq!(insert.command_type(), CommandType::Text);
    assert_eq!(insert.parameters().len(), 4);
    assert!(
        insert
            .parameters()
            .iter()
            .all(|p| p.source_version == RowVersion::Current)
    );
}

#[test]
fn test_customers_update_compares_all_values() {
    let connection = TestFixture::orders().connection();
    let mut builder = builder_for(&connection, SELECT_CUSTOMERS);
    let update = builder.get_update_command().unwrap();
    assert_eq!(
        update.text(),
        "UPDATE [Customers] SET [CustomerID] = ?, [CompanyName] = ?, [ContactName] = ?, \
         [Phone] = ? WHERE (([CustomerID] = ?) AND ([CompanyName] = ?) AND \
         ((? = 1 AND [ContactName] IS NULL) OR ([ContactName] = ?)) AND \
         ((? = 1 AND [Phone] IS NULL) OR ([Phone] = ?)))"
    );
    assert_eq!(update.parameters().len(), 10);
    let names: Vec<&str> = update.parameters().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names.first(), Some(&"p1"));
    assert_eq!(names.last(), Some(&"p10"));
}

#[test]
fn test_customers_delete() {
    let connection = TestFixture::orders().connection();
    let mut builder = builder_for(&connection, SELECT_CUSTOMERS);
    let delete = builder.get_delete_command().unwrap();
    assert_eq!(
        delete.text(),
        "DELETE FROM [Customers] WHERE (([CustomerID] = ?) AND ([CompanyName] = ?) AND \
         ((? = 1 AND [ContactName] IS NULL) OR ([ContactName] = ?)) AND \
         ((? = 1 AND [Phone] IS NULL) OR ([Phone] = ?)))"
    );
    let null_check = &delete.parameters()[2];
    assert!(null_check.source_column_null_mapping);
    assert_eq!(null_check.source_column, "ContactName");
    assert_eq!(null_check.source_version, RowVersion::Original);
}

#[test]
fn test_orders_insert_skips_generated_columns() {
    let connection = TestFixture::orders().connection();
    let mut builder = builder_for(&connection, SELECT_ORDERS);
    let insert = builder.get_insert_command().unwrap();
    assert_eq!(
        insert.text(),
        "INSERT INTO [sales].[dbo].[Orders] ([CustomerID], [OrderDate], [Freight], [Notes]) \
         VALUES (?, ?, ?, ?)"
    );
}

#[test]
fn test_orders_delete_skips_long_columns() {
    let connection = TestFixture::orders().connection();
    let mut builder = builder_for(&connection, SELECT_ORDERS);
    let delete = builder.get_delete_command().unwrap();
    assert_eq!(
        delete.text(),
        "DELETE FROM [sales].[dbo].[Orders] WHERE (([OrderID] = ?) AND \
         ((? = 1 AND [CustomerID] IS NULL) OR ([CustomerID] = ?)) AND \
         ((? = 1 AND [OrderDate] IS NULL) OR ([OrderDate] = ?)) AND \
         ((? = 1 AND [Freight] IS NULL) OR ([Freight] = ?)) AND ([RowVer] = ?))"
    );
}

#[test]
fn test_orders_row_version_conflicts() {
    let connection = TestFixture::orders().connection();
    let mut builder = builder_for(&connection, SELECT_ORDERS)
        .with_conflict_option(ConflictOption::CompareRowVersion);
    let update = builder.get_update_command().unwrap();
    assert_eq!(
        update.text(),
        "UPDATE [sales].[dbo].[Orders] SET [CustomerID] = ?, [OrderDate] = ?, [Freight] = ?, \
         [Notes] = ? WHERE (([OrderID] = ?) AND ([RowVer] = ?))"
    );
}

#[test]
fn test_overwrite_changes_compares_keys_only() {
    let connection = TestFixture::orders().connection();
    let mut builder = builder_for(&connection, SELECT_CUSTOMERS)
        .with_conflict_option(ConflictOption::OverwriteChanges);
    let delete = builder.get_delete_command().unwrap();
    assert_eq!(delete.text(), "DELETE FROM [Customers] WHERE (([CustomerID] = ?))");
}

#[test]
fn test_catalog_at_end() {
    let connection = TestFixture::orders().connection();
    let mut builder = builder_for(&connection, SELECT_ORDERS)
        .with_conflict_option(ConflictOption::OverwriteChanges);
    builder.set_catalog_location(CatalogLocation::End);
    builder.set_catalog_separator("@");
    let delete = builder.get_delete_command().unwrap();
    assert_eq!(
        delete.text(),
        "DELETE FROM [dbo].[Orders]@[sales] WHERE (([OrderID] = ?))"
    );
}

#[test]
fn test_configured_quotes_used() {
    let connection = TestFixture::orders().connection();
    let mut builder = builder_for(&connection, SELECT_CUSTOMERS)
        .with_quotes(QuoteSpec::double_quote())
        .with_conflict_option(ConflictOption::OverwriteChanges);
    let delete = builder.get_delete_command().unwrap();
    assert_eq!(
        delete.text(),
        "DELETE FROM \"Customers\" WHERE ((\"CustomerID\" = ?))"
    );
}

// =============================================================================
// Generated Commands
// =============================================================================

#[test]
fn test_generated_command_shares_connection() {
    let connection = TestFixture::orders().connection();
    let mut builder = builder_for(&connection, SELECT_CUSTOMERS);
    let insert = builder.get_insert_command().unwrap();
    let select = builder.data_adapter().unwrap().select_command().unwrap();
    assert!(insert.shares_connection(select));
}

#[test]
fn test_schema_fetched_once() {
    let connection = TestFixture::orders().connection();
    let mut builder = builder_for(&connection, SELECT_CUSTOMERS);
    builder.get_insert_command().unwrap();
    builder.get_update_command().unwrap();
    builder.get_delete_command().unwrap();
    let schema_calls = connection
        .calls()
        .into_iter()
        .filter(|call| matches!(call, MockCall::SelectSchema(_)))
        .count();
    assert_eq!(schema_calls, 1);
}

#[test]
fn test_refresh_schema_fetches_again() {
    let connection = TestFixture::orders().connection();
    let mut builder = builder_for(&connection, SELECT_CUSTOMERS);
    builder.get_insert_command().unwrap();
    builder.refresh_schema();
    builder.get_insert_command().unwrap();
    assert_eq!(
        connection
            .calls()
            .iter()
            .filter(|call| matches!(call, MockCall::SelectSchema(_)))
            .count(),
        2
    );
}

#[test]
fn test_select_replaced_through_adapter() {
    let connection = TestFixture::orders().connection();
    let mut builder = builder_for(&connection, SELECT_CUSTOMERS)
        .with_conflict_option(ConflictOption::OverwriteChanges);
    builder.get_delete_command().unwrap();

    let select = Command::new(SELECT_ORDERS).with_connection(connection.shared());
    builder
        .data_adapter_mut()
        .unwrap()
        .set_select_command(Some(select));
    builder.refresh_schema();
    let delete = builder.get_delete_command().unwrap();
    assert_eq!(
        delete.text(),
        "DELETE FROM [sales].[dbo].[Orders] WHERE (([OrderID] = ?))"
    );
}

#[test]
fn test_quote_change_refused_after_generation() {
    let connection = TestFixture::orders().connection();
    let mut builder = builder_for(&connection, SELECT_CUSTOMERS);
    builder.get_insert_command().unwrap();

    let err = builder.set_quote_prefix("\"").unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidOperation(InvalidOperation::QuoteChangeAfterGeneration)
    ));
    assert_eq!(builder.quote_prefix(), "");

    builder.refresh_schema();
    builder.set_quote_prefix("\"").unwrap();
    builder.set_quote_suffix("\"").unwrap();
    let delete = builder.get_delete_command().unwrap();
    assert!(delete.text().starts_with("DELETE FROM \"Customers\""));
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_missing_select_command() {
    let mut builder = CommandBuilder::for_adapter(DataAdapter::default());
    let err = builder.get_update_command().unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidOperation(InvalidOperation::MissingSelectCommand)
    ));
}

#[test]
fn test_select_without_connection() {
    let mut builder = CommandBuilder::for_adapter(DataAdapter::new(Command::new(SELECT_ORDERS)));
    let err = builder.get_insert_command().unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidOperation(InvalidOperation::ConnectionRequired {
            operation: Operation::GetInsertCommand
        })
    ));
}

#[test]
fn test_select_with_closed_connection() {
    let connection = TestFixture::orders().connection();
    connection.close();
    let mut builder = builder_for(&connection, SELECT_ORDERS);
    let err = builder.get_delete_command().unwrap_err();
    assert_eq!(err.operation(), Some(Operation::GetDeleteCommand));
    assert_eq!(connection.call_count(), 0);
}

#[test]
fn test_empty_select_text() {
    let connection = TestFixture::orders().connection();
    let mut builder = builder_for(&connection, "");
    let err = builder.get_insert_command().unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidOperation(InvalidOperation::CommandTextRequired { .. })
    ));
}

#[test]
fn test_multiple_base_tables() {
    let schema = TableSchema::new(vec![
        SchemaColumn::new("OrderID", OleDbType::Integer)
            .from_table("Orders")
            .key(),
        SchemaColumn::new("CompanyName", OleDbType::VarWChar).from_table("Customers"),
    ]);
    let connection = MockConnection::builder()
        .with_select_schema("SELECT * FROM Orders JOIN Customers", schema)
        .build();
    let mut builder = builder_for(&connection, "SELECT * FROM Orders JOIN Customers");
    let err = builder.get_insert_command().unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidOperation(InvalidOperation::MultipleBaseTables)
    ));
}

#[test]
fn test_no_key_information() {
    let schema = TableSchema::new(vec![
        SchemaColumn::new("Name", OleDbType::VarWChar).from_table("Log"),
    ]);
    let connection = MockConnection::builder()
        .with_select_schema("SELECT Name FROM Log", schema)
        .build();
    let mut builder = builder_for(&connection, "SELECT Name FROM Log");

    // Inserts do not need a key.
    assert!(builder.get_insert_command().is_ok());
    let err = builder.get_update_command().unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidOperation(InvalidOperation::NoKeyInfo {
            statement: StatementKind::Update
        })
    ));
}

#[test]
fn test_no_row_version() {
    let connection = TestFixture::orders().connection();
    let mut builder = builder_for(&connection, SELECT_CUSTOMERS)
        .with_conflict_option(ConflictOption::CompareRowVersion);
    let err = builder.get_delete_command().unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidOperation(InvalidOperation::NoRowVersion {
            statement: StatementKind::Delete
        })
    ));
}

#[test]
fn test_unknown_select_schema() {
    let connection = MockConnection::new();
    let mut builder = builder_for(&connection, "SELECT * FROM Nowhere");
    let err = builder.get_insert_command().unwrap_err();
    assert!(matches!(err, Error::Driver(_)));
}
