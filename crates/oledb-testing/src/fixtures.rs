//! Test fixture utilities.

use oledb_client::{OleDbType, Parameter, ParameterDirection, SchemaColumn, TableSchema};

use crate::mock::MockConnection;

/// Select text of the customers fixture table.
pub const SELECT_CUSTOMERS: &str =
    "SELECT CustomerID, CompanyName, ContactName, Phone FROM Customers";

/// Select text of the orders fixture table.
pub const SELECT_ORDERS: &str =
    "SELECT OrderID, CustomerID, OrderDate, Freight, Notes, RowVer FROM sales.dbo.Orders";

/// Test database fixture: the tables and stored procedures a mock
/// connection should know about.
#[derive(Debug, Clone, Default)]
pub struct TestFixture {
    /// Catalog name.
    pub catalog: String,
    /// Select command text and the schema it returns.
    pub tables: Vec<(String, TableSchema)>,
    /// Stored procedures and their parameters.
    pub procedures: Vec<(String, Vec<Parameter>)>,
}

impl TestFixture {
    /// Create an empty fixture.
    #[must_use]
    pub fn new(catalog: impl Into<String>) -> Self {
        Self {
            catalog: catalog.into(),
            ..Self::default()
        }
    }

    /// The orders database: `Customers` and `Orders` tables plus the
    /// `dbo.GetOrders` and `Ten Most Expensive Products` procedures.
    #[must_use]
    pub fn orders() -> Self {
        Self::new("sales")
            .with_table(SELECT_CUSTOMERS, customers_schema())
            .with_table(SELECT_ORDERS, orders_schema())
            .with_procedure("dbo.GetOrders", get_orders_parameters())
            .with_procedure(
                "[Ten Most Expensive Products]",
                vec![return_value()],
            )
    }

    /// Add a table reachable through `select_text`.
    #[must_use]
    pub fn with_table(mut self, select_text: impl Into<String>, schema: TableSchema) -> Self {
        self.tables.push((select_text.into(), schema));
        self
    }

    /// Add a stored procedure.
    #[must_use]
    pub fn with_procedure(mut self, name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        self.procedures.push((name.into(), parameters));
        self
    }

    /// An open mock connection that knows this fixture's tables and
    /// procedures and reports bracket quotes.
    #[must_use]
    pub fn connection(&self) -> MockConnection {
        let mut builder =
            MockConnection::builder().with_quotes(oledb_client::QuoteSpec::brackets());
        for (select_text, schema) in &self.tables {
            builder = builder.with_select_schema(select_text, schema.clone());
        }
        for (name, parameters) in &self.procedures {
            builder = builder.with_procedure(name, parameters.clone());
        }
        builder.build()
    }
}

/// `Customers`: a character key and two nullable columns.
#[must_use]
pub fn customers_schema() -> TableSchema {
    let column = |name: &str, db_type| SchemaColumn::new(name, db_type).from_table("Customers");
    TableSchema::new(vec![
        column("CustomerID", OleDbType::WChar).with_size(5).key(),
        column("CompanyName", OleDbType::VarWChar).with_size(40),
        column("ContactName", OleDbType::VarWChar)
            .with_size(30)
            .nullable(),
        column("Phone", OleDbType::VarWChar).with_size(24).nullable(),
    ])
}

/// `sales.dbo.Orders`: an identity key, a long text column and a row
/// version column.
#[must_use]
pub fn orders_schema() -> TableSchema {
    let column = |name: &str, db_type| {
        SchemaColumn::new(name, db_type)
            .from_table("Orders")
            .in_schema("dbo")
            .in_catalog("sales")
    };
    TableSchema::new(vec![
        column("OrderID", OleDbType::Integer).key().auto_increment(),
        column("CustomerID", OleDbType::WChar).with_size(5).nullable(),
        column("OrderDate", OleDbType::DbTimeStamp).nullable(),
        column("Freight", OleDbType::Currency).nullable(),
        column("Notes", OleDbType::LongVarWChar).nullable(),
        column("RowVer", OleDbType::Binary).with_size(8).row_version(),
    ])
}

/// Parameters of `dbo.GetOrders`.
#[must_use]
pub fn get_orders_parameters() -> Vec<Parameter> {
    vec![
        return_value(),
        Parameter::new("@CustomerID", OleDbType::WChar)
            .with_size(5)
            .with_nullable(true),
        Parameter::new("@Total", OleDbType::Currency)
            .with_direction(ParameterDirection::Output)
            .with_nullable(true),
    ]
}

fn return_value() -> Parameter {
    Parameter::new("@RETURN_VALUE", OleDbType::Integer)
        .with_direction(ParameterDirection::ReturnValue)
}
