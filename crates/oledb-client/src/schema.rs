//! Select command schema metadata.
//!
//! Statement generation works from the column metadata of the select
//! command's result set: which base table each column comes from and
//! whether it is a key, row version, auto-increment or computed column.

use oledb_types::OleDbType;

use crate::error::{InvalidOperation, Result};

/// Metadata of one result set column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaColumn {
    /// Column name in the result set.
    pub name: String,
    /// Base column name, when it differs from the result set name.
    pub base_column: Option<String>,
    /// Catalog of the base table.
    pub base_catalog: Option<String>,
    /// Schema of the base table.
    pub base_schema: Option<String>,
    /// Base table the column is read from.
    pub base_table: Option<String>,
    /// Provider data type.
    pub db_type: OleDbType,
    /// Column size.
    pub size: u32,
    /// Numeric precision.
    pub precision: u8,
    /// Numeric scale.
    pub scale: u8,
    /// Part of the primary key.
    pub is_key: bool,
    /// Accepts null.
    pub is_nullable: bool,
    /// Value assigned by the data source on insert.
    pub is_auto_increment: bool,
    /// Row version (timestamp) column.
    pub is_row_version: bool,
    /// Cannot be written.
    pub is_read_only: bool,
    /// Added by the provider for key information only.
    pub is_hidden: bool,
    /// Computed from an expression.
    pub is_expression: bool,
}

impl SchemaColumn {
    /// Create a column with no base table.
    #[must_use]
    pub fn new(name: impl Into<String>, db_type: OleDbType) -> Self {
        Self {
            name: name.into(),
            db_type,
            size: db_type.fixed_size().unwrap_or(0),
            ..Self::default()
        }
    }

    /// Set the base table.
    #[must_use]
    pub fn from_table(mut self, table: impl Into<String>) -> Self {
        self.base_table = Some(table.into());
        self
    }

    /// Set the base schema.
    #[must_use]
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.base_schema = Some(schema.into());
        self
    }

    /// Set the base catalog.
    #[must_use]
    pub fn in_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.base_catalog = Some(catalog.into());
        self
    }

    /// Set the base column name.
    #[must_use]
    pub fn with_base_column(mut self, column: impl Into<String>) -> Self {
        self.base_column = Some(column.into());
        self
    }

    /// Set the column size.
    #[must_use]
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Mark as a key column.
    #[must_use]
    pub fn key(mut self) -> Self {
        self.is_key = true;
        self
    }

    /// Mark as nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    /// Mark as auto-increment.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.is_auto_increment = true;
        self.is_read_only = true;
        self
    }

    /// Mark as the row version column.
    #[must_use]
    pub fn row_version(mut self) -> Self {
        self.is_row_version = true;
        self.is_read_only = true;
        self
    }

    /// Mark as read-only.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.is_read_only = true;
        self
    }

    /// Mark as hidden.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.is_hidden = true;
        self
    }

    /// Mark as a computed expression.
    #[must_use]
    pub fn expression(mut self) -> Self {
        self.is_expression = true;
        self.is_read_only = true;
        self
    }

    /// Name of the column in the base table.
    #[must_use]
    pub fn base_column_name(&self) -> &str {
        self.base_column.as_deref().unwrap_or(&self.name)
    }

    /// Whether an `INSERT` or `UPDATE` may assign this column.
    #[must_use]
    pub fn is_updatable(&self) -> bool {
        !(self.is_auto_increment
            || self.is_row_version
            || self.is_read_only
            || self.is_hidden
            || self.is_expression
            || self.base_table.is_none())
    }

    /// Whether this column may appear in a `WHERE` comparison.
    #[must_use]
    pub fn is_searchable(&self) -> bool {
        !(self.is_expression || self.db_type.is_long() || self.base_table.is_none())
    }
}

/// Identity of a base table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BaseTable {
    /// Catalog.
    pub catalog: Option<String>,
    /// Schema.
    pub schema: Option<String>,
    /// Table name.
    pub table: String,
}

/// Column metadata of a select command's result set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableSchema {
    columns: Vec<SchemaColumn>,
}

impl TableSchema {
    /// Create a schema from its columns, in result set order.
    #[must_use]
    pub fn new(columns: Vec<SchemaColumn>) -> Self {
        Self { columns }
    }

    /// All columns in result set order.
    #[must_use]
    pub fn columns(&self) -> &[SchemaColumn] {
        &self.columns
    }

    /// Columns that make up the key.
    pub fn key_columns(&self) -> impl Iterator<Item = &SchemaColumn> {
        self.columns.iter().filter(|c| c.is_key)
    }

    /// The row version column, if any.
    #[must_use]
    pub fn row_version_column(&self) -> Option<&SchemaColumn> {
        self.columns.iter().find(|c| c.is_row_version)
    }

    /// The single base table every column is read from.
    ///
    /// Expression columns carry no base table and are ignored.
    pub fn base_table(&self) -> Result<BaseTable> {
        let mut found: Option<BaseTable> = None;
        for column in self.columns.iter().filter(|c| !c.is_expression) {
            let Some(table) = &column.base_table else {
                continue;
            };
            let candidate = BaseTable {
                catalog: column.base_catalog.clone(),
                schema: column.base_schema.clone(),
                table: table.clone(),
            };
            if found.as_ref().is_some_and(|existing| *existing != candidate) {
                return Err(InvalidOperation::MultipleBaseTables.into());
            }
            found.get_or_insert(candidate);
        }
        found.ok_or_else(|| InvalidOperation::NoBaseTable.into())
    }
}
