//! `INSERT`, `UPDATE` and `DELETE` text generated from a select schema.
//!
//! Statements use positional `?` markers. Parameters are named `p1`, `p2`,
//! ... in marker order and bound to their source column, with `SET` and
//! `VALUES` values taken from the current row version and `WHERE` values
//! from the original one.

use oledb_types::{OleDbType, RowVersion};

use crate::error::{InvalidOperation, Result, StatementKind};
use crate::parameter::Parameter;
use crate::quote::QuoteSpec;
use crate::schema::{BaseTable, SchemaColumn, TableSchema};

/// Where the catalog appears in a qualified table name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CatalogLocation {
    /// `catalog.schema.table`.
    #[default]
    Start,
    /// `schema.table<sep>catalog`, joined with the catalog separator
    /// (providers that put the catalog last usually use `@`).
    End,
}

/// Which columns an `UPDATE` or `DELETE` compares to detect conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConflictOption {
    /// Every searchable column must still hold its original value.
    #[default]
    CompareAllSearchableValues,
    /// Key columns and the row version column must match.
    CompareRowVersion,
    /// Only key columns are compared; the last writer wins.
    OverwriteChanges,
}

/// How object names are quoted and joined.
#[derive(Debug, Clone, Copy)]
pub struct Naming<'a> {
    /// Quote characters for every name part.
    pub quotes: &'a QuoteSpec,
    /// Separator between the catalog and the rest of the name.
    pub catalog_separator: &'a str,
    /// Separator between the schema and the table.
    pub schema_separator: &'a str,
    /// Catalog position.
    pub catalog_location: CatalogLocation,
}

impl Naming<'_> {
    /// Quote a single name part.
    #[must_use]
    pub fn quote(&self, part: &str) -> String {
        self.quotes.quote(part)
    }

    /// Qualified, quoted name of `table`.
    #[must_use]
    pub fn table_name(&self, table: &BaseTable) -> String {
        let mut name = String::new();
        let catalog = table.catalog.as_deref().filter(|c| !c.is_empty());

        if let (CatalogLocation::Start, Some(catalog)) = (self.catalog_location, catalog) {
            name.push_str(&self.quote(catalog));
            name.push_str(self.catalog_separator);
        }
        if let Some(schema) = table.schema.as_deref().filter(|s| !s.is_empty()) {
            name.push_str(&self.quote(schema));
            name.push_str(self.schema_separator);
        }
        name.push_str(&self.quote(&table.table));
        if let (CatalogLocation::End, Some(catalog)) = (self.catalog_location, catalog) {
            name.push_str(self.catalog_separator);
            name.push_str(&self.quote(catalog));
        }
        name
    }
}

/// Generated statement text and its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// SQL text with `?` markers.
    pub text: String,
    /// Parameters in marker order.
    pub parameters: Vec<Parameter>,
}

#[derive(Default)]
struct Markers {
    parameters: Vec<Parameter>,
}

impl Markers {
    fn bind(&mut self, column: &SchemaColumn, version: RowVersion) -> &'static str {
        let name = format!("p{}", self.parameters.len() + 1);
        self.parameters.push(
            Parameter::new(name, column.db_type)
                .with_size(column.size)
                .with_precision(column.precision, column.scale)
                .with_nullable(column.is_nullable)
                .with_source(column.name.clone(), version),
        );
        "?"
    }

    fn bind_null_check(&mut self, column: &SchemaColumn) -> &'static str {
        let name = format!("p{}", self.parameters.len() + 1);
        self.parameters.push(
            Parameter::new(name, OleDbType::Integer)
                .with_source(column.name.clone(), RowVersion::Original)
                .with_null_mapping(true),
        );
        "?"
    }
}

/// Generate an `INSERT` for every updatable column.
pub fn insert(schema: &TableSchema, naming: &Naming<'_>) -> Result<Statement> {
    let table = naming.table_name(&schema.base_table()?);
    let mut markers = Markers::default();

    let columns: Vec<&SchemaColumn> = schema
        .columns()
        .iter()
        .filter(|c| c.is_updatable())
        .collect();
    if columns.is_empty() {
        return Err(InvalidOperation::NoUpdatableColumns {
            statement: StatementKind::Insert,
        }
        .into());
    }

    let names: Vec<String> = columns
        .iter()
        .map(|c| naming.quote(c.base_column_name()))
        .collect();
    let values: Vec<&str> = columns
        .iter()
        .map(|c| markers.bind(c, RowVersion::Current))
        .collect();

    Ok(Statement {
        text: format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            names.join(", "),
            values.join(", ")
        ),
        parameters: markers.parameters,
    })
}

/// Generate an `UPDATE` assigning every updatable column.
pub fn update(
    schema: &TableSchema,
    naming: &Naming<'_>,
    conflict: ConflictOption,
) -> Result<Statement> {
    let table = naming.table_name(&schema.base_table()?);
    let mut markers = Markers::default();

    let assignments: Vec<String> = schema
        .columns()
        .iter()
        .filter(|c| c.is_updatable())
        .map(|c| {
            let marker = markers.bind(c, RowVersion::Current);
            format!("{} = {marker}", naming.quote(c.base_column_name()))
        })
        .collect();
    if assignments.is_empty() {
        return Err(InvalidOperation::NoUpdatableColumns {
            statement: StatementKind::Update,
        }
        .into());
    }

    let predicate = where_clause(schema, naming, conflict, StatementKind::Update, &mut markers)?;
    Ok(Statement {
        text: format!(
            "UPDATE {table} SET {} WHERE {predicate}",
            assignments.join(", ")
        ),
        parameters: markers.parameters,
    })
}

/// Generate a `DELETE` of the original row.
pub fn delete(
    schema: &TableSchema,
    naming: &Naming<'_>,
    conflict: ConflictOption,
) -> Result<Statement> {
    let table = naming.table_name(&schema.base_table()?);
    let mut markers = Markers::default();
    let predicate = where_clause(schema, naming, conflict, StatementKind::Delete, &mut markers)?;
    Ok(Statement {
        text: format!("DELETE FROM {table} WHERE {predicate}"),
        parameters: markers.parameters,
    })
}

fn where_clause(
    schema: &TableSchema,
    naming: &Naming<'_>,
    conflict: ConflictOption,
    statement: StatementKind,
    markers: &mut Markers,
) -> Result<String> {
    if schema.key_columns().next().is_none() {
        return Err(InvalidOperation::NoKeyInfo { statement }.into());
    }

    let compared: Vec<&SchemaColumn> = match conflict {
        ConflictOption::OverwriteChanges => schema.key_columns().collect(),
        ConflictOption::CompareRowVersion => {
            let row_version = schema
                .row_version_column()
                .ok_or(InvalidOperation::NoRowVersion { statement })?;
            let mut columns: Vec<&SchemaColumn> =
                schema.key_columns().filter(|c| !c.is_row_version).collect();
            columns.push(row_version);
            columns
        }
        ConflictOption::CompareAllSearchableValues => schema
            .columns()
            .iter()
            .filter(|c| c.is_key || (c.is_searchable() && !c.is_hidden))
            .collect(),
    };

    let terms: Vec<String> = compared
        .into_iter()
        .map(|column| {
            let name = naming.quote(column.base_column_name());
            if column.is_nullable && !column.is_key {
                let check = markers.bind_null_check(column);
                let value = markers.bind(column, RowVersion::Original);
                format!("(({check} = 1 AND {name} IS NULL) OR ({name} = {value}))")
            } else {
                let value = markers.bind(column, RowVersion::Original);
                format!("({name} = {value})")
            }
        })
        .collect();

    Ok(format!("({})", terms.join(" AND ")))
}
