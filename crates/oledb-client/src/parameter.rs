//! Command parameters.

use oledb_types::{OleDbType, ParameterDirection, RowVersion};

/// Descriptor of one command parameter.
///
/// Derived parameters come from the driver; generated statements build
/// theirs from the select schema and bind them to source columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parameter {
    /// Parameter name (`@p1`, `p1`, `RETURN_VALUE`, ...).
    pub name: String,
    /// Provider data type.
    pub db_type: OleDbType,
    /// Direction relative to the call.
    pub direction: ParameterDirection,
    /// Maximum size in bytes or characters (0 when not applicable).
    pub size: u32,
    /// Numeric precision.
    pub precision: u8,
    /// Numeric scale.
    pub scale: u8,
    /// Whether the parameter accepts null.
    pub is_nullable: bool,
    /// Source column the value is bound to.
    pub source_column: String,
    /// Which version of the source row supplies the value.
    pub source_version: RowVersion,
    /// The value is `1` when the source column is null and `0` otherwise.
    pub source_column_null_mapping: bool,
}

impl Parameter {
    /// Create an input parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, db_type: OleDbType) -> Self {
        Self {
            name: name.into(),
            db_type,
            size: db_type.fixed_size().unwrap_or(0),
            ..Self::default()
        }
    }

    /// Set the direction.
    #[must_use]
    pub fn with_direction(mut self, direction: ParameterDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the size.
    #[must_use]
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set precision and scale.
    #[must_use]
    pub fn with_precision(mut self, precision: u8, scale: u8) -> Self {
        self.precision = precision;
        self.scale = scale;
        self
    }

    /// Set nullability.
    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.is_nullable = nullable;
        self
    }

    /// Bind to a source column and row version.
    #[must_use]
    pub fn with_source(mut self, column: impl Into<String>, version: RowVersion) -> Self {
        self.source_column = column.into();
        self.source_version = version;
        self
    }

    /// Mark the parameter as a null indicator for its source column.
    #[must_use]
    pub fn with_null_mapping(mut self, null_mapping: bool) -> Self {
        self.source_column_null_mapping = null_mapping;
        self
    }
}

/// Ordered collection of parameters with case-insensitive lookup by name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterCollection {
    items: Vec<Parameter>,
}

impl ParameterCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn add(&mut self, parameter: Parameter) {
        self.items.push(parameter);
    }

    /// Replace the contents with `parameters`, keeping their order.
    pub fn replace(&mut self, parameters: impl IntoIterator<Item = Parameter>) {
        self.items.clear();
        self.items.extend(parameters);
    }

    /// Remove every parameter.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Position of the parameter called `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Look up a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.index_of(name).map(|index| &self.items[index])
    }

    /// Look up a parameter by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        let index = self.index_of(name)?;
        self.items.get_mut(index)
    }

    /// Remove and return the parameter called `name`.
    pub fn remove(&mut self, name: &str) -> Option<Parameter> {
        let index = self.index_of(name)?;
        Some(self.items.remove(index))
    }

    /// Whether a parameter called `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.items.iter()
    }

    /// The parameters as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Parameter] {
        &self.items
    }
}

impl std::ops::Index<usize> for ParameterCollection {
    type Output = Parameter;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a ParameterCollection {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Parameter> for ParameterCollection {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
