//! Multipart object names (`server.catalog.schema.object`).
//!
//! Stored procedure command text names the procedure the way the provider
//! would accept it in SQL: up to four dot-separated parts, each optionally
//! delimited by `[`…`]` or `"`…`"` with the closing delimiter doubled to
//! escape it. Parts are right-aligned, so `dbo.GetOrders` has a schema and a
//! name and no catalog.

use std::fmt;

use crate::error::{Error, Result};

/// Maximum number of parts in an object name.
pub const MAX_NAME_PARTS: usize = 4;

const SEPARATOR: char = '.';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// Before the first character of a part.
    PartStart,
    /// Inside an undelimited part.
    Bare,
    /// Inside a delimited part, waiting for the closing delimiter.
    Delimited(char),
    /// Just saw a closing delimiter; it is either doubled or ends the part.
    MaybeClosed(char),
    /// Trailing whitespace after a part.
    PartEnd,
}

fn closing_delimiter(c: char) -> Option<char> {
    match c {
        '[' => Some(']'),
        '"' => Some('"'),
        _ => None,
    }
}

/// Split a multipart name into its unquoted parts, left to right.
///
/// Empty parts (`catalog..object`) are kept as empty strings.
pub fn parse_multipart(text: &str, limit: usize) -> Result<Vec<String>> {
    let invalid = |reason: &str| Error::InvalidIdentifier(format!("{reason}: {text}"));

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut state = Scan::PartStart;

    for c in text.chars() {
        state = match state {
            Scan::PartStart => {
                if c.is_whitespace() {
                    Scan::PartStart
                } else if c == SEPARATOR {
                    parts.push(String::new());
                    Scan::PartStart
                } else if let Some(close) = closing_delimiter(c) {
                    Scan::Delimited(close)
                } else if c == ']' {
                    return Err(invalid("unexpected closing delimiter"));
                } else {
                    current.push(c);
                    Scan::Bare
                }
            }
            Scan::Bare => {
                if c == SEPARATOR {
                    parts.push(std::mem::take(&mut current));
                    Scan::PartStart
                } else if c.is_whitespace() {
                    Scan::PartEnd
                } else if c == '[' || c == ']' || c == '"' {
                    return Err(invalid("delimiter inside an undelimited part"));
                } else {
                    current.push(c);
                    Scan::Bare
                }
            }
            Scan::Delimited(close) => {
                if c == close {
                    Scan::MaybeClosed(close)
                } else {
                    current.push(c);
                    Scan::Delimited(close)
                }
            }
            Scan::MaybeClosed(close) => {
                if c == close {
                    current.push(c);
                    Scan::Delimited(close)
                } else if c == SEPARATOR {
                    parts.push(std::mem::take(&mut current));
                    Scan::PartStart
                } else if c.is_whitespace() {
                    Scan::PartEnd
                } else {
                    return Err(invalid("text after closing delimiter"));
                }
            }
            Scan::PartEnd => {
                if c.is_whitespace() {
                    Scan::PartEnd
                } else if c == SEPARATOR {
                    parts.push(std::mem::take(&mut current));
                    Scan::PartStart
                } else {
                    return Err(invalid("whitespace inside an undelimited part"));
                }
            }
        };

        if parts.len() >= limit {
            return Err(invalid("too many name parts"));
        }
    }

    if let Scan::Delimited(_) = state {
        return Err(invalid("unterminated delimiter"));
    }
    parts.push(current);

    if parts.len() > limit {
        return Err(invalid("too many name parts"));
    }
    Ok(parts)
}

/// A parsed stored procedure name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ProcedureName {
    /// Linked server, when four parts are given.
    pub server: Option<String>,
    /// Catalog (database).
    pub catalog: Option<String>,
    /// Schema (owner).
    pub schema: Option<String>,
    /// Procedure name.
    pub name: String,
}

impl ProcedureName {
    /// Parse stored procedure command text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut parts = parse_multipart(text, MAX_NAME_PARTS)?.into_iter().rev();
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(Error::InvalidIdentifier(format!(
                "procedure name is empty: {text}"
            )));
        }
        let mut next_part = || parts.next().filter(|part| !part.is_empty());
        let schema = next_part();
        let catalog = next_part();
        let server = next_part();
        Ok(Self {
            server,
            catalog,
            schema,
            name,
        })
    }

    /// Create a name with only the procedure part.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the schema part.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Set the catalog part.
    #[must_use]
    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }
}

/// Write one name part, bracketing it when it would not parse back bare.
fn write_part(f: &mut fmt::Formatter<'_>, part: &str) -> fmt::Result {
    let needs_delimiters = part
        .chars()
        .any(|c| c == SEPARATOR || c == '[' || c == ']' || c == '"' || c.is_whitespace());
    if needs_delimiters {
        write!(f, "[{}]", part.replace(']', "]]"))
    } else {
        f.write_str(part)
    }
}

/// Renders the name so that [`ProcedureName::parse`] reads it back.
impl fmt::Display for ProcedureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qualifiers = [&self.server, &self.catalog, &self.schema];
        if let Some(first) = qualifiers.iter().position(|part| part.is_some()) {
            for part in &qualifiers[first..] {
                write_part(f, part.as_deref().unwrap_or_default())?;
                f.write_str(".")?;
            }
        }
        write_part(f, &self.name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_single_part() {
        assert_eq!(parse_multipart("GetOrders", 4).unwrap(), vec!["GetOrders"]);
    }

    #[test]
    fn test_dotted_parts() {
        assert_eq!(
            parse_multipart("sales.dbo.GetOrders", 4).unwrap(),
            vec!["sales", "dbo", "GetOrders"]
        );
    }

    #[test]
    fn test_bracketed_part_keeps_dots() {
        assert_eq!(
            parse_multipart("[my.schema].[Get Orders]", 4).unwrap(),
            vec!["my.schema", "Get Orders"]
        );
    }

    #[test]
    fn test_doubled_closing_delimiter() {
        assert_eq!(parse_multipart("[a]]b]", 4).unwrap(), vec!["a]b"]);
        assert_eq!(parse_multipart("\"a\"\"b\"", 4).unwrap(), vec!["a\"b"]);
    }

    #[test]
    fn test_empty_middle_part() {
        assert_eq!(
            parse_multipart("sales..GetOrders", 4).unwrap(),
            vec!["sales", "", "GetOrders"]
        );
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(
            parse_multipart("  dbo . GetOrders  ", 4).unwrap(),
            vec!["dbo", "GetOrders"]
        );
    }

    #[test]
    fn test_unterminated_delimiter() {
        assert!(parse_multipart("[GetOrders", 4).is_err());
    }

    #[test]
    fn test_text_after_closing_delimiter() {
        assert!(parse_multipart("[Get]Orders", 4).is_err());
    }

    #[test]
    fn test_whitespace_inside_bare_part() {
        assert!(parse_multipart("Get Orders", 4).is_err());
    }

    #[test]
    fn test_too_many_parts() {
        assert!(parse_multipart("a.b.c.d.e", 4).is_err());
        assert!(parse_multipart("a.b.c.d", 4).is_ok());
    }

    #[test]
    fn test_procedure_name_right_aligned() {
        let name = ProcedureName::parse("sales.dbo.GetOrders").unwrap();
        assert_eq!(name.server, None);
        assert_eq!(name.catalog.as_deref(), Some("sales"));
        assert_eq!(name.schema.as_deref(), Some("dbo"));
        assert_eq!(name.name, "GetOrders");
    }

    #[test]
    fn test_procedure_name_skipped_schema() {
        let name = ProcedureName::parse("sales..GetOrders").unwrap();
        assert_eq!(name.catalog.as_deref(), Some("sales"));
        assert_eq!(name.schema, None);
        assert_eq!(name.to_string(), "sales..GetOrders");
    }

    #[test]
    fn test_procedure_name_empty() {
        assert!(ProcedureName::parse("   ").is_err());
        assert!(ProcedureName::parse("dbo.").is_err());
    }

    #[test]
    fn test_procedure_name_display() {
        let name = ProcedureName::new("GetOrders").with_schema("dbo");
        assert_eq!(name.to_string(), "dbo.GetOrders");
        assert_eq!(ProcedureName::new("x").to_string(), "x");
    }

    #[test]
    fn test_procedure_name_display_delimits_parts() {
        let name = ProcedureName::parse("[my.schema].[Get Orders]").unwrap();
        assert_eq!(name.to_string(), "[my.schema].[Get Orders]");
        assert_eq!(ProcedureName::parse(&name.to_string()).unwrap(), name);

        let name = ProcedureName::new("a]b").with_schema("\"quoted\"");
        assert_eq!(name.to_string(), "[\"quoted\"].[a]]b]");
        assert_eq!(ProcedureName::parse(&name.to_string()).unwrap(), name);
    }
}
