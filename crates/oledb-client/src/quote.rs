//! Identifier quoting.
//!
//! A [`QuoteSpec`] is a prefix/suffix delimiter pair. Quoting wraps an
//! identifier in the pair and doubles every occurrence of the suffix inside
//! it; unquoting strips the pair and collapses doubled suffixes. For any
//! identifier `I` and any spec with a non-empty prefix,
//! `spec.unquote(&spec.quote(I)) == I`.
//!
//! ```rust
//! use oledb_client::QuoteSpec;
//!
//! let spec = QuoteSpec::new("'", "'");
//! assert_eq!(spec.quote("Te'st"), "'Te''st'");
//! assert_eq!(spec.unquote("'Te''st'"), "Te'st");
//! ```

use std::fmt;

/// Delimiter pair used to quote identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QuoteSpec {
    prefix: String,
    suffix: String,
}

impl QuoteSpec {
    /// Create a spec from an explicit prefix and suffix.
    #[must_use]
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// The empty spec: nothing configured.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Backtick delimiters (`` `name` ``), the Jet/ACE provider default.
    #[must_use]
    pub fn backtick() -> Self {
        Self::new("`", "`")
    }

    /// Square brackets (`[name]`), as used by SQL Server providers.
    #[must_use]
    pub fn brackets() -> Self {
        Self::new("[", "]")
    }

    /// ANSI double quotes (`"name"`).
    #[must_use]
    pub fn double_quote() -> Self {
        Self::new("\"", "\"")
    }

    /// Build a spec from a driver report where the suffix may be missing.
    ///
    /// An absent or empty suffix defaults to the prefix.
    #[must_use]
    pub fn from_literal_info(prefix: impl Into<String>, suffix: Option<String>) -> Self {
        let prefix = prefix.into();
        let suffix = match suffix {
            Some(suffix) if !suffix.is_empty() => suffix,
            _ => prefix.clone(),
        };
        Self { prefix, suffix }
    }

    /// The opening delimiter.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The closing delimiter.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Whether no prefix is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Quote an identifier.
    ///
    /// Every occurrence of the suffix inside `identifier` is doubled before the
    /// result is wrapped. An empty prefix or suffix contributes nothing.
    #[must_use]
    pub fn quote(&self, identifier: &str) -> String {
        let mut quoted =
            String::with_capacity(self.prefix.len() + identifier.len() + self.suffix.len() + 2);
        quoted.push_str(&self.prefix);
        if self.suffix.is_empty() {
            quoted.push_str(identifier);
        } else {
            quoted.push_str(&identifier.replace(&self.suffix, &self.doubled_suffix()));
            quoted.push_str(&self.suffix);
        }
        quoted
    }

    /// Unquote an identifier, returning it unchanged when it is not quoted.
    #[must_use]
    pub fn unquote(&self, quoted: &str) -> String {
        self.strip(quoted)
            .unwrap_or_else(|| quoted.to_string())
    }

    /// Strip the delimiters and collapse doubled suffixes.
    ///
    /// Returns `None` when `quoted` does not both start with the prefix and
    /// end with the suffix, or when a suffix inside it is not doubled. With
    /// an empty spec every input is returned as-is.
    #[must_use]
    pub fn strip(&self, quoted: &str) -> Option<String> {
        if self.prefix.is_empty() && self.suffix.is_empty() {
            return Some(quoted.to_string());
        }
        if quoted.len() < self.prefix.len() + self.suffix.len() {
            return None;
        }
        let inner = quoted.strip_prefix(self.prefix.as_str())?;
        if self.suffix.is_empty() {
            return Some(inner.to_string());
        }
        let mut rest = inner.strip_suffix(self.suffix.as_str())?;

        let mut unescaped = String::with_capacity(rest.len());
        while let Some(index) = rest.find(self.suffix.as_str()) {
            unescaped.push_str(&rest[..index]);
            rest = rest[index + self.suffix.len()..].strip_prefix(self.suffix.as_str())?;
            unescaped.push_str(&self.suffix);
        }
        unescaped.push_str(rest);
        Some(unescaped)
    }

    /// Whether `text` starts with the prefix and ends with the suffix.
    #[must_use]
    pub fn is_quoted(&self, text: &str) -> bool {
        !self.is_empty() && self.strip(text).is_some()
    }

    fn doubled_suffix(&self) -> String {
        self.suffix.repeat(2)
    }
}

impl fmt::Display for QuoteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}name{}", self.prefix, self.suffix)
    }
}
