//! Connection configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::Error;

/// Default time allowed to open a connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for opening an OLE DB connection.
///
/// This struct is marked `#[non_exhaustive]` to allow adding new fields
/// in future releases without breaking semver. Use [`ConnectionConfig::default()`]
/// or [`ConnectionConfig::from_connection_string()`] to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ConnectionConfig {
    /// Provider program identifier (`Microsoft.ACE.OLEDB.12.0`, `MSOLEDBSQL`, ...).
    pub provider: Option<String>,

    /// Data source: a server name or a database file path.
    pub data_source: Option<String>,

    /// Initial catalog (database).
    pub initial_catalog: Option<String>,

    /// User name.
    pub user_id: Option<String>,

    /// Password.
    pub password: Option<String>,

    /// Whether to authenticate with the current Windows identity.
    pub integrated_security: bool,

    /// Whether the password survives in [`to_connection_string`](Self::to_connection_string).
    pub persist_security_info: bool,

    /// Time allowed to open the connection.
    pub connect_timeout: Duration,

    /// `OLE DB Services` flags (pooling, enlistment, ...).
    pub ole_db_services: Option<i32>,

    /// Provider-specific keywords not interpreted here, keyed in lowercase.
    pub extra: BTreeMap<String, String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            provider: None,
            data_source: None,
            initial_catalog: None,
            user_id: None,
            password: None,
            integrated_security: false,
            persist_security_info: false,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            ole_db_services: None,
            extra: BTreeMap::new(),
        }
    }
}

impl ConnectionConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the provider.
    #[must_use]
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Set the data source.
    #[must_use]
    pub fn data_source(mut self, data_source: impl Into<String>) -> Self {
        self.data_source = Some(data_source.into());
        self
    }

    /// Set the initial catalog.
    #[must_use]
    pub fn initial_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.initial_catalog = Some(catalog.into());
        self
    }

    /// Set the connect timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Parse an OLE DB connection string into configuration.
    ///
    /// Keywords are case-insensitive. Values may be wrapped in single or
    /// double quotes to include `;`, with the quote doubled to escape it:
    /// ```text
    /// Provider=Microsoft.ACE.OLEDB.12.0;Data Source="C:\data\a;b.accdb";
    /// ```
    pub fn from_connection_string(conn_str: &str) -> Result<Self, Error> {
        let mut config = Self::default();

        for (key, value) in split_pairs(conn_str)? {
            match key.as_str() {
                "provider" => config.provider = Some(value),
                "data source" | "server" | "address" | "addr" => {
                    config.data_source = Some(value);
                }
                "initial catalog" | "database" => config.initial_catalog = Some(value),
                "user id" | "uid" | "user" => config.user_id = Some(value),
                "password" | "pwd" => config.password = Some(value),
                "integrated security" | "trusted_connection" => {
                    config.integrated_security = value.eq_ignore_ascii_case("sspi")
                        || parse_bool(&key, &value)?;
                }
                "persist security info" => {
                    config.persist_security_info = parse_bool(&key, &value)?;
                }
                "connect timeout" | "connection timeout" => {
                    let secs: u64 = value
                        .parse()
                        .map_err(|_| Error::Config(format!("invalid timeout: {value}")))?;
                    config.connect_timeout = Duration::from_secs(secs);
                }
                "ole db services" => {
                    config.ole_db_services = Some(value.parse().map_err(|_| {
                        Error::Config(format!("invalid OLE DB Services value: {value}"))
                    })?);
                }
                "file name" => {
                    return Err(Error::Config(
                        "File Name (UDL files) is not supported".into(),
                    ));
                }
                _ => {
                    tracing::debug!(keyword = %key, "keeping provider-specific keyword");
                    config.extra.insert(key, value);
                }
            }
        }

        Ok(config)
    }

    /// Render the configuration as a connection string.
    ///
    /// The password is left out unless `persist_security_info` is set.
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        let mut push =
            |key: &str, value: &str| parts.push(format!("{key}={}", quote_value(value)));

        if let Some(provider) = &self.provider {
            push("Provider", provider);
        }
        if let Some(data_source) = &self.data_source {
            push("Data Source", data_source);
        }
        if let Some(catalog) = &self.initial_catalog {
            push("Initial Catalog", catalog);
        }
        if let Some(user) = &self.user_id {
            push("User ID", user);
        }
        if self.persist_security_info {
            if let Some(password) = &self.password {
                push("Password", password);
            }
            push("Persist Security Info", "True");
        }
        if self.integrated_security {
            push("Integrated Security", "SSPI");
        }
        if self.connect_timeout != DEFAULT_CONNECT_TIMEOUT {
            push("Connect Timeout", &self.connect_timeout.as_secs().to_string());
        }
        if let Some(services) = self.ole_db_services {
            push("OLE DB Services", &services.to_string());
        }
        for (key, value) in &self.extra {
            push(key, value);
        }

        parts.join(";")
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, Error> {
    if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes") || value == "1" {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") || value.eq_ignore_ascii_case("no") || value == "0"
    {
        Ok(false)
    } else {
        Err(Error::Config(format!("invalid boolean for {key}: {value}")))
    }
}

/// Quote a value when a bare rendering would not parse back.
///
/// Prefers the quote character the value does not contain and doubles the
/// chosen quote otherwise.
fn quote_value(value: &str) -> String {
    let needs_quotes = value.contains(';')
        || value.starts_with(['"', '\''])
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace);
    if !needs_quotes {
        return value.to_string();
    }
    let quote = if value.contains('"') && !value.contains('\'') {
        '\''
    } else {
        '"'
    };
    let doubled: String = [quote, quote].iter().collect();
    format!("{quote}{}{quote}", value.replace(quote, &doubled))
}

/// Split `key=value` pairs on `;`, honouring quoted values.
///
/// Keys are trimmed and lowercased, unquoted values are trimmed.
fn split_pairs(conn_str: &str) -> Result<Vec<(String, String)>, Error> {
    let mut pairs = Vec::new();
    let mut rest = conn_str;

    loop {
        rest = rest.trim_start_matches(|c: char| c == ';' || c.is_whitespace());
        if rest.is_empty() {
            return Ok(pairs);
        }

        let (key, after_key) = rest
            .split_once('=')
            .ok_or_else(|| Error::Config(format!("invalid key-value: {}", rest.trim())))?;
        if key.contains(';') {
            return Err(Error::Config(format!("invalid key-value: {}", key.trim())));
        }
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            return Err(Error::Config("empty keyword".into()));
        }

        let after_key = after_key.trim_start();
        let (value, remainder) = match after_key.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let (value, after) = read_quoted(&after_key[1..], quote).ok_or_else(|| {
                    Error::Config(format!("unterminated quoted value for {key}"))
                })?;
                let after = after.trim_start();
                if !(after.is_empty() || after.starts_with(';')) {
                    return Err(Error::Config(format!(
                        "unexpected text after quoted value for {key}"
                    )));
                }
                (value, after)
            }
            _ => match after_key.split_once(';') {
                Some((value, remainder)) => (value.trim().to_string(), remainder),
                None => (after_key.trim().to_string(), ""),
            },
        };

        pairs.push((key, value));
        rest = remainder;
    }
}

/// Read a quoted value up to its closing quote, unescaping doubled quotes.
///
/// Returns the value and the text after the closing quote.
fn read_quoted(text: &str, quote: char) -> Option<(String, &str)> {
    let mut value = String::new();
    let mut chars = text.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        if c != quote {
            value.push(c);
            continue;
        }
        if let Some(&(_, next)) = chars.peek() {
            if next == quote {
                value.push(quote);
                chars.next();
                continue;
            }
        }
        return Some((value, &text[index + c.len_utf8()..]));
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_connection_string() {
        let config = ConnectionConfig::from_connection_string(
            "Provider=Microsoft.ACE.OLEDB.12.0;Data Source=C:\\data\\north.accdb;",
        )
        .unwrap();
        assert_eq!(config.provider.as_deref(), Some("Microsoft.ACE.OLEDB.12.0"));
        assert_eq!(config.data_source.as_deref(), Some("C:\\data\\north.accdb"));
    }

    #[test]
    fn test_quoted_value_with_semicolon() {
        let config =
            ConnectionConfig::from_connection_string("Data Source=\"a;b\";Provider=X").unwrap();
        assert_eq!(config.data_source.as_deref(), Some("a;b"));
        assert_eq!(config.provider.as_deref(), Some("X"));
    }

    #[test]
    fn test_doubled_quote_in_value() {
        let config = ConnectionConfig::from_connection_string("Password='it''s'").unwrap();
        assert_eq!(config.password.as_deref(), Some("it's"));
    }

    #[test]
    fn test_text_after_quoted_value() {
        assert!(ConnectionConfig::from_connection_string("Password='x'y").is_err());
    }

    #[test]
    fn test_unterminated_quote() {
        assert!(ConnectionConfig::from_connection_string("Password='x").is_err());
    }

    #[test]
    fn test_password_not_persisted() {
        let config =
            ConnectionConfig::from_connection_string("User ID=admin;Password=secret").unwrap();
        let rendered = config.to_connection_string();
        assert!(rendered.contains("User ID=admin"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_render_quotes_semicolons() {
        let config = ConnectionConfig::new().data_source("a;b");
        assert_eq!(config.to_connection_string(), "Data Source=\"a;b\"");
    }

    #[test]
    fn test_render_quotes_leading_quote_character() {
        let config = ConnectionConfig::new().data_source("'weird");
        assert_eq!(config.to_connection_string(), "Data Source=\"'weird\"");

        let config = ConnectionConfig::new().data_source("\"weird");
        assert_eq!(config.to_connection_string(), "Data Source='\"weird'");

        let config = ConnectionConfig::new().data_source("\"it's\"");
        assert_eq!(
            config.to_connection_string(),
            "Data Source=\"\"\"it's\"\"\""
        );
    }
}
