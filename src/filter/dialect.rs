//! SQL dialect definitions and formatting rules.
//!
//! A trait-based abstraction over the dialect differences that matter for
//! rendered predicates:
//!
//! - Identifier quoting: `"` (ANSI/PG/DuckDB), `` ` `` (MySQL), `[]` (T-SQL)
//! - Date literals: `DATE 'YYYY-MM-DD'` vs bare `'YYYY-MM-DD'` (T-SQL)

/// Dialect trait - defines how query constructs are rendered.
///
/// Default implementations follow ANSI SQL where possible.
pub trait SqlDialect: std::fmt::Debug {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    /// Quote an identifier (table, column, alias).
    fn quote_identifier(&self, ident: &str) -> String;

    /// Quote a string literal.
    ///
    /// All dialects use single quotes with `''` for escaping.
    fn quote_string(&self, s: &str) -> String {
        format!("'{}'", s.replace('\'', "''"))
    }

    /// Format a date literal.
    ///
    /// - ANSI/PostgreSQL/DuckDB/MySQL: `DATE 'YYYY-MM-DD'`
    /// - T-SQL: `'YYYY-MM-DD'` (no DATE keyword)
    fn format_date_literal(&self, date: &str) -> String {
        format!("DATE '{}'", date)
    }
}

/// Reference ANSI implementation, kept for testing and documentation.
/// Not part of the [`Dialect`] enum because real databases rarely speak
/// pure ANSI SQL.
#[derive(Debug, Clone, Copy)]
pub struct Ansi;

impl SqlDialect for Ansi {
    fn name(&self) -> &'static str {
        "ansi"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DuckDb;

impl SqlDialect for DuckDb {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl SqlDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TSql;

impl SqlDialect for TSql {
    fn name(&self) -> &'static str {
        "tsql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("[{}]", ident.replace(']', "]]"))
    }

    fn format_date_literal(&self, date: &str) -> String {
        format!("'{}'", date)
    }
}

/// Supported dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    DuckDb,
    Postgres,
    MySql,
    TSql,
}

impl Dialect {
    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::DuckDb => &DuckDb,
            Dialect::Postgres => &Postgres,
            Dialect::MySql => &MySql,
            Dialect::TSql => &TSql,
        }
    }

    /// Parse a dialect name, as used in settings files.
    pub fn from_name(name: &str) -> Option<Dialect> {
        match name.trim().to_lowercase().as_str() {
            "duckdb" => Some(Dialect::DuckDb),
            "postgres" | "postgresql" => Some(Dialect::Postgres),
            "mysql" => Some(Dialect::MySql),
            "tsql" | "mssql" | "sqlserver" => Some(Dialect::TSql),
            _ => None,
        }
    }
}

// Delegate so a Dialect value can be used wherever the trait is expected.
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        self.dialect().quote_string(s)
    }

    fn format_date_literal(&self, date: &str) -> String {
        self.dialect().format_date_literal(date)
    }
}
