//! Predicate tokens - the atomic units of generated query text.
//!
//! Tokens are dialect-agnostic representations that serialize to
//! dialect-specific strings. Adding a variant here causes compile errors
//! everywhere it needs handling (exhaustive matching).

use chrono::NaiveDate;

use super::dialect::{Dialect, SqlDialect};

/// Every element that can appear in a rendered predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    Where,
    And,
    Or,
    Between,

    // Operators and punctuation
    Eq,
    Comma,
    LParen,
    RParen,

    // Whitespace
    Space,

    // Dynamic - dialect-specific formatting
    Ident(String),
    FunctionName(String),
    LitString(String),
    LitInt(i64),
    LitFloat(f64),
    LitDate(NaiveDate),
}

impl Token {
    /// Serialize one token for the given dialect.
    pub fn serialize(&self, dialect: Dialect) -> String {
        let dialect = dialect.dialect();
        match self {
            Token::Where => "WHERE".into(),
            Token::And => "AND".into(),
            Token::Or => "OR".into(),
            Token::Between => "BETWEEN".into(),

            Token::Eq => "=".into(),
            Token::Comma => ",".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),

            Token::Space => " ".into(),

            Token::Ident(name) => dialect.quote_identifier(name),
            Token::FunctionName(name) => name.to_uppercase(),
            Token::LitString(s) => dialect.quote_string(s),
            Token::LitInt(n) => n.to_string(),
            Token::LitFloat(f) => {
                if f.is_nan() {
                    panic!("Cannot serialize NaN to SQL")
                }
                if f.is_infinite() {
                    panic!("Cannot serialize Infinity to SQL")
                }
                // ryu for fast, accurate float formatting
                let mut buffer = ryu::Buffer::new();
                buffer.format(*f).to_string()
            }
            Token::LitDate(date) => dialect.format_date_literal(&date.to_string()),
        }
    }
}

/// A stream of tokens that serializes to query text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    pub fn extend(&mut self, tokens: impl IntoIterator<Item = Token>) -> &mut Self {
        self.tokens.extend(tokens);
        self
    }

    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    /// Serialize all tokens to a string.
    pub fn serialize(&self, dialect: Dialect) -> String {
        self.tokens.iter().map(|t| t.serialize(dialect)).collect()
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
}
