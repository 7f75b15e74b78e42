//! The shared predicate representation.
//!
//! One structure, two renderers: `matches` evaluates a predicate against an
//! in-memory row, `to_tokens` renders the identical structure as query
//! text. Both paths read the same AST, so they cannot drift apart.
//!
//! Every variant must be handled in both renderers - the compiler enforces
//! this.

use chrono::NaiveDate;

use super::dialect::Dialect;
use super::token::{Token, TokenStream};
use crate::dataset::{Dataset, Value};

/// A filter predicate over a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// The identity filter: matches every row.
    All,

    /// Case-insensitive equality on a string-typed column.
    TextEq { column: String, value: String },

    /// Equality on a numeric column, by parsed value.
    NumberEq { column: String, value: f64 },

    /// Inclusive calendar range on the dataset's date attribute.
    DateBetween {
        column: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// Exact equality on the dataset's season attribute. Season labels are
    /// opaque; no case folding.
    SeasonEq { column: String, value: String },

    /// Conjunction.
    And(Vec<Predicate>),

    /// Disjunction.
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Conjunction constructor. Identity parts are removed; an empty group
    /// collapses to the identity filter, a single part stands alone.
    pub fn and(mut parts: Vec<Predicate>) -> Predicate {
        parts.retain(|part| *part != Predicate::All);
        match parts.len() {
            0 => Predicate::All,
            1 => parts.remove(0),
            _ => Predicate::And(parts),
        }
    }

    /// Disjunction constructor, collapsing like [`Predicate::and`].
    pub fn or(mut parts: Vec<Predicate>) -> Predicate {
        parts.retain(|part| *part != Predicate::All);
        match parts.len() {
            0 => Predicate::All,
            1 => parts.remove(0),
            _ => Predicate::Or(parts),
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Predicate::All
    }

    /// Evaluate against one row of `dataset`. A cell that is missing, null,
    /// or of an incomparable shape never matches.
    pub fn matches(&self, dataset: &Dataset, row: &[Value]) -> bool {
        match self {
            Predicate::All => true,

            Predicate::TextEq { column, value } => match cell(dataset, row, column) {
                Some(Value::Str(s)) => s.trim().eq_ignore_ascii_case(value.trim()),
                Some(Value::Date(d)) => d.to_string() == value.trim(),
                _ => false,
            },

            Predicate::NumberEq { column, value } => cell(dataset, row, column)
                .and_then(Value::as_number)
                .is_some_and(|n| (n - value).abs() < 1e-9),

            Predicate::DateBetween { column, start, end } => cell(dataset, row, column)
                .and_then(Value::as_date)
                .is_some_and(|d| *start <= d && d <= *end),

            Predicate::SeasonEq { column, value } => cell(dataset, row, column)
                .and_then(Value::as_text)
                .is_some_and(|s| s.trim() == value),

            Predicate::And(parts) => parts.iter().all(|part| part.matches(dataset, row)),

            // Empty groups collapse to the identity filter.
            Predicate::Or(parts) => {
                parts.is_empty() || parts.iter().any(|part| part.matches(dataset, row))
            }
        }
    }

    /// Render the predicate as a token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        match self {
            Predicate::All => {
                ts.push(Token::LitInt(1))
                    .space()
                    .push(Token::Eq)
                    .space()
                    .push(Token::LitInt(1));
            }

            Predicate::TextEq { column, value } => {
                ts.push(Token::FunctionName("lower".into()))
                    .lparen()
                    .push(Token::Ident(column.clone()))
                    .rparen()
                    .space()
                    .push(Token::Eq)
                    .space()
                    .push(Token::LitString(value.trim().to_lowercase()));
            }

            Predicate::NumberEq { column, value } => {
                ts.push(Token::Ident(column.clone()))
                    .space()
                    .push(Token::Eq)
                    .space()
                    .push(Token::LitFloat(*value));
            }

            Predicate::DateBetween { column, start, end } => {
                ts.push(Token::Ident(column.clone()))
                    .space()
                    .push(Token::Between)
                    .space()
                    .push(Token::LitDate(*start))
                    .space()
                    .push(Token::And)
                    .space()
                    .push(Token::LitDate(*end));
            }

            Predicate::SeasonEq { column, value } => {
                ts.push(Token::Ident(column.clone()))
                    .space()
                    .push(Token::Eq)
                    .space()
                    .push(Token::LitString(value.clone()));
            }

            Predicate::And(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        ts.space().push(Token::And).space();
                    }
                    ts.append(&grouped(part));
                }
            }

            Predicate::Or(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        ts.space().push(Token::Or).space();
                    }
                    ts.append(&grouped(part));
                }
            }
        }
        ts
    }

    /// Render as query text for the given dialect.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        self.to_tokens().serialize(dialect)
    }
}

/// Parenthesize nested composites so precedence survives rendering.
fn grouped(part: &Predicate) -> TokenStream {
    let inner = part.to_tokens();
    match part {
        Predicate::And(_) | Predicate::Or(_) => {
            let mut ts = TokenStream::new();
            ts.lparen().append(&inner).rparen();
            ts
        }
        _ => inner,
    }
}

fn cell<'a>(dataset: &Dataset, row: &'a [Value], column: &str) -> Option<&'a Value> {
    dataset.column_index(column).and_then(|index| row.get(index))
}
