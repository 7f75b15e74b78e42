//! Recognition tables for timeframe expressions.
//!
//! All matching happens against a normalized (trimmed, lowercased)
//! expression, so the patterns only deal with lowercase input.

use once_cell::sync::Lazy;
use regex::Regex;

/// "last 3 months", "past 2 years".
pub(crate) static RELATIVE_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:last|past)\s+(\d+)\s+(month|year)s?$").unwrap());

/// "may 2025" - the name is validated against the month table separately.
pub(crate) static MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z]+)\.?\s+(\d{4})$").unwrap());

/// "2025" or "year 2025".
pub(crate) static YEAR_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:year\s+)?(\d{4})$").unwrap());

/// Trailing 4-digit year in a season expression ("season 2025",
/// "racing season year 2025").
pub(crate) static SEASON_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:year\s+)?(\d{4})\s*$").unwrap());

/// "2025-05".
pub(crate) static ISO_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})$").unwrap());

/// "2025-05-17".
pub(crate) static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap());

/// "week of 2025-05-12".
pub(crate) static WEEK_OF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^week\s+of\s+(\d{4}-\d{2}-\d{2})$").unwrap());

/// "2nd week of this month".
pub(crate) static NTH_WEEK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*(?:st|nd|rd|th)?\s+week\s+of\s+this\s+month$").unwrap());

/// The 12 canonical month keys.
const MONTHS: &[(&str, u32)] = &[
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
];

/// Look up a month by full name or 3-letter abbreviation.
pub(crate) fn month_number(token: &str) -> Option<u32> {
    MONTHS
        .iter()
        .find(|(name, _)| *name == token || name[..3] == *token)
        .map(|(_, number)| *number)
}

/// Fixed phrases, in the order the loose substring fallback scans them.
///
/// Longer phrases come before their substrings ("as of yesterday" before
/// "yesterday") so the fallback picks the more specific reading.
pub(crate) const FIXED_PHRASES: &[&str] = &[
    "as of yesterday",
    "till now",
    "till date",
    "this week",
    "last week",
    "this month",
    "last month",
    "this year",
    "last year",
    "this quarter",
    "last quarter",
    "today",
    "yesterday",
];
