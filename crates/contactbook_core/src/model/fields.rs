//! Validated contact field value types.
//!
//! # Responsibility
//! - Validate and normalize raw name, phone and birthday input.
//! - Provide the display transforms consumed by presentation layers.
//!
//! # Invariants
//! - `Name` is never empty after trimming.
//! - `Phone` is exactly 10 ASCII digits.
//! - `Birthday` always holds a valid calendar date.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Required phone length, in digits.
pub const PHONE_DIGITS: usize = 10;

const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

// Order matters: an input valid as both day-first and month-first resolves
// as day-first.
const BIRTHDAY_INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%m-%d-%Y"];

static DATE_DELIMITER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[ \-/.\\,\t\n()\[\]{}]+").expect("valid date delimiter regex")
});
// Year must be exactly four digits, leading or trailing; chrono's `%Y`
// alone accepts shorter and signed years.
static DATE_SHAPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}|[0-9]{1,2}-[0-9]{1,2}-[0-9]{4})$")
        .expect("valid date shape regex")
});

pub type FieldResult<T> = Result<T, FieldError>;

/// Validation failure for contact fields and phone edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Name is empty or whitespace-only.
    InvalidName,
    /// Phone is not exactly 10 digits.
    InvalidPhone(String),
    /// Birthday matches none of the supported input formats.
    InvalidBirthday(String),
    /// Edit target phone is absent from the record.
    PhoneNotFound(String),
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "contact name is mandatory and cannot be empty"),
            Self::InvalidPhone(value) => write!(
                f,
                "invalid phone `{value}`: phone number must contain exactly {PHONE_DIGITS} digits"
            ),
            Self::InvalidBirthday(value) => write!(
                f,
                "invalid birthday `{value}`: use YYYY-MM-DD, YYYY.MM.DD, DD.MM.YYYY or MM-DD-YYYY"
            ),
            Self::PhoneNotFound(value) => write!(f, "phone number {value} not found"),
        }
    }
}

impl Error for FieldError {}

/// Contact name; the address book key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Trims `raw` and rejects empty results.
    pub fn parse(raw: &str) -> FieldResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldError::InvalidName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Name {
    type Error = FieldError;

    fn try_from(value: String) -> FieldResult<Self> {
        Self::parse(&value)
    }
}

impl From<Name> for String {
    fn from(value: Name) -> Self {
        value.0
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ten-digit phone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    /// Trims `raw` and requires exactly [`PHONE_DIGITS`] ASCII digits.
    pub fn parse(raw: &str) -> FieldResult<Self> {
        let trimmed = raw.trim();
        let is_valid =
            trimmed.len() == PHONE_DIGITS && trimmed.bytes().all(|byte| byte.is_ascii_digit());
        if !is_valid {
            return Err(FieldError::InvalidPhone(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Phone {
    type Error = FieldError;

    fn try_from(value: String) -> FieldResult<Self> {
        Self::parse(&value)
    }
}

impl From<Phone> for String {
    fn from(value: Phone) -> Self {
        value.0
    }
}

impl Display for Phone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Calendar birthday, stored as a date and serialized in `YYYY-MM-DD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Birthday(NaiveDate);

impl Birthday {
    /// Parses any supported birthday shape into a canonical date.
    ///
    /// Delimiter runs (whitespace, `-`, `/`, `.`, `\`, `,`, brackets) collapse
    /// to a single `-` before trying `YYYY-MM-DD`, `DD-MM-YYYY` and
    /// `MM-DD-YYYY` in that order.
    ///
    /// # Errors
    /// - `FieldError::InvalidBirthday` when the year is not four digits or
    ///   no format yields a valid date.
    pub fn parse(raw: &str) -> FieldResult<Self> {
        let normalized = normalize_date_delimiters(raw);
        if !DATE_SHAPE_RE.is_match(&normalized) {
            return Err(FieldError::InvalidBirthday(raw.trim().to_string()));
        }
        BIRTHDAY_INPUT_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(&normalized, format).ok())
            .map(Self)
            .ok_or_else(|| FieldError::InvalidBirthday(raw.trim().to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Canonical `YYYY-MM-DD` form.
    pub fn canonical(&self) -> String {
        self.0.format(CANONICAL_DATE_FORMAT).to_string()
    }

    /// `DD.MM.YYYY` form for user-facing output.
    pub fn display_format(&self) -> String {
        self.0.format(DISPLAY_DATE_FORMAT).to_string()
    }
}

impl TryFrom<String> for Birthday {
    type Error = FieldError;

    fn try_from(value: String) -> FieldResult<Self> {
        Self::parse(&value)
    }
}

impl From<Birthday> for String {
    fn from(value: Birthday) -> Self {
        value.canonical()
    }
}

impl Display for Birthday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical())
    }
}

fn normalize_date_delimiters(raw: &str) -> String {
    DATE_DELIMITER_RE
        .replace_all(raw.trim(), "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{normalize_date_delimiters, Birthday, FieldError, Name, Phone};

    #[test]
    fn name_is_trimmed_and_rejects_blank() {
        assert_eq!(Name::parse("  John ").unwrap().as_str(), "John");
        assert_eq!(Name::parse(" \t ").unwrap_err(), FieldError::InvalidName);
    }

    #[test]
    fn phone_requires_exactly_ten_digits() {
        assert_eq!(Phone::parse(" 1234567890 ").unwrap().as_str(), "1234567890");
        for bad in ["123", "12345678901", "12345abcde", "123456789 0", "１２３４５６７８９０"] {
            assert!(
                matches!(Phone::parse(bad), Err(FieldError::InvalidPhone(_))),
                "`{bad}` should be rejected"
            );
        }
    }

    #[test]
    fn delimiter_runs_collapse_to_single_dash() {
        assert_eq!(normalize_date_delimiters(" (1990. /06]\t15) "), "1990-06-15");
        assert_eq!(normalize_date_delimiters("--15,06,1990--"), "15-06-1990");
    }

    #[test]
    fn birthday_accepts_all_supported_shapes() {
        for raw in [
            "1990-06-15",
            "1990.06.15",
            "1990/06/15",
            "15.06.1990",
            "15-06-1990",
            "06-15-1990",
            "[1990 06 15]",
        ] {
            assert_eq!(
                Birthday::parse(raw).unwrap().canonical(),
                "1990-06-15",
                "`{raw}` should normalize"
            );
        }
    }

    #[test]
    fn ambiguous_birthday_resolves_day_first() {
        assert_eq!(Birthday::parse("03.04.1990").unwrap().canonical(), "1990-04-03");
    }

    #[test]
    fn birthday_rejects_garbage_and_impossible_dates() {
        for bad in ["invalid-date", "", "1990-02-30", "31-31-1990", "1990-13-01"] {
            assert!(
                matches!(Birthday::parse(bad), Err(FieldError::InvalidBirthday(_))),
                "`{bad}` should be rejected"
            );
        }
    }

    #[test]
    fn birthday_rejects_years_not_four_digits_wide() {
        for bad in [
            "15.06.90",
            "06-15-90",
            "90-06-15",
            "1-2-3",
            "+1990-06-15",
            "15.06.+1990",
            "19900-06-15",
            "15-06-19900",
        ] {
            assert!(
                matches!(Birthday::parse(bad), Err(FieldError::InvalidBirthday(_))),
                "`{bad}` should be rejected"
            );
        }
    }

    #[test]
    fn birthday_display_format_is_day_first_with_dots() {
        let birthday = Birthday::parse("1990-06-15").unwrap();
        assert_eq!(birthday.display_format(), "15.06.1990");
        assert_eq!(birthday.to_string(), "1990-06-15");
    }
}
