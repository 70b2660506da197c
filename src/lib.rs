mod clock;
mod consts;
mod prelude;
mod state;
mod types;
mod validator;

pub use clock::{Clock, FixedClock, SystemClock};
pub use consts::*;
pub use state::{ExpiryEvent, ExpiryInput, ExpiryInputState};
pub use types::{CalendarMonth, InputSlot, Month, Slot, Year};
pub use validator::{ErrorKind, ExpiryValidator, ValidationError, ValidationResult, check_slot};

use crate::prelude::*;
use std::str::FromStr;

/// A completed card expiry, `MM/YY`.
/// Ordered chronologically within one century (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}/{}", month, year)]
pub struct ExpiryDate {
    year:  Year,
    month: Month,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid expiry format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 0-{})", "_0", MAX_TWO_DIGIT_YEAR)]
    InvalidYear(u8),
    #[display(fmt = "Invalid month: {} (must be {}-{})", "_0", MIN_MONTH, MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid slot index: {} (must be below {})", "_0", SLOT_COUNT)]
    InvalidSlot(usize),
    #[display(fmt = "Empty expiry string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl ExpiryDate {
    /// Creates an expiry from already validated parts
    pub const fn new(month: Month, year: Year) -> Self {
        Self { year, month }
    }

    /// Creates an expiry from raw numbers
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` or `ParseError::InvalidYear` when out of range.
    pub fn from_parts(month: u8, year: u8) -> Result<Self, ParseError> {
        Ok(Self::new(Month::new(month)?, Year::new(year)?))
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    /// The calendar month this expiry denotes when `YY` is read inside `century`
    pub fn to_calendar_month(&self, century: u16) -> CalendarMonth {
        CalendarMonth::new(self.year.in_century(century), self.month)
    }

    /// Helper to parse one `MM`/`YY` field; exactly two ASCII digits
    fn parse_field(s: &str) -> Result<u8, ParseError> {
        if s.len() != SLOT_WIDTH || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl FromStr for ExpiryDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(EXPIRY_SEPARATOR).map(str::trim).collect();
        match parts.as_slice() {
            [month, year] => Self::from_parts(Self::parse_field(month)?, Self::parse_field(year)?),
            [_] => Err(ParseError::InvalidFormat(format!(
                "No {EXPIRY_SEPARATOR} separator: {trimmed}"
            ))),
            _ => Err(ParseError::InvalidFormat(format!(
                "Too many {EXPIRY_SEPARATOR} separators: expected 1, found {}",
                parts.len() - 1
            ))),
        }
    }
}

impl TryFrom<(u8, u8)> for ExpiryDate {
    type Error = ParseError;

    fn try_from((month, year): (u8, u8)) -> Result<Self, Self::Error> {
        Self::from_parts(month, year)
    }
}

impl serde::Serialize for ExpiryDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ExpiryDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
