use crate::ParseError;
use crate::consts::{DEFAULT_CENTURY, MAX_MONTH, MAX_TWO_DIGIT_YEAR, SLOT_COUNT, SLOT_WIDTH};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// A month value guaranteed to be in the range `MIN_MONTH..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// January
    pub const MIN: Self = Self(NonZeroU8::MIN);

    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0.get())
    }
}

/// A two-digit card year (`00..=99`), interpreted relative to a century.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Year(u8);

impl Year {
    /// Creates a new two-digit Year
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is > `MAX_TWO_DIGIT_YEAR`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        if value > MAX_TWO_DIGIT_YEAR {
            return Err(ParseError::InvalidYear(value));
        }
        Ok(Self(value))
    }

    /// Returns the two-digit value
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Full calendar year inside `century`, e.g. `24` in `2000` is `2024`
    #[inline]
    pub fn in_century(self, century: u16) -> u16 {
        century.saturating_add(u16::from(self.0))
    }

    /// Full calendar year using `DEFAULT_CENTURY`
    #[inline]
    pub fn full(self) -> u16 {
        self.in_century(DEFAULT_CENTURY)
    }
}

impl TryFrom<u8> for Year {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u8 {
    fn from(year: Year) -> Self {
        year.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// A full calendar month, ordered chronologically (year first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year:  u16,
    pub month: Month,
}

impl CalendarMonth {
    pub const fn new(year: u16, month: Month) -> Self {
        Self { year, month }
    }

    /// Builds a calendar month from raw numbers
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if `month` is outside 1..=12.
    pub fn from_parts(year: u16, month: u8) -> Result<Self, ParseError> {
        Ok(Self::new(year, Month::new(month)?))
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{}", self.year, self.month)
    }
}

/// Position of an input slot in the expiry pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Month = 0,
    Year = 1,
}

impl Slot {
    pub const ALL: [Self; SLOT_COUNT] = [Self::Month, Self::Year];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The slot paired with this one
    pub const fn other(self) -> Self {
        match self {
            Self::Month => Self::Year,
            Self::Year => Self::Month,
        }
    }
}

impl TryFrom<usize> for Slot {
    type Error = ParseError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Self::Month),
            1 => Ok(Self::Year),
            _ => Err(ParseError::InvalidSlot(index)),
        }
    }
}

impl From<Slot> for usize {
    fn from(slot: Slot) -> Self {
        slot.index()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month => f.write_str("month"),
            Self::Year => f.write_str("year"),
        }
    }
}

/// Raw text typed into one slot and the last verdict for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputSlot {
    pub value:    String,
    pub is_valid: bool,
}

impl InputSlot {
    pub fn new(value: impl Into<String>, is_valid: bool) -> Self {
        Self {
            value: value.into(),
            is_valid,
        }
    }

    /// True once the slot holds a full `MM`/`YY` worth of characters
    pub fn is_complete(&self) -> bool {
        self.value.chars().count() == SLOT_WIDTH
    }
}

impl Default for InputSlot {
    fn default() -> Self {
        Self::new(String::new(), true)
    }
}
