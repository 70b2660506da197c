//! Per-keystroke validation of the month/year pair.
//!
//! Failures are ordinary values: every malformed or expired input yields a
//! [`ValidationResult`] carrying a [`ValidationError`], never an `Err`.

use crate::ExpiryDate;
use crate::clock::{Clock, SystemClock};
use crate::consts::{
    DEFAULT_CENTURY, EXPIRED_MESSAGE, INVALID_MONTH_MESSAGE, MAX_MONTH, MIN_MONTH,
    NON_NUMERIC_MESSAGE, SLOT_COUNT, SLOT_WIDTH, TOO_LONG_MESSAGE,
};
use crate::types::{CalendarMonth, InputSlot, Month, Slot, Year};

/// Broad class of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The edited slot's own text is malformed or out of range.
    Format,
    /// Well-formed, but the pair is before the current month.
    Expired,
}

/// Why an edit was rejected. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{}", NON_NUMERIC_MESSAGE)]
    NonNumeric { slot: Slot },

    #[error("{}", TOO_LONG_MESSAGE)]
    TooLong { slot: Slot, len: usize },

    #[error("{}", INVALID_MONTH_MESSAGE)]
    InvalidMonth(String),

    #[error("{}", EXPIRED_MESSAGE)]
    Expired { expiry: ExpiryDate, now: CalendarMonth },
}

impl ValidationError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NonNumeric { .. } | Self::TooLong { .. } | Self::InvalidMonth(_) => ErrorKind::Format,
            Self::Expired { .. } => ErrorKind::Expired,
        }
    }
}

/// Verdict for a single edit. Recomputed on every keystroke, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    error: Option<ValidationError>,
}

impl ValidationResult {
    pub const fn valid() -> Self {
        Self { error: None }
    }

    pub const fn invalid(error: ValidationError) -> Self {
        Self { error: Some(error) }
    }

    pub const fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub const fn is_expired(&self) -> bool {
        matches!(self.error, Some(ValidationError::Expired { .. }))
    }

    /// Empty when valid
    pub fn error_message(&self) -> String {
        self.error.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    pub const fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Converts into a `Result` for callers that prefer `?`
    ///
    /// # Errors
    /// Returns the contained `ValidationError` when the edit was rejected.
    pub fn into_result(self) -> Result<(), ValidationError> {
        self.error.map_or(Ok(()), Err)
    }
}

impl From<Result<(), ValidationError>> for ValidationResult {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self::valid(),
            Err(error) => Self::invalid(error),
        }
    }
}

/// Validates edits to the expiry pair against a [`Clock`].
#[derive(Debug, Clone)]
pub struct ExpiryValidator<C = SystemClock> {
    clock:   C,
    century: u16,
}

impl Default for ExpiryValidator<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> ExpiryValidator<C> {
    pub const fn new(clock: C) -> Self {
        Self {
            clock,
            century: DEFAULT_CENTURY,
        }
    }

    /// Moves the window two-digit years are read in (`2000` reads `24` as 2024)
    #[must_use]
    pub fn with_century(mut self, century: u16) -> Self {
        self.century = century;
        self
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    pub const fn century(&self) -> u16 {
        self.century
    }

    /// Validates `new_value` typed into `changed`.
    ///
    /// The edited slot's text is taken from `new_value`; the other slot's text
    /// from `slots`. Only a year edit that completes a well-formed pair is
    /// checked against the clock.
    pub fn validate(&self, slots: &[InputSlot; SLOT_COUNT], new_value: &str, changed: Slot) -> ValidationResult {
        let result = ValidationResult::from(self.check(slots, new_value, changed));
        tracing::debug!(
            slot = %changed,
            value = new_value,
            valid = result.is_valid(),
            expired = result.is_expired(),
            "validated expiry input"
        );
        result
    }

    /// Whether `expiry` falls strictly before the clock's current month.
    /// Reads the clock on every call.
    pub fn is_expired(&self, expiry: ExpiryDate) -> bool {
        expiry.to_calendar_month(self.century) < self.clock.current_month()
    }

    fn check(&self, slots: &[InputSlot; SLOT_COUNT], new_value: &str, changed: Slot) -> Result<(), ValidationError> {
        check_slot(changed, new_value)?;
        if changed != Slot::Year {
            return Ok(());
        }

        let Some(expiry) = complete_pair(&slots[Slot::Month.index()].value, new_value) else {
            return Ok(());
        };
        let now = self.clock.current_month();
        if expiry.to_calendar_month(self.century) < now {
            return Err(ValidationError::Expired { expiry, now });
        }
        Ok(())
    }
}

/// Format check for one slot's text, independent of the other slot and the clock.
///
/// A single month digit is accepted only while some month `01`-`12` still
/// starts with it, so `0` and `1` pass and `2`-`9` do not.
///
/// # Errors
/// Returns a `ValidationError` of kind `ErrorKind::Format`.
pub fn check_slot(slot: Slot, text: &str) -> Result<(), ValidationError> {
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::NonNumeric { slot });
    }
    if text.len() > SLOT_WIDTH {
        return Err(ValidationError::TooLong { slot, len: text.len() });
    }

    match slot {
        Slot::Year => Ok(()),
        Slot::Month => {
            let accepted = match text.as_bytes() {
                [] => true,
                [first] => could_start_month(first - b'0'),
                [tens, ones] => (MIN_MONTH..=MAX_MONTH).contains(&((tens - b'0') * 10 + (ones - b'0'))),
                _ => false,
            };
            if accepted {
                Ok(())
            } else {
                Err(ValidationError::InvalidMonth(text.to_owned()))
            }
        }
    }
}

fn could_start_month(digit: u8) -> bool {
    (MIN_MONTH..=MAX_MONTH).any(|m| m / 10 == digit)
}

fn is_complete(text: &str) -> bool {
    text.len() == SLOT_WIDTH && text.bytes().all(|b| b.is_ascii_digit())
}

/// The pair as an `ExpiryDate`, once both slots hold two well-formed digits
fn complete_pair(month: &str, year: &str) -> Option<ExpiryDate> {
    if !(is_complete(month) && is_complete(year)) {
        return None;
    }
    let month = Month::new(month.parse().ok()?).ok()?;
    let year = Year::new(year.parse().ok()?).ok()?;
    Some(ExpiryDate::new(month, year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixed_clock, slots};
    use proptest::prelude::*;

    fn validator() -> ExpiryValidator<crate::FixedClock> {
        ExpiryValidator::new(fixed_clock(2024, 6))
    }

    #[test]
    fn test_check_slot_cases() {
        struct TestCase {
            slot:        Slot,
            text:        &'static str,
            kind:        Option<ErrorKind>,
            description: &'static str,
        }

        let cases = [
            TestCase {
                slot:        Slot::Month,
                text:        "",
                kind:        None,
                description: "empty month is provisional",
            },
            TestCase {
                slot:        Slot::Month,
                text:        "0",
                kind:        None,
                description: "0 can still become 01-09",
            },
            TestCase {
                slot:        Slot::Month,
                text:        "1",
                kind:        None,
                description: "1 can still become 10-12",
            },
            TestCase {
                slot:        Slot::Month,
                text:        "2",
                kind:        Some(ErrorKind::Format),
                description: "no month starts with 2",
            },
            TestCase {
                slot:        Slot::Month,
                text:        "9",
                kind:        Some(ErrorKind::Format),
                description: "no month starts with 9",
            },
            TestCase {
                slot:        Slot::Month,
                text:        "00",
                kind:        Some(ErrorKind::Format),
                description: "month zero",
            },
            TestCase {
                slot:        Slot::Month,
                text:        "09",
                kind:        None,
                description: "zero-padded month",
            },
            TestCase {
                slot:        Slot::Month,
                text:        "12",
                kind:        None,
                description: "december",
            },
            TestCase {
                slot:        Slot::Month,
                text:        "13",
                kind:        Some(ErrorKind::Format),
                description: "past december",
            },
            TestCase {
                slot:        Slot::Month,
                text:        "1a",
                kind:        Some(ErrorKind::Format),
                description: "letter in month",
            },
            TestCase {
                slot:        Slot::Month,
                text:        "+1",
                kind:        Some(ErrorKind::Format),
                description: "sign is not a digit",
            },
            TestCase {
                slot:        Slot::Month,
                text:        "123",
                kind:        Some(ErrorKind::Format),
                description: "too long",
            },
            TestCase {
                slot:        Slot::Year,
                text:        "2",
                kind:        None,
                description: "partial year",
            },
            TestCase {
                slot:        Slot::Year,
                text:        "00",
                kind:        None,
                description: "year 00 is well-formed",
            },
            TestCase {
                slot:        Slot::Year,
                text:        "y2",
                kind:        Some(ErrorKind::Format),
                description: "letter in year",
            },
            TestCase {
                slot:        Slot::Year,
                text:        "２４",
                kind:        Some(ErrorKind::Format),
                description: "fullwidth digits are not ASCII",
            },
        ];

        for case in &cases {
            let kind = check_slot(case.slot, case.text).err().map(|e| e.kind());
            assert_eq!(kind, case.kind, "{}: {:?}", case.description, case.text);
        }
    }

    #[test]
    fn test_month_13_is_invalid_regardless_of_year() {
        let validator = validator();
        for year in ["", "2", "20", "99"] {
            let result = validator.validate(&slots("1", year), "13", Slot::Month);
            assert!(!result.is_valid(), "year {year:?}");
            assert!(!result.is_expired());
            assert_eq!(result.error_message(), INVALID_MONTH_MESSAGE);
            assert_eq!(result.error().map(ValidationError::kind), Some(ErrorKind::Format));
        }
    }

    #[test]
    fn test_typing_one_then_three_ends_invalid() {
        let validator = validator();

        let first = validator.validate(&slots("", ""), "1", Slot::Month);
        assert!(first.is_valid());

        let second = validator.validate(&slots("1", ""), "13", Slot::Month);
        assert!(!second.is_valid());
        assert_eq!(second.error(), Some(&ValidationError::InvalidMonth("13".to_owned())));
    }

    #[test]
    fn test_non_numeric_message() {
        let result = validator().validate(&slots("", ""), "ab", Slot::Year);
        assert_eq!(result.error(), Some(&ValidationError::NonNumeric { slot: Slot::Year }));
        assert_eq!(result.error_message(), NON_NUMERIC_MESSAGE);
    }

    #[test]
    fn test_expired_pair() {
        let result = validator().validate(&slots("05", "2"), "20", Slot::Year);
        assert!(!result.is_valid());
        assert!(result.is_expired());
        assert_eq!(result.error_message(), EXPIRED_MESSAGE);
        assert_eq!(result.error().map(ValidationError::kind), Some(ErrorKind::Expired));
    }

    #[test]
    fn test_current_month_is_not_expired() {
        let result = validator().validate(&slots("06", ""), "24", Slot::Year);
        assert!(result.is_valid());

        let result = validator().validate(&slots("05", ""), "24", Slot::Year);
        assert!(result.is_expired());
    }

    #[test]
    fn test_month_edit_never_checks_expiry() {
        let result = validator().validate(&slots("0", "20"), "05", Slot::Month);
        assert!(result.is_valid());
        assert!(!result.is_expired());
    }

    #[test]
    fn test_incomplete_pair_is_not_expired() {
        let validator = validator();
        assert!(validator.validate(&slots("0", ""), "20", Slot::Year).is_valid());
        assert!(validator.validate(&slots("05", ""), "2", Slot::Year).is_valid());
        // a malformed month cannot form a pair either
        assert!(validator.validate(&slots("13", ""), "20", Slot::Year).is_valid());
    }

    #[test]
    fn test_new_value_wins_over_stale_slot_text() {
        // slots still hold the previous year text
        let result = validator().validate(&slots("05", "99"), "20", Slot::Year);
        assert!(result.is_expired());
    }

    #[test]
    fn test_century_window() {
        let validator = validator().with_century(1900);
        assert_eq!(validator.century(), 1900);
        let result = validator.validate(&slots("12", ""), "99", Slot::Year);
        assert!(result.is_expired(), "12/99 read as 1999 is in the past");
    }

    #[test]
    fn test_clock_read_on_every_call() {
        use std::cell::Cell;

        struct SteppingClock(Cell<u16>);

        impl Clock for SteppingClock {
            fn current_month(&self) -> CalendarMonth {
                let year = self.0.get();
                self.0.set(year + 10);
                CalendarMonth::from_parts(year, 1).unwrap()
            }
        }

        let validator = ExpiryValidator::new(SteppingClock(Cell::new(2020)));
        assert!(validator.validate(&slots("06", ""), "25", Slot::Year).is_valid());
        assert!(validator.validate(&slots("06", ""), "25", Slot::Year).is_expired());
    }

    #[test]
    fn test_revalidation_is_idempotent() {
        let validator = validator();
        let inputs = [
            (slots("05", "2"), "20", Slot::Year),
            (slots("12", "9"), "99", Slot::Year),
            (slots("1", ""), "13", Slot::Month),
        ];
        for (pair, value, slot) in &inputs {
            let first = validator.validate(pair, value, *slot);
            let second = validator.validate(pair, value, *slot);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_is_expired_on_dates() {
        use crate::test_utils::expiry;

        let validator = validator();
        assert!(validator.is_expired(expiry(5, 24)));
        assert!(!validator.is_expired(expiry(6, 24)));
        assert!(!validator.is_expired(expiry(1, 25)));
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationResult::valid().into_result().is_ok());
        let err = validator()
            .validate(&slots("05", ""), "20", Slot::Year)
            .into_result()
            .unwrap_err();
        assert!(matches!(err, ValidationError::Expired { .. }));
    }

    proptest! {
        #[test]
        fn prop_future_pairs_are_valid(month in 1u8..=12, year in 25u8..=99) {
            let month = format!("{month:02}");
            let year = format!("{year:02}");
            let result = validator().validate(&slots(&month, ""), &year, Slot::Year);
            prop_assert!(result.is_valid());
            prop_assert!(!result.is_expired());
            prop_assert_eq!(result.error_message(), "");
        }

        #[test]
        fn prop_past_pairs_are_expired(month in 1u8..=12, year in 0u8..=23) {
            let month = format!("{month:02}");
            let year = format!("{year:02}");
            let result = validator().validate(&slots(&month, ""), &year, Slot::Year);
            prop_assert!(!result.is_valid());
            prop_assert!(result.is_expired());
        }
    }
}
