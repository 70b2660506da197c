/// Number of input slots (month, year)
pub const SLOT_COUNT: usize = 2;

/// Characters a completed slot holds (`MM` or `YY`)
pub const SLOT_WIDTH: usize = 2;

/// Minimum valid month (January)
pub const MIN_MONTH: u8 = 1;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Largest two-digit year
pub const MAX_TWO_DIGIT_YEAR: u8 = 99;

/// Century a two-digit year is mapped into (`YY` -> `20YY`)
pub const DEFAULT_CENTURY: u16 = 2000;

/// Separator between month and year in the `MM/YY` form
pub const EXPIRY_SEPARATOR: char = '/';

/// Shown when a slot contains anything but digits
pub const NON_NUMERIC_MESSAGE: &str = "Please enter numbers only.";

/// Shown when a slot holds more than two characters
pub const TOO_LONG_MESSAGE: &str = "Please enter two digits.";

/// Shown when the month cannot become 01-12
pub const INVALID_MONTH_MESSAGE: &str = "Please enter a valid month (01-12).";

/// Shown when the month/year pair is in the past
pub const EXPIRED_MESSAGE: &str = "The card has expired.";
