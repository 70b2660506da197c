//! Sources of "now" for expiry checks.

use chrono::{Datelike, Local};

use crate::types::{CalendarMonth, Month};

/// Supplies the current calendar month. Read once per expiry check.
pub trait Clock {
    fn current_month(&self) -> CalendarMonth;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn current_month(&self) -> CalendarMonth {
        (**self).current_month()
    }
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_month(&self) -> CalendarMonth {
        let today = Local::now().date_naive();
        // chrono guarantees 1..=12 and a positive year for the local date
        let month = u8::try_from(today.month())
            .ok()
            .and_then(|m| Month::new(m).ok())
            .unwrap_or(Month::MIN);
        let year = u16::try_from(today.year()).unwrap_or(u16::MAX);
        let now = CalendarMonth::new(year, month);
        tracing::trace!(%now, "read system clock");
        now
    }
}

/// Always reports the same month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(CalendarMonth);

impl FixedClock {
    pub const fn new(now: CalendarMonth) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn current_month(&self) -> CalendarMonth {
        self.0
    }
}
