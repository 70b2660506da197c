use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::consts::{EXPIRY_SEPARATOR, SLOT_COUNT};
use crate::types::{InputSlot, Slot};
use crate::validator::ExpiryValidator;
use crate::{ExpiryDate, ParseError};

/// Something the view layer did to the expiry inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExpiryEvent {
    /// New text for one slot
    Changed { slot: Slot, value: String },
    /// Back to two empty, valid slots
    Reset,
}

impl ExpiryEvent {
    pub fn changed(slot: Slot, value: impl Into<String>) -> Self {
        Self::Changed {
            slot,
            value: value.into(),
        }
    }
}

/// The month and year slots plus the message currently shown next to them.
///
/// Always exactly two slots, ordered `[month, year]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpiryInputState {
    slots:         [InputSlot; SLOT_COUNT],
    error_message: String,
}

impl ExpiryInputState {
    /// Both slots empty and valid, no message
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn slots(&self) -> &[InputSlot; SLOT_COUNT] {
        &self.slots
    }

    pub const fn slot(&self, slot: Slot) -> &InputSlot {
        &self.slots[slot.index()]
    }

    pub const fn month(&self) -> &InputSlot {
        self.slot(Slot::Month)
    }

    pub const fn year(&self) -> &InputSlot {
        self.slot(Slot::Year)
    }

    /// Empty unless the last edit was rejected
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Both slots hold a full two characters
    pub fn is_complete(&self) -> bool {
        Slot::ALL.iter().all(|&slot| self.slot(slot).is_complete())
    }

    /// Both flags set, no message, and a completed pair is not in the past.
    ///
    /// The per-keystroke flags only see expiry on year edits, so a completed
    /// pair is re-checked against `validator`'s clock here.
    pub fn is_valid<C: Clock>(&self, validator: &ExpiryValidator<C>) -> bool {
        self.flags_valid() && !self.completed_date().is_some_and(|date| validator.is_expired(date))
    }

    /// The entered date, once both slots are complete, valid and not expired
    pub fn expiry_date<C: Clock>(&self, validator: &ExpiryValidator<C>) -> Option<ExpiryDate> {
        if !self.flags_valid() {
            return None;
        }
        self.completed_date().filter(|&date| !validator.is_expired(date))
    }

    fn flags_valid(&self) -> bool {
        self.error_message.is_empty() && self.slots.iter().all(|s| s.is_valid)
    }

    fn completed_date(&self) -> Option<ExpiryDate> {
        if !self.is_complete() {
            return None;
        }
        let text = format!("{}{EXPIRY_SEPARATOR}{}", self.month().value, self.year().value);
        ExpiryDate::from_str(&text).ok()
    }

    /// Applies `event` and returns the next state; `self` is left untouched.
    ///
    /// A year edit that makes the pair expired marks both slots invalid. Any
    /// other edit only rewrites the edited slot's flag.
    #[must_use]
    pub fn reduce<C: Clock>(&self, event: ExpiryEvent, validator: &ExpiryValidator<C>) -> Self {
        match event {
            ExpiryEvent::Reset => {
                tracing::debug!("expiry input reset");
                Self::new()
            }
            ExpiryEvent::Changed { slot, value } => {
                let verdict = validator.validate(&self.slots, &value, slot);

                let mut next = self.clone();
                next.slots[slot.index()].value = value;
                if slot == Slot::Year && verdict.is_expired() {
                    next.slots[Slot::Month.index()].is_valid = false;
                    next.slots[Slot::Year.index()].is_valid = false;
                } else {
                    next.slots[slot.index()].is_valid = verdict.is_valid();
                }
                next.error_message = verdict.error_message();

                tracing::debug!(
                    %slot,
                    month_valid = next.month().is_valid,
                    year_valid = next.year().is_valid,
                    error = %next.error_message,
                    "expiry input updated"
                );
                next
            }
        }
    }
}

/// View-facing handle: owns the state and the validator that drives it.
#[derive(Debug, Clone)]
pub struct ExpiryInput<C = SystemClock> {
    state:     ExpiryInputState,
    validator: ExpiryValidator<C>,
}

impl Default for ExpiryInput<SystemClock> {
    fn default() -> Self {
        Self::new(ExpiryValidator::default())
    }
}

impl<C: Clock> ExpiryInput<C> {
    pub fn new(validator: ExpiryValidator<C>) -> Self {
        Self {
            state: ExpiryInputState::new(),
            validator,
        }
    }

    pub const fn state(&self) -> &ExpiryInputState {
        &self.state
    }

    pub const fn validator(&self) -> &ExpiryValidator<C> {
        &self.validator
    }

    pub const fn slots(&self) -> &[InputSlot; SLOT_COUNT] {
        self.state.slots()
    }

    pub fn error_message(&self) -> &str {
        self.state.error_message()
    }

    /// See [`ExpiryInputState::is_valid`]; reads the clock.
    pub fn is_valid(&self) -> bool {
        self.state.is_valid(&self.validator)
    }

    /// See [`ExpiryInputState::expiry_date`]; reads the clock.
    pub fn expiry_date(&self) -> Option<ExpiryDate> {
        self.state.expiry_date(&self.validator)
    }

    /// Change handler for the input at `index` (0 = month, 1 = year).
    ///
    /// # Errors
    /// Returns `ParseError::InvalidSlot` for any other index; state is unchanged.
    pub fn handle_change(&mut self, value: impl Into<String>, index: usize) -> Result<(), ParseError> {
        let slot = Slot::try_from(index)?;
        self.dispatch(ExpiryEvent::changed(slot, value));
        Ok(())
    }

    pub fn dispatch(&mut self, event: ExpiryEvent) {
        self.state = self.state.reduce(event, &self.validator);
    }

    pub fn reset(&mut self) {
        self.dispatch(ExpiryEvent::Reset);
    }
}
