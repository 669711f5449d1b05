//! Source of "today" for date rules.

use chrono::{Local, NaiveDate};

/// Supplies the current calendar date.
///
/// Validation compares invoice dates against this, so tests inject a
/// [`FixedClock`] instead of depending on the wall clock.
pub trait Clock: Send + Sync + core::fmt::Debug {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C> Clock for std::sync::Arc<C>
where
    C: Clock + ?Sized,
{
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
