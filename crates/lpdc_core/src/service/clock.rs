//! Time source for modification timestamps.

use crate::model::date::FormatPreservingDate;
use std::cell::RefCell;

pub trait Clock {
    fn now(&self) -> FormatPreservingDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> FormatPreservingDate {
        FormatPreservingDate::now()
    }
}

/// Returns the same instant until moved with `set`.
#[derive(Debug)]
pub struct FixedClock {
    now: RefCell<FormatPreservingDate>,
}

impl FixedClock {
    pub fn new(now: FormatPreservingDate) -> Self {
        Self {
            now: RefCell::new(now),
        }
    }

    pub fn set(&self, now: FormatPreservingDate) {
        *self.now.borrow_mut() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> FormatPreservingDate {
        self.now.borrow().clone()
    }
}
