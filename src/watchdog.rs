//! Bounded busy-wait loops.
//!
//! Hardware readiness is polled a fixed number of times rather than forever,
//! so a dead peripheral turns into an [`Error::Timeout`] instead of a hang.

use crate::error::{Error, Peripheral, Result};

/// Poll budget for one wait.
#[derive(Debug, Clone, Copy)]
pub struct Watchdog {
    peripheral: Peripheral,
    limit: u32,
    polls: u32,
}

impl Watchdog {
    /// Allows `limit` polls of `peripheral`.
    #[must_use]
    pub const fn new(peripheral: Peripheral, limit: u32) -> Self {
        Self {
            peripheral,
            limit,
            polls: 0,
        }
    }

    /// Spends one poll. Fails once the budget is used up.
    pub fn feed(&mut self) -> Result<()> {
        if self.polls >= self.limit {
            return Err(Error::timeout(self.peripheral, self.polls));
        }
        self.polls += 1;
        Ok(())
    }

    /// Polls spent so far.
    #[must_use]
    pub const fn polls(&self) -> u32 {
        self.polls
    }

    /// Polls `ready` until it returns `true`, returning the polls spent.
    pub fn wait_until(mut self, mut ready: impl FnMut() -> bool) -> Result<u32> {
        loop {
            self.feed()?;
            if ready() {
                return Ok(self.polls);
            }
        }
    }
}
