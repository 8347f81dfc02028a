//! Bounded backtrack stack of exploration headings.

use heapless::Vec;

use crate::config::PATH_STACK_CAPACITY;
use crate::direction::Direction;
use crate::error::{Error, Result};

/// Headings of the forward exploration steps not yet undone.
#[derive(Debug, Clone, Default)]
pub struct PathStack<const CAP: usize = PATH_STACK_CAPACITY> {
    steps: Vec<Direction, CAP>,
}

impl<const CAP: usize> PathStack<CAP> {
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Records a forward step taken toward `dir`.
    pub fn push(&mut self, dir: Direction) -> Result<()> {
        self.steps
            .push(dir)
            .map_err(|_| Error::StackOverflow { capacity: CAP })
    }

    /// Removes and returns the most recent forward step.
    pub fn pop(&mut self) -> Result<Direction> {
        self.steps.pop().ok_or(Error::StackUnderflow)
    }

    /// Unresolved forward steps.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps from the start, oldest first.
    #[must_use]
    pub fn as_slice(&self) -> &[Direction] {
        &self.steps
    }
}
