//! Interrupt-shared edge counters.
//!
//! Edge handlers call [`EdgeCounter::increment`]; the main loop only reads
//! and clears. Every access runs inside a critical section, so a clear that
//! precedes a motor start happens-before any later increment.

use core::cell::Cell;

use critical_section::Mutex;

use crate::hal::{Odometry, Wheel};

/// A single edge counter shared between interrupt and thread context.
pub struct EdgeCounter {
    count: Mutex<Cell<u32>>,
}

impl EdgeCounter {
    /// Creates a counter at zero. Usable in `static` items.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: Mutex::new(Cell::new(0)),
        }
    }

    /// Adds one edge. Called from interrupt context.
    pub fn increment(&self) {
        critical_section::with(|cs| {
            let cell = self.count.borrow(cs);
            cell.set(cell.get().wrapping_add(1));
        });
    }

    /// Current count.
    pub fn get(&self) -> u32 {
        critical_section::with(|cs| self.count.borrow(cs).get())
    }

    /// Resets the count to zero.
    pub fn clear(&self) {
        critical_section::with(|cs| self.count.borrow(cs).set(0));
    }
}

impl Default for EdgeCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Left and right wheel encoder counters.
pub struct WheelEncoders {
    /// Left wheel encoder.
    pub left: EdgeCounter,
    /// Right wheel encoder.
    pub right: EdgeCounter,
}

impl WheelEncoders {
    /// Creates both counters at zero. Usable in `static` items.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            left: EdgeCounter::new(),
            right: EdgeCounter::new(),
        }
    }

    /// Counter for `wheel`.
    #[must_use]
    pub const fn counter(&self, wheel: Wheel) -> &EdgeCounter {
        match wheel {
            Wheel::Left => &self.left,
            Wheel::Right => &self.right,
        }
    }
}

impl Default for WheelEncoders {
    fn default() -> Self {
        Self::new()
    }
}

impl Odometry for WheelEncoders {
    fn edge_count(&self, wheel: Wheel) -> u32 {
        self.counter(wheel).get()
    }

    fn clear_edge_count(&self, wheel: Wheel) {
        self.counter(wheel).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_and_clear() {
        let counter = EdgeCounter::new();
        for _ in 0..5 {
            counter.increment();
        }
        assert_eq!(counter.get(), 5);
        counter.clear();
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_wheels_are_independent() {
        static ENCODERS: WheelEncoders = WheelEncoders::new();

        ENCODERS.left.increment();
        ENCODERS.left.increment();
        ENCODERS.right.increment();

        let odometry = &ENCODERS;
        assert_eq!(odometry.edge_count(Wheel::Left), 2);
        assert_eq!(odometry.edge_count(Wheel::Right), 1);

        odometry.clear_edge_count(Wheel::Left);
        assert_eq!(odometry.edge_count(Wheel::Left), 0);
        assert_eq!(odometry.edge_count(Wheel::Right), 1);
    }

    #[test]
    fn test_concurrent_increments() {
        use std::sync::Arc;
        use std::thread;

        let counter = Arc::new(EdgeCounter::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let counter = Arc::clone(&counter);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        counter.increment();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(counter.get(), 4000);
    }
}
