//! Config push-button and start-up run mode selection.
//!
//! The button's debounce handler bumps an [`EdgeCounter`] once per press. A
//! press is noticed by seeing the count differ from the last value read.

use crate::hal::Clock;
use crate::odometry::EdgeCounter;
use crate::time::Deadline;

/// Interval between button polls while counting presses.
pub const PRESS_POLL_MS: u32 = 10;

/// Behaviour chosen at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunMode {
    /// Flood-fill exploration to the goal.
    Explore,
    LeftWallFollow,
    RightWallFollow,
    /// Short pause, then a straight run of a few squares.
    Demo,
    /// Logs wall presence and raw IR readings forever.
    SensorDebug,
}

impl RunMode {
    /// Modes in press-count order.
    pub const ALL: [RunMode; 5] = [
        RunMode::Explore,
        RunMode::LeftWallFollow,
        RunMode::RightWallFollow,
        RunMode::Demo,
        RunMode::SensorDebug,
    ];

    /// Maps a press count onto a mode, wrapping after the last one.
    #[must_use]
    pub const fn from_press_count(presses: u32) -> Self {
        Self::ALL[presses as usize % Self::ALL.len()]
    }
}

/// Press detector over the button's edge counter.
pub struct ConfigSwitch<'a> {
    edges: &'a EdgeCounter,
    last_seen: u32,
}

impl<'a> ConfigSwitch<'a> {
    /// Starts watching `edges`. Presses before this call are ignored.
    #[must_use]
    pub fn new(edges: &'a EdgeCounter) -> Self {
        Self {
            last_seen: edges.get(),
            edges,
        }
    }

    /// Whether the button was pressed since the last call.
    pub fn pressed(&mut self) -> bool {
        let seen = self.edges.get();
        if seen == self.last_seen {
            return false;
        }
        self.last_seen = seen;
        true
    }

    /// Counts presses until `window_ms` has passed.
    pub fn count_presses(&mut self, clock: &mut impl Clock, window_ms: u32) -> u32 {
        let deadline = Deadline::after(clock, window_ms);
        let mut presses = 0;
        while !deadline.expired(clock) {
            if self.pressed() {
                presses += 1;
                debug!("config switch press {}", presses);
            }
            clock.delay_ms(PRESS_POLL_MS);
        }
        presses
    }

    /// Counts presses for `window_ms` and returns the selected mode.
    pub fn select_run_mode(&mut self, clock: &mut impl Clock, window_ms: u32) -> RunMode {
        let mode = RunMode::from_press_count(self.count_presses(clock, window_ms));
        info!("run mode {}", mode);
        mode
    }
}
