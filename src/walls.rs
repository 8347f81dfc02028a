//! Wall perception in the robot's rotating frame.
//!
//! [`WallDetector`] keeps one tri-state [`WallPresence`] per robot-relative
//! side. Each side also has an [`UpdateGate`]: when closed, the sensors are
//! still sampled but the stored flag keeps its value. Motion primitives close
//! the side gates once the robot is far enough into a square that the
//! diagonal sensors would see the next cell's walls.

use crate::config::SensorThresholds;
use crate::direction::Turn;
use crate::hal::{IrSensor, IrSensors};

/// Whether a wall is there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WallPresence {
    NotFound,
    Found,
    /// No reading taken since the last turn or clear.
    CannotRead,
}

impl WallPresence {
    fn from_reading(reading: u16, threshold: u16) -> Self {
        if reading >= threshold {
            Self::Found
        } else {
            Self::NotFound
        }
    }
}

/// Whether a side's stored presence may be refreshed from the sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateGate {
    Available,
    NotAvailable,
}

/// Robot-relative side a wall is sensed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WallSide {
    Front,
    Left,
    Right,
}

impl WallSide {
    pub const ALL: [WallSide; 3] = [WallSide::Front, WallSide::Left, WallSide::Right];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Snapshot printed by [`WallDetector::report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallReport {
    pub front: WallPresence,
    pub left: WallPresence,
    pub right: WallPresence,
    /// Raw readings in IR1..IR4 order.
    pub readings: [u16; 4],
}

/// Tri-state wall flags with per-side update gates.
#[derive(Debug, Clone)]
pub struct WallDetector {
    thresholds: SensorThresholds,
    presence: [WallPresence; 3],
    gates: [UpdateGate; 3],
}

impl WallDetector {
    /// All sides unread; front gate open, side gates closed.
    #[must_use]
    pub const fn new(thresholds: SensorThresholds) -> Self {
        Self {
            thresholds,
            presence: [WallPresence::CannotRead; 3],
            gates: [
                UpdateGate::Available,
                UpdateGate::NotAvailable,
                UpdateGate::NotAvailable,
            ],
        }
    }

    #[must_use]
    pub const fn thresholds(&self) -> &SensorThresholds {
        &self.thresholds
    }

    /// Stored presence of `side`, without sampling.
    #[must_use]
    pub const fn presence(&self, side: WallSide) -> WallPresence {
        self.presence[side.index()]
    }

    #[must_use]
    pub const fn gate(&self, side: WallSide) -> UpdateGate {
        self.gates[side.index()]
    }

    pub fn set_gate(&mut self, side: WallSide, gate: UpdateGate) {
        self.gates[side.index()] = gate;
    }

    /// Sets both side gates at once.
    pub fn set_side_gates(&mut self, gate: UpdateGate) {
        self.set_gate(WallSide::Left, gate);
        self.set_gate(WallSide::Right, gate);
    }

    /// Forgets the side walls.
    pub fn clear_left_right(&mut self) {
        self.presence[WallSide::Left.index()] = WallPresence::CannotRead;
        self.presence[WallSide::Right.index()] = WallPresence::CannotRead;
    }

    /// Forgets every wall.
    pub fn clear(&mut self) {
        self.presence = [WallPresence::CannotRead; 3];
    }

    /// Samples the sensors for `side` and stores the result if its gate is
    /// open.
    pub fn update(&mut self, side: WallSide, sensors: &mut impl IrSensors) {
        let sensed = self.sense(side, sensors);
        if self.gate(side) == UpdateGate::Available {
            self.presence[side.index()] = sensed;
        }
    }

    /// Refreshes `side` then returns its stored presence.
    pub fn check(&mut self, side: WallSide, sensors: &mut impl IrSensors) -> WallPresence {
        self.update(side, sensors);
        self.presence(side)
    }

    /// Instantaneous presence of `side`, ignoring its gate and stored flag.
    pub fn sense(&self, side: WallSide, sensors: &mut impl IrSensors) -> WallPresence {
        let t = &self.thresholds;
        match side {
            WallSide::Front => WallPresence::from_reading(front_average(sensors), t.front),
            WallSide::Left => WallPresence::from_reading(sensors.read(IrSensor::LeftDiagonal), t.left),
            WallSide::Right => {
                WallPresence::from_reading(sensors.read(IrSensor::RightDiagonal), t.right)
            }
        }
    }

    /// Whether the front wall is close enough that forward motion must stop.
    pub fn front_too_close(&self, sensors: &mut impl IrSensors) -> bool {
        front_average(sensors) >= self.thresholds.front_too_close
    }

    /// Rotates the stored flags for a 90 degree turn.
    ///
    /// The side turned away from becomes unknown.
    pub fn rotate(&mut self, turn: Turn) {
        let [front, left, right] = self.presence;
        self.presence = match turn {
            Turn::Right => [right, front, WallPresence::CannotRead],
            Turn::Left => [left, WallPresence::CannotRead, front],
        };
    }

    /// Opens every gate, refreshes every side and logs the result alongside
    /// the raw readings and thresholds.
    pub fn report(&mut self, sensors: &mut impl IrSensors) -> WallReport {
        self.gates = [UpdateGate::Available; 3];
        for side in WallSide::ALL {
            self.update(side, sensors);
        }

        let report = WallReport {
            front: self.presence(WallSide::Front),
            left: self.presence(WallSide::Left),
            right: self.presence(WallSide::Right),
            readings: IrSensor::ALL.map(|sensor| sensors.read(sensor)),
        };
        info!(
            "walls front={} left={} right={} ir={} thresholds={}/{}/{}",
            report.front,
            report.left,
            report.right,
            report.readings,
            self.thresholds.front,
            self.thresholds.left,
            self.thresholds.right,
        );
        report
    }
}

/// Mean of the two forward-facing sensors.
pub fn front_average(sensors: &mut impl IrSensors) -> u16 {
    let left = u32::from(sensors.read(IrSensor::FrontLeft));
    let right = u32::from(sensors.read(IrSensor::FrontRight));
    ((left + right) / 2) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed([u16; 4]);

    impl IrSensors for Fixed {
        fn read(&mut self, sensor: IrSensor) -> u16 {
            self.0[sensor as usize]
        }
    }

    const T: SensorThresholds = SensorThresholds::WALLS_180MM;

    fn detector(presence: [WallPresence; 3]) -> WallDetector {
        let mut walls = WallDetector::new(T);
        walls.presence = presence;
        walls
    }

    #[test]
    fn test_initial_state() {
        let walls = WallDetector::new(T);
        for side in WallSide::ALL {
            assert_eq!(walls.presence(side), WallPresence::CannotRead);
        }
        assert_eq!(walls.gate(WallSide::Front), UpdateGate::Available);
        assert_eq!(walls.gate(WallSide::Left), UpdateGate::NotAvailable);
        assert_eq!(walls.gate(WallSide::Right), UpdateGate::NotAvailable);
    }

    #[test]
    fn test_rotate_right() {
        use WallPresence::*;
        // front=Found, left=NotFound, right=Found
        let mut walls = detector([Found, NotFound, Found]);
        walls.rotate(Turn::Right);
        assert_eq!(walls.presence(WallSide::Left), Found);
        assert_eq!(walls.presence(WallSide::Front), Found);
        assert_eq!(walls.presence(WallSide::Right), CannotRead);

        let mut walls = detector([NotFound, Found, Found]);
        walls.rotate(Turn::Right);
        assert_eq!(walls.presence(WallSide::Left), NotFound);
        assert_eq!(walls.presence(WallSide::Front), Found);
        assert_eq!(walls.presence(WallSide::Right), CannotRead);
    }

    #[test]
    fn test_rotate_with_unreadable_right() {
        use WallPresence::*;
        // left=Found, front=NotFound, right=CannotRead
        let mut walls = detector([NotFound, Found, CannotRead]);
        walls.rotate(Turn::Right);
        assert_eq!(walls.presence(WallSide::Left), NotFound);
        assert_eq!(walls.presence(WallSide::Front), CannotRead);
        assert_eq!(walls.presence(WallSide::Right), CannotRead);

        let mut once_left = detector([NotFound, Found, CannotRead]);
        once_left.rotate(Turn::Left);
        assert_eq!(once_left.presence(WallSide::Left), CannotRead);
        assert_eq!(once_left.presence(WallSide::Front), Found);
        assert_eq!(once_left.presence(WallSide::Right), NotFound);

        walls.rotate(Turn::Right);
        assert_eq!(walls.presence, [CannotRead; 3]);
        assert_ne!(walls.presence, once_left.presence);
    }

    #[test]
    fn test_rotate_left() {
        use WallPresence::*;
        let mut walls = detector([Found, NotFound, Found]);
        walls.rotate(Turn::Left);
        assert_eq!(walls.presence(WallSide::Right), Found);
        assert_eq!(walls.presence(WallSide::Front), NotFound);
        assert_eq!(walls.presence(WallSide::Left), CannotRead);
    }

    #[test]
    fn test_two_rights_are_not_one_left() {
        use WallPresence::*;
        let mut twice = detector([Found, NotFound, Found]);
        twice.rotate(Turn::Right);
        twice.rotate(Turn::Right);
        assert_eq!(twice.presence(WallSide::Left), Found);
        assert_eq!(twice.presence(WallSide::Front), CannotRead);
        assert_eq!(twice.presence(WallSide::Right), CannotRead);

        let mut once = detector([Found, NotFound, Found]);
        once.rotate(Turn::Left);
        assert_ne!(once.presence, twice.presence);
    }

    #[test]
    fn test_gate_blocks_update() {
        let mut sensors = Fixed([0, 200, 200, 0]);
        let mut walls = WallDetector::new(T);

        walls.update(WallSide::Left, &mut sensors);
        assert_eq!(walls.presence(WallSide::Left), WallPresence::CannotRead);

        walls.set_side_gates(UpdateGate::Available);
        assert_eq!(walls.check(WallSide::Left, &mut sensors), WallPresence::Found);
        assert_eq!(walls.check(WallSide::Right, &mut sensors), WallPresence::Found);

        walls.set_side_gates(UpdateGate::NotAvailable);
        let mut sensors = Fixed([0, 0, 0, 0]);
        assert_eq!(walls.check(WallSide::Left, &mut sensors), WallPresence::Found);
        assert_eq!(walls.sense(WallSide::Left, &mut sensors), WallPresence::NotFound);
    }

    #[test]
    fn test_front_uses_average() {
        let mut walls = WallDetector::new(T);
        // (100 + 156) / 2 = 128, exactly the threshold
        let mut sensors = Fixed([100, 0, 0, 156]);
        assert_eq!(walls.check(WallSide::Front, &mut sensors), WallPresence::Found);
        let mut sensors = Fixed([100, 0, 0, 155]);
        assert_eq!(walls.check(WallSide::Front, &mut sensors), WallPresence::NotFound);
    }

    #[test]
    fn test_front_too_close() {
        let walls = WallDetector::new(T);
        assert!(walls.front_too_close(&mut Fixed([160, 0, 0, 160])));
        assert!(!walls.front_too_close(&mut Fixed([150, 0, 0, 169])));
    }

    #[test]
    fn test_clear() {
        let mut walls = detector([WallPresence::Found; 3]);
        walls.clear_left_right();
        assert_eq!(walls.presence(WallSide::Front), WallPresence::Found);
        assert_eq!(walls.presence(WallSide::Left), WallPresence::CannotRead);
        walls.clear();
        assert_eq!(walls.presence(WallSide::Front), WallPresence::CannotRead);
    }

    #[test]
    fn test_report_opens_gates() {
        let mut walls = WallDetector::new(T);
        let report = walls.report(&mut Fixed([200, 0, 150, 200]));
        assert_eq!(report.front, WallPresence::Found);
        assert_eq!(report.left, WallPresence::NotFound);
        assert_eq!(report.right, WallPresence::Found);
        assert_eq!(report.readings, [200, 0, 150, 200]);
        assert_eq!(walls.gate(WallSide::Left), UpdateGate::Available);
    }
}
