//! Absolute and robot-relative directions.
//!
//! Conversions between the two frames go through lookup tables indexed by
//! heading, so no direction ever falls through a match arm.

/// Absolute compass direction in the maze frame. `y` grows to the north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

/// Direction relative to the robot's heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RelativeDirection {
    Front,
    Right,
    Back,
    Left,
}

/// In-place rotation sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Turn {
    Left,
    Right,
}

const ABSOLUTE: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

/// `TO_ABSOLUTE[heading][relative]`
const TO_ABSOLUTE: [[Direction; 4]; 4] = {
    use Direction::*;
    [
        [North, East, South, West],
        [East, South, West, North],
        [South, West, North, East],
        [West, North, East, South],
    ]
};

/// `TO_RELATIVE[heading][absolute]`
const TO_RELATIVE: [[RelativeDirection; 4]; 4] = {
    use RelativeDirection::*;
    [
        [Front, Right, Back, Left],
        [Left, Front, Right, Back],
        [Back, Left, Front, Right],
        [Right, Back, Left, Front],
    ]
};

impl Direction {
    /// Neighbour scan order used by exploration.
    pub const SCAN_ORDER: [Direction; 4] = ABSOLUTE;

    const fn index(self) -> usize {
        self as usize
    }

    /// The absolute direction of `relative` when facing `self`.
    #[must_use]
    pub const fn rotate(self, relative: RelativeDirection) -> Direction {
        TO_ABSOLUTE[self.index()][relative.index()]
    }

    /// Where `self` lies relative to a robot facing `heading`.
    #[must_use]
    pub const fn relative_to(self, heading: Direction) -> RelativeDirection {
        TO_RELATIVE[heading.index()][self.index()]
    }

    /// The direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        self.rotate(RelativeDirection::Back)
    }

    /// Heading after one 90 degree turn.
    #[must_use]
    pub const fn turned(self, turn: Turn) -> Direction {
        match turn {
            Turn::Left => self.rotate(RelativeDirection::Left),
            Turn::Right => self.rotate(RelativeDirection::Right),
        }
    }

    /// Unit step `(dx, dy)` in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }
}

impl RelativeDirection {
    const fn index(self) -> usize {
        self as usize
    }
}
