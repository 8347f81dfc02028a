//! Simulated micromouse hardware shared by the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use mouse_core::direction::{Direction, RelativeDirection, Turn};
use mouse_core::hal::{Clock, IrSensor, IrSensors, Motors, Odometry, Wheel};
use mouse_core::maze::{Coord, MazeGrid};
use mouse_core::motion::{AdjustOutcome, ForwardOutcome};
use mouse_core::{Maneuver, Mouse, MouseConfig, Pose, WallPresence, WallSide};

/// Encoder edges produced per hardware access at full duty.
const EDGES_PER_ACCESS_AT_FULL_DUTY: f32 = 0.5;

/// IR model: raw reading of a sensor given the summed ticks since the last
/// counter clear.
pub type IrModel = Box<dyn FnMut(IrSensor, u32) -> u16>;

/// One duty command as the motor driver saw it, signed by direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub wheel: Wheel,
    pub duty: i32,
}

pub struct SimState {
    /// Fractional edges since the last clear, per wheel.
    progress: [f32; 2],
    /// Edges since power-up, never cleared.
    pub odometer: [u32; 2],
    pub duty: [u8; 2],
    /// `Some(true)` forward, `Some(false)` backward, `None` stopped.
    pub running: [Option<bool>; 2],
    pub commands: Vec<Command>,
    pub now_ms: u32,
    pub sensor_reads: u32,
    ir: IrModel,
}

impl SimState {
    /// Every hardware access lets a little time pass: running wheels turn.
    fn advance(&mut self) {
        for i in 0..2 {
            if self.running[i].is_some() {
                let before = self.progress[i] as u32;
                self.progress[i] += f32::from(self.duty[i]) / 255.0 * EDGES_PER_ACCESS_AT_FULL_DUTY;
                self.odometer[i] += self.progress[i] as u32 - before;
            }
        }
    }

    /// Edges since the last clear.
    pub fn ticks(&self, wheel: Wheel) -> u32 {
        self.progress[wheel as usize] as u32
    }

    fn record(&mut self, wheel: Wheel) {
        let i = wheel as usize;
        let duty = i32::from(self.duty[i]);
        let duty = match self.running[i] {
            Some(false) => -duty,
            _ => duty,
        };
        self.commands.push(Command { wheel, duty });
    }
}

pub type Shared = Rc<RefCell<SimState>>;

pub struct SimMotors(pub Shared);
pub struct SimSensors(pub Shared);
pub struct SimOdometry(pub Shared);
pub struct SimClock(pub Shared);

impl Motors for SimMotors {
    fn set_speed(&mut self, wheel: Wheel, duty: u8) {
        self.0.borrow_mut().duty[wheel as usize] = duty;
    }

    fn start_forward(&mut self, wheel: Wheel) {
        let mut state = self.0.borrow_mut();
        state.running[wheel as usize] = Some(true);
        state.record(wheel);
    }

    fn start_backward(&mut self, wheel: Wheel) {
        let mut state = self.0.borrow_mut();
        state.running[wheel as usize] = Some(false);
        state.record(wheel);
    }

    fn stop(&mut self, wheel: Wheel) {
        self.0.borrow_mut().running[wheel as usize] = None;
    }
}

impl IrSensors for SimSensors {
    fn read(&mut self, sensor: IrSensor) -> u16 {
        let mut state = self.0.borrow_mut();
        state.advance();
        state.sensor_reads += 1;
        let travelled = state.ticks(Wheel::Left) + state.ticks(Wheel::Right);
        (state.ir)(sensor, travelled)
    }
}

impl Odometry for SimOdometry {
    fn edge_count(&self, wheel: Wheel) -> u32 {
        let mut state = self.0.borrow_mut();
        state.advance();
        state.ticks(wheel)
    }

    fn clear_edge_count(&self, wheel: Wheel) {
        self.0.borrow_mut().progress[wheel as usize] = 0.0;
    }
}

impl Clock for SimClock {
    fn delay_ms(&mut self, ms: u32) {
        let mut state = self.0.borrow_mut();
        state.now_ms = state.now_ms.wrapping_add(ms);
    }

    fn now_ms(&self) -> u32 {
        self.0.borrow().now_ms
    }
}

pub type SimMouse = Mouse<SimMotors, SimSensors, SimOdometry, SimClock>;

/// A mouse on simulated hardware, plus a handle to inspect it.
pub fn sim_mouse(ir: impl FnMut(IrSensor, u32) -> u16 + 'static) -> (SimMouse, Shared) {
    let state = Rc::new(RefCell::new(SimState {
        progress: [0.0; 2],
        odometer: [0; 2],
        duty: [0; 2],
        running: [None; 2],
        commands: Vec::new(),
        now_ms: 0,
        sensor_reads: 0,
        ir: Box::new(ir),
    }));
    let mouse = Mouse::new(
        SimMotors(Rc::clone(&state)),
        SimSensors(Rc::clone(&state)),
        SimOdometry(Rc::clone(&state)),
        SimClock(Rc::clone(&state)),
        MouseConfig::default(),
    );
    (mouse, state)
}

/// Readings of a robot in an empty corridor: nothing in range.
pub fn no_walls(_: IrSensor, _: u32) -> u16 {
    20
}

/// Ground-truth walls of a maze. The outer boundary is always walled.
pub struct WallMap<const N: usize> {
    walls: HashSet<(Coord, Direction)>,
}

impl<const N: usize> WallMap<N> {
    pub fn open() -> Self {
        Self {
            walls: HashSet::new(),
        }
    }

    /// Adds the wall on edge `dir` of `at`, seen from both sides.
    pub fn wall(mut self, at: Coord, dir: Direction) -> Self {
        self.walls.insert((at, dir));
        if let Some(next) = MazeGrid::<N>::neighbour(at, dir) {
            self.walls.insert((next, dir.opposite()));
        }
        self
    }

    pub fn has_wall(&self, at: Coord, dir: Direction) -> bool {
        MazeGrid::<N>::neighbour(at, dir).is_none() || self.walls.contains(&(at, dir))
    }
}

/// What a [`GridRobot`] was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Forward,
    Turn(Turn),
    Adjust,
}

/// Cell-exact robot that moves over a [`WallMap`] without any physics.
pub struct GridRobot<const N: usize> {
    pub maze: WallMap<N>,
    pub at: Coord,
    pub heading: Direction,
    pub actions: Vec<Action>,
}

impl<const N: usize> GridRobot<N> {
    pub fn new(maze: WallMap<N>) -> Self {
        Self {
            maze,
            at: Coord::ORIGIN,
            heading: Direction::North,
            actions: Vec::new(),
        }
    }

    pub fn forwards(&self) -> usize {
        self.actions.iter().filter(|a| **a == Action::Forward).count()
    }
}

impl<const N: usize> Maneuver for GridRobot<N> {
    fn forward_one_cell(&mut self) -> ForwardOutcome {
        assert!(
            !self.maze.has_wall(self.at, self.heading),
            "drove through the {:?} wall of {:?}",
            self.heading,
            self.at
        );
        self.actions.push(Action::Forward);
        self.at = MazeGrid::<N>::neighbour(self.at, self.heading).unwrap();
        ForwardOutcome::Completed
    }

    fn turn(&mut self, turn: Turn) {
        self.actions.push(Action::Turn(turn));
        self.heading = self.heading.turned(turn);
    }

    fn adjust_to_front_wall(&mut self) -> AdjustOutcome {
        self.actions.push(Action::Adjust);
        AdjustOutcome::AlreadyAligned
    }

    fn check_wall(&mut self, side: WallSide) -> WallPresence {
        let relative = match side {
            WallSide::Front => RelativeDirection::Front,
            WallSide::Left => RelativeDirection::Left,
            WallSide::Right => RelativeDirection::Right,
        };
        if self.maze.has_wall(self.at, self.heading.rotate(relative)) {
            WallPresence::Found
        } else {
            WallPresence::NotFound
        }
    }
}

/// Raw reading of a front sensor facing a wall one cell away.
pub const FRONT_WALL_READING: u16 = 140;
/// Raw reading of a diagonal sensor beside a wall.
pub const SIDE_WALL_READING: u16 = 200;
/// Raw reading with nothing in range.
pub const OPEN_READING: u16 = 20;

/// A simulated [`Mouse`] in a [`WallMap`], with its true pose tracked cell
/// by cell.
///
/// IR readings come from the maze: at rest the sensors see the walls of the
/// current cell, while moving they already see the cell being entered.
pub struct MazeMouse<const N: usize> {
    pub mouse: SimMouse,
    pub sim: Shared,
    pose: Rc<Cell<Pose>>,
}

impl<const N: usize> MazeMouse<N> {
    pub fn new(maze: WallMap<N>) -> Self {
        let pose = Rc::new(Cell::new(Pose::START));
        let seen = Rc::clone(&pose);
        let (mouse, sim) = sim_mouse(move |sensor, travelled| {
            let Pose { at, heading } = seen.get();
            let at = if travelled > 0 {
                MazeGrid::<N>::neighbour(at, heading).unwrap_or(at)
            } else {
                at
            };
            let relative = match sensor {
                IrSensor::FrontLeft | IrSensor::FrontRight => RelativeDirection::Front,
                IrSensor::LeftDiagonal => RelativeDirection::Left,
                IrSensor::RightDiagonal => RelativeDirection::Right,
            };
            match (sensor, maze.has_wall(at, heading.rotate(relative))) {
                (_, false) => OPEN_READING,
                (IrSensor::FrontLeft | IrSensor::FrontRight, true) => FRONT_WALL_READING,
                (_, true) => SIDE_WALL_READING,
            }
        });
        Self { mouse, sim, pose }
    }

    pub fn pose(&self) -> Pose {
        self.pose.get()
    }
}

impl<const N: usize> Maneuver for MazeMouse<N> {
    fn forward_one_cell(&mut self) -> ForwardOutcome {
        let outcome = self.mouse.forward_one_cell();
        let mut pose = self.pose.get();
        pose.at = MazeGrid::<N>::neighbour(pose.at, pose.heading).expect("drove off the maze");
        self.pose.set(pose);
        outcome
    }

    fn turn(&mut self, turn: Turn) {
        Maneuver::turn(&mut self.mouse, turn);
        let mut pose = self.pose.get();
        pose.heading = pose.heading.turned(turn);
        self.pose.set(pose);
    }

    fn adjust_to_front_wall(&mut self) -> AdjustOutcome {
        self.mouse.adjust_to_front_wall()
    }

    fn check_wall(&mut self, side: WallSide) -> WallPresence {
        self.mouse.check_wall(side)
    }
}
