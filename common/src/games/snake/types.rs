use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Integer lattice coordinate. Also used for axis-aligned unit direction vectors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridCoord {
    pub const ZERO: GridCoord = GridCoord::new(0, 0, 0);
    pub const UNIT_X: GridCoord = GridCoord::new(1, 0, 0);
    pub const UNIT_Y: GridCoord = GridCoord::new(0, 1, 0);
    pub const UNIT_Z: GridCoord = GridCoord::new(0, 0, 1);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn cross(&self, other: GridCoord) -> GridCoord {
        GridCoord::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn dot(&self, other: GridCoord) -> i32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// L-infinity distance: the largest per-axis difference.
    pub fn chebyshev_distance(&self, other: GridCoord) -> u32 {
        self.x
            .abs_diff(other.x)
            .max(self.y.abs_diff(other.y))
            .max(self.z.abs_diff(other.z))
    }

    pub fn manhattan_distance(&self, other: GridCoord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }

    /// Clamps each component to {-1, 0, 1}; an all-zero result becomes +Z.
    pub fn clamp_to_axis(&self) -> GridCoord {
        let clamped = GridCoord::new(
            self.x.clamp(-1, 1),
            self.y.clamp(-1, 1),
            self.z.clamp(-1, 1),
        );
        if clamped.is_zero() {
            Self::UNIT_Z
        } else {
            clamped
        }
    }

    /// True for the six vectors with exactly one nonzero component of magnitude one.
    pub fn is_axis_unit(&self) -> bool {
        let nonzero = [self.x, self.y, self.z].iter().filter(|c| **c != 0).count();
        nonzero == 1 && self.x.abs() <= 1 && self.y.abs() <= 1 && self.z.abs() <= 1
    }
}

impl Add for GridCoord {
    type Output = GridCoord;

    fn add(self, rhs: GridCoord) -> GridCoord {
        GridCoord::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for GridCoord {
    type Output = GridCoord;

    fn sub(self, rhs: GridCoord) -> GridCoord {
        GridCoord::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for GridCoord {
    type Output = GridCoord;

    fn neg(self) -> GridCoord {
        GridCoord::new(-self.x, -self.y, -self.z)
    }
}

/// Grid extents along each axis, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridSize {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// `None` when the product does not fit in `usize`.
    pub fn cell_count(&self) -> Option<usize> {
        (self.x.max(0) as usize)
            .checked_mul(self.y.max(0) as usize)?
            .checked_mul(self.z.max(0) as usize)
    }
}

/// Continuous world-space position handed to the presentation layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPos {
    pub const ZERO: WorldPos = WorldPos::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Empty,
    SnakeOccupied,
    Food,
    /// Never stored; returned for every out-of-bounds lookup.
    Wall,
}

impl CellState {
    pub fn is_blocking(&self) -> bool {
        matches!(self, CellState::Wall | CellState::SnakeOccupied)
    }
}

/// Turn relative to the snake's current orientation basis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    Left,
    Right,
    Up,
    Down,
}

impl Turn {
    pub const ALL: [Turn; 4] = [Turn::Left, Turn::Right, Turn::Up, Turn::Down];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}
