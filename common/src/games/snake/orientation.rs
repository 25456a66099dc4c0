use super::types::{GridCoord, Turn};

/// Axis-aligned turning frame of the snake head.
///
/// `right` is always derived as `up × forward`. Turns substitute basis vectors
/// instead of tracking an absolute heading, so yaw and pitch compose freely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Orientation {
    forward: GridCoord,
    up: GridCoord,
    right: GridCoord,
}

/// Result of rebuilding a basis from a requested forward/up pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rebuilt {
    pub orientation: Orientation,
    /// Set when `up` and `forward` were parallel and `right` had to fall back to +X.
    pub degenerate: bool,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::canonical()
    }
}

impl Orientation {
    /// Forward +Z, up +Y, right +X.
    pub fn canonical() -> Self {
        Self {
            forward: GridCoord::UNIT_Z,
            up: GridCoord::UNIT_Y,
            right: GridCoord::UNIT_X,
        }
    }

    pub fn from_vectors(forward: GridCoord, up: GridCoord) -> Rebuilt {
        let forward = forward.clamp_to_axis();
        let up = up.clamp_to_axis();
        let right = up.cross(forward);

        if right.is_zero() {
            Rebuilt {
                orientation: Self {
                    forward,
                    up,
                    right: GridCoord::UNIT_X,
                },
                degenerate: true,
            }
        } else {
            Rebuilt {
                orientation: Self { forward, up, right },
                degenerate: false,
            }
        }
    }

    pub fn forward(&self) -> GridCoord {
        self.forward
    }

    pub fn up(&self) -> GridCoord {
        self.up
    }

    pub fn right(&self) -> GridCoord {
        self.right
    }

    /// The (forward, up) pair a turn would request from this basis.
    pub fn turned(&self, turn: Turn) -> (GridCoord, GridCoord) {
        match turn {
            Turn::Right => (self.right, self.up),
            Turn::Left => (-self.right, self.up),
            Turn::Up => (self.up, -self.forward),
            Turn::Down => (-self.up, self.forward),
        }
    }

    pub fn is_reversal(&self, new_forward: GridCoord) -> bool {
        new_forward == -self.forward
    }

    pub fn is_orthonormal(&self) -> bool {
        self.forward.is_axis_unit()
            && self.up.is_axis_unit()
            && self.right.is_axis_unit()
            && self.forward.dot(self.up) == 0
            && self.forward.dot(self.right) == 0
            && self.up.dot(self.right) == 0
    }
}
