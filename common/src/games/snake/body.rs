use super::orientation::Orientation;
use super::types::GridCoord;

pub const INITIAL_LENGTH: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub position: GridCoord,
    pub direction: GridCoord,
}

/// Ordered body of the snake; `segments[0]` is the head.
#[derive(Clone, Debug)]
pub struct Snake {
    segments: Vec<Segment>,
    target_length: usize,
    orientation: Orientation,
}

/// Next body layout computed for a tick but not yet committed.
#[derive(Clone, Debug)]
pub struct PlannedMove {
    pub segments: Vec<Segment>,
    /// Per planned segment, the position it animates from.
    pub from: Vec<GridCoord>,
    pub vacated: Vec<GridCoord>,
}

impl Snake {
    /// Head at `head`, one body segment directly behind it along `-forward`.
    pub fn new(head: GridCoord, orientation: Orientation) -> Self {
        let forward = orientation.forward();
        let segments = vec![
            Segment {
                position: head,
                direction: forward,
            },
            Segment {
                position: head - forward,
                direction: forward,
            },
        ];

        Self {
            segments,
            target_length: INITIAL_LENGTH,
            orientation,
        }
    }

    pub fn head(&self) -> GridCoord {
        self.segments[0].position
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn positions(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.segments.iter().map(|s| s.position)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Installs a new basis and points the head along its forward vector.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.reaffirm_head_direction();
    }

    pub fn reaffirm_head_direction(&mut self) {
        let forward = self.orientation.forward();
        if let Some(head) = self.segments.first_mut() {
            head.direction = forward;
        }
    }

    /// Offset from the head to the first body segment, if there is one.
    pub fn neck_direction(&self) -> Option<GridCoord> {
        self.segments.get(1).map(|neck| neck.position - self.head())
    }

    pub fn next_head(&self) -> GridCoord {
        self.head() + self.orientation.forward()
    }

    /// Shifts every segment into its predecessor's slot, appends the old tail
    /// when `grow_tail` is set, then trims to the target length.
    pub fn plan_move(&self, new_head: GridCoord, grow_tail: bool) -> PlannedMove {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        let mut from = Vec::with_capacity(self.segments.len() + 1);

        segments.push(Segment {
            position: new_head,
            direction: self.orientation.forward(),
        });
        from.push(self.head());

        for pair in self.segments.windows(2) {
            segments.push(pair[0].clone());
            from.push(pair[1].position);
        }

        if grow_tail && let Some(tail) = self.segments.last() {
            segments.push(tail.clone());
            from.push(tail.position);
        }

        segments.truncate(self.target_length);
        from.truncate(segments.len());

        let vacated = self
            .segments
            .iter()
            .map(|s| s.position)
            .filter(|p| !segments.iter().any(|s| s.position == *p))
            .collect();

        PlannedMove {
            segments,
            from,
            vacated,
        }
    }

    pub fn commit(&mut self, planned: PlannedMove) {
        self.segments = planned.segments;
    }

    #[cfg(test)]
    pub(crate) fn from_segments(segments: Vec<Segment>, target_length: usize, orientation: Orientation) -> Self {
        Self {
            segments,
            target_length,
            orientation,
        }
    }
}
