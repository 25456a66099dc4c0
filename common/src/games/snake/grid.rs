use super::types::{CellState, GridCoord, GridSize, WorldPos};

/// Dense 3D lattice of cell states, centred on `origin` in world space.
///
/// Cells are stored in a flat vector indexed `x + y*X + z*X*Y`. The boundary is
/// never materialized: any out-of-bounds lookup reports `CellState::Wall` and any
/// out-of-bounds write is dropped.
#[derive(Clone, Debug)]
pub struct WorldGrid {
    size: GridSize,
    cell_size: f32,
    origin: WorldPos,
    cells: Vec<CellState>,
}

impl WorldGrid {
    pub fn new(size: GridSize, cell_size: f32, origin: WorldPos) -> Result<Self, String> {
        if size.x <= 0 || size.y <= 0 || size.z <= 0 {
            return Err(format!(
                "Grid dimensions must be positive, got {}x{}x{}",
                size.x, size.y, size.z
            ));
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(format!("Cell size must be positive, got {}", cell_size));
        }

        let Some(cell_count) = size.cell_count() else {
            return Err(format!(
                "Grid {}x{}x{} has too many cells",
                size.x, size.y, size.z
            ));
        };

        Ok(Self {
            size,
            cell_size,
            origin,
            cells: vec![CellState::Empty; cell_count],
        })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn origin(&self) -> WorldPos {
        self.origin
    }

    pub fn center(&self) -> GridCoord {
        GridCoord::new(self.size.x / 2, self.size.y / 2, self.size.z / 2)
    }

    #[inline]
    pub fn in_bounds(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.x < self.size.x
            && coord.y >= 0
            && coord.y < self.size.y
            && coord.z >= 0
            && coord.z < self.size.z
    }

    #[inline]
    fn index_of(&self, coord: GridCoord) -> usize {
        coord.x as usize
            + coord.y as usize * self.size.x as usize
            + coord.z as usize * self.size.x as usize * self.size.y as usize
    }

    fn coord_of(&self, index: usize) -> GridCoord {
        let width = self.size.x as usize;
        let layer = width * self.size.y as usize;
        GridCoord::new(
            (index % width) as i32,
            ((index % layer) / width) as i32,
            (index / layer) as i32,
        )
    }

    pub fn get(&self, coord: GridCoord) -> CellState {
        if !self.in_bounds(coord) {
            return CellState::Wall;
        }
        self.cells[self.index_of(coord)]
    }

    pub fn set(&mut self, coord: GridCoord, state: CellState) {
        if !self.in_bounds(coord) {
            return;
        }
        let idx = self.index_of(coord);
        self.cells[idx] = state;
    }

    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
    }

    pub fn empty_cells(&self) -> Vec<GridCoord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, state)| **state == CellState::Empty)
            .map(|(idx, _)| self.coord_of(idx))
            .collect()
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| **cell == state).count()
    }

    pub fn to_world(&self, coord: GridCoord) -> WorldPos {
        let axis = |c: i32, dim: i32, origin: f32| {
            origin + (c as f32 - dim as f32 / 2.0 + 0.5) * self.cell_size
        };
        WorldPos::new(
            axis(coord.x, self.size.x, self.origin.x),
            axis(coord.y, self.size.y, self.origin.y),
            axis(coord.z, self.size.z, self.origin.z),
        )
    }

    pub fn to_grid(&self, pos: WorldPos) -> GridCoord {
        let axis = |p: f32, dim: i32, origin: f32| {
            ((p - origin) / self.cell_size + dim as f32 / 2.0 - 0.5).round() as i32
        };
        GridCoord::new(
            axis(pos.x, self.size.x, self.origin.x),
            axis(pos.y, self.size.y, self.origin.y),
            axis(pos.z, self.size.z, self.origin.z),
        )
    }
}
