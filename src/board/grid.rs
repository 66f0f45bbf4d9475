//! Grid geometry and obstacle occupancy.
//!
//! The grid is a dense width x height occupancy map recording which cells
//! hold a static obstacle. Units never mark occupancy: two units may share
//! a cell, and only obstacles block movement.

/// An integer cell coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Pos { x, y }
    }

    /// Returns this position shifted by the given offset.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Pos {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// One less than the Manhattan distance, so two units standing in
    /// attack contact score 0 rather than 1. Evaluation only; never used
    /// for legality checks.
    pub fn taxicab_approach(self, other: Pos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs() - 1
    }

    /// Floor of the Euclidean distance between two cells. This is the
    /// metric attack ranges are measured in.
    pub fn range_distance(self, other: Pos) -> i32 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx.hypot(dy) as i32
    }
}

/// A static obstacle occupying one cell for the lifetime of the scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Pos,
}

/// Dense obstacle occupancy for a bounded grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
}

impl Grid {
    /// Creates an empty grid with no obstacle cells.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid extents must be positive");
        Grid {
            width,
            height,
            blocked: vec![false; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Marks a cell as obstacle-occupied. The caller must have bounds-checked.
    pub fn set_obstacle(&mut self, pos: Pos) {
        let idx = self.index(pos);
        self.blocked[idx] = true;
    }

    /// Returns true iff the cell is in bounds and holds an obstacle.
    pub fn is_blocked(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.blocked[self.index(pos)]
    }

    /// Returns true iff a unit may stand on the cell: inside bounds and not
    /// an obstacle cell. Unit positions are deliberately not consulted, so
    /// two units may legally occupy the same cell.
    pub fn can_enter(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && !self.blocked[self.index(pos)]
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        (pos.y * self.width + pos.x) as usize
    }
}

/// Walks the Bresenham line from `a` to `b` (inclusive) and returns true if
/// any visited cell is an obstacle cell. Used by the positioning term to
/// detect approach paths cut off by obstacles.
pub fn line_crosses_obstacle(grid: &Grid, a: Pos, b: Pos) -> bool {
    let mut x = a.x;
    let mut y = a.y;
    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if grid.is_blocked(Pos::new(x, y)) {
            return true;
        }
        if x == b.x && y == b.y {
            return false;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
