//! Core types for the traffic simulation

/// A wrapper type for car IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CarId(pub u64);

/// A wrapper type for link IDs
///
/// The inner value is the index of the link's edge in the grid graph, which
/// is also its position in the world's link table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub usize);

/// Compass direction of travel
///
/// Variants are declared in clockwise order, which the turn mapping relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const CLOCKWISE: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Position in the clockwise ordering, North = 0
    pub fn clockwise_index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// One step clockwise
    pub fn rotate_cw(self) -> Direction {
        Self::CLOCKWISE[(self.clockwise_index() + 1) % 4]
    }

    /// One step counter-clockwise
    pub fn rotate_ccw(self) -> Direction {
        Self::CLOCKWISE[(self.clockwise_index() + 3) % 4]
    }

    /// Direction of travel after taking `turn` while heading `self`
    pub fn apply(self, turn: Turn) -> Direction {
        match turn {
            Turn::Left => self.rotate_ccw(),
            Turn::Straight => self,
            Turn::Right => self.rotate_cw(),
        }
    }
}

/// Turn a car takes at an intersection, relative to its approach direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Straight,
    Right,
}

/// Grid coordinates of an intersection
///
/// `row` grows southwards, `col` grows eastwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The adjacent intersection in `direction`, or `None` if that step
    /// leaves an `n`×`n` grid
    pub fn neighbor(&self, direction: Direction, n: usize) -> Option<GridPos> {
        match direction {
            Direction::North if self.row > 0 => Some(GridPos::new(self.row - 1, self.col)),
            Direction::East if self.col + 1 < n => Some(GridPos::new(self.row, self.col + 1)),
            Direction::South if self.row + 1 < n => Some(GridPos::new(self.row + 1, self.col)),
            Direction::West if self.col > 0 => Some(GridPos::new(self.row, self.col - 1)),
            _ => None,
        }
    }

    /// True if the two positions differ by exactly one in exactly one coordinate
    pub fn is_adjacent(&self, other: &GridPos) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

/// A car in the simulation
///
/// Cars are deliberately not `Clone`: a car lives in exactly one link buffer
/// or queue at a time and moves between them by value.
#[derive(Debug, PartialEq, Eq)]
pub struct Car {
    pub id: CarId,
    /// Tick at which the car was spawned at the boundary
    pub entered_at: u64,
}

impl Car {
    pub fn new(id: CarId, entered_at: u64) -> Self {
        Self { id, entered_at }
    }

    /// Ticks spent in the grid if the car exits at `tick`
    pub fn travel_time(&self, tick: u64) -> u64 {
        tick.saturating_sub(self.entered_at)
    }
}
