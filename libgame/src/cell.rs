use std::hash::{Hash, Hasher};

use crate::pos::Position;

/// A single grid cell. Two cells are the same cell if they sit at the same coordinates, whatever
/// their current state.
#[derive(Debug, Clone)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub alive: bool,

    /// Only meaningful right after the count phase of a generation.
    pub alive_neighbours: u8,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            alive: false,
            alive_neighbours: 0,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn toggle(&mut self) {
        self.alive = !self.alive;
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        (self.x, self.y) == (other.x, other.y)
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.x, self.y).hash(state);
    }
}
