use std::{fmt, iter::FusedIterator, slice};

use itertools::Itertools;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::iter::{
    IndexedParallelIterator, IntoParallelIterator, IntoParallelRefMutIterator, ParallelIterator,
};

use crate::{
    cell::Cell,
    error::{ConfigError, OutOfBounds},
    pos::Position,
    rule::{Condition, Rule},
};

/// Moore neighbourhood offsets, in the order neighbour lists are built.
const NEIGHBOUR_OFFSETS: [[isize; 2]; 8] = [
    [-1, -1],
    [0, -1],
    [1, -1],
    [-1, 0],
    [1, 0],
    [-1, 1],
    [0, 1],
    [1, 1],
];

/// Largest accepted board side. Bigger grids can't be allocated in any reasonable amount of memory.
pub const MAX_SIZE: usize = 4096;

/// Gets told about every generation completed by [`Board::run_for_n`].
pub trait GenerationObserver {
    /// `generation` counts from 1 within the current run.
    fn generation_completed(&mut self, generation: usize);
}

impl<F> GenerationObserver for F
where
    F: FnMut(usize),
{
    fn generation_completed(&mut self, generation: usize) {
        self(generation)
    }
}

/// A square, bounded grid of cells together with the rule that steps it.
///
/// Cells are stored row-major (`y * size + x`). Each cell's neighbours are resolved once into
/// cell indices when the grid is built, so stepping never has to look at coordinates again.
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    topology: Vec<Vec<usize>>,
    rule: Rule,
}

impl Board {
    pub fn new(size: usize, rule: Rule) -> Result<Self, ConfigError> {
        check_size(size)?;

        let mut board = Self {
            size,
            cells: dead_cells(size),
            topology: Vec::new(),
            rule,
        };
        board.build_topology();

        Ok(board)
    }

    pub fn with_conditions(
        size: usize,
        live_rule: Condition,
        birth_rule: Condition,
    ) -> Result<Self, ConfigError> {
        Self::new(size, Rule::new(live_rule, birth_rule))
    }

    /// Recomputes every cell's clipped Moore neighbourhood. Only needed when the grid geometry
    /// changes; toggling and stepping leave it alone.
    pub fn build_topology(&mut self) {
        let size = self.size;

        self.topology = self
            .cells
            .iter()
            .map(|cell| {
                NEIGHBOUR_OFFSETS
                    .iter()
                    .filter_map(|&[dx, dy]| cell.position().offset(dx, dy))
                    .filter(|neighbour| neighbour.within(size))
                    .map(|neighbour| neighbour.y * size + neighbour.x)
                    .collect()
            })
            .collect();

        log::debug!("Built neighbour topology for a {size}x{size} board");
    }

    /// Replaces the grid with an all-dead one of the new size.
    pub fn resize(&mut self, size: usize) -> Result<(), ConfigError> {
        check_size(size)?;

        self.size = size;
        self.cells = dead_cells(size);
        self.build_topology();

        Ok(())
    }

    /// Assigns every cell a fair coin flip from a generator seeded with `seed`, or with a fresh
    /// random seed if none is given. Returns the seed that was used, so the board can be
    /// reproduced later.
    pub fn set_random_board(&mut self, seed: Option<u64>) -> u64 {
        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        for cell in &mut self.cells {
            cell.alive = rng.random_bool(0.5);
        }

        log::debug!("Randomised board with seed {seed}");
        seed
    }

    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.alive = false;
            cell.alive_neighbours = 0;
        }
    }

    /// Advances the board by one generation.
    ///
    /// All neighbour counts are taken before any cell changes state, so every cell transitions
    /// based on the same snapshot.
    pub fn generation(&mut self) {
        for index in 0..self.cells.len() {
            let alive_neighbours = self.alive_neighbours_of(index);
            self.cells[index].alive_neighbours = alive_neighbours;
        }

        let rule = self.rule;
        for cell in &mut self.cells {
            cell.alive = rule.next_state(cell.alive, cell.alive_neighbours as usize);
        }

        log::trace!("Generation done, {} cells alive", self.alive_count());
    }

    /// Same as [`Board::generation`] with both phases spread over the rayon thread pool.
    pub fn par_generation(&mut self) {
        let counts: Vec<u8> = (0..self.cells.len())
            .into_par_iter()
            .map(|index| self.alive_neighbours_of(index))
            .collect();

        let rule = self.rule;
        self.cells
            .par_iter_mut()
            .zip(counts)
            .for_each(|(cell, alive_neighbours)| {
                cell.alive_neighbours = alive_neighbours;
                cell.alive = rule.next_state(cell.alive, alive_neighbours as usize);
            });

        log::trace!("Generation done, {} cells alive", self.alive_count());
    }

    pub fn run_for_n<O>(&mut self, n: usize, observer: O)
    where
        O: GenerationObserver,
    {
        self.run_with(n, Self::generation, observer);
    }

    pub fn par_run_for_n<O>(&mut self, n: usize, observer: O)
    where
        O: GenerationObserver,
    {
        self.run_with(n, Self::par_generation, observer);
    }

    fn run_with<O>(&mut self, n: usize, step: fn(&mut Self), mut observer: O)
    where
        O: GenerationObserver,
    {
        for generation in 1..=n {
            step(self);
            observer.generation_completed(generation);
        }
    }

    pub fn toggle_cell<P>(&mut self, pos: P) -> Result<(), OutOfBounds>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        self.cells[index].toggle();
        Ok(())
    }

    pub fn set_cell<P>(&mut self, pos: P, alive: bool) -> Result<(), OutOfBounds>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        self.cells[index].alive = alive;
        Ok(())
    }

    pub fn cell<P>(&self, pos: P) -> Result<&Cell, OutOfBounds>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        Ok(&self.cells[index])
    }

    pub fn is_alive<P>(&self, pos: P) -> Result<bool, OutOfBounds>
    where
        P: Into<Position>,
    {
        self.cell(pos).map(|cell| cell.alive)
    }

    /// Positions of the cells counted as neighbours of `pos`.
    pub fn neighbours<P>(
        &self,
        pos: P,
    ) -> Result<impl Iterator<Item = Position> + '_, OutOfBounds>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        Ok(self.topology[index]
            .iter()
            .map(|&neighbour| self.cells[neighbour].position()))
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells, always `size * size`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.alive).count()
    }

    pub fn cells(&self) -> Cells<'_> {
        Cells {
            inner: self.cells.iter(),
        }
    }

    pub fn states(&self) -> impl Iterator<Item = (Position, bool)> + '_ {
        self.cells().map(|(pos, cell)| (pos, cell.alive))
    }

    /// Row-major copy of every cell's alive flag.
    pub fn alive_snapshot(&self) -> Vec<bool> {
        self.cells.iter().map(|cell| cell.alive).collect()
    }

    fn alive_neighbours_of(&self, index: usize) -> u8 {
        self.topology[index]
            .iter()
            .filter(|&&neighbour| self.cells[neighbour].alive)
            .count() as u8
    }

    fn pos_to_index<P>(&self, pos: P) -> Result<usize, OutOfBounds>
    where
        P: Into<Position>,
    {
        let position = pos.into();

        if !position.within(self.size) {
            return Err(OutOfBounds {
                position,
                size: self.size,
            });
        }

        Ok(position.x + position.y * self.size)
    }
}

fn check_size(size: usize) -> Result<(), ConfigError> {
    match size {
        0 => Err(ConfigError::InvalidSize),
        size if size > MAX_SIZE => Err(ConfigError::TooLarge(size)),
        _ => Ok(()),
    }
}

fn dead_cells(size: usize) -> Vec<Cell> {
    (0..size)
        .cartesian_product(0..size)
        .map(|(y, x)| Cell::new(x, y))
        .collect()
}

/// Row-major iterator over a board's cells and their positions.
#[derive(Debug, Clone)]
pub struct Cells<'a> {
    inner: slice::Iter<'a, Cell>,
}

impl<'a> Iterator for Cells<'a> {
    type Item = (Position, &'a Cell);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|cell| (cell.position(), cell))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Cells<'_> {}

impl FusedIterator for Cells<'_> {}

impl<'a> IntoIterator for &'a Board {
    type Item = (Position, &'a Cell);
    type IntoIter = Cells<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: String = row
                .iter()
                .map(|cell| if cell.alive { '#' } else { '.' })
                .collect();
            writeln!(f, "{line}")?;
        }

        Ok(())
    }
}
