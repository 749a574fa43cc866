//! Grid representation for the Game of Life
//!
//! Cells live in a flat arena indexed by `j * width + i`, where `i` is the
//! column and `j` the row. Every cell keeps the arena indices of its in-bounds
//! Moore neighbors, computed once when the grid is built.

use super::LifeRules;
use crate::error::{GridError, GridResult};
use itertools::iproduct;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Moore neighborhood offsets as `(di, dj)`
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0), (1, 0),
    (-1, 1), (0, 1), (1, 1),
];

/// Grids with at least this many cells compute the next generation in parallel
pub const PARALLEL_THRESHOLD: usize = 4096;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    /// The opposite state
    pub fn flipped(self) -> Self {
        match self {
            CellState::Dead => CellState::Alive,
            CellState::Alive => CellState::Dead,
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellState::Dead => write!(f, "dead"),
            CellState::Alive => write!(f, "alive"),
        }
    }
}

/// A single cell in the arena
#[derive(Debug, Clone)]
struct Cell {
    state: CellState,
    pending_state: Option<CellState>,
    neighbors: Vec<usize>,
}

impl Cell {
    fn dead(neighbors: Vec<usize>) -> Self {
        Self {
            state: CellState::Dead,
            pending_state: Some(CellState::Dead),
            neighbors,
        }
    }

    fn set(&mut self, state: CellState) {
        self.state = state;
        self.pending_state = Some(state);
    }

    fn commit(&mut self) {
        // An unset pending value commits as dead
        let next = self.pending_state.unwrap_or(CellState::Dead);
        self.set(next);
    }
}

/// Everything a renderer needs to draw one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub i: usize,
    pub j: usize,
    pub state: CellState,
    pub neighbor_count: u8,
}

/// Emitted by [`Grid::toggle`] for the toggled cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateChanged {
    pub i: usize,
    pub j: usize,
    pub state: CellState,
}

/// Fixed-size Game of Life grid
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    generation: u64,
    notifications: Vec<StateChanged>,
}

impl Grid {
    /// Create a new grid with every cell dead
    pub fn new(width: usize, height: usize) -> GridResult<Self> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimension { width, height });
        }

        let cells = iproduct!(0..height, 0..width)
            .map(|(j, i)| Cell::dead(Self::neighbor_indices(width, height, i, j)))
            .collect();

        log::debug!("Created {}x{} grid", width, height);

        Ok(Self {
            width,
            height,
            cells,
            generation: 0,
            notifications: Vec::new(),
        })
    }

    fn neighbor_indices(width: usize, height: usize, i: usize, j: usize) -> Vec<usize> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(di, dj)| {
                let ni = i.checked_add_signed(di).filter(|&ni| ni < width)?;
                let nj = j.checked_add_signed(dj).filter(|&nj| nj < height)?;
                Some(nj * width + ni)
            })
            .collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of generations advanced since construction or the last reset
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Convert 2D coordinates to an arena index
    fn index(&self, i: usize, j: usize) -> GridResult<usize> {
        if i < self.width && j < self.height {
            Ok(j * self.width + i)
        } else {
            Err(GridError::OutOfBounds {
                i,
                j,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn position(&self, idx: usize) -> (usize, usize) {
        (idx % self.width, idx / self.width)
    }

    /// Current state of the cell at `(i, j)`
    pub fn cell_state(&self, i: usize, j: usize) -> GridResult<CellState> {
        let idx = self.index(i, j)?;
        Ok(self.cells[idx].state)
    }

    /// Next-generation value of the cell at `(i, j)`, `None` if unset
    pub fn pending_state(&self, i: usize, j: usize) -> GridResult<Option<CellState>> {
        let idx = self.index(i, j)?;
        Ok(self.cells[idx].pending_state)
    }

    /// Flip the cell at `(i, j)` and return its new state
    pub fn toggle(&mut self, i: usize, j: usize) -> GridResult<CellState> {
        let idx = self.index(i, j)?;
        let cell = &mut self.cells[idx];
        let state = cell.state.flipped();
        cell.set(state);

        self.notifications.push(StateChanged { i, j, state });
        Ok(state)
    }

    /// Take every notification queued since the last call
    pub fn drain_notifications(&mut self) -> Vec<StateChanged> {
        std::mem::take(&mut self.notifications)
    }

    /// Positions of the in-bounds neighbors of `(i, j)`
    pub fn neighbors(&self, i: usize, j: usize) -> GridResult<Vec<(usize, usize)>> {
        let idx = self.index(i, j)?;
        Ok(self.cells[idx]
            .neighbors
            .iter()
            .map(|&n| self.position(n))
            .collect())
    }

    /// Count living neighbors of the cell at `(i, j)`
    pub fn neighbor_count(&self, i: usize, j: usize) -> GridResult<u8> {
        let idx = self.index(i, j)?;
        Ok(self.live_neighbors(&self.cells[idx]))
    }

    fn live_neighbors(&self, cell: &Cell) -> u8 {
        cell.neighbors
            .iter()
            .filter(|&&n| self.cells[n].state.is_alive())
            .count() as u8
    }

    /// Advance the whole grid by one generation
    ///
    /// Every pending state is computed from the states as they stood on entry
    /// before any cell is committed.
    pub fn advance_generation(&mut self) {
        let snapshot = &*self;
        let rule = |cell: &Cell| LifeRules::next_state(cell.state, snapshot.live_neighbors(cell));
        let next: Vec<CellState> = if snapshot.cells.len() >= PARALLEL_THRESHOLD {
            snapshot.cells.par_iter().map(rule).collect()
        } else {
            snapshot.cells.iter().map(rule).collect()
        };

        for (cell, state) in self.cells.iter_mut().zip(next) {
            cell.pending_state = Some(state);
        }

        for cell in &mut self.cells {
            cell.commit();
        }

        self.generation += 1;
        log::trace!(
            "Advanced to generation {} ({} living)",
            self.generation,
            self.living_count()
        );
    }

    /// Kill every cell and restart the generation count
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.set(CellState::Dead);
        }
        self.generation = 0;
        self.notifications.clear();
        log::debug!("Grid reset");
    }

    /// Every cell with its state and live neighbor count, row by row
    pub fn snapshot(&self) -> Vec<CellView> {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                let (i, j) = self.position(idx);
                CellView {
                    i,
                    j,
                    state: cell.state,
                    neighbor_count: self.live_neighbors(cell),
                }
            })
            .collect()
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.state.is_alive())
            .map(|(idx, _)| self.position(idx))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.state.is_alive()).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.state.is_alive())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                let symbol = if cell.state.is_alive() { '█' } else { '·' };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
