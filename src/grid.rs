// Petri - Conway's Game of Life on a toroidal grid
// Licensed under MIT License

use anyhow::{bail, Result};

use crate::cell::{Cell, CellState};

/// A rows x cols field of [`Cell`]s with toroidal wraparound.
///
/// The grid is stored row-major in a single `Vec`, so a ragged layout is
/// unrepresentable; the only malformed shapes (zero rows or columns) are
/// rejected at construction. Every cell, corners included, has exactly 8
/// neighbors.
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a rows x cols grid of dead cells. Callers regenerate the whole
    /// grid on resize and reseed it afterwards; nothing is preserved.
    pub fn generate(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            bail!("grid dimensions must be nonzero, got {rows}x{cols}");
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new(col as u32, row as u32));
            }
        }

        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            Some(&self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        if row < self.rows && col < self.cols {
            Some(&mut self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Mutable iteration for the rendering consumer, which clears the dirty
    /// flags it has painted.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Raises the cell at (row, col) to alive. Direct "create life" input.
    ///
    /// Out-of-range coordinates are rejected, never wrapped or clamped: the
    /// host may hold stale pixel geometry across a resize, and silently
    /// indexing a different cell would alter the simulation.
    pub fn set_alive(&mut self, row: usize, col: usize) -> Result<()> {
        let (rows, cols) = (self.rows, self.cols);
        match self.cell_mut(row, col) {
            Some(cell) => {
                cell.set_state(CellState::Alive);
                Ok(())
            }
            None => bail!("cell ({row}, {col}) outside {rows}x{cols} grid"),
        }
    }

    /// Wrapped coordinates of the 8 neighbors, in a fixed order: the row
    /// above left-to-right, then same-row left and right, then the row below
    /// left-to-right.
    fn neighbor_coords(&self, row: usize, col: usize) -> [(usize, usize); 8] {
        let above = if row == 0 { self.rows - 1 } else { row - 1 };
        let below = if row + 1 == self.rows { 0 } else { row + 1 };
        let left = if col == 0 { self.cols - 1 } else { col - 1 };
        let right = if col + 1 == self.cols { 0 } else { col + 1 };

        [
            (above, left),
            (above, col),
            (above, right),
            (row, left),
            (row, right),
            (below, left),
            (below, col),
            (below, right),
        ]
    }

    /// The 8 toroidally-wrapped neighbors of (row, col), in the fixed order
    /// documented on [`Grid::neighbor_coords`].
    ///
    /// Out-of-range coordinates indicate a caller-sequencing bug and fail
    /// fast rather than wrapping.
    pub fn neighbors(&self, row: usize, col: usize) -> Result<[&Cell; 8]> {
        if row >= self.rows || col >= self.cols {
            bail!(
                "neighbor lookup at ({row}, {col}) outside {}x{} grid",
                self.rows,
                self.cols
            );
        }

        let coords = self.neighbor_coords(row, col);
        Ok(coords.map(|(r, c)| &self.cells[r * self.cols + c]))
    }

    fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        self.neighbor_coords(row, col)
            .iter()
            .filter(|&&(r, c)| self.cells[r * self.cols + c].is_alive())
            .count() as u8
    }

    /// Advances the whole grid one generation.
    ///
    /// Neighbor counts are taken against the current generation for every
    /// cell before any state is applied, so the update is simultaneous, not
    /// sweep-order dependent. All changes flow through [`Cell::set_state`],
    /// the sole place the dirty flag is raised.
    pub fn step(&mut self) {
        let mut next = Vec::with_capacity(self.cells.len());
        for row in 0..self.rows {
            for col in 0..self.cols {
                let alive = self.live_neighbors(row, col);
                let cell = &self.cells[row * self.cols + col];
                let state = match (cell.state(), alive) {
                    (CellState::Alive, 2) | (CellState::Alive, 3) => CellState::Alive,
                    (CellState::Alive, _) => CellState::Dead,
                    (CellState::Dead, 3) => CellState::Alive,
                    (CellState::Dead, _) => CellState::Dead,
                };
                next.push(state);
            }
        }

        for (cell, state) in self.cells.iter_mut().zip(next) {
            cell.set_state(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alive_coords(grid: &Grid) -> Vec<(usize, usize)> {
        grid.cells()
            .filter(|c| c.is_alive())
            .map(|c| (c.y() as usize, c.x() as usize))
            .collect()
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(Grid::generate(0, 10).is_err());
        assert!(Grid::generate(10, 0).is_err());
        assert!(Grid::generate(0, 0).is_err());
    }

    #[test]
    fn generate_places_cells_deterministically() {
        let grid = Grid::generate(3, 4).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.cells().count(), 12);
        let cell = grid.cell(2, 3).unwrap();
        assert_eq!((cell.y(), cell.x()), (2, 3));
        assert!(!cell.is_alive());
    }

    #[test]
    fn corner_neighbors_wrap_toroidally() {
        let grid = Grid::generate(4, 6).unwrap();

        let of_origin = grid.neighbors(0, 0).unwrap();
        assert!(of_origin
            .iter()
            .any(|c| (c.y() as usize, c.x() as usize) == (3, 5)));

        let of_far_corner = grid.neighbors(3, 5).unwrap();
        assert!(of_far_corner
            .iter()
            .any(|c| (c.y() as usize, c.x() as usize) == (0, 0)));
    }

    #[test]
    fn wraparound_holds_on_a_single_row_grid() {
        let grid = Grid::generate(1, 3).unwrap();
        let neighbors = grid.neighbors(0, 0).unwrap();
        // Degenerate torus: the row above and below both wrap to row 0.
        assert_eq!(neighbors.len(), 8);
        assert!(neighbors.iter().all(|c| c.y() == 0));
    }

    #[test]
    fn neighbor_order_is_fixed() {
        let grid = Grid::generate(5, 5).unwrap();
        let coords: Vec<_> = grid
            .neighbors(2, 2)
            .unwrap()
            .iter()
            .map(|c| (c.y() as usize, c.x() as usize))
            .collect();
        assert_eq!(
            coords,
            vec![
                (1, 1),
                (1, 2),
                (1, 3),
                (2, 1),
                (2, 3),
                (3, 1),
                (3, 2),
                (3, 3)
            ]
        );
    }

    #[test]
    fn neighbor_lookup_out_of_range_fails() {
        let grid = Grid::generate(3, 3).unwrap();
        assert!(grid.neighbors(3, 0).is_err());
        assert!(grid.neighbors(0, 3).is_err());
    }

    #[test]
    fn set_alive_rejects_out_of_range() {
        let mut grid = Grid::generate(3, 3).unwrap();
        assert!(grid.set_alive(0, 3).is_err());
        assert!(grid.set_alive(3, 0).is_err());
        assert!(grid.set_alive(2, 2).is_ok());
        assert!(grid.cell(2, 2).unwrap().is_alive());
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        // 5x5 keeps the wrapped edges out of the blinker's way.
        let mut grid = Grid::generate(5, 5).unwrap();
        for row in 1..4 {
            grid.set_alive(row, 2).unwrap();
        }

        grid.step();
        let mut horizontal = alive_coords(&grid);
        horizontal.sort_unstable();
        assert_eq!(horizontal, vec![(2, 1), (2, 2), (2, 3)]);

        grid.step();
        let mut vertical = alive_coords(&grid);
        vertical.sort_unstable();
        assert_eq!(vertical, vec![(1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn block_is_a_still_life() {
        let mut grid = Grid::generate(5, 5).unwrap();
        for (row, col) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            grid.set_alive(row, col).unwrap();
        }

        for _ in 0..10 {
            grid.step();
        }

        let mut alive = alive_coords(&grid);
        alive.sort_unstable();
        assert_eq!(alive, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }

    #[test]
    fn step_marks_exactly_the_changed_cells_dirty() {
        let mut grid = Grid::generate(5, 5).unwrap();
        for row in 1..4 {
            grid.set_alive(row, 2).unwrap();
        }
        for cell in grid.cells_mut() {
            cell.clear_dirty();
        }

        grid.step();

        let mut dirty: Vec<_> = grid
            .cells()
            .filter(|c| c.is_dirty())
            .map(|c| (c.y() as usize, c.x() as usize))
            .collect();
        dirty.sort_unstable();
        // (1,2) and (3,2) died, (2,1) and (2,3) were born; (2,2) survived.
        assert_eq!(dirty, vec![(1, 2), (2, 1), (2, 3), (3, 2)]);
    }
}
