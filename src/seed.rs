// Petri - Conway's Game of Life on a toroidal grid
// Licensed under MIT License

use anyhow::{bail, Result};
use rand::Rng;

use crate::cell::CellState;
use crate::grid::Grid;

/// Symmetric 8-cell starter dropped at the grid midpoint by
/// [`seed_center_pattern`]. Offsets are (dx, dy) relative to the center.
pub const CENTER_PATTERN: &[(i64, i64)] = &[
    (-2, -1),
    (2, -1),
    (-3, 1),
    (-2, 1),
    (-1, 1),
    (1, 1),
    (2, 1),
    (3, 1),
];

/// Alive probability for a given seed density.
///
/// A cell is lit when `ln(10 * r) < -density` for a uniform draw `r`, which
/// holds with probability `exp(-density) / 10`. The default density 0.3
/// lights up about 7.4% of the grid.
pub fn alive_probability(density: f32) -> f64 {
    ((-f64::from(density)).exp() / 10.0).clamp(0.0, 1.0)
}

/// Seeds every cell independently with the density-derived probability.
///
/// A pure per-cell Bernoulli draw: no neighbor or population constraint, so a
/// fully empty or fully full grid is a legal outcome. Cells are only ever
/// raised to alive; an already-alive cell is never lowered.
pub fn seed_random<R: Rng + ?Sized>(grid: &mut Grid, density: f32, rng: &mut R) -> Result<()> {
    if !density.is_finite() || density < 0.0 {
        bail!("seed density must be finite and non-negative, got {density}");
    }

    let p = alive_probability(density);
    for cell in grid.cells_mut() {
        if rng.gen_bool(p) {
            cell.set_state(CellState::Alive);
        }
    }
    Ok(())
}

/// Raises the cells at `offsets` around `center` (row, col) to alive.
///
/// Every offset is validated against the grid bounds before any cell is
/// touched; an offset that lands outside is an error, never clamped or
/// wrapped, since a clipped pattern would be a different simulation than the
/// one asked for.
pub fn seed_pattern(grid: &mut Grid, offsets: &[(i64, i64)], center: (usize, usize)) -> Result<()> {
    let (center_row, center_col) = center;
    let mut targets = Vec::with_capacity(offsets.len());

    for &(dx, dy) in offsets {
        let row = center_row as i64 + dy;
        let col = center_col as i64 + dx;
        if row < 0 || col < 0 || row as usize >= grid.rows() || col as usize >= grid.cols() {
            bail!(
                "pattern offset ({dx}, {dy}) from center ({center_row}, {center_col}) \
                 lands outside {}x{} grid",
                grid.rows(),
                grid.cols()
            );
        }
        targets.push((row as usize, col as usize));
    }

    for (row, col) in targets {
        grid.set_alive(row, col)?;
    }
    Ok(())
}

/// Drops [`CENTER_PATTERN`] at the grid midpoint.
pub fn seed_center_pattern(grid: &mut Grid) -> Result<()> {
    let center = (grid.rows() / 2, grid.cols() / 2);
    seed_pattern(grid, CENTER_PATTERN, center)
}
