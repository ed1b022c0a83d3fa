// Petri - Conway's Game of Life on a toroidal grid
// Licensed under MIT License

/// Alive/dead status of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Alive,
    Dead,
}

/// One cell of the grid: its position, its state, and a redraw marker.
///
/// `x`/`y` are grid coordinates (column, row), not pixels; mapping to the
/// surface is the renderer's business. The dirty flag is raised only by a
/// real state transition in [`Cell::set_state`] and cleared only by the
/// rendering consumer through [`Cell::clear_dirty`].
#[derive(Debug, Clone)]
pub struct Cell {
    x: u32,
    y: u32,
    state: CellState,
    dirty: bool,
}

impl Cell {
    /// New cells start dead and dirty, so a freshly generated grid gets its
    /// dead background painted on the first pass.
    pub(crate) fn new(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            state: CellState::Dead,
            dirty: true,
        }
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state == CellState::Alive
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Sets the state, raising `dirty` iff this is a real transition.
    ///
    /// A call with the current state leaves `dirty` exactly as it was: an
    /// earlier unconsumed change must stay visible to the renderer, and a
    /// non-change must not fake one.
    pub fn set_state(&mut self, state: CellState) {
        if self.state != state {
            self.dirty = true;
        }
        self.state = state;
    }

    /// Acknowledgment from the rendering pass that this cell was painted.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_dead_and_dirty() {
        let cell = Cell::new(3, 7);
        assert_eq!(cell.x(), 3);
        assert_eq!(cell.y(), 7);
        assert_eq!(cell.state(), CellState::Dead);
        assert!(cell.is_dirty());
    }

    #[test]
    fn transition_raises_dirty() {
        let mut cell = Cell::new(0, 0);
        cell.clear_dirty();
        cell.set_state(CellState::Alive);
        assert!(cell.is_alive());
        assert!(cell.is_dirty());
    }

    #[test]
    fn non_transition_leaves_dirty_untouched() {
        let mut cell = Cell::new(0, 0);
        cell.clear_dirty();
        cell.set_state(CellState::Dead);
        assert!(!cell.is_dirty(), "no transition must not raise dirty");

        cell.set_state(CellState::Alive);
        assert!(cell.is_dirty());
        cell.set_state(CellState::Alive);
        assert!(
            cell.is_dirty(),
            "no transition must not clear an unconsumed dirty flag"
        );
    }

    #[test]
    fn only_the_consumer_clears_dirty() {
        let mut cell = Cell::new(0, 0);
        cell.set_state(CellState::Alive);
        cell.clear_dirty();
        assert!(!cell.is_dirty());
        cell.set_state(CellState::Dead);
        assert!(cell.is_dirty());
    }
}
