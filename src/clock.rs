// Petri - Conway's Game of Life on a toroidal grid
// Licensed under MIT License

use std::time::Duration;

use anyhow::{bail, Result};

use crate::grid::Grid;

/// Fixed-rate tick scheduler for the simulation.
///
/// The clock owns no timer: the host feeds every operation a `now` timestamp,
/// a [`Duration`] offset from any epoch the host picks (the binary uses
/// `Instant::now()` at startup; tests use synthetic values). Two states,
/// Running and Paused; the clock starts Running and runs until the host stops
/// driving it.
pub struct SimulationClock {
    tick_interval: Duration,
    last_tick: Duration,
    paused: bool,
    paused_at: Duration,
}

impl SimulationClock {
    pub fn new(tick_interval: Duration) -> Result<Self> {
        if tick_interval.is_zero() {
            bail!("tick interval must be nonzero");
        }
        Ok(Self {
            tick_interval,
            last_tick: Duration::ZERO,
            paused: false,
            paused_at: Duration::ZERO,
        })
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Time accumulated toward the next tick, excluding any in-progress
    /// pause. A non-monotonic `now` reads as zero.
    pub fn effective_elapsed(&self, now: Duration) -> Duration {
        let reference = if self.paused { self.paused_at } else { now };
        reference.checked_sub(self.last_tick).unwrap_or(Duration::ZERO)
    }

    /// Steps the grid once if at least one tick interval has elapsed.
    ///
    /// Bursty catch-up collapses to a single step: no matter how many
    /// intervals have passed, one generation is advanced and `last_tick` is
    /// resynchronized to `now - (elapsed % tick_interval)`, preserving tick
    /// phase across irregular call timing without accumulating drift.
    /// Returns whether a step ran. No-op while paused; a `now` earlier than
    /// `last_tick` (non-monotonic host clock) clamps to zero elapsed.
    pub fn advance(&mut self, now: Duration, grid: &mut Grid) -> bool {
        if self.paused {
            return false;
        }

        let elapsed = now.checked_sub(self.last_tick).unwrap_or(Duration::ZERO);
        if elapsed < self.tick_interval {
            return false;
        }

        let phase_ns = elapsed.as_nanos() % self.tick_interval.as_nanos();
        self.last_tick = now - Duration::from_nanos(phase_ns as u64);

        grid.step();
        true
    }

    /// Freezes elapsed-time accounting at `now`. No-op if already paused, so
    /// a host that gets a blur event while paused does no harm.
    pub fn pause(&mut self, now: Duration) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.paused_at = now;
    }

    /// Resumes the clock, shifting `last_tick` forward by the paused
    /// duration so the next `advance` sees none of the time spent paused.
    /// No-op if not paused.
    pub fn unpause(&mut self, now: Duration) {
        if !self.paused {
            return;
        }
        self.paused = false;
        let paused_for = now.checked_sub(self.paused_at).unwrap_or(Duration::ZERO);
        self.last_tick += paused_for;
    }

    /// Changes the interval used by future `advance` calls. `last_tick` is
    /// left alone; the new rate takes effect from the current phase.
    pub fn set_tick_interval(&mut self, tick_interval: Duration) -> Result<()> {
        if tick_interval.is_zero() {
            bail!("tick interval must be nonzero");
        }
        self.tick_interval = tick_interval;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn test_grid() -> Grid {
        Grid::generate(4, 4).unwrap()
    }

    /// A 5x5 blinker grid; its phase flips every generation, so the number
    /// of steps taken is observable.
    fn stepping_grid() -> Grid {
        let mut grid = Grid::generate(5, 5).unwrap();
        for row in 1..4 {
            grid.set_alive(row, 2).unwrap();
        }
        grid
    }

    fn generation_parity(grid: &Grid) -> bool {
        // Vertical blinker on even generations, horizontal on odd.
        grid.cell(1, 2).unwrap().is_alive()
    }

    #[test]
    fn burst_collapses_to_one_step_and_preserves_phase() {
        let mut clock = SimulationClock::new(ms(200)).unwrap();
        let mut grid = stepping_grid();
        assert!(generation_parity(&grid));

        assert!(!clock.advance(ms(0), &mut grid));
        assert!(!clock.advance(ms(50), &mut grid));
        assert!(clock.advance(ms(480), &mut grid));
        // One step only, even though two intervals elapsed.
        assert!(!generation_parity(&grid));
        // Resynchronized to 480 - (480 % 200) = 400.
        assert_eq!(clock.effective_elapsed(ms(480)), ms(80));
        assert_eq!(clock.effective_elapsed(ms(400)), ms(0));
    }

    #[test]
    fn advance_before_interval_does_not_step() {
        let mut clock = SimulationClock::new(ms(200)).unwrap();
        let mut grid = stepping_grid();
        assert!(!clock.advance(ms(199), &mut grid));
        assert!(generation_parity(&grid));
        assert!(clock.advance(ms(200), &mut grid));
    }

    #[test]
    fn paused_clock_never_steps() {
        let mut clock = SimulationClock::new(ms(200)).unwrap();
        let mut grid = stepping_grid();
        clock.pause(ms(100));
        assert!(clock.is_paused());
        assert!(!clock.advance(ms(10_000), &mut grid));
        assert!(generation_parity(&grid));
    }

    #[test]
    fn pause_and_unpause_are_time_neutral() {
        let mut clock = SimulationClock::new(ms(200)).unwrap();
        let mut grid = test_grid();

        // Establish last_tick = 1000.
        assert!(clock.advance(ms(1000), &mut grid));
        assert_eq!(clock.effective_elapsed(ms(1000)), ms(0));

        // Paused from 1000 to 6000; effective time stands still.
        clock.pause(ms(1000));
        assert_eq!(clock.effective_elapsed(ms(4321)), ms(0));
        clock.unpause(ms(6000));

        // t=6100 is effective t=1100: only 100ms of effective time, no step.
        assert!(!clock.advance(ms(6100), &mut grid));
        assert_eq!(clock.effective_elapsed(ms(6100)), ms(100));

        // Effective t=1250 crosses the interval exactly like an unpaused
        // advance at 1250 would: steps, with 50ms of phase left over.
        assert!(clock.advance(ms(6250), &mut grid));
        assert_eq!(clock.effective_elapsed(ms(6250)), ms(50));
    }

    #[test]
    fn double_pause_and_double_unpause_are_no_ops() {
        let mut clock = SimulationClock::new(ms(200)).unwrap();
        let mut grid = test_grid();

        clock.pause(ms(1000));
        clock.pause(ms(5000)); // must not move paused_at forward
        clock.unpause(ms(6000));
        assert_eq!(clock.effective_elapsed(ms(6000)), ms(1000));

        clock.unpause(ms(9000)); // not paused: must not shift last_tick
        assert_eq!(clock.effective_elapsed(ms(6000)), ms(1000));

        assert!(clock.advance(ms(6000), &mut grid));
    }

    #[test]
    fn non_monotonic_now_clamps_to_zero_elapsed() {
        let mut clock = SimulationClock::new(ms(200)).unwrap();
        let mut grid = stepping_grid();

        assert!(clock.advance(ms(1000), &mut grid));
        // Host clock jumped backwards: no step, no panic.
        assert!(!clock.advance(ms(400), &mut grid));
        assert_eq!(clock.effective_elapsed(ms(400)), ms(0));
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(SimulationClock::new(Duration::ZERO).is_err());
        let mut clock = SimulationClock::new(ms(200)).unwrap();
        assert!(clock.set_tick_interval(Duration::ZERO).is_err());
    }

    #[test]
    fn reconfigured_interval_applies_from_current_phase() {
        let mut clock = SimulationClock::new(ms(200)).unwrap();
        let mut grid = stepping_grid();

        assert!(clock.advance(ms(200), &mut grid));
        clock.set_tick_interval(ms(50)).unwrap();
        // last_tick stayed at 200; the shorter interval is live immediately.
        assert!(clock.advance(ms(250), &mut grid));
    }
}
