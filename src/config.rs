// Petri - Conway's Game of Life on a toroidal grid
// Licensed under MIT License

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Engine configuration, passed explicitly into the grid/clock/renderer
/// constructors instead of living in ambient state.
///
/// Defaults reproduce the classic look: 8x8 cells with 2px padding, five
/// generations per second, a dark teal on off-white.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cell width in pixels.
    pub cell_width: u32,
    /// Cell height in pixels.
    pub cell_height: u32,
    /// Gap in pixels left unpainted around each cell.
    pub cell_padding: u32,
    /// Milliseconds per generation.
    pub tick_rate_ms: u64,
    /// Debounce window for coalescing resize events, in milliseconds.
    pub resize_rate_ms: u64,
    /// Random seeding density; alive probability is `exp(-density) / 10`.
    pub seed_density: f32,
    /// Alive cells flicker at a random opacity in `1..=max_opacity` tenths.
    pub max_opacity: u8,
    pub alive_color: [u8; 3],
    pub dead_color: [u8; 3],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cell_width: 8,
            cell_height: 8,
            cell_padding: 2,
            tick_rate_ms: 200,
            resize_rate_ms: 200,
            seed_density: 0.3,
            max_opacity: 3,
            alive_color: [0x24, 0x3d, 0x46],
            dead_color: [0xee, 0xee, 0xee],
        }
    }
}

impl Settings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_rate_ms)
    }

    /// Rejects values that would produce a degenerate or unintended
    /// simulation; nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        if self.cell_width == 0 || self.cell_height == 0 {
            bail!(
                "cell dimensions must be nonzero, got {}x{}",
                self.cell_width,
                self.cell_height
            );
        }
        if self.cell_padding >= self.cell_width || self.cell_padding >= self.cell_height {
            bail!(
                "cell_padding {} must be smaller than the cell dimensions {}x{}",
                self.cell_padding,
                self.cell_width,
                self.cell_height
            );
        }
        if self.tick_rate_ms == 0 {
            bail!("tick_rate_ms must be nonzero");
        }
        if !self.seed_density.is_finite() || self.seed_density < 0.0 {
            bail!(
                "seed_density must be finite and non-negative, got {}",
                self.seed_density
            );
        }
        if self.max_opacity == 0 || self.max_opacity > 10 {
            bail!("max_opacity must be in 1..=10, got {}", self.max_opacity);
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&data)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
