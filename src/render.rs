// Petri - Conway's Game of Life on a toroidal grid
// Licensed under MIT License

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Settings;
use crate::grid::Grid;

/// CPU-side renderer: keeps a persistent RGBA8 frame and repaints only the
/// cells the grid has marked dirty, clearing each flag it consumes.
///
/// This is the grid's one dirty-flag consumer. Alive cells are painted at a
/// random opacity in `1..=max_opacity` tenths over the dead background, a
/// subtle per-cell flicker.
pub struct FramePainter {
    width: u32,
    height: u32,
    frame: Vec<u8>,
    cell_width: u32,
    cell_height: u32,
    cell_padding: u32,
    alive_color: [u8; 3],
    dead_color: [u8; 3],
    max_opacity: u8,
    rng: StdRng,
}

impl FramePainter {
    pub fn new(width: u32, height: u32, settings: &Settings) -> Self {
        let mut painter = Self {
            width,
            height,
            frame: Vec::new(),
            cell_width: settings.cell_width,
            cell_height: settings.cell_height,
            cell_padding: settings.cell_padding,
            alive_color: settings.alive_color,
            dead_color: settings.dead_color,
            max_opacity: settings.max_opacity,
            rng: StdRng::from_entropy(),
        };
        painter.reset_frame();
        painter
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tightly packed RGBA8 rows, `width * 4` bytes each.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Drops the old frame and starts over at the new size. Callers
    /// regenerate the grid alongside, so every cell arrives dirty and the
    /// next paint covers the fresh background.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.reset_frame();
    }

    fn reset_frame(&mut self) {
        let len = self.width as usize * self.height as usize * 4;
        self.frame.clear();
        self.frame.resize(len, 0);
        let [r, g, b] = self.dead_color;
        for px in self.frame.chunks_exact_mut(4) {
            px.copy_from_slice(&[r, g, b, 0xff]);
        }
    }

    /// Repaints every dirty cell and acknowledges it via `clear_dirty`.
    pub fn paint(&mut self, grid: &mut Grid) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        let pad = self.cell_padding;
        for cell in grid.cells_mut() {
            if !cell.is_dirty() {
                continue;
            }

            let color = if cell.is_alive() {
                let tenths = self.rng.gen_range(1..=self.max_opacity);
                blend(self.alive_color, self.dead_color, f32::from(tenths) / 10.0)
            } else {
                self.dead_color
            };

            let px = cell.x() * self.cell_width;
            let py = cell.y() * self.cell_height;
            let x0 = (px + pad).min(self.width);
            let y0 = (py + pad).min(self.height);
            let x1 = (px + self.cell_width).min(self.width);
            let y1 = (py + self.cell_height).min(self.height);

            for y in y0..y1 {
                let row = (y as usize * self.width as usize + x0 as usize) * 4;
                let row = &mut self.frame[row..row + (x1 - x0) as usize * 4];
                for dst in row.chunks_exact_mut(4) {
                    dst.copy_from_slice(&[color[0], color[1], color[2], 0xff]);
                }
            }

            cell.clear_dirty();
        }
    }
}

fn blend(fg: [u8; 3], bg: [u8; 3], alpha: f32) -> [u8; 3] {
    let mix = |f: u8, b: u8| (f32::from(f) * alpha + f32::from(b) * (1.0 - alpha)).round() as u8;
    [
        mix(fg[0], bg[0]),
        mix(fg[1], bg[1]),
        mix(fg[2], bg[2]),
    ]
}
