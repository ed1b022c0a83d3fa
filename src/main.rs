// Petri - Conway's Game of Life on a toroidal grid
// Licensed under MIT License

mod gfx;

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use env_logger::Env;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowAttributes,
};

use petri::clock::SimulationClock;
use petri::config::{Settings, SETTINGS_FILE_NAME};
use petri::grid::Grid;
use petri::render::FramePainter;
use petri::seed;

use crate::gfx::SurfaceRenderer;

/// How the grid gets its initial life on generate and regenerate.
#[derive(Clone, Copy)]
enum SeedMode {
    Random,
    CenterPattern,
}

fn parse_args() -> SeedMode {
    if std::env::args().skip(1).any(|arg| arg == "--pattern") {
        SeedMode::CenterPattern
    } else {
        SeedMode::Random
    }
}

/// Rows and columns covering the window, ceiling division so partial cells
/// at the right/bottom edges still get painted.
fn grid_dimensions(size: PhysicalSize<u32>, settings: &Settings) -> (usize, usize) {
    let rows = size.height.div_ceil(settings.cell_height) as usize;
    let cols = size.width.div_ceil(settings.cell_width) as usize;
    (rows, cols)
}

fn make_grid(
    size: PhysicalSize<u32>,
    settings: &Settings,
    mode: SeedMode,
    rng: &mut StdRng,
) -> Result<Grid> {
    let (rows, cols) = grid_dimensions(size, settings);
    let mut grid = Grid::generate(rows, cols)?;
    match mode {
        SeedMode::Random => seed::seed_random(&mut grid, settings.seed_density, rng)?,
        SeedMode::CenterPattern => seed::seed_center_pattern(&mut grid)?,
    }
    log::info!("generated {rows}x{cols} grid");
    Ok(grid)
}

fn load_settings() -> Result<Settings> {
    let path = Path::new(SETTINGS_FILE_NAME);
    if path.exists() {
        let settings = Settings::load(path)?;
        log::info!("loaded settings from {}", path.display());
        return Ok(settings);
    }
    let settings = Settings::default();
    // Drop a template beside the working directory so the knobs are
    // discoverable.
    if let Err(err) = settings.save(path) {
        log::warn!("could not write default {}: {err}", path.display());
    }
    Ok(settings)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    log::info!("booting");

    let settings = load_settings()?;
    let seed_mode = parse_args();
    let mut rng = StdRng::from_entropy();

    let event_loop = EventLoop::new()?;
    #[allow(deprecated)]
    let window = Arc::new(
        event_loop.create_window(
            WindowAttributes::default()
                .with_title("petri")
                .with_inner_size(LogicalSize::new(1024, 768)),
        )?,
    );

    let size = window.inner_size();
    let mut renderer = SurfaceRenderer::new(window.clone(), size.width, size.height)?;
    let mut painter = FramePainter::new(size.width, size.height, &settings);
    let mut grid = make_grid(size, &settings, seed_mode, &mut rng)?;
    let mut clock = SimulationClock::new(settings.tick_interval())?;

    let start = Instant::now();
    // Coalesced resize: the latest size plus the earliest moment to apply it.
    let mut pending_resize: Option<(PhysicalSize<u32>, Duration)> = None;

    #[allow(deprecated)]
    event_loop.run(move |event, target| {
        match event {
            Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    target.exit();
                }
                WindowEvent::Focused(false) => {
                    clock.pause(start.elapsed());
                    log::info!("paused");
                }
                WindowEvent::Focused(true) => {
                    clock.unpause(start.elapsed());
                    log::info!("unpaused");
                }
                WindowEvent::Resized(new_size) => {
                    let now = start.elapsed();
                    clock.pause(now);
                    pending_resize = Some((new_size, now + settings.resize_debounce()));
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let col = (position.x / f64::from(settings.cell_width)).floor() as i64;
                    let row = (position.y / f64::from(settings.cell_height)).floor() as i64;
                    if row < 0 || col < 0 {
                        log::debug!("pointer at ({row}, {col}) outside the grid, ignored");
                    } else if let Err(err) = grid.set_alive(row as usize, col as usize) {
                        // Stale geometry during a resize lands here; reject
                        // rather than touch the wrong cell.
                        log::debug!("create-life input rejected: {err}");
                    }
                }
                WindowEvent::RedrawRequested => {
                    let now = start.elapsed();

                    if let Some((new_size, deadline)) = pending_resize {
                        if now >= deadline {
                            pending_resize = None;
                            if new_size.width > 0 && new_size.height > 0 {
                                match make_grid(new_size, &settings, seed_mode, &mut rng) {
                                    Ok(regenerated) => {
                                        grid = regenerated;
                                        painter.resize(new_size.width, new_size.height);
                                        renderer.resize(new_size.width, new_size.height);
                                    }
                                    Err(err) => {
                                        log::error!("grid regeneration failed: {err:#}");
                                        target.exit();
                                        return;
                                    }
                                }
                            }
                            clock.unpause(now);
                            log::info!("unpaused");
                        }
                    }

                    clock.advance(now, &mut grid);
                    painter.paint(&mut grid);
                    renderer.upload_frame(painter.frame(), painter.width(), painter.height());
                    renderer.render();
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
