// Petri - Conway's Game of Life on a toroidal grid
// Licensed under MIT License

//! Simulation engine for a windowed Game of Life.
//!
//! The engine is deliberately host-agnostic: it owns no timer and touches no
//! window. A host drives [`clock::SimulationClock::advance`] with timestamps
//! of its own choosing, and a rendering pass consumes the dirty flags the
//! grid raises. See the `petri` binary for the winit/wgpu host.

pub mod cell;
pub mod clock;
pub mod config;
pub mod grid;
pub mod render;
pub mod seed;
