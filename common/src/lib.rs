//! Simulation core of a 3D snake game: world grid, snake orientation state
//! machine, food placement and the per-tick transition, plus an async session
//! runner that drives it on a timer.

pub mod config;
pub mod games;
pub mod logger;
