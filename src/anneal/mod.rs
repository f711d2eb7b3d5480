//! Annealing solver contract and the built-in annealer.
//!
//! The encoding pipeline only depends on [`SpinSolver`] and
//! [`SolverFactory`]; [`Annealer`] is the default implementation, a
//! single-flip Metropolis search with geometric cooling.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Lucas (2014), "Ising formulations of many NP problems"

mod config;
mod runner;
mod types;

pub use config::{ActiveRatio, AnnealConfig, InitMode, Schedule, ScheduleConfig};
pub use runner::{AnnealStats, Annealer, AnnealerFactory};
pub use types::{drive, SolverFactory, SpinSolver};
