//! Genetic algorithm over placement orders.
//!
//! A chromosome is a permutation of department ids: the order in which the
//! greedy [`GridPlacer`](crate::placement::GridPlacer) places them. The GA
//! searches over orders to maximize the adjacency score.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population, generations, rates, grid)
//! - [`LayoutProblem`]: Read-only inputs shared by every evaluation
//! - [`GaRunner`]: Executes the generational loop with elitism
//! - [`GaResult`]: Best-ever chromosome, its layout, score and history
//!
//! # Submodules
//!
//! - [`operators`]: Order crossover (OX) and swap mutation
//! - [`selection`]: Tournament selection and elite ranking
//! - [`population`]: Initial population with bounded uniqueness retries
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
pub mod population;
mod runner;
pub mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use types::{Evaluation, Individual, LayoutProblem};
