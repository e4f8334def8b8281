//! Facility layout optimization on a discrete grid.
//!
//! Given department areas and qualitative closeness preferences
//! (`A`, `E`, `I`, `O`, `U`, `X`), proposes a concrete cell layout that
//! maximizes the summed weight of adjacent related departments.
//!
//! - **Placement**: a deterministic greedy first-fit placer turns a
//!   department order into a layout, or fails when the order does not fit.
//! - **Fitness**: a layout scores the weight of every related pair that
//!   shares an edge, each pair counted once.
//! - **Genetic Algorithm**: permutation GA over placement orders with order
//!   crossover, swap mutation, tournament selection and elitism.
//! - **Optimizer**: derives grid weights and the weight table from caller
//!   input, checks grid capacity, and runs the GA.
//!
//! # Architecture
//!
//! The [`PositionMap`](model::PositionMap) is the single record of a layout;
//! [`Grid`](model::Grid) views are derived from it. All randomness flows
//! through one seeded generator per run, so a fixed seed reproduces a run.
//! Rendering, persistence and HTTP handling live outside this crate.

pub mod error;
pub mod fitness;
pub mod ga;
pub mod model;
pub mod optimizer;
pub mod placement;
pub mod random;
#[cfg(feature = "serde")]
pub mod request;

pub use error::{LayoutError, Result};
pub use ga::{GaConfig, GaResult, GaRunner, LayoutProblem};
pub use model::{Cell, Department, DepartmentSet, Grid, GridWeight, PositionMap, Relationship};
pub use optimizer::{optimize, LayoutInput, LayoutOptimizer, LayoutResult};
pub use placement::GridPlacer;
