//! Facility layout optimizer.
//!
//! [`LayoutOptimizer`] turns caller input (department areas, closeness
//! triples, an optional seed order) into a [`LayoutProblem`], checks that
//! the grid can hold every department, and runs the GA.
//!
//! ```
//! use u_layout::{GaConfig, LayoutInput, LayoutOptimizer, Relationship};
//!
//! let input = LayoutInput::new([("Office", 100.0), ("Lab", 300.0), ("Storage", 80.0)])
//!     .with_relationships([Relationship::new("Lab", "Storage", "A")]);
//! let optimizer = LayoutOptimizer::new(GaConfig::quick().with_seed(1));
//!
//! let result = optimizer.optimize(&input).unwrap();
//! assert_eq!(result.reported_score(), 243.0);
//! ```

use crate::error::{LayoutError, Result};
use crate::ga::{GaConfig, GaRunner, LayoutProblem};
use crate::model::{Cell, DepartmentSet, Grid, GridWeight, Relationship, WeightTable};
use crate::placement::GridPlacer;
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

/// Caller input for one optimization run.
#[derive(Debug, Clone, Default)]
pub struct LayoutInput {
    /// `(name, area)` per department; order fixes department ids.
    pub departments: Vec<(String, f64)>,
    /// Closeness triples.
    pub relationships: Vec<Relationship>,
    /// Suggested placement order, used only if it is an exact permutation.
    pub initial_sequence: Option<Vec<String>>,
}

impl LayoutInput {
    pub fn new<I, S>(departments: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            departments: departments
                .into_iter()
                .map(|(name, area)| (name.into(), area))
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_relationships(
        mut self,
        relationships: impl IntoIterator<Item = Relationship>,
    ) -> Self {
        self.relationships.extend(relationships);
        self
    }

    pub fn with_initial_sequence<S: Into<String>>(
        mut self,
        sequence: impl IntoIterator<Item = S>,
    ) -> Self {
        self.initial_sequence = Some(sequence.into_iter().map(Into::into).collect());
        self
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct LayoutResult {
    /// Best placement order found, or `None` if nothing was ever placeable.
    pub best_sequence: Option<Vec<String>>,
    /// Cells of each department in the best layout.
    pub best_positions: Option<BTreeMap<String, Vec<Cell>>>,
    /// Adjacency score of the best layout.
    pub best_score: Option<f64>,
    /// Best-ever score after each generation; `None` before any feasible layout.
    pub score_history: Vec<Option<f64>>,
    /// Mean department area used to derive grid weights.
    pub mean_area: f64,
    /// Derived grid weight per department, in input order.
    pub grid_weights: Vec<(String, GridWeight)>,
    /// Cells needed to place every department.
    pub required_cells: usize,
    /// Cells available on the grid.
    pub capacity: usize,
    /// Whether the caller's initial sequence was used as a seed.
    pub seed_sequence_used: bool,
    grid_rows: usize,
    grid_cols: usize,
}

impl LayoutResult {
    /// Whether a feasible layout was found.
    pub fn is_success(&self) -> bool {
        self.best_sequence.is_some()
    }

    /// Best score for display: 0 when no layout was found.
    pub fn reported_score(&self) -> f64 {
        self.best_score.unwrap_or(0.0)
    }

    /// Cell view of the best layout.
    pub fn grid(&self) -> Option<Grid> {
        let positions = self.best_positions.as_ref()?;
        Some(Grid::from_footprints(
            self.grid_rows,
            self.grid_cols,
            positions
                .iter()
                .map(|(name, cells)| (name.as_str(), cells.as_slice())),
        ))
    }
}

/// Validates input and runs the layout GA.
#[derive(Debug, Clone, Default)]
pub struct LayoutOptimizer {
    config: GaConfig,
}

impl LayoutOptimizer {
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs one optimization.
    ///
    /// Relationship triples naming unknown departments are skipped with a
    /// warning, unknown codes weigh 0, and an initial sequence that is not
    /// an exact permutation of the departments is discarded.
    ///
    /// # Errors
    /// - [`LayoutError::NoDepartments`], [`LayoutError::InvalidArea`],
    ///   [`LayoutError::DuplicateDepartment`] for bad department input
    /// - [`LayoutError::CapacityExceeded`] when the departments need more
    ///   cells than the grid has; no generation runs
    /// - [`LayoutError::InvalidConfig`] for invalid GA parameters
    #[instrument(skip_all, fields(departments = input.departments.len()))]
    pub fn optimize(&self, input: &LayoutInput) -> Result<LayoutResult> {
        self.config.validate()?;

        let departments = DepartmentSet::from_areas(input.departments.iter().cloned())?;
        let required_cells = departments.required_cells();
        let capacity = self.config.capacity();
        info!(
            mean_area = departments.mean_area(),
            required_cells, capacity, "Derived department grid weights."
        );
        if required_cells > capacity {
            return Err(LayoutError::CapacityExceeded {
                required: required_cells,
                capacity,
            });
        }

        let weights = WeightTable::from_relationships(&departments, &input.relationships);

        let seed = match &input.initial_sequence {
            Some(names) if !names.is_empty() => {
                let ids = departments.sequence_ids(names);
                if ids.is_none() {
                    warn!(
                        "Initial sequence does not match the departments; \
                         starting from a random order."
                    );
                }
                ids
            }
            _ => None,
        };

        let problem = LayoutProblem::new(
            departments.grid_weights(),
            weights,
            GridPlacer::new(self.config.grid_rows, self.config.grid_cols),
        );

        info!(
            population = self.config.population_size,
            generations = self.config.generations,
            mutation_rate = self.config.mutation_rate,
            elitism = self.config.elitism_count,
            "Running genetic algorithm."
        );
        let run = GaRunner::run(&problem, &self.config, seed.as_deref())?;

        match run.best_score {
            Some(score) => info!(best_score = score, "Optimization finished."),
            None => warn!("Optimization finished without a feasible layout."),
        }

        Ok(LayoutResult {
            best_sequence: run
                .best_sequence
                .as_deref()
                .map(|ids| departments.sequence_names(ids)),
            best_positions: run
                .best_positions
                .as_ref()
                .map(|map| map.to_named(&departments)),
            best_score: run.best_score,
            score_history: run.score_history,
            mean_area: departments.mean_area(),
            grid_weights: departments
                .iter()
                .map(|d| (d.name.clone(), d.grid_weight))
                .collect(),
            required_cells,
            capacity,
            seed_sequence_used: seed.is_some(),
            grid_rows: self.config.grid_rows,
            grid_cols: self.config.grid_cols,
        })
    }
}

/// Runs [`LayoutOptimizer::optimize`] with `config`.
pub fn optimize(input: &LayoutInput, config: &GaConfig) -> Result<LayoutResult> {
    LayoutOptimizer::new(config.clone()).optimize(input)
}
