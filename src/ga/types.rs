//! The layout problem and its individuals.
//!
//! [`LayoutProblem`] bundles the read-only inputs of a run: grid weights,
//! relationship weights and the placer. Evaluating a chromosome against it
//! is pure, so individuals can be evaluated in any order or in parallel.

use crate::fitness;
use crate::model::{GridWeight, PositionMap, WeightTable};
use crate::placement::GridPlacer;

/// Read-only inputs shared by every evaluation in a run.
#[derive(Debug, Clone)]
pub struct LayoutProblem {
    grid_weights: Vec<GridWeight>,
    weights: WeightTable,
    placer: GridPlacer,
}

impl LayoutProblem {
    pub fn new(grid_weights: Vec<GridWeight>, weights: WeightTable, placer: GridPlacer) -> Self {
        Self {
            grid_weights,
            weights,
            placer,
        }
    }

    /// Number of departments (chromosome length).
    pub fn num_departments(&self) -> usize {
        self.grid_weights.len()
    }

    pub fn grid_weights(&self) -> &[GridWeight] {
        &self.grid_weights
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn placer(&self) -> &GridPlacer {
        &self.placer
    }

    /// Places and scores `chromosome`.
    ///
    /// A chromosome that cannot be placed gets
    /// [`INFEASIBLE_SCORE`](crate::fitness::INFEASIBLE_SCORE) and no positions.
    pub fn evaluate(&self, chromosome: &[usize]) -> Evaluation {
        let positions = self.placer.place(chromosome, &self.grid_weights);
        let score = fitness::score(positions.as_ref(), &self.weights);
        Evaluation { score, positions }
    }
}

/// Outcome of evaluating one chromosome.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub score: f64,
    pub positions: Option<PositionMap>,
}

impl Evaluation {
    pub fn is_feasible(&self) -> bool {
        self.positions.is_some()
    }
}

/// A chromosome with its cached evaluation.
///
/// Elites carry their evaluation into the next generation; bred children
/// start unevaluated.
#[derive(Debug, Clone)]
pub struct Individual {
    pub genes: Vec<usize>,
    pub evaluation: Option<Evaluation>,
}

impl Individual {
    pub fn new(genes: Vec<usize>) -> Self {
        Self {
            genes,
            evaluation: None,
        }
    }

    /// Fitness, or [`INFEASIBLE_SCORE`](crate::fitness::INFEASIBLE_SCORE)
    /// while unevaluated.
    pub fn fitness(&self) -> f64 {
        self.evaluation
            .as_ref()
            .map_or(fitness::INFEASIBLE_SCORE, |e| e.score)
    }

    /// Evaluates against `problem` unless already evaluated.
    pub fn ensure_evaluated(&mut self, problem: &LayoutProblem) {
        if self.evaluation.is_none() {
            self.evaluation = Some(problem.evaluate(&self.genes));
        }
    }
}
