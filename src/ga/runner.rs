//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process over a fixed
//! number of generations:
//! evaluate → record best-ever → elitism → select, cross over, mutate → repeat.

use super::config::GaConfig;
use super::operators::{order_crossover, swap_mutation};
use super::population::initialize_population;
use super::selection::{elite_indices, select_parents};
use super::types::{Individual, LayoutProblem};
use crate::error::Result;
use crate::fitness;
use crate::model::PositionMap;
use crate::random::rng_from_seed;
use rand::Rng;
use tracing::{debug, instrument, trace};

/// Upper bound on up-front history reservation; longer runs grow the vector.
const MAX_RESERVE: usize = 1024;

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Best chromosome found, or `None` if no chromosome was ever placeable.
    pub best_sequence: Option<Vec<usize>>,

    /// Layout of the best chromosome.
    pub best_positions: Option<PositionMap>,

    /// Score of the best chromosome. Never the infeasible sentinel.
    pub best_score: Option<f64>,

    /// Number of generations executed.
    pub generations: usize,

    /// Best-ever score after each generation; `None` until a feasible
    /// layout has been seen.
    pub score_history: Vec<Option<f64>>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = LayoutProblem::new(grid_weights, weights, GridPlacer::default());
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config, None)?;
/// println!("Best score: {:?}", result.best_score);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with a generator seeded from `config.seed`.
    ///
    /// `initial` seeds the first individual when it is a permutation of the
    /// department ids; otherwise it is ignored.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidConfig`](crate::LayoutError::InvalidConfig)
    /// if `config` fails validation.
    pub fn run(
        problem: &LayoutProblem,
        config: &GaConfig,
        initial: Option<&[usize]>,
    ) -> Result<GaResult> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(problem, config, initial, &mut rng)
    }

    /// Runs the GA drawing every random number from `rng`.
    #[instrument(
        skip_all,
        fields(
            departments = problem.num_departments(),
            population = config.population_size,
            generations = config.generations
        )
    )]
    pub fn run_with_rng<R: Rng>(
        problem: &LayoutProblem,
        config: &GaConfig,
        initial: Option<&[usize]>,
        rng: &mut R,
    ) -> Result<GaResult> {
        config.validate()?;

        // 1. Initialize population
        let mut population: Vec<Individual> = initialize_population(
            problem.num_departments(),
            initial,
            config.population_size,
            config.max_init_attempts_factor,
            rng,
        )
        .into_iter()
        .map(Individual::new)
        .collect();

        let mut best: Option<Individual> = None;
        let mut score_history = history_buffer(config.generations);

        // 2. Evolutionary loop
        for gen in 0..config.generations {
            // Evaluate (elites keep their cached evaluation)
            evaluate_population(problem, &mut population, config.parallel);

            // Update best-ever; ties keep the incumbent
            for ind in &population {
                let f = ind.fitness();
                if fitness::is_feasible(f) && best.as_ref().is_none_or(|b| f > b.fitness()) {
                    best = Some(ind.clone());
                }
            }

            let best_score = best.as_ref().map(Individual::fitness);
            score_history.push(best_score);

            if gen % 10 == 0 || gen + 1 == config.generations {
                debug!(generation = gen, best_score = ?best_score, "Generation complete.");
            }

            if gen + 1 < config.generations {
                population = next_generation(&population, config, rng);
            }
        }

        let (best_sequence, best_positions, best_score) = match best {
            Some(ind) => {
                let score = ind.fitness();
                let positions = ind.evaluation.and_then(|e| e.positions);
                (Some(ind.genes), positions, Some(score))
            }
            None => (None, None, None),
        };

        Ok(GaResult {
            best_sequence,
            best_positions,
            best_score,
            generations: config.generations,
            score_history,
        })
    }
}

/// Empty history for a run of `generations`, reserving at most
/// [`MAX_RESERVE`] entries.
fn history_buffer(generations: usize) -> Vec<Option<f64>> {
    Vec::with_capacity(generations.min(MAX_RESERVE))
}

/// Breeds the next generation from an evaluated one.
///
/// The top `elitism_count` individuals are copied unchanged; the rest are
/// children of tournament-selected parents, crossed over then mutated.
fn next_generation<R: Rng>(
    population: &[Individual],
    config: &GaConfig,
    rng: &mut R,
) -> Vec<Individual> {
    let fitnesses: Vec<f64> = population.iter().map(Individual::fitness).collect();

    let mut next_gen: Vec<Individual> = elite_indices(&fitnesses, config.elitism_count)
        .into_iter()
        .map(|idx| population[idx].clone())
        .collect();
    trace!(
        elites = next_gen.len(),
        top = ?next_gen.first().map(Individual::fitness),
        "Elites kept."
    );

    while next_gen.len() < config.population_size {
        let (p1, p2) = select_parents(&fitnesses, config.tournament_size, rng);
        let mut child = order_crossover(&population[p1].genes, &population[p2].genes, rng);
        swap_mutation(&mut child, config.mutation_rate, rng);
        next_gen.push(Individual::new(child));
    }

    next_gen
}

/// Evaluate all individuals that do not carry an evaluation yet.
#[cfg(feature = "parallel")]
fn evaluate_population(problem: &LayoutProblem, population: &mut [Individual], parallel: bool) {
    use rayon::prelude::*;

    if parallel {
        population
            .par_iter_mut()
            .for_each(|ind| ind.ensure_evaluated(problem));
    } else {
        for ind in population.iter_mut() {
            ind.ensure_evaluated(problem);
        }
    }
}

/// Evaluate all individuals that do not carry an evaluation yet.
#[cfg(not(feature = "parallel"))]
fn evaluate_population(problem: &LayoutProblem, population: &mut [Individual], _parallel: bool) {
    for ind in population.iter_mut() {
        ind.ensure_evaluated(problem);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GridWeight::{self, Double, Single};
    use crate::model::WeightTable;
    use crate::placement::GridPlacer;
    use crate::LayoutError;

    /// Six departments on a 3×3 grid with a chain of strong relationships.
    fn chain_problem() -> LayoutProblem {
        let grid_weights = vec![Single, Double, Single, Single, Double, Single];
        let mut weights = WeightTable::new();
        weights.insert(0, 5, 243.0);
        weights.insert(5, 2, 81.0);
        weights.insert(2, 3, 27.0);
        weights.insert(3, 1, 9.0);
        weights.insert(1, 4, 3.0);
        weights.insert(0, 4, 0.0);
        LayoutProblem::new(grid_weights, weights, GridPlacer::new(3, 3))
    }

    fn config() -> GaConfig {
        GaConfig::default()
            .with_population_size(30)
            .with_generations(60)
            .with_seed(42)
    }

    #[test]
    fn test_history_has_one_entry_per_generation() {
        let result = GaRunner::run(&chain_problem(), &config(), None).unwrap();
        assert_eq!(result.generations, 60);
        assert_eq!(result.score_history.len(), 60);
    }

    #[test]
    fn test_history_monotonic_with_elitism() {
        let result = GaRunner::run(&chain_problem(), &config(), None).unwrap();
        for window in result.score_history.windows(2) {
            match (window[0], window[1]) {
                (Some(a), Some(b)) => assert!(b >= a, "best-ever regressed: {a} -> {b}"),
                (Some(_), None) => panic!("best-ever lost"),
                _ => {}
            }
        }
    }

    #[test]
    fn test_best_matches_history_and_reevaluation() {
        let problem = chain_problem();
        let result = GaRunner::run(&problem, &config(), None).unwrap();

        let best = result.best_sequence.clone().expect("feasible layouts exist");
        let score = result.best_score.unwrap();
        assert_eq!(result.score_history.last().copied().flatten(), Some(score));

        let eval = problem.evaluate(&best);
        assert_eq!(eval.score, score);
        assert_eq!(eval.positions, result.best_positions);
    }

    #[test]
    fn test_finds_strong_adjacency() {
        let result = GaRunner::run(&chain_problem(), &config(), None).unwrap();
        // 0 next to 5 alone is worth 243.
        assert!(result.best_score.unwrap() >= 243.0);
    }

    #[test]
    fn test_seeded_runs_reproducible() {
        let problem = chain_problem();
        let a = GaRunner::run(&problem, &config(), None).unwrap();
        let b = GaRunner::run(&problem, &config(), None).unwrap();
        assert_eq!(a.best_sequence, b.best_sequence);
        assert_eq!(a.score_history, b.score_history);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let problem = chain_problem();
        let seq = GaRunner::run(&problem, &config(), None).unwrap();
        let par = GaRunner::run(&problem, &config().with_parallel(true), None).unwrap();
        assert_eq!(seq.best_sequence, par.best_sequence);
        assert_eq!(seq.score_history, par.score_history);
    }

    #[test]
    fn test_never_feasible_reports_none() {
        // Three singles cannot fit on two cells, whatever the order.
        let problem = LayoutProblem::new(
            vec![GridWeight::Single; 3],
            WeightTable::new(),
            GridPlacer::new(1, 2),
        );
        let result = GaRunner::run(&problem, &config().with_generations(5), None).unwrap();
        assert!(result.best_sequence.is_none());
        assert!(result.best_positions.is_none());
        assert!(result.best_score.is_none());
        assert_eq!(result.score_history, vec![None; 5]);
    }

    #[test]
    fn test_seed_sequence_counts_from_first_generation() {
        // Seed places the double on top with department 0 right below it.
        let problem = LayoutProblem::new(
            vec![Single, Double, Single],
            {
                let mut w = WeightTable::new();
                w.insert(1, 0, 27.0);
                w
            },
            GridPlacer::new(2, 2),
        );
        let seed = [1, 0, 2];
        let result = GaRunner::run(
            &problem,
            &config().with_generations(1).with_population_size(2),
            Some(&seed[..]),
        )
        .unwrap();
        assert!(result.score_history[0].is_some());
        assert!(result.best_score.unwrap() >= 27.0);
    }

    #[test]
    fn test_zero_elitism_runs() {
        let result = GaRunner::run(
            &chain_problem(),
            &config().with_elitism_count(0).with_generations(20),
            None,
        )
        .unwrap();
        assert_eq!(result.score_history.len(), 20);
        assert!(result.best_score.is_some());
    }

    #[test]
    fn test_full_elitism_freezes_population() {
        let problem = chain_problem();
        let cfg = config().with_elitism_count(30).with_generations(15);
        let result = GaRunner::run(&problem, &cfg, None).unwrap();
        let first = result.score_history[0];
        assert!(result.score_history.iter().all(|&s| s == first));
    }

    #[test]
    fn test_history_reservation_is_bounded() {
        let history = history_buffer(usize::MAX / 2);
        assert!(history.is_empty());
        assert!(history.capacity() >= MAX_RESERVE);
        assert!(history.capacity() < 2 * MAX_RESERVE);
        assert!(history_buffer(3).capacity() >= 3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = GaRunner::run(&chain_problem(), &config().with_population_size(1), None)
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidConfig(_)));
    }
}
