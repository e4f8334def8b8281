//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop
//! and the placement surface.

use crate::error::{LayoutError, Result};
use crate::placement::{DEFAULT_COLS, DEFAULT_ROWS};

/// Configuration for the layout genetic algorithm.
///
/// # Defaults
///
/// ```
/// use u_layout::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.generations, 100);
/// assert_eq!((config.grid_rows, config.grid_cols), (5, 5));
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_layout::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(80)
///     .with_generations(200)
///     .with_mutation_rate(0.25)
///     .with_elitism_count(3)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of chromosomes per generation. At least 2.
    pub population_size: usize,

    /// Number of generations to run. At least 1.
    pub generations: usize,

    /// Probability that a child gets one swap mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Individuals copied unchanged into the next generation.
    ///
    /// At most `population_size`. With at least one elite the best-ever
    /// score in the history never regresses.
    pub elitism_count: usize,

    /// Individuals drawn per tournament. Clamped to the population size
    /// when larger.
    pub tournament_size: usize,

    /// Rows of the placement grid.
    pub grid_rows: usize,

    /// Columns of the placement grid.
    pub grid_cols: usize,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to evaluate individuals in parallel with rayon.
    ///
    /// Has no effect unless the `parallel` feature is enabled. Evaluation
    /// draws no random numbers, so seeded runs give identical results
    /// either way.
    pub parallel: bool,

    /// Random draws allowed per missing individual when building a
    /// duplicate-free initial population. Once exhausted, duplicates are
    /// accepted.
    pub max_init_attempts_factor: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            mutation_rate: 0.2,
            elitism_count: 2,
            tournament_size: 4,
            grid_rows: DEFAULT_ROWS,
            grid_cols: DEFAULT_COLS,
            seed: None,
            parallel: false,
            max_init_attempts_factor: 10,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of elites.
    pub fn with_elitism_count(mut self, n: usize) -> Self {
        self.elitism_count = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the grid dimensions.
    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.grid_rows = rows;
        self.grid_cols = cols;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the initialization retry factor.
    pub fn with_max_init_attempts_factor(mut self, factor: usize) -> Self {
        self.max_init_attempts_factor = factor;
        self
    }

    /// Preset for interactive use: population 30, 50 generations.
    pub fn quick() -> Self {
        Self {
            population_size: 30,
            generations: 50,
            ..Self::default()
        }
    }

    /// Preset for a deeper search: population 100, 300 generations.
    pub fn thorough() -> Self {
        Self {
            population_size: 100,
            generations: 300,
            elitism_count: 3,
            ..Self::default()
        }
    }

    /// Cells available on the grid.
    ///
    /// Saturates for grids that [`validate`](Self::validate) rejects as too
    /// large.
    pub fn capacity(&self) -> usize {
        self.grid_rows.saturating_mul(self.grid_cols)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`LayoutError::InvalidConfig`] naming the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(LayoutError::InvalidConfig(msg.into()));

        if self.population_size < 2 {
            return invalid("population_size must be at least 2");
        }
        if self.generations == 0 {
            return invalid("generations must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return invalid("mutation_rate must be within [0, 1]");
        }
        if self.elitism_count > self.population_size {
            return invalid("elitism_count cannot exceed population_size");
        }
        if self.tournament_size == 0 {
            return invalid("tournament_size must be at least 1");
        }
        if self.grid_rows == 0 || self.grid_cols == 0 {
            return invalid("grid must have at least one row and one column");
        }
        if self.grid_rows.checked_mul(self.grid_cols).is_none() {
            return invalid("grid too large");
        }
        if self.max_init_attempts_factor == 0 {
            return invalid("max_init_attempts_factor must be at least 1");
        }
        Ok(())
    }
}
