//! Fatal configuration errors.
//!
//! Only problems that make a run meaningless are errors. Soft input issues
//! (bad relationship triples, an invalid seed sequence) are logged and
//! recovered, and a chromosome that cannot be placed is scored, not raised.

use thiserror::Error;

/// Errors reported before any generation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("No departments were provided")]
    NoDepartments,

    #[error("Department '{name}' has invalid area {area} (must be a positive number)")]
    InvalidArea { name: String, area: f64 },

    #[error("Department '{0}' is listed more than once")]
    DuplicateDepartment(String),

    #[error("Layout needs {required} cells but the grid only has {capacity}")]
    CapacityExceeded { required: usize, capacity: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
