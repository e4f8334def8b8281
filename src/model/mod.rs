//! Layout domain types.
//!
//! - [`DepartmentSet`]: named departments with areas and derived grid weights
//! - [`WeightTable`]: symmetric closeness weights keyed by unordered pair
//! - [`PositionMap`] / [`Grid`]: a realized layout and its cell view

mod department;
mod grid;
mod relationship;

pub use department::{Department, DepartmentSet, GridWeight};
pub use grid::{Cell, Grid, PositionMap};
pub use relationship::{weight_of_code, DeptPair, Relationship, RelationshipCode, WeightTable};
