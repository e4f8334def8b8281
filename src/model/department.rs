//! Departments and their derived grid weights.

use crate::error::{LayoutError, Result};
use std::collections::HashMap;

/// Number of grid cells a department occupies.
///
/// Departments larger than the mean area take a horizontal pair of cells,
/// everything else a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridWeight {
    Single,
    Double,
}

impl GridWeight {
    /// Cell count: 1 or 2.
    pub const fn cells(self) -> usize {
        match self {
            GridWeight::Single => 1,
            GridWeight::Double => 2,
        }
    }

    /// Weight for a department of `area` given the mean area of the set.
    ///
    /// Strictly greater than the mean gets [`GridWeight::Double`].
    pub fn for_area(area: f64, mean_area: f64) -> Self {
        if area > mean_area {
            GridWeight::Double
        } else {
            GridWeight::Single
        }
    }
}

/// A named department with its area and derived grid weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Department {
    pub name: String,
    pub area: f64,
    pub grid_weight: GridWeight,
}

/// The immutable department set of one optimization run.
///
/// Departments are addressed by their index (input order) everywhere
/// inside the engine; names only appear at the boundaries.
#[derive(Debug, Clone)]
pub struct DepartmentSet {
    departments: Vec<Department>,
    index: HashMap<String, usize>,
    mean_area: f64,
}

impl DepartmentSet {
    /// Builds the set from `(name, area)` pairs, deriving grid weights.
    ///
    /// # Errors
    /// - [`LayoutError::NoDepartments`] for empty input
    /// - [`LayoutError::InvalidArea`] for a non-finite or non-positive area
    /// - [`LayoutError::DuplicateDepartment`] when a name repeats
    pub fn from_areas<I, S>(areas: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut raw: Vec<(String, f64)> = Vec::new();
        let mut index = HashMap::new();

        for (name, area) in areas {
            let name = name.into();
            if !area.is_finite() || area <= 0.0 {
                return Err(LayoutError::InvalidArea { name, area });
            }
            if index.insert(name.clone(), raw.len()).is_some() {
                return Err(LayoutError::DuplicateDepartment(name));
            }
            raw.push((name, area));
        }

        if raw.is_empty() {
            return Err(LayoutError::NoDepartments);
        }

        let mean_area = raw.iter().map(|(_, a)| a).sum::<f64>() / raw.len() as f64;
        let departments = raw
            .into_iter()
            .map(|(name, area)| Department {
                grid_weight: GridWeight::for_area(area, mean_area),
                name,
                area,
            })
            .collect();

        Ok(Self {
            departments,
            index,
            mean_area,
        })
    }

    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Department> {
        self.departments.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Department> {
        self.departments.iter()
    }

    /// Index of the department called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Name of department `id`. Panics on an out-of-range id.
    pub fn name(&self, id: usize) -> &str {
        &self.departments[id].name
    }

    pub fn mean_area(&self) -> f64 {
        self.mean_area
    }

    /// Grid weights indexed by department id.
    pub fn grid_weights(&self) -> Vec<GridWeight> {
        self.departments.iter().map(|d| d.grid_weight).collect()
    }

    /// Total cells needed to place every department.
    pub fn required_cells(&self) -> usize {
        self.departments.iter().map(|d| d.grid_weight.cells()).sum()
    }

    /// Maps a sequence of names to department ids.
    ///
    /// Returns `None` unless `names` is an exact permutation of the set:
    /// same length, every name known, no repeats.
    pub fn sequence_ids<S: AsRef<str>>(&self, names: &[S]) -> Option<Vec<usize>> {
        if names.len() != self.len() {
            return None;
        }
        let mut seen = vec![false; self.len()];
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let id = self.index_of(name.as_ref())?;
            if std::mem::replace(&mut seen[id], true) {
                return None;
            }
            ids.push(id);
        }
        Some(ids)
    }

    /// Maps department ids back to names.
    pub fn sequence_names(&self, ids: &[usize]) -> Vec<String> {
        ids.iter().map(|&id| self.name(id).to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> DepartmentSet {
        DepartmentSet::from_areas([("A", 100.0), ("B", 100.0), ("C", 300.0)]).unwrap()
    }

    #[test]
    fn test_grid_weights_from_mean() {
        let set = abc();
        assert!((set.mean_area() - 500.0 / 3.0).abs() < 1e-9);
        assert_eq!(
            set.grid_weights(),
            vec![GridWeight::Single, GridWeight::Single, GridWeight::Double]
        );
        assert_eq!(set.required_cells(), 4);
    }

    #[test]
    fn test_equal_areas_are_single() {
        // Nothing is strictly above the mean.
        let set = DepartmentSet::from_areas([("A", 50.0), ("B", 50.0)]).unwrap();
        assert!(set.iter().all(|d| d.grid_weight == GridWeight::Single));
    }

    #[test]
    fn test_empty_rejected() {
        let empty: Vec<(String, f64)> = Vec::new();
        assert_eq!(
            DepartmentSet::from_areas(empty).unwrap_err(),
            LayoutError::NoDepartments
        );
    }

    #[test]
    fn test_invalid_area_rejected() {
        for area in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = DepartmentSet::from_areas([("A", 10.0), ("B", area)]).unwrap_err();
            assert!(matches!(err, LayoutError::InvalidArea { ref name, .. } if name == "B"));
        }
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = DepartmentSet::from_areas([("A", 10.0), ("A", 20.0)]).unwrap_err();
        assert_eq!(err, LayoutError::DuplicateDepartment("A".into()));
    }

    #[test]
    fn test_sequence_ids() {
        let set = abc();
        assert_eq!(set.sequence_ids(&["C", "A", "B"]), Some(vec![2, 0, 1]));
        // Missing, duplicated, unknown, too long.
        assert_eq!(set.sequence_ids(&["A", "B"]), None);
        assert_eq!(set.sequence_ids(&["A", "A", "B"]), None);
        assert_eq!(set.sequence_ids(&["A", "B", "Z"]), None);
        assert_eq!(set.sequence_ids(&["A", "B", "C", "C"]), None);
    }

    #[test]
    fn test_sequence_names_round_trip() {
        let set = abc();
        assert_eq!(set.sequence_names(&[1, 2, 0]), vec!["B", "C", "A"]);
    }
}
