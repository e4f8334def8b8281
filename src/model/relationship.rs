//! Closeness relationships and the symmetric weight table.
//!
//! Qualitative closeness codes follow the usual activity-relationship
//! chart convention. Weights grow geometrically so that one `A` outweighs
//! any reasonable number of lower-ranked adjacencies.

use super::department::DepartmentSet;
use std::collections::HashMap;
use tracing::warn;

/// Closeness code between two departments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipCode {
    /// Absolutely necessary.
    A,
    /// Especially important.
    E,
    /// Important.
    I,
    /// Ordinary closeness.
    O,
    /// Unimportant.
    U,
    /// Undesirable.
    X,
}

impl RelationshipCode {
    /// Parses a code, ignoring case and surrounding whitespace.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Self::A),
            "E" => Some(Self::E),
            "I" => Some(Self::I),
            "O" => Some(Self::O),
            "U" => Some(Self::U),
            "X" => Some(Self::X),
            _ => None,
        }
    }

    /// Adjacency weight of this code.
    pub const fn weight(self) -> f64 {
        match self {
            Self::A => 243.0,
            Self::E => 81.0,
            Self::I => 27.0,
            Self::O => 9.0,
            Self::U => 3.0,
            Self::X => 0.0,
        }
    }
}

/// Weight for a raw code string; unknown codes weigh 0.
pub fn weight_of_code(code: &str) -> f64 {
    RelationshipCode::parse(code).map_or(0.0, RelationshipCode::weight)
}

/// A relationship triple as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    pub code: String,
}

impl Relationship {
    pub fn new(from: impl Into<String>, to: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            code: code.into(),
        }
    }

    /// Builds a relationship from a raw `[from, to, code]` triple.
    ///
    /// Any other arity is malformed and yields `None`.
    pub fn from_parts<S: AsRef<str>>(parts: &[S]) -> Option<Self> {
        match parts {
            [from, to, code] => Some(Self::new(from.as_ref(), to.as_ref(), code.as_ref())),
            _ => None,
        }
    }
}

/// Unordered pair of department ids, stored with the smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeptPair(usize, usize);

impl DeptPair {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn first(self) -> usize {
        self.0
    }

    pub fn second(self) -> usize {
        self.1
    }
}

/// Symmetric relationship weights keyed by unordered department pair.
///
/// Built once per run and read-only afterwards. Missing pairs weigh 0.
#[derive(Debug, Clone, Default)]
pub struct WeightTable {
    weights: HashMap<DeptPair, f64>,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table from caller triples.
    ///
    /// Triples naming an unknown department, or the same department on both
    /// ends, are skipped with a warning. Later triples for the same pair
    /// replace earlier ones.
    pub fn from_relationships(departments: &DepartmentSet, relationships: &[Relationship]) -> Self {
        let mut table = Self::new();
        for rel in relationships {
            let (Some(a), Some(b)) = (
                departments.index_of(&rel.from),
                departments.index_of(&rel.to),
            ) else {
                warn!(
                    from = %rel.from,
                    to = %rel.to,
                    code = %rel.code,
                    "Unknown department in relationship; skipping."
                );
                continue;
            };
            if a == b {
                warn!(
                    department = %rel.from,
                    "Relationship of a department with itself; skipping."
                );
                continue;
            }
            if RelationshipCode::parse(&rel.code).is_none() {
                warn!(code = %rel.code, "Unknown relationship code; using weight 0.");
            }
            table.insert(a, b, weight_of_code(&rel.code));
        }
        table
    }

    /// Sets the weight for the unordered pair `(a, b)`.
    pub fn insert(&mut self, a: usize, b: usize, weight: f64) {
        self.weights.insert(DeptPair::new(a, b), weight);
    }

    /// Weight for `(a, b)`; symmetric, 0 when undefined.
    pub fn get(&self, a: usize, b: usize) -> f64 {
        self.weights
            .get(&DeptPair::new(a, b))
            .copied()
            .unwrap_or(0.0)
    }

    /// Pairs with a nonzero weight, in ascending pair order.
    pub fn weighted_pairs(&self) -> Vec<(DeptPair, f64)> {
        let mut pairs: Vec<(DeptPair, f64)> = self
            .weights
            .iter()
            .filter(|&(_, &w)| w != 0.0)
            .map(|(&p, &w)| (p, w))
            .collect();
        pairs.sort_by_key(|(p, _)| *p);
        pairs
    }

    /// Number of defined pairs, including zero-weight ones.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn depts() -> DepartmentSet {
        DepartmentSet::from_areas([("A", 100.0), ("B", 100.0), ("C", 300.0)]).unwrap()
    }

    #[test]
    fn test_code_parsing() {
        assert_eq!(RelationshipCode::parse("a"), Some(RelationshipCode::A));
        assert_eq!(RelationshipCode::parse("  e \t"), Some(RelationshipCode::E));
        assert_eq!(RelationshipCode::parse("Q"), None);
        assert_eq!(RelationshipCode::parse(""), None);
    }

    #[test]
    fn test_code_weights() {
        let expected = [
            ("A", 243.0),
            ("E", 81.0),
            ("I", 27.0),
            ("O", 9.0),
            ("U", 3.0),
            ("X", 0.0),
            ("bogus", 0.0),
        ];
        for (code, w) in expected {
            assert_eq!(weight_of_code(code), w, "code {code}");
        }
    }

    #[test]
    fn test_from_parts_arity() {
        assert_eq!(
            Relationship::from_parts(&["A", "B", "E"]),
            Some(Relationship::new("A", "B", "E"))
        );
        assert_eq!(Relationship::from_parts(&["A", "B"]), None);
        assert_eq!(Relationship::from_parts(&["A", "B", "E", "extra"]), None);
    }

    #[test]
    fn test_table_is_symmetric() {
        let set = depts();
        let table = WeightTable::from_relationships(&set, &[Relationship::new("A", "B", "A")]);
        assert_eq!(table.get(0, 1), 243.0);
        assert_eq!(table.get(1, 0), 243.0);
        assert_eq!(table.get(0, 2), 0.0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_unknown_and_self_pairs_skipped() {
        let set = depts();
        let rels = [
            Relationship::new("A", "Nowhere", "A"),
            Relationship::new("C", "C", "A"),
            Relationship::new("B", "C", " i "),
        ];
        let table = WeightTable::from_relationships(&set, &rels);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(2, 1), 27.0);
    }

    #[test]
    fn test_later_triple_wins() {
        let set = depts();
        let rels = [
            Relationship::new("A", "B", "A"),
            Relationship::new("B", "A", "O"),
        ];
        let table = WeightTable::from_relationships(&set, &rels);
        assert_eq!(table.get(0, 1), 9.0);
    }

    #[test]
    fn test_weighted_pairs_skips_zero() {
        let set = depts();
        let rels = [
            Relationship::new("A", "B", "X"),
            Relationship::new("C", "A", "E"),
        ];
        let table = WeightTable::from_relationships(&set, &rels);
        assert_eq!(table.weighted_pairs(), vec![(DeptPair::new(0, 2), 81.0)]);
    }

    proptest! {
        #[test]
        fn prop_weight_symmetry(a in 0usize..20, b in 0usize..20, w in 0.0f64..1000.0) {
            let mut table = WeightTable::new();
            table.insert(a, b, w);
            prop_assert_eq!(table.get(a, b), table.get(b, a));
            prop_assert_eq!(DeptPair::new(a, b), DeptPair::new(b, a));
        }
    }
}
