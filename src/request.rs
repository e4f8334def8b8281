//! JSON request and response shapes of the layout planning tool.
//!
//! The request carries departments as a name → area object, relationships
//! as raw `[from, to, code]` arrays and optional GA parameters. Irregular
//! relationship entries are skipped with a warning rather than rejecting
//! the whole request.

use crate::error::LayoutError;
use crate::ga::GaConfig;
use crate::model::Relationship;
use crate::optimizer::{LayoutInput, LayoutOptimizer, LayoutResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// Body of an optimize request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimizeRequest {
    /// Department name → area, in submission order.
    pub departments: Map<String, Value>,
    /// Raw `[from, to, code]` entries.
    pub relationships: Vec<Value>,
    /// Suggested placement order.
    pub sequence: Option<Vec<String>>,
    pub pop_size: Option<usize>,
    pub generations: Option<usize>,
    pub mutation_rate: Option<f64>,
    pub elitism: Option<usize>,
    pub seed: Option<u64>,
}

impl OptimizeRequest {
    /// Converts the request into facade input.
    ///
    /// Non-numeric areas become NaN so the optimizer reports them as
    /// [`LayoutError::InvalidArea`].
    pub fn to_input(&self) -> LayoutInput {
        let departments = self
            .departments
            .iter()
            .map(|(name, area)| (name.clone(), area.as_f64().unwrap_or(f64::NAN)))
            .collect();

        let relationships = self
            .relationships
            .iter()
            .filter_map(|entry| {
                let parsed = entry.as_array().and_then(|parts| {
                    let strings: Option<Vec<&str>> = parts.iter().map(Value::as_str).collect();
                    Relationship::from_parts(&strings?)
                });
                if parsed.is_none() {
                    warn!(
                        entry = %entry,
                        "Malformed relationship entry; expected [from, to, code]."
                    );
                }
                parsed
            })
            .collect();

        LayoutInput {
            departments,
            relationships,
            initial_sequence: self.sequence.clone(),
        }
    }

    /// `base` overridden by the parameters present in the request.
    pub fn config(&self, base: &GaConfig) -> GaConfig {
        let mut config = base.clone();
        if let Some(n) = self.pop_size {
            config = config.with_population_size(n);
        }
        if let Some(n) = self.generations {
            config = config.with_generations(n);
        }
        if let Some(rate) = self.mutation_rate {
            config = config.with_mutation_rate(rate);
        }
        if let Some(n) = self.elitism {
            config = config.with_elitism_count(n);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

/// Body of an optimize response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub success: bool,
    pub best_sequence: Option<Vec<String>>,
    /// 0 when no feasible layout exists.
    pub best_score: f64,
    /// Department → list of `[row, col]`.
    pub best_positions: Option<BTreeMap<String, Vec<[usize; 2]>>>,
    pub score_history: Vec<Option<f64>>,
    pub message: String,
}

impl OptimizeResponse {
    pub fn from_result(result: &LayoutResult) -> Self {
        let success = result.is_success();
        Self {
            success,
            best_sequence: result.best_sequence.clone(),
            best_score: result.reported_score(),
            best_positions: result.best_positions.as_ref().map(|positions| {
                positions
                    .iter()
                    .map(|(name, cells)| {
                        (name.clone(), cells.iter().map(|c| [c.row, c.col]).collect())
                    })
                    .collect()
            }),
            score_history: result.score_history.clone(),
            message: if success {
                "Success".to_string()
            } else {
                "No valid layout found".to_string()
            },
        }
    }

    pub fn from_error(err: &LayoutError) -> Self {
        Self {
            success: false,
            best_sequence: None,
            best_score: 0.0,
            best_positions: None,
            score_history: Vec::new(),
            message: err.to_string(),
        }
    }
}

/// Runs a request end to end, turning configuration errors into a failed
/// response.
pub fn handle(request: &OptimizeRequest, base: &GaConfig) -> OptimizeResponse {
    let optimizer = LayoutOptimizer::new(request.config(base));
    match optimizer.optimize(&request.to_input()) {
        Ok(result) => OptimizeResponse::from_result(&result),
        Err(err) => OptimizeResponse::from_error(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> OptimizeRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_request_defaults() {
        let req = parse(json!({}));
        assert!(req.departments.is_empty());
        assert!(req.sequence.is_none());
        let config = req.config(&GaConfig::default());
        assert_eq!(config, GaConfig::default());
    }

    #[test]
    fn test_request_overrides_config() {
        let req = parse(json!({
            "popSize": 20,
            "generations": 7,
            "mutationRate": 0.3,
            "elitism": 1,
            "seed": 99
        }));
        let config = req.config(&GaConfig::default());
        assert_eq!(config.population_size, 20);
        assert_eq!(config.generations, 7);
        assert!((config.mutation_rate - 0.3).abs() < 1e-12);
        assert_eq!(config.elitism_count, 1);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_department_order_and_areas() {
        let req = parse(json!({
            "departments": {"Zeta": 10, "Alpha": 30.5, "Mid": "big"}
        }));
        let input = req.to_input();
        let names: Vec<&str> = input.departments.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(input.departments[1].1, 30.5);
        assert!(input.departments[2].1.is_nan());
    }

    #[test]
    fn test_malformed_relationships_skipped() {
        let req = parse(json!({
            "departments": {"A": 1, "B": 1},
            "relationships": [
                ["A", "B", "E"],
                ["A", "B"],
                ["A", "B", 3],
                "A-B-E",
                ["A", "B", "I", "extra"]
            ]
        }));
        let input = req.to_input();
        assert_eq!(input.relationships, vec![Relationship::new("A", "B", "E")]);
    }

    #[test]
    fn test_handle_success() {
        let req = parse(json!({
            "departments": {"Office": 100, "Lab": 300, "Storage": 80},
            "relationships": [["Lab", "Storage", "A"]],
            "sequence": ["Office", "Lab", "Storage"],
            "popSize": 20,
            "generations": 15,
            "seed": 5
        }));
        let resp = handle(&req, &GaConfig::default());
        assert!(resp.success);
        assert_eq!(resp.message, "Success");
        assert_eq!(resp.best_score, 243.0);
        assert_eq!(resp.score_history.len(), 15);
        assert_eq!(resp.best_positions.as_ref().unwrap()["Lab"].len(), 2);

        let body = serde_json::to_value(&resp).unwrap();
        assert!(body.get("bestSequence").is_some());
        assert!(body.get("scoreHistory").is_some());
    }

    #[test]
    fn test_handle_capacity_error() {
        let departments: Map<String, Value> =
            (0..26).map(|i| (format!("D{i}"), json!(1))).collect();
        let req = OptimizeRequest {
            departments,
            ..OptimizeRequest::default()
        };
        let resp = handle(&req, &GaConfig::default().with_seed(1));
        assert!(!resp.success);
        assert_eq!(resp.best_score, 0.0);
        assert!(resp.best_sequence.is_none());
        assert!(resp.message.contains("26"));
    }

    #[test]
    fn test_handle_empty_departments() {
        let resp = handle(&parse(json!({})), &GaConfig::default());
        assert!(!resp.success);
        assert_eq!(resp.message, LayoutError::NoDepartments.to_string());
    }
}
