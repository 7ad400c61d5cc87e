//! Cross-run aggregation into the two canonical map documents.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::classify::Classification;

/// Union of candidate types per variable name across every merged run.
///
/// Backed by ordered collections so the serialized output is identical
/// for a given set of runs regardless of merge order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VariableMap {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl VariableMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one run's classifications into the map. A variable already
    /// present unions its candidates; a variable with an empty candidate
    /// set is still recorded as seen.
    pub fn merge_run(&mut self, classifications: &[Classification]) {
        for classification in classifications {
            self.entries
                .entry(classification.variable_name.clone())
                .or_default()
                .extend(classification.candidate_types.iter().cloned());
        }
    }

    /// Derive the inverse, type-to-variables map. Variables with no
    /// candidates have no pairs to contribute and do not appear.
    pub fn invert(&self) -> ObjectMap {
        let mut entries: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (variable, types) in &self.entries {
            for object_type in types {
                entries
                    .entry(object_type.clone())
                    .or_default()
                    .insert(variable.clone());
            }
        }
        ObjectMap { entries }
    }

    pub fn get(&self, variable: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(variable)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Document form matching the published JSON shape.
    pub fn to_document(&self) -> VariableMapDocument {
        VariableMapDocument {
            output_variables: self
                .entries
                .iter()
                .map(|(variable, types)| {
                    let mut entry = BTreeMap::new();
                    entry.insert(variable.clone(), types.iter().cloned().collect());
                    entry
                })
                .collect(),
        }
    }
}

/// Inverse mapping: each candidate type to every variable that listed it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ObjectMap {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl ObjectMap {
    pub fn get(&self, object_type: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(object_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Document form matching the published JSON shape.
    pub fn to_document(&self) -> ObjectMapDocument {
        ObjectMapDocument {
            output_variables: self
                .entries
                .iter()
                .map(|(object_type, variables)| {
                    (object_type.clone(), variables.iter().cloned().collect())
                })
                .collect(),
        }
    }
}

/// Serialized form of the variable-to-types map: a list of single-entry
/// objects under one `OutputVariables` key.
#[derive(Debug, Serialize)]
pub struct VariableMapDocument {
    #[serde(rename = "OutputVariables")]
    output_variables: Vec<BTreeMap<String, Vec<String>>>,
}

/// Serialized form of the type-to-variables map: one object keyed by
/// type under one `OutputVariables` key.
#[derive(Debug, Serialize)]
pub struct ObjectMapDocument {
    #[serde(rename = "OutputVariables")]
    output_variables: BTreeMap<String, Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classification(variable: &str, types: &[&str]) -> Classification {
        Classification {
            variable_name: variable.to_string(),
            candidate_types: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn merging_unions_candidates_across_runs() {
        let mut map = VariableMap::new();
        map.merge_run(&[classification("FAN ELECTRICITY RATE", &["FAN:CONSTANTVOLUME"])]);
        map.merge_run(&[classification("FAN ELECTRICITY RATE", &["FAN:VARIABLEVOLUME"])]);
        let types = map.get("FAN ELECTRICITY RATE").unwrap();
        assert_eq!(types.len(), 2);
        assert!(types.contains("FAN:CONSTANTVOLUME"));
        assert!(types.contains("FAN:VARIABLEVOLUME"));
    }

    #[test]
    fn inversion_lists_each_variable_once_per_type() {
        let mut map = VariableMap::new();
        map.merge_run(&[classification("ZONE MEAN AIR TEMPERATURE", &["ZONE"])]);
        map.merge_run(&[classification("ZONE MEAN AIR TEMPERATURE", &["ZONE"])]);
        let inverse = map.invert();
        let variables = inverse.get("ZONE").unwrap();
        assert_eq!(variables.len(), 1);
        assert!(variables.contains("ZONE MEAN AIR TEMPERATURE"));
    }

    #[test]
    fn unmatched_variables_stay_out_of_the_inverse_map() {
        let mut map = VariableMap::new();
        map.merge_run(&[classification("MYSTERY VARIABLE", &[])]);
        assert_eq!(map.len(), 1);
        assert!(map.invert().is_empty());
    }

    #[test]
    fn merge_order_does_not_change_the_result() {
        let run_a = [classification("A", &["T1"]), classification("B", &["T2"])];
        let run_b = [classification("A", &["T3"])];
        let mut forward = VariableMap::new();
        forward.merge_run(&run_a);
        forward.merge_run(&run_b);
        let mut reversed = VariableMap::new();
        reversed.merge_run(&run_b);
        reversed.merge_run(&run_a);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn variable_document_is_a_list_of_single_entry_objects() {
        let mut map = VariableMap::new();
        map.merge_run(&[
            classification("B VARIABLE", &["T2", "T1"]),
            classification("A VARIABLE", &[]),
        ]);
        let document = serde_json::to_value(map.to_document()).unwrap();
        assert_eq!(
            document,
            json!({
                "OutputVariables": [
                    { "A VARIABLE": [] },
                    { "B VARIABLE": ["T1", "T2"] }
                ]
            })
        );
    }

    #[test]
    fn object_document_is_one_object_keyed_by_type() {
        let mut map = VariableMap::new();
        map.merge_run(&[
            classification("A VARIABLE", &["T1"]),
            classification("B VARIABLE", &["T1", "T2"]),
        ]);
        let document = serde_json::to_value(map.invert().to_document()).unwrap();
        assert_eq!(
            document,
            json!({
                "OutputVariables": {
                    "T1": ["A VARIABLE", "B VARIABLE"],
                    "T2": ["B VARIABLE"]
                }
            })
        );
    }
}
