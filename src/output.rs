//! Rendering and writing of classification results.
//!
//! Two output surfaces exist: the pair of canonical map documents written
//! after a build-tree mapping, and the single-run report printed by the
//! classify command in either JSON or colored terminal form.

use std::fs;
use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use tracing::info;

use crate::aggregate::{ObjectMap, VariableMap};
use crate::classify::Classification;
use crate::error::Result;

/// File name of the variable-to-types map document.
pub const VARIABLE_MAP_FILE: &str = "output_var_to_object_map.json";
/// File name of the type-to-variables map document.
pub const OBJECT_MAP_FILE: &str = "object_to_output_var_map.json";

/// Write both canonical map documents under `out_dir`, creating the
/// directory if necessary.
pub fn write_map_files(out_dir: &Path, variables: &VariableMap, objects: &ObjectMap) -> Result<()> {
    fs::create_dir_all(out_dir)?;

    let variable_path = out_dir.join(VARIABLE_MAP_FILE);
    fs::write(
        &variable_path,
        serde_json::to_string_pretty(&variables.to_document())?,
    )?;
    info!("Wrote variable map: {}", variable_path.display());

    let object_path = out_dir.join(OBJECT_MAP_FILE);
    fs::write(
        &object_path,
        serde_json::to_string_pretty(&objects.to_document())?,
    )?;
    info!("Wrote object map: {}", object_path.display());

    Ok(())
}

/// Single-run report for JSON output.
#[derive(Serialize)]
struct RunReport<'a> {
    run: &'a str,
    variables: &'a [Classification],
}

/// Format one run's classifications as pretty-printed JSON.
pub fn format_run_json(run_name: &str, classifications: &[Classification]) -> Result<String> {
    let report = RunReport {
        run: run_name,
        variables: classifications,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Format one run's classifications for the terminal.
pub fn format_run_terminal(run_name: &str, classifications: &[Classification]) -> String {
    let unmatched = classifications
        .iter()
        .filter(|c| c.candidate_types.is_empty())
        .count();
    let mut output = String::new();
    output.push_str(&format!(
        "├─ {} ({} variables, {} unmatched)\n",
        run_name.bright_white(),
        classifications.len(),
        unmatched
    ));
    for classification in classifications {
        if classification.candidate_types.is_empty() {
            output.push_str(&format!(
                "│    {} {}\n",
                classification.variable_name,
                "(no candidates)".dimmed()
            ));
        } else {
            let types: Vec<&str> = classification
                .candidate_types
                .iter()
                .map(String::as_str)
                .collect();
            output.push_str(&format!(
                "│    {} {}\n",
                classification.variable_name,
                types.join(", ").cyan()
            ));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn sample_classifications() -> Vec<Classification> {
        vec![
            Classification {
                variable_name: "ZONE MEAN AIR TEMPERATURE".to_string(),
                candidate_types: BTreeSet::from(["ZONE".to_string()]),
            },
            Classification {
                variable_name: "MYSTERY VARIABLE".to_string(),
                candidate_types: BTreeSet::new(),
            },
        ]
    }

    #[test]
    fn writes_both_map_documents() {
        let tmp = TempDir::new().unwrap();
        let out_dir = tmp.path().join("maps");
        let mut variables = VariableMap::new();
        variables.merge_run(&sample_classifications());
        let objects = variables.invert();

        write_map_files(&out_dir, &variables, &objects).unwrap();

        let forward: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out_dir.join(VARIABLE_MAP_FILE)).unwrap())
                .unwrap();
        assert!(forward["OutputVariables"].is_array());
        let inverse: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out_dir.join(OBJECT_MAP_FILE)).unwrap())
                .unwrap();
        assert_eq!(inverse["OutputVariables"]["ZONE"][0], "ZONE MEAN AIR TEMPERATURE");
    }

    #[test]
    fn json_report_names_the_run() {
        let rendered = format_run_json("5ZoneAirCooled", &sample_classifications()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["run"], "5ZoneAirCooled");
        assert_eq!(value["variables"][0]["variable_name"], "ZONE MEAN AIR TEMPERATURE");
    }

    #[test]
    fn terminal_report_lists_every_variable() {
        let rendered = format_run_terminal("5ZoneAirCooled", &sample_classifications());
        assert!(rendered.contains("2 variables, 1 unmatched"));
        assert!(rendered.contains("ZONE MEAN AIR TEMPERATURE"));
        assert!(rendered.contains("(no candidates)"));
    }
}
