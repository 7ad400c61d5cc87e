//! Per-run classification of output variables.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::debug;

use crate::catalog::ObjectCatalog;
use crate::records::VariableRecord;
use crate::rules;

/// One output variable and every input object type that could have
/// produced it within a single run. An empty candidate set means the
/// variable is recognized but unmatched, not that classification failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Uppercased output variable name.
    pub variable_name: String,
    /// Uppercased candidate type tokens.
    pub candidate_types: BTreeSet<String>,
}

/// Classify a single record against the rule tiers and the catalog.
///
/// Tier 1 special cases run first, then tier 2 name overrides, then exact
/// instance-name matching against the catalog. The first tier to produce
/// a candidate settles the variable.
pub fn classify_record(record: &VariableRecord, catalog: &ObjectCatalog) -> Classification {
    let mut candidates = BTreeSet::new();
    if !rules::apply_special_cases(record, &mut candidates)
        && !rules::apply_name_overrides(&record.name, &mut candidates)
    {
        candidates = catalog.matching_types(&record.key);
    }
    Classification {
        variable_name: record.name.to_uppercase(),
        candidate_types: candidates,
    }
}

/// Classify every retained record of a run.
///
/// EMS records are dropped without claiming their variable name, and only
/// the first record for any uppercased variable name is classified.
pub fn classify_run(records: &[VariableRecord], catalog: &ObjectCatalog) -> Vec<Classification> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut classifications = Vec::new();
    for record in records {
        if record.is_ems() {
            debug!("Skipping EMS variable: {}", record.name);
            continue;
        }
        if !seen.insert(record.name.to_uppercase()) {
            continue;
        }
        classifications.push(classify_record(record, catalog));
    }
    classifications
}
