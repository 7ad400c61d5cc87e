//! Input object catalog extracted from a run's epJSON document.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::{debug, warn};

/// Object types that never correspond to report variables, even when
/// their instances share names with reportable objects.
pub const EXCLUDED_TYPE_PREFIXES: &[&str] = &["COMPONENTCOST", "ENERGYMANAGEMENT"];

/// This object type carries no instance name of its own; instances are
/// identified by their `heat_pump_name` field instead.
pub const VRF_FLUID_TC_TYPE: &str =
    "AirConditioner:VariableRefrigerantFlow:FluidTemperatureControl";

/// All matchable input object instances of one run, indexed for
/// case-insensitive lookup by instance name.
#[derive(Debug, Default)]
pub struct ObjectCatalog {
    /// Declared object types and their instance names, as written.
    types: BTreeMap<String, Vec<String>>,
    /// Uppercased instance name to the uppercased types declaring it.
    index: FxHashMap<String, BTreeSet<String>>,
}

impl ObjectCatalog {
    /// Build a catalog from a parsed epJSON document.
    ///
    /// The top level of an epJSON document maps object type names to an
    /// object of instances, which in turn maps instance names to field
    /// objects. Entries not shaped that way are skipped, as are the
    /// non-reportable types named by [`EXCLUDED_TYPE_PREFIXES`].
    pub fn from_document(document: &Value) -> Self {
        let mut catalog = Self::default();
        let Some(object_types) = document.as_object() else {
            warn!("Input document top level is not an object; catalog left empty");
            return catalog;
        };
        for (type_name, instances) in object_types {
            let upper_type = type_name.to_uppercase();
            if EXCLUDED_TYPE_PREFIXES.iter().any(|p| upper_type.starts_with(p)) {
                debug!("Excluding non-reportable object type: {}", type_name);
                continue;
            }
            let Some(instances) = instances.as_object() else {
                debug!("Skipping malformed object type entry: {}", type_name);
                continue;
            };
            let mut names = Vec::with_capacity(instances.len());
            for (instance_name, fields) in instances {
                names.push(effective_name(type_name, instance_name, fields));
            }
            for name in &names {
                catalog
                    .index
                    .entry(name.to_uppercase())
                    .or_default()
                    .insert(upper_type.clone());
            }
            catalog.types.insert(type_name.clone(), names);
        }
        catalog
    }

    /// Uppercased types declaring an instance whose name equals `key`,
    /// compared case-insensitively. Empty when nothing matches.
    pub fn matching_types(&self, key: &str) -> BTreeSet<String> {
        self.index.get(&key.to_uppercase()).cloned().unwrap_or_default()
    }

    /// Number of object types retained in the catalog.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Number of object instances retained in the catalog.
    pub fn instance_count(&self) -> usize {
        self.types.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// The name a catalog instance is matched under.
fn effective_name(type_name: &str, instance_name: &str, fields: &Value) -> String {
    if type_name == VRF_FLUID_TC_TYPE {
        if let Some(name) = fields.get("heat_pump_name").and_then(Value::as_str) {
            return name.to_string();
        }
        warn!(
            "VRF instance {} has no usable heat_pump_name, matching by instance name",
            instance_name
        );
    }
    instance_name.to_string()
}
