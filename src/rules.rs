//! Classification rules applied ahead of catalog matching.
//!
//! Classification runs in three tiers. The first two live here as static
//! rule tables; the third, exact instance-name matching, lives in
//! [`crate::catalog`]. Earlier tiers always win: as soon as a tier adds at
//! least one candidate type, classification of that variable stops.

use std::collections::BTreeSet;

use crate::records::VariableRecord;

/// Variables reported against the environment or whole-building state
/// rather than any one input object.
pub const GLOBAL_TYPE: &str = "*GLOBAL*";
/// System node variables; nodes are connection points, not input objects.
pub const NODE_TYPE: &str = "*NODE*";
/// Airflow network node variables.
pub const AFN_NODE_TYPE: &str = "*AFN NODE*";
/// Performance curve variables, satisfiable by any curve or table object.
pub const CURVE_OR_TABLE_TYPE: &str = "*CURVE OR TABLE*";
/// Window and daylighting variables keyed by enclosure-derived names.
pub const ENCLOSURES_TYPE: &str = "*ENCLOSURES*";
/// Unitary system variables that may belong to several unitary objects.
pub const UNITARY_TYPE: &str = "*UNITARY*";

/// What a rule matches on.
#[derive(Debug)]
pub enum Trigger {
    /// The record's key equals one of these strings exactly.
    KeyIs(&'static [&'static str]),
    /// The record's variable name starts with one of these prefixes.
    NameStartsWith(&'static [&'static str]),
}

/// What a matching rule contributes to the candidate set.
#[derive(Debug)]
pub enum Outcome {
    /// Fixed candidate type tokens.
    Types(&'static [&'static str]),
    /// The record's key, uppercased. Used for unnamed singleton objects
    /// whose report key is the object type itself.
    UppercasedKey,
}

/// A tier 1 rule: a variable shape that bypasses catalog matching
/// entirely because its key never names an input object instance.
#[derive(Debug)]
pub struct SpecialCase {
    pub trigger: Trigger,
    pub outcome: Outcome,
}

/// Tier 1 rule table. Unlike tier 2, every rule is evaluated; a record
/// matching several rules collects the candidates of each.
pub static SPECIAL_CASES: &[SpecialCase] = &[
    // Keys that never appear as instance names in any input file.
    SpecialCase {
        trigger: Trigger::KeyIs(&[
            "Environment",
            "Simulation",
            "SimHVAC",
            "SimAir",
            "Whole Building",
            "Facility",
            "Site",
            "ManageDemand",
        ]),
        outcome: Outcome::Types(&[GLOBAL_TYPE]),
    },
    // Node variables are keyed by node names, which are not objects.
    SpecialCase {
        trigger: Trigger::NameStartsWith(&["System Node "]),
        outcome: Outcome::Types(&[NODE_TYPE]),
    },
    SpecialCase {
        trigger: Trigger::NameStartsWith(&["AFN Node "]),
        outcome: Outcome::Types(&[AFN_NODE_TYPE]),
    },
    // Unnamed singleton objects report under their own type name.
    SpecialCase {
        trigger: Trigger::KeyIs(&["Site:Precipitation", "RoofIrrigation"]),
        outcome: Outcome::UppercasedKey,
    },
    // Walk-in cases report under "{case}InZone{zone}" concatenated keys.
    SpecialCase {
        trigger: Trigger::NameStartsWith(&["Refrigeration Walk In"]),
        outcome: Outcome::Types(&["REFRIGERATION:WALKIN"]),
    },
    // Internal gains attached to a zone list report under generated keys
    // of the form "{zone} {gain}", so the key never matches an instance.
    SpecialCase {
        trigger: Trigger::NameStartsWith(&["People "]),
        outcome: Outcome::Types(&["PEOPLE"]),
    },
    SpecialCase {
        trigger: Trigger::NameStartsWith(&["Lights "]),
        outcome: Outcome::Types(&["LIGHTS"]),
    },
    SpecialCase {
        trigger: Trigger::NameStartsWith(&["Electric Equipment "]),
        outcome: Outcome::Types(&["ELECTRICEQUIPMENT"]),
    },
    SpecialCase {
        trigger: Trigger::NameStartsWith(&["Hot Water Equipment "]),
        outcome: Outcome::Types(&["HOTWATEREQUIPMENT"]),
    },
    SpecialCase {
        trigger: Trigger::NameStartsWith(&["Performance Curve "]),
        outcome: Outcome::Types(&[CURVE_OR_TABLE_TYPE]),
    },
    // Window and daylighting reports are keyed by enclosure names.
    SpecialCase {
        trigger: Trigger::NameStartsWith(&[
            "Daylighting Window Reference Point ",
            "Zone Windows Total ",
            "Zone Interior Windows Total ",
            "Zone Exterior Windows Total ",
        ]),
        outcome: Outcome::Types(&[ENCLOSURES_TYPE]),
    },
];

/// A tier 2 rule: a name prefix whose correct types are known ahead of
/// catalog matching because input files commonly reuse one instance name
/// across several object types, making exact key matching ambiguous.
#[derive(Debug)]
pub struct NameOverride {
    pub prefix: &'static str,
    pub types: &'static [&'static str],
}

/// Tier 2 rule table. Order matters: the first matching prefix wins and
/// later rules are not consulted.
pub static NAME_OVERRIDES: &[NameOverride] = &[
    NameOverride { prefix: "Zone ", types: &["ZONE"] },
    NameOverride { prefix: "People ", types: &["PEOPLE"] },
    NameOverride { prefix: "Lights ", types: &["LIGHTS"] },
    NameOverride { prefix: "Air System ", types: &["AIRLOOPHVAC"] },
    NameOverride { prefix: "Water Use ", types: &["WATERUSE:EQUIPMENT"] },
    NameOverride { prefix: "Steam Equipment ", types: &["STEAMEQUIPMENT"] },
    NameOverride { prefix: "Fluid Heat Exchanger ", types: &["HEATEXCHANGER:FLUIDTOFLUID"] },
    NameOverride { prefix: "Electric Load Center ", types: &["ELECTRICLOADCENTER:DISTRIBUTION"] },
    NameOverride { prefix: "Room Air Zone ", types: &["ZONE"] },
    NameOverride { prefix: "RoomAirflowNetwork Node ", types: &["ROOMAIR:NODE:AIRFLOWNETWORK"] },
    NameOverride { prefix: "Refrigeration Zone Case and Walk In", types: &["ZONE"] },
    NameOverride {
        prefix: "Surface Other Side Conditions ",
        types: &["SURFACEPROPERTY:OTHERSIDECONDITIONSMODEL"],
    },
    // One report key is shared by up to four schedule kinds.
    NameOverride {
        prefix: "Schedule Value",
        types: &["SCHEDULE:YEAR", "SCHEDULE:COMPACT", "SCHEDULE:FILE", "SCHEDULE:CONSTANT"],
    },
    NameOverride { prefix: "Unitary System ", types: &[UNITARY_TYPE] },
    // The hybrid ventilation controller shares its name with both the
    // air loop and the zone it manages.
    NameOverride {
        prefix: "Availability Manager Hybrid Ventilation Control ",
        types: &["AIRLOOPHVAC", "ZONE"],
    },
];

/// Apply every tier 1 rule to `record`, adding candidate types to
/// `candidates`. Returns true when at least one candidate was added.
pub fn apply_special_cases(record: &VariableRecord, candidates: &mut BTreeSet<String>) -> bool {
    let before = candidates.len();
    for case in SPECIAL_CASES {
        let matched = match case.trigger {
            Trigger::KeyIs(keys) => keys.contains(&record.key.as_str()),
            Trigger::NameStartsWith(prefixes) => {
                prefixes.iter().any(|prefix| record.name.starts_with(prefix))
            }
        };
        if !matched {
            continue;
        }
        match case.outcome {
            Outcome::Types(types) => {
                candidates.extend(types.iter().map(|t| t.to_string()));
            }
            Outcome::UppercasedKey => {
                candidates.insert(record.key.to_uppercase());
            }
        }
    }
    candidates.len() > before
}

/// Apply the first tier 2 rule whose prefix matches `name`, adding its
/// candidate types. Returns true when a rule matched.
pub fn apply_name_overrides(name: &str, candidates: &mut BTreeSet<String>) -> bool {
    for rule in NAME_OVERRIDES {
        if name.starts_with(rule.prefix) {
            candidates.extend(rule.types.iter().map(|t| t.to_string()));
            return true;
        }
    }
    false
}
