#[cfg(test)]
mod classify_tests {
    use serde_json::json;

    use crate::catalog::ObjectCatalog;
    use crate::classify::{classify_record, classify_run};
    use crate::records::VariableRecord;
    use crate::rules::{ENCLOSURES_TYPE, GLOBAL_TYPE};

    fn record(name: &str, key: &str) -> VariableRecord {
        VariableRecord {
            name: name.to_string(),
            units: "C".to_string(),
            time_step: "Zone".to_string(),
            key: key.to_string(),
        }
    }

    // A catalog where one instance name is shared by a zone and a light,
    // the shape that motivates the name override tier.
    fn zone_catalog() -> ObjectCatalog {
        ObjectCatalog::from_document(&json!({
            "Zone": { "ZoneA": {}, "ZoneB": {} },
            "Lights": { "ZoneA": {} },
            "Schedule:Compact": { "AlwaysOn": {} }
        }))
    }

    fn candidates(c: &crate::classify::Classification) -> Vec<&str> {
        c.candidate_types.iter().map(String::as_str).collect()
    }

    #[test]
    fn keys_match_instance_names_case_insensitively() {
        let c = classify_record(&record("Surface Inside Face Temperature", "ZONEA"), &zone_catalog());
        assert_eq!(c.variable_name, "SURFACE INSIDE FACE TEMPERATURE");
        assert_eq!(candidates(&c), vec!["LIGHTS", "ZONE"]);
    }

    #[test]
    fn global_keys_classify_even_against_an_empty_catalog() {
        let catalog = ObjectCatalog::from_document(&json!({}));
        assert!(catalog.is_empty());
        let c = classify_record(&record("Site Outdoor Air Drybulb Temperature", "Environment"), &catalog);
        assert_eq!(candidates(&c), vec![GLOBAL_TYPE]);
    }

    #[test]
    fn special_cases_preempt_name_overrides() {
        // "Zone Windows Total ..." would hit the "Zone " override, but the
        // enclosure special case sees it first.
        let c = classify_record(&record("Zone Windows Total Heat Gain Rate", "ZoneA"), &zone_catalog());
        assert_eq!(candidates(&c), vec![ENCLOSURES_TYPE]);
    }

    #[test]
    fn name_overrides_preempt_catalog_matching() {
        // ZoneA names both a zone and a light; the override resolves the
        // ambiguity instead of reporting both.
        let c = classify_record(&record("Zone Mean Air Temperature", "ZoneA"), &zone_catalog());
        assert_eq!(candidates(&c), vec!["ZONE"]);
    }

    #[test]
    fn schedule_values_map_to_exactly_four_schedule_types() {
        // The catalog's own Schedule:Compact instance is never consulted.
        let c = classify_record(&record("Schedule Value", "AlwaysOn"), &zone_catalog());
        assert_eq!(
            candidates(&c),
            vec!["SCHEDULE:COMPACT", "SCHEDULE:CONSTANT", "SCHEDULE:FILE", "SCHEDULE:YEAR"]
        );
    }

    #[test]
    fn unmatched_keys_yield_an_empty_candidate_set() {
        let c = classify_record(&record("Pump Electricity Rate", "Missing Pump"), &zone_catalog());
        assert!(c.candidate_types.is_empty());
        assert_eq!(c.variable_name, "PUMP ELECTRICITY RATE");
    }

    #[test]
    fn ems_records_never_reach_the_output() {
        let records = vec![
            record("My Custom Meter", "EMS"),
            record("Surface Inside Face Temperature", "ZoneB"),
        ];
        let out = classify_run(&records, &zone_catalog());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].variable_name, "SURFACE INSIDE FACE TEMPERATURE");
    }

    #[test]
    fn the_first_record_wins_for_a_repeated_variable_name() {
        // Same variable spelled in different cases with different keys;
        // only the first key's candidates are kept.
        let records = vec![
            record("Surface Inside Face Temperature", "ZoneA"),
            record("SURFACE INSIDE FACE TEMPERATURE", "AlwaysOn"),
        ];
        let out = classify_run(&records, &zone_catalog());
        assert_eq!(out.len(), 1);
        assert_eq!(candidates(&out[0]), vec!["LIGHTS", "ZONE"]);
    }

    #[test]
    fn an_ems_record_does_not_consume_its_variable_name() {
        // EMS filtering happens before duplicate suppression, so a later
        // real record under the same name still classifies.
        let records = vec![
            record("Plant Supply Side Cooling Demand Rate", "EMS"),
            record("Plant Supply Side Cooling Demand Rate", "AlwaysOn"),
        ];
        let out = classify_run(&records, &zone_catalog());
        assert_eq!(out.len(), 1);
        assert_eq!(candidates(&out[0]), vec!["SCHEDULE:COMPACT"]);
    }

    #[test]
    fn run_order_is_preserved() {
        let records = vec![
            record("Surface Inside Face Temperature", "ZoneB"),
            record("Site Outdoor Air Drybulb Temperature", "Environment"),
            record("Pump Electricity Rate", "Missing Pump"),
        ];
        let out = classify_run(&records, &zone_catalog());
        let names: Vec<&str> = out.iter().map(|c| c.variable_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "SURFACE INSIDE FACE TEMPERATURE",
                "SITE OUTDOOR AIR DRYBULB TEMPERATURE",
                "PUMP ELECTRICITY RATE"
            ]
        );
    }

    #[test]
    fn excluded_catalog_types_never_match() {
        let catalog = ObjectCatalog::from_document(&json!({
            "ComponentCost:LineItem": { "Main Chiller": {} },
            "EnergyManagementSystem:OutputVariable": { "Main Chiller": {} },
            "Chiller:Electric": { "Main Chiller": {} }
        }));
        let c = classify_record(&record("Chiller Electricity Rate", "Main Chiller"), &catalog);
        assert_eq!(candidates(&c), vec!["CHILLER:ELECTRIC"]);
    }

    #[test]
    fn vrf_heat_pump_names_are_matchable() {
        let catalog = ObjectCatalog::from_document(&json!({
            "AirConditioner:VariableRefrigerantFlow:FluidTemperatureControl": {
                "VRF 1": { "heat_pump_name": "VRF Heat Pump" }
            }
        }));
        let c = classify_record(&record("VRF Heat Pump Compressor Electricity Rate", "VRF HEAT PUMP"), &catalog);
        assert_eq!(
            candidates(&c),
            vec!["AIRCONDITIONER:VARIABLEREFRIGERANTFLOW:FLUIDTEMPERATURECONTROL"]
        );
    }
}
