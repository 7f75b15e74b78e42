// tests/semantic/mapper_test.rs
#[cfg(test)]
mod tests {
    use tempora::error::ResolveError;
    use tempora::semantic::{column_type, resolve_column, ColumnType, SemanticLayer};

    const LAYER: &str = r#"
[tables.vehicle_trips]
description = "One row per vehicle per day"

[tables.vehicle_trips.columns.vehicle_id]
description = "Vehicle identifier"
type = "string"
semantic = ["vid", "vehicle", "vehicle id"]

[tables.vehicle_trips.columns.drive_date]
type = "date"
semantic = "trip date"

[tables.vehicle_trips.columns.driven_km]
type = "number"
semantic = ["distance", "km driven"]

[metrics.utilization]
formula = "driven_km / available_km"
constraints = "available_km > 0"
business_rules = "Exclude maintenance days"
"#;

    fn layer() -> SemanticLayer {
        SemanticLayer::from_toml_str(LAYER).unwrap()
    }

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_vid_resolves_to_vehicle_id() {
        let available = columns(&["vehicle_id", "drive_date", "driven_km"]);
        assert_eq!(
            resolve_column("VID", &layer(), &available).unwrap(),
            "vehicle_id"
        );
    }

    #[test]
    fn test_multi_word_alias() {
        let available = columns(&["vehicle_id", "driven_km"]);
        assert_eq!(
            resolve_column("  Vehicle ID ", &layer(), &available).unwrap(),
            "vehicle_id"
        );
        assert_eq!(
            resolve_column("km driven", &layer(), &available).unwrap(),
            "driven_km"
        );
    }

    #[test]
    fn test_single_string_alias() {
        let available = columns(&["drive_date"]);
        assert_eq!(
            resolve_column("trip date", &layer(), &available).unwrap(),
            "drive_date"
        );
    }

    #[test]
    fn test_dataset_casing_wins_over_layer_casing() {
        let available = columns(&["VEHICLE_ID"]);
        assert_eq!(
            resolve_column("vid", &layer(), &available).unwrap(),
            "VEHICLE_ID"
        );
    }

    #[test]
    fn test_alias_match_survives_missing_dataset_column() {
        // The layer still names the canonical column even when the dataset
        // snapshot lacks it; the engine decides what to do with that.
        let available = columns(&["driven_km"]);
        assert_eq!(
            resolve_column("vid", &layer(), &available).unwrap(),
            "vehicle_id"
        );
    }

    #[test]
    fn test_direct_match_when_no_alias_declared() {
        let available = columns(&["Depot_Name"]);
        assert_eq!(
            resolve_column("depot_name", &layer(), &available).unwrap(),
            "Depot_Name"
        );
    }

    #[test]
    fn test_unmappable_entity() {
        let available = columns(&["vehicle_id"]);
        let err = resolve_column("warp factor", &layer(), &available).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnmappableEntity {
                key: "warp factor".into()
            }
        );
    }

    #[test]
    fn test_declared_types() {
        let layer = layer();
        assert_eq!(column_type(&layer, "driven_km"), Some(ColumnType::Number));
        assert_eq!(column_type(&layer, "drive_date"), Some(ColumnType::Date));
        assert_eq!(column_type(&layer, "vehicle_id"), Some(ColumnType::String));
        assert_eq!(column_type(&layer, "nope"), None);
    }

    #[test]
    fn test_metrics_are_informational_text() {
        let layer = layer();
        let metric = &layer.metrics["utilization"];
        assert_eq!(metric.formula, "driven_km / available_km");
        assert_eq!(metric.constraints.as_deref(), Some("available_km > 0"));
        assert_eq!(
            metric.business_rules.as_deref(),
            Some("Exclude maintenance days")
        );
    }
}
