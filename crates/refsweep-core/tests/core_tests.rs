use refsweep_core::{
    AssetId, AssetPath, RecordKind, ReferenceProperty, ReferenceRecord, ScanConfig,
};

#[test]
fn test_asset_id_equality() {
    let id1 = AssetId::new("3f2a-guid");
    let id2 = AssetId::new("3f2a-guid");

    assert_eq!(id1, id2);
    assert_eq!(id1.as_str(), "3f2a-guid");
}

#[test]
fn test_asset_path_as_map_key() {
    use std::collections::HashMap;

    let mut map: HashMap<AssetPath, u32> = HashMap::new();
    map.insert(AssetPath::new("Assets/Main.scene"), 2);

    assert_eq!(map.get(&AssetPath::new("Assets/Main.scene")), Some(&2));
    assert_eq!(map.get(&AssetPath::new("Assets/Other.scene")), None);
}

#[test]
fn test_reference_record_missing_component() {
    let record = ReferenceRecord::missing_component("Turret", "Level/Towers/Turret");

    assert_eq!(record.object_name.as_str(), "Turret");
    assert_eq!(record.object_path, "Level/Towers/Turret");
    assert!(record.kind.is_missing_component());
    assert_eq!(record.component_name(), "Missing Component");
    assert_eq!(record.property_name(), "N/A");
}

#[test]
fn test_reference_record_missing_reference() {
    let record =
        ReferenceRecord::missing_reference("Turret", "Level/Towers/Turret", "Cannon", "projectile");

    match &record.kind {
        RecordKind::MissingReference {
            component,
            property,
        } => {
            assert_eq!(component.as_str(), "Cannon");
            assert_eq!(property.as_str(), "projectile");
        }
        other => panic!("expected missing reference, got {other:?}"),
    }
    assert_eq!(record.component_name(), "Cannon");
    assert_eq!(record.property_name(), "projectile");
}

#[test]
fn test_record_serde_round_trip() {
    let record =
        ReferenceRecord::missing_reference("Turret", "Level/Towers/Turret", "Cannon", "projectile");

    let json = serde_json::to_string(&record).unwrap();
    let back: ReferenceRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(record, back);
}

#[test]
fn test_dangling_discriminator() {
    // The single most important classification rule: absent target alone is
    // not enough, the slot must have once pointed somewhere.
    let cleared = ReferenceProperty::new("target", false, 0);
    let deleted = ReferenceProperty::new("target", false, 7_331);

    assert!(!cleared.is_dangling());
    assert!(deleted.is_dangling());
}

#[test]
fn test_config_builder_validation() {
    assert!(ScanConfig::builder().build().is_ok());
    assert!(ScanConfig::builder().batch_size(1usize).build().is_ok());
    assert!(ScanConfig::builder().batch_size(0usize).build().is_err());
    assert!(
        ScanConfig::builder()
            .path_walk_limit(0usize)
            .build()
            .is_err()
    );
}
