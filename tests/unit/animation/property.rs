use super::*;

#[test]
fn rest_values_are_identity_transform() {
    let m = PropertyMap::new();
    assert_eq!(m.get_or_rest(Property::Opacity), 1.0);
    assert_eq!(m.get_or_rest(Property::Scale), 1.0);
    assert_eq!(m.get_or_rest(Property::X), 0.0);
    assert_eq!(m.get_or_rest(Property::Blur), 0.0);
}

#[test]
fn serde_uses_snake_case_keys() {
    let m = PropertyMap::new()
        .with(Property::MaskRadius, 120.0)
        .with(Property::YPercent, 110.0);
    let json = serde_json::to_string(&m).unwrap();
    assert!(json.contains("\"mask_radius\":120.0"));
    assert!(json.contains("\"y_percent\":110.0"));
    let back: PropertyMap = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
}

#[test]
fn target_id_displays_raw_name() {
    assert_eq!(TargetId::from("hero-line").to_string(), "hero-line");
}
