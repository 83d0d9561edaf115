use super::*;

#[test]
fn defaults_match_the_seal_layout() {
    let c = StampConfig::default();
    assert_eq!(c.canvas_px, 600);
    assert_eq!(c.seal_width_px, 300);
    assert_eq!(c.brand_color.to_hex(), "#056bb0");
    assert!((c.text_radius_px() - 228.0).abs() < 1e-9);
    assert_eq!(c.stamp_px(), 270);
    assert_eq!(c.disc_padding_px, 10.0);
    assert!(c.validate().is_ok());
}

#[test]
fn partial_json_keeps_defaults() {
    let json = r##"{
        "seal_path": "fixtures/seal.png",
        "brand_color": "#112233",
        "font": { "kind": "path", "path": "fonts/Bold.ttf" }
    }"##;
    let c = StampConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(c.seal_path, PathBuf::from("fixtures/seal.png"));
    assert_eq!(c.brand_color, Rgba8::rgb(0x11, 0x22, 0x33));
    assert_eq!(
        c.font,
        FontSource::Path {
            path: PathBuf::from("fonts/Bold.ttf"),
            index: 0
        }
    );
    assert_eq!(c.canvas_px, 600);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = StampConfig::from_reader(r#"{ "canvas": 600 }"#.as_bytes()).unwrap_err();
    assert!(matches!(err, StempelError::Validation(_)));
}

#[test]
fn validate_rejects_bad_values() {
    assert!(StampConfig::default().with_canvas_px(0).validate().is_err());
    assert!(StampConfig::default().with_canvas_px(70_000).validate().is_err());

    let c = StampConfig {
        stamp_ratio: 1.5,
        ..StampConfig::default()
    };
    assert!(c.validate().is_err());

    let c = StampConfig {
        text_radius_ratio: f64::NAN,
        ..StampConfig::default()
    };
    assert!(c.validate().is_err());

    let c = StampConfig {
        disc_padding_px: -1.0,
        ..StampConfig::default()
    };
    assert!(c.validate().is_err());
}

#[test]
fn missing_config_file_is_reported() {
    let err = StampConfig::from_path("target/no/such/config.json").unwrap_err();
    assert!(err.to_string().contains("config.json"));
}

#[test]
fn builders_replace_fields() {
    let c = StampConfig::default()
        .with_seal_path("a.png")
        .with_brand_color(Rgba8::WHITE)
        .with_font(FontSource::System {
            families: vec!["DejaVu Sans".to_owned()],
        });
    assert_eq!(c.seal_path, PathBuf::from("a.png"));
    assert_eq!(c.brand_color, Rgba8::WHITE);
    assert!(matches!(c.font, FontSource::System { .. }));
}

#[test]
fn json_roundtrip_preserves_config() {
    let c = StampConfig::default().with_brand_color(Rgba8::rgba(1, 2, 3, 4));
    let s = serde_json::to_string(&c).unwrap();
    assert_eq!(StampConfig::from_reader(s.as_bytes()).unwrap(), c);
}
