use rand::rngs::StdRng;
use rand::SeedableRng;

use smudge_core::config::{DatasetConfig, DegradeParams, ExtractParams, ParamRange};
use smudge_core::degrade::Mode;

// ---------------------------------------------------------------------------
// ParamRange parsing
// ---------------------------------------------------------------------------

#[test]
fn test_param_range_parses_pair() {
    let r: ParamRange<f32> = "2..5".parse().unwrap();
    assert_eq!(r.min, 2.0);
    assert_eq!(r.max, 5.0);
}

#[test]
fn test_param_range_parses_fractional_pair() {
    let r: ParamRange<f32> = "0.3..1.8".parse().unwrap();
    assert!((r.min - 0.3).abs() < 1e-6);
    assert!((r.max - 1.8).abs() < 1e-6);
}

#[test]
fn test_param_range_parses_single_value() {
    let r: ParamRange<u8> = "7".parse().unwrap();
    assert_eq!(r.min, 7);
    assert_eq!(r.max, 7);
}

#[test]
fn test_param_range_parses_with_spaces() {
    let r: ParamRange<usize> = " 10 .. 50 ".parse().unwrap();
    assert_eq!(r.min, 10);
    assert_eq!(r.max, 50);
}

#[test]
fn test_param_range_rejects_inverted() {
    let r: Result<ParamRange<f32>, _> = "5..2".parse();
    assert!(r.is_err());
}

#[test]
fn test_param_range_rejects_garbage() {
    let r: Result<ParamRange<f32>, _> = "abc".parse();
    assert!(r.is_err());
}

// ---------------------------------------------------------------------------
// ParamRange display / sampling
// ---------------------------------------------------------------------------

#[test]
fn test_param_range_display() {
    let r = ParamRange {
        min: 2.0f32,
        max: 5.0,
    };
    assert_eq!(format!("{r}"), "2..5");

    let single = ParamRange {
        min: 3.0f32,
        max: 3.0,
    };
    assert_eq!(format!("{single}"), "3");
}

#[test]
fn test_param_range_sample_within_bounds() {
    let r = ParamRange { min: 5u8, max: 25 };
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..200 {
        let v = r.sample(&mut rng);
        assert!((5..=25).contains(&v), "sample {v} out of range");
    }
}

#[test]
fn test_param_range_degenerate_sample() {
    let r = ParamRange { min: 9usize, max: 9 };
    let mut rng = StdRng::seed_from_u64(4);
    assert_eq!(r.sample(&mut rng), 9);
}

// ---------------------------------------------------------------------------
// DegradeParams validation
// ---------------------------------------------------------------------------

#[test]
fn test_degrade_params_default_is_valid() {
    assert!(DegradeParams::default().validate().is_ok());
}

#[test]
fn test_degrade_params_rejects_zero_sigma() {
    let params = DegradeParams {
        sigma: ParamRange { min: 0.0, max: 1.0 },
        ..Default::default()
    };
    assert!(params.validate().is_err());
}

#[test]
fn test_degrade_params_rejects_quality_out_of_range() {
    let zero = DegradeParams {
        quality: ParamRange { min: 0, max: 10 },
        ..Default::default()
    };
    assert!(zero.validate().is_err());

    let high = DegradeParams {
        quality: ParamRange { min: 50, max: 101 },
        ..Default::default()
    };
    assert!(high.validate().is_err());
}

#[test]
fn test_degrade_params_rejects_inverted_range() {
    let params = DegradeParams {
        patch_size: ParamRange { min: 50, max: 10 },
        ..Default::default()
    };
    assert!(params.validate().is_err());
}

// ---------------------------------------------------------------------------
// ExtractParams validation
// ---------------------------------------------------------------------------

#[test]
fn test_extract_params_default_is_valid() {
    let params = ExtractParams::default();
    assert!((params.fps - 5.0).abs() < 1e-9);
    assert!(params.validate().is_ok());
}

#[test]
fn test_extract_params_rejects_bad_fps() {
    let zero = ExtractParams {
        fps: 0.0,
        every_frame: false,
    };
    assert!(zero.validate().is_err());

    let nan = ExtractParams {
        fps: f64::NAN,
        every_frame: false,
    };
    assert!(nan.validate().is_err());
}

#[test]
fn test_extract_params_every_frame_ignores_fps() {
    let params = ExtractParams {
        fps: 0.0,
        every_frame: true,
    };
    assert!(params.validate().is_ok());
}

// ---------------------------------------------------------------------------
// DatasetConfig
// ---------------------------------------------------------------------------

#[test]
fn test_dataset_config_default_categories() {
    let config = DatasetConfig::default();
    assert_eq!(config.categories, vec!["th", "th-bb", "th-m", "th-ob"]);
    assert!(config.validate().is_ok());
}

#[test]
fn test_dataset_config_fills_missing_fields() {
    let config: DatasetConfig =
        serde_json::from_str(r#"{"target_root":"clean","input_root":"dirty"}"#).unwrap();
    assert_eq!(config.categories.len(), 4);
    assert!(config.seed.is_none());
    assert!(config.degrade.mode.is_none());
    assert!((config.degrade.sigma.min - 2.0).abs() < 1e-6);
}

#[test]
fn test_dataset_config_serde_roundtrip() {
    let mut config = DatasetConfig::default();
    config.seed = Some(42);
    config.degrade.mode = Some(Mode::Compression);

    let json = serde_json::to_string(&config).unwrap();
    let restored: DatasetConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.seed, Some(42));
    assert_eq!(restored.degrade.mode, Some(Mode::Compression));
    assert_eq!(restored.target_root, config.target_root);
}

#[test]
fn test_dataset_config_rejects_empty_categories() {
    let config = DatasetConfig {
        categories: vec![],
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

// ---------------------------------------------------------------------------
// Mode serde
// ---------------------------------------------------------------------------

#[test]
fn test_mode_serde_snake_case() {
    let json = serde_json::to_string(&Mode::BrightnessContrast).unwrap();
    assert_eq!(json, "\"brightness_contrast\"");

    let mode: Mode = serde_json::from_str("\"block_noise\"").unwrap();
    assert_eq!(mode, Mode::BlockNoise);
}
