#[allow(dead_code)]
mod common;

use rand::rngs::StdRng;
use rand::SeedableRng;

use smudge_core::config::DegradeParams;
use smudge_core::degrade::{
    apply_patches, brightness_contrast, degrade_frame, draw_patches, gaussian_blur,
    jpeg_roundtrip, DegradationSpec, Mode, Patch,
};

use common::{checker_frame, ramp_frame, solid_frame, textured_frame};

// ---------------------------------------------------------------------------
// gaussian_blur
// ---------------------------------------------------------------------------

#[test]
fn test_gaussian_blur_uniform_unchanged() {
    // Clamp padding keeps a uniform frame uniform all the way to the border.
    let frame = solid_frame(64, 64, 0.6);
    let blurred = gaussian_blur(&frame, 2.0);
    for v in blurred.data.iter() {
        assert!((*v - 0.6).abs() < 1e-5, "expected 0.6, got {v}");
    }
}

#[test]
fn test_gaussian_blur_large_frame_unchanged() {
    // 512x512 crosses the parallel threshold; the parallel path must agree
    // with the sequential one on uniform input.
    let frame = solid_frame(512, 512, 0.4);
    let blurred = gaussian_blur(&frame, 2.0);
    for v in blurred.data.iter() {
        assert!((*v - 0.4).abs() < 1e-4);
    }
}

#[test]
fn test_gaussian_blur_smooths_checkerboard() {
    let frame = checker_frame(64, 64);
    let blurred = gaussian_blur(&frame, 5.0);
    // Interior pixels (outside the kernel's reach from the border) should
    // average out to 0.5.
    let margin = 16;
    for row in margin..64 - margin {
        for col in margin..64 - margin {
            let v = blurred.data[[row, col, 0]];
            assert!(
                (v - 0.5).abs() < 0.05,
                "interior pixel ({row},{col}) should be ~0.5, got {v}"
            );
        }
    }
}

#[test]
fn test_gaussian_blur_preserves_dims() {
    let frame = textured_frame(24, 17);
    let blurred = gaussian_blur(&frame, 3.0);
    assert_eq!(blurred.height(), 24);
    assert_eq!(blurred.width(), 17);
}

// ---------------------------------------------------------------------------
// jpeg_roundtrip
// ---------------------------------------------------------------------------

#[test]
fn test_jpeg_roundtrip_preserves_dims() {
    let frame = textured_frame(33, 21);
    let out = jpeg_roundtrip(&frame, 50).unwrap();
    assert_eq!(out.height(), 33);
    assert_eq!(out.width(), 21);
}

#[test]
fn test_jpeg_roundtrip_low_quality_changes_pixels() {
    let frame = textured_frame(32, 32);
    let out = jpeg_roundtrip(&frame, 10).unwrap();
    let max_diff = frame
        .data
        .iter()
        .zip(out.data.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0f32, f32::max);
    assert!(max_diff > 1e-3, "q=10 should visibly distort, max diff {max_diff}");
    for v in out.data.iter() {
        assert!(*v >= 0.0 && *v <= 1.0);
    }
}

// ---------------------------------------------------------------------------
// brightness_contrast
// ---------------------------------------------------------------------------

#[test]
fn test_brightness_contrast_identity() {
    let frame = ramp_frame(8, 8);
    let out = brightness_contrast(&frame, 1.0, 1.0);
    for (a, b) in frame.data.iter().zip(out.data.iter()) {
        assert!((a - b).abs() < 1e-5);
    }
}

#[test]
fn test_brightness_zero_blacks_out() {
    let frame = textured_frame(8, 8);
    let out = brightness_contrast(&frame, 0.0, 1.0);
    for v in out.data.iter() {
        assert!(v.abs() < 1e-5);
    }
}

#[test]
fn test_contrast_zero_flattens_to_mean() {
    let frame = ramp_frame(8, 16);
    let mean = frame.mean_luma();
    let out = brightness_contrast(&frame, 1.0, 0.0);
    for v in out.data.iter() {
        assert!((*v - mean).abs() < 1e-5);
    }
}

#[test]
fn test_contrast_pivots_on_mean() {
    // A flat frame sits at its own mean, so contrast alone cannot move it.
    let frame = solid_frame(8, 8, 0.42);
    let out = brightness_contrast(&frame, 1.0, 1.8);
    for v in out.data.iter() {
        assert!((*v - 0.42).abs() < 1e-5, "got {v}");
    }
}

#[test]
fn test_brightness_contrast_clamps_high() {
    let frame = solid_frame(4, 4, 0.9);
    let out = brightness_contrast(&frame, 1.8, 1.0);
    for v in out.data.iter() {
        assert!((*v - 1.0).abs() < 1e-6);
    }
}

#[test]
fn test_brightness_contrast_clamps_low() {
    // Strong contrast pushes the dark end of the ramp below zero.
    let frame = ramp_frame(8, 16);
    let out = brightness_contrast(&frame, 1.0, 10.0);
    for v in out.data.iter() {
        assert!(*v >= 0.0 && *v <= 1.0);
    }
    assert!(out.data[[0, 0, 0]].abs() < 1e-6, "dark end should clamp to 0");
}

// ---------------------------------------------------------------------------
// draw_patches / apply_patches
// ---------------------------------------------------------------------------

#[test]
fn test_draw_patches_in_bounds() {
    let params = DegradeParams::default();
    let mut rng = StdRng::seed_from_u64(11);
    let patches = draw_patches(&params, 100, 80, &mut rng);
    assert!(patches.len() >= 5 && patches.len() <= 20);
    for p in &patches {
        assert!(p.width >= 10 && p.width <= 50);
        assert!(p.height >= 10 && p.height <= 50);
        assert!(p.x + p.width <= 100, "patch {p:?} exceeds frame width");
        assert!(p.y + p.height <= 80, "patch {p:?} exceeds frame height");
    }
}

#[test]
fn test_draw_patches_narrow_frame_clamps_sides() {
    let params = DegradeParams::default();
    let mut rng = StdRng::seed_from_u64(3);
    let patches = draw_patches(&params, 24, 300, &mut rng);
    assert!(!patches.is_empty());
    for p in &patches {
        assert!(p.x + p.width <= 24);
        assert!(p.y + p.height <= 300);
    }
}

#[test]
fn test_draw_patches_tiny_frame_empty() {
    let params = DegradeParams::default();
    let mut rng = StdRng::seed_from_u64(5);
    let patches = draw_patches(&params, 8, 200, &mut rng);
    assert!(
        patches.is_empty(),
        "frames below the minimum patch side get no patches"
    );
}

#[test]
fn test_apply_patches_paints_gray() {
    let frame = solid_frame(16, 16, 0.0);
    let patch = Patch {
        x: 2,
        y: 3,
        width: 4,
        height: 5,
        fill: 128,
    };
    let out = apply_patches(&frame, &[patch]);

    let gray = 128.0 / 255.0;
    for row in 0..16 {
        for col in 0..16 {
            let inside = (3..8).contains(&row) && (2..6).contains(&col);
            let expected = if inside { gray } else { 0.0 };
            for ch in 0..3 {
                let v = out.data[[row, col, ch]];
                assert!((v - expected).abs() < 1e-6, "pixel ({row},{col},{ch}) = {v}");
            }
        }
    }
    // Source frame untouched.
    for v in frame.data.iter() {
        assert!(v.abs() < 1e-6);
    }
}

#[test]
fn test_apply_patches_empty_is_identity() {
    let frame = textured_frame(12, 12);
    let out = apply_patches(&frame, &[]);
    assert_eq!(frame.data, out.data);
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

#[test]
fn test_mode_display_names() {
    assert_eq!(format!("{}", Mode::Blur), "blur");
    assert_eq!(format!("{}", Mode::Compression), "compression");
    assert_eq!(format!("{}", Mode::BrightnessContrast), "brightness_contrast");
    assert_eq!(format!("{}", Mode::BlockNoise), "block_noise");
}

#[test]
fn test_mode_choose_covers_catalog() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut seen = [false; 4];
    for _ in 0..100 {
        match Mode::choose(&mut rng) {
            Mode::Blur => seen[0] = true,
            Mode::Compression => seen[1] = true,
            Mode::BrightnessContrast => seen[2] = true,
            Mode::BlockNoise => seen[3] = true,
        }
    }
    assert!(
        seen.iter().all(|s| *s),
        "100 draws should hit every mode, got {seen:?}"
    );
}

// ---------------------------------------------------------------------------
// DegradationSpec
// ---------------------------------------------------------------------------

#[test]
fn test_spec_draw_matches_mode() {
    let params = DegradeParams::default();
    let mut rng = StdRng::seed_from_u64(1);
    for mode in [
        Mode::Blur,
        Mode::Compression,
        Mode::BrightnessContrast,
        Mode::BlockNoise,
    ] {
        let spec = DegradationSpec::draw(mode, &params, 64, 64, &mut rng);
        assert_eq!(spec.mode(), mode);
    }
}

#[test]
fn test_spec_draw_respects_ranges() {
    let params = DegradeParams::default();
    let mut rng = StdRng::seed_from_u64(2);
    match DegradationSpec::draw(Mode::Blur, &params, 64, 64, &mut rng) {
        DegradationSpec::Blur { sigma } => assert!(sigma >= 2.0 && sigma <= 5.0),
        other => panic!("expected a blur spec, got {other:?}"),
    }
    match DegradationSpec::draw(Mode::Compression, &params, 64, 64, &mut rng) {
        DegradationSpec::Compression { quality } => assert!((5..=25).contains(&quality)),
        other => panic!("expected a compression spec, got {other:?}"),
    }
}

#[test]
fn test_spec_draw_deterministic() {
    let params = DegradeParams::default();
    let a = DegradationSpec::draw(
        Mode::BlockNoise,
        &params,
        64,
        64,
        &mut StdRng::seed_from_u64(7),
    );
    let b = DegradationSpec::draw(
        Mode::BlockNoise,
        &params,
        64,
        64,
        &mut StdRng::seed_from_u64(7),
    );
    assert_eq!(a, b);
}

#[test]
fn test_spec_serde_roundtrip() {
    let spec = DegradationSpec::BrightnessContrast {
        brightness: 0.7,
        contrast: 1.3,
    };
    let json = serde_json::to_string(&spec).unwrap();
    assert!(json.contains("\"mode\":\"brightness_contrast\""), "got: {json}");
    let restored: DegradationSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(spec, restored);
}

#[test]
fn test_degrade_frame_keeps_dims_for_every_mode() {
    let frame = textured_frame(32, 32);
    let specs = [
        DegradationSpec::Blur { sigma: 2.5 },
        DegradationSpec::Compression { quality: 10 },
        DegradationSpec::BrightnessContrast {
            brightness: 0.5,
            contrast: 1.5,
        },
        DegradationSpec::BlockNoise {
            patches: vec![Patch {
                x: 0,
                y: 0,
                width: 10,
                height: 10,
                fill: 0,
            }],
        },
    ];
    for spec in &specs {
        let out = degrade_frame(&frame, spec).unwrap();
        assert!(frame.dims_match(&out), "dims changed for {:?}", spec.mode());
    }
}
