#[allow(dead_code)]
mod common;

use smudge_core::error::SmudgeError;
use smudge_core::extract::{extract_frames, sample_interval};

use common::textured_frame;

// ---------------------------------------------------------------------------
// sample_interval
// ---------------------------------------------------------------------------

#[test]
fn test_sample_interval_exact_division() {
    assert_eq!(sample_interval(30.0, 5.0), 6);
}

#[test]
fn test_sample_interval_ntsc_rounds() {
    // 29.97 / 5 = 5.994, rounds to 6.
    assert_eq!(sample_interval(29.97, 5.0), 6);
}

#[test]
fn test_sample_interval_never_below_one() {
    // Asking for more frames than the source has keeps every frame.
    assert_eq!(sample_interval(10.0, 30.0), 1);
    assert_eq!(sample_interval(24.0, 24.0), 1);
}

#[test]
fn test_sample_interval_ignores_bad_target() {
    assert_eq!(sample_interval(30.0, 0.0), 1);
    assert_eq!(sample_interval(30.0, -2.0), 1);
}

// ---------------------------------------------------------------------------
// extract_frames
// ---------------------------------------------------------------------------

#[test]
fn test_extract_frames_samples_at_interval() {
    let dir = tempfile::tempdir().unwrap();
    let frames = (0..180).map(|_| Ok(textured_frame(8, 8)));
    let saved = extract_frames(frames, dir.path(), 6).unwrap();
    assert_eq!(saved, 30);
    assert!(dir.path().join("0000.png").exists());
    assert!(dir.path().join("0029.png").exists());
    assert!(!dir.path().join("0030.png").exists());
}

#[test]
fn test_extract_frames_interval_one_keeps_all() {
    let dir = tempfile::tempdir().unwrap();
    let frames = (0..7).map(|_| Ok(textured_frame(8, 8)));
    let saved = extract_frames(frames, dir.path(), 1).unwrap();
    assert_eq!(saved, 7);
}

#[test]
fn test_extract_frames_zero_interval_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let frames = (0..4).map(|_| Ok(textured_frame(8, 8)));
    let saved = extract_frames(frames, dir.path(), 0).unwrap();
    assert_eq!(saved, 4);
}

#[test]
fn test_extract_frames_keeps_frames_before_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let frames = (0..10)
        .map(|_| Ok(textured_frame(8, 8)))
        .chain(std::iter::once(Err(SmudgeError::Decode(
            "truncated".to_string(),
        ))))
        .chain((0..5).map(|_| Ok(textured_frame(8, 8))));
    let saved = extract_frames(frames, dir.path(), 2).unwrap();
    assert_eq!(saved, 5, "indices 0,2,4,6,8 land before the error");
    assert!(dir.path().join("0004.png").exists());
    assert!(!dir.path().join("0005.png").exists());
}

#[test]
fn test_extract_frames_empty_stream() {
    let dir = tempfile::tempdir().unwrap();
    let saved = extract_frames(std::iter::empty(), dir.path(), 3).unwrap();
    assert_eq!(saved, 0);
}
