//! At α = 1 the analysis and synthesis grids coincide, so input that matches
//! itself at every lag the search may pick comes back unchanged.

mod common;

use sola::{time_scale, SolaEngine, SolaParams};

#[test]
fn test_identity_constant_input() {
    let input = vec![100i16; 4000];
    let output = time_scale(&input, &SolaParams::new(1.0)).unwrap();
    assert!(output.len() >= 4000 - 160);
    assert!(output.iter().all(|&s| s == 100));
}

#[test]
fn test_identity_period_aligned_triangle() {
    let input = common::gen_triangle(16, 4000, 12000);
    let output = time_scale(&input, &SolaParams::new(1.0)).unwrap();
    assert!(output.len() >= 4000 - 160);

    let expected = common::gen_triangle(16, output.len(), 12000);
    for (i, (&got, &want)) in output.iter().zip(&expected).enumerate() {
        assert_eq!(got, want, "sample {} differs", i);
    }
}

#[test]
fn test_identity_lags_are_period_multiples() {
    let input = common::gen_triangle(16, 2000, 8000);
    let engine = SolaEngine::new(1.0, 160).unwrap();
    let result = engine.run(&input).unwrap();
    assert_eq!(result.frames.len(), engine.max_frames(input.len()));
    for record in &result.frames {
        assert_eq!(record.lag.get().rem_euclid(16), 0, "frame {}", record.index);
        assert!(record.score > 0.999_999);
    }
}

#[test]
fn test_identity_sine_stays_close() {
    // 200 Hz at 8 kHz has a 40-sample period, which divides Sa = 80.
    let input = common::gen_sine(200.0, 8000, 8000, 10000.0);
    let output = time_scale(&input, &SolaParams::new(1.0)).unwrap();
    for (&got, &want) in output.iter().zip(&input) {
        assert!((got as i32 - want as i32).abs() <= 1);
    }
}
