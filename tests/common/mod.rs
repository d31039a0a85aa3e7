#![allow(dead_code)]

use std::f64::consts::PI;

use sola::Sample;

pub fn gen_sine(freq_hz: f64, sr: u32, n: usize, amplitude: f64) -> Vec<Sample> {
    (0..n)
        .map(|i| {
            let phase = 2.0 * PI * freq_hz * i as f64 / sr as f64;
            (amplitude * phase.sin()).round() as Sample
        })
        .collect()
}

/// Deterministic white noise from a 32-bit LCG.
pub fn gen_noise(seed: u32, n: usize, amplitude: i32) -> Vec<Sample> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let unit = (state >> 16) as i32 - 32768;
            (unit * amplitude / 32768) as Sample
        })
        .collect()
}

/// Triangle wave with an integer period, so every sample repeats exactly.
pub fn gen_triangle(period: usize, n: usize, amplitude: i32) -> Vec<Sample> {
    let half = (period / 2).max(1) as i32;
    (0..n)
        .map(|i| {
            let p = (i % period) as i32;
            let rising = if p < half { p } else { period as i32 - p };
            (amplitude * (2 * rising - half) / half) as Sample
        })
        .collect()
}

pub fn rms(signal: &[Sample]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    (signal.iter().map(|&s| (s as f64) * (s as f64)).sum::<f64>() / signal.len() as f64).sqrt()
}
