//! G.711 μ-law companding between 8-bit codes and 16-bit linear PCM.

use crate::core::types::Sample;

/// Bias added to the magnitude before encoding.
pub const BIAS: i32 = 0x84;
/// Largest magnitude that can be encoded.
pub const CLIP: i32 = 32635;

/// Linear value of mantissa 0 for each exponent.
const EXP_LUT: [i32; 8] = [0, 132, 396, 924, 1980, 4092, 8316, 16764];

/// Decodes one μ-law code to a linear sample.
#[inline]
pub fn decode(code: u8) -> Sample {
    let code = !code;
    let exponent = ((code >> 4) & 0x07) as usize;
    let mantissa = (code & 0x0F) as i32;
    let magnitude = EXP_LUT[exponent] + (mantissa << (exponent + 3));
    if code & 0x80 != 0 {
        -magnitude as Sample
    } else {
        magnitude as Sample
    }
}

/// Encodes one linear sample as a μ-law code.
#[inline]
pub fn encode(sample: Sample) -> u8 {
    let sample = sample as i32;
    let sign: u8 = if sample < 0 { 0x80 } else { 0x00 };
    let biased = sample.abs().min(CLIP) + BIAS;

    let segment = ((biased >> 7) & 0xFF) as u8;
    let exponent = if segment == 0 {
        0
    } else {
        7 - segment.leading_zeros() as u8
    };
    let mantissa = ((biased >> (exponent + 3)) & 0x0F) as u8;

    !(sign | (exponent << 4) | mantissa)
}

/// Decodes a slice of μ-law codes.
pub fn decode_all(codes: &[u8]) -> Vec<Sample> {
    codes.iter().map(|&c| decode(c)).collect()
}

/// Encodes a slice of linear samples.
pub fn encode_all(samples: &[Sample]) -> Vec<u8> {
    samples.iter().map(|&s| encode(s)).collect()
}
