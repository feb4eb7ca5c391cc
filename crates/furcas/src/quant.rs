//! 16-bit affine quantization of layer weights.
//!
//! Each tensor is mapped onto `[min_val, max_val]` and stored as one
//! little-endian `u16` code per element:
//!
//! ```text
//! code  = round((v - min_val) / (max_val - min_val) * 65535)
//! value = code / 65535 * (max_val - min_val) + min_val
//! ```
//!
//! Constant tensors and singletons round-trip exactly:
//! - a singleton stores `min_val = 0` and `max_val = v` (or 1 when `v == 0`),
//!   so its single code is 65535 (or 0);
//! - a constant tensor stores `min_val == max_val`, every code is 0.

use furcas_core::{Error, Result};
use furcas_proto::Layer;

/// Largest code; maps to `max_val`.
pub const CODE_MAX: u16 = u16::MAX;

/// Bytes per stored code.
pub const CODE_BYTES: usize = 2;

/// Quantize a flat slice of values into a layer.
pub fn quantize(values: &[f32]) -> Layer {
    let (min_val, max_val) = range(values);

    let mut params = Vec::with_capacity(values.len() * CODE_BYTES);
    for &value in values {
        params.extend_from_slice(&encode(value, min_val, max_val).to_le_bytes());
    }

    Layer {
        min_val: Some(min_val),
        max_val: Some(max_val),
        params: Some(params),
    }
}

/// Reconstruct the values of a layer in storage order.
///
/// An unset range or payload reads as zero / empty.
pub fn dequantize(layer: &Layer) -> Result<Vec<f32>> {
    let params = layer.params.as_deref().unwrap_or_default();
    if params.len() % CODE_BYTES != 0 {
        return Err(Error::malformed(format!(
            "layer payload has odd length {}",
            params.len()
        )));
    }

    let min_val = layer.min_val.unwrap_or(0.0);
    let span = layer.max_val.unwrap_or(0.0) - min_val;
    Ok(params
        .chunks_exact(CODE_BYTES)
        .map(|pair| {
            let code = u16::from_le_bytes([pair[0], pair[1]]);
            code as f32 / CODE_MAX as f32 * span + min_val
        })
        .collect())
}

/// Number of codes stored in a layer.
pub fn code_count(layer: &Layer) -> usize {
    layer.params.as_ref().map_or(0, |p| p.len() / CODE_BYTES)
}

fn range(values: &[f32]) -> (f32, f32) {
    match values {
        [] => (0.0, 0.0),
        [value] if *value == 0.0 => (0.0, 1.0),
        [value] => (0.0, *value),
        _ => values.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        }),
    }
}

fn encode(value: f32, min_val: f32, max_val: f32) -> u16 {
    let normalized = if max_val == min_val {
        value - min_val
    } else {
        (value - min_val) / (max_val - min_val)
    };
    // Rounding can land just above the top code.
    let scaled = (normalized * CODE_MAX as f32).round_ties_even();
    scaled.min(CODE_MAX as f32) as u16
}
