//! Pixel normalization for the model input.
//!
//! Raw 8-bit grayscale samples are mapped into the range the network was
//! trained on: `(v * scale - mean) / std`. With the defaults (scale = 1/255,
//! mean = std = 0.5) a black pixel becomes -1.0 and a white pixel +1.0.

use crate::core::errors::{RecognizerError, RecognizerResult};
use crate::core::inference::Tensor4D;

const MAX_PIXEL: f32 = 255.0;

/// Normalizes single-channel pixel buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizePixels {
    /// Scaling factor applied to the raw value
    pub scale: f32,
    /// Mean subtracted after scaling
    pub mean: f32,
    /// Standard deviation divided out after mean subtraction
    pub std: f32,
}

impl Default for NormalizePixels {
    fn default() -> Self {
        Self {
            scale: 1.0 / MAX_PIXEL,
            mean: 0.5,
            std: 0.5,
        }
    }
}

impl NormalizePixels {
    /// Creates a normalizer, validating its parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `scale` or `std` is not a positive finite number, or
    /// if `mean` is not finite.
    pub fn new(scale: f32, mean: f32, std: f32) -> RecognizerResult<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(RecognizerError::config_error(format!(
                "Scale must be greater than 0, got {scale}"
            )));
        }
        if !mean.is_finite() {
            return Err(RecognizerError::config_error(format!(
                "Mean must be finite, got {mean}"
            )));
        }
        if !(std.is_finite() && std > 0.0) {
            return Err(RecognizerError::config_error(format!(
                "Standard deviation must be greater than 0, got {std}"
            )));
        }
        Ok(Self { scale, mean, std })
    }

    /// Normalizes one sample.
    ///
    /// With the default 1/255 scale the sample is divided by 255 rather than
    /// multiplied by the rounded reciprocal.
    #[inline]
    pub fn normalize_value(&self, value: u8) -> f32 {
        let scaled = if self.scale == 1.0 / MAX_PIXEL {
            value as f32 / MAX_PIXEL
        } else {
            value as f32 * self.scale
        };
        (scaled - self.mean) / self.std
    }

    /// Normalizes a pixel buffer, preserving its order.
    pub fn normalize(&self, pixels: &[u8]) -> Vec<f32> {
        pixels.iter().map(|&v| self.normalize_value(v)).collect()
    }

    /// Builds the `[1, 1, size, size]` model input from an S x S pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `pixels` does not hold exactly `size * size` samples.
    pub fn to_input_tensor(&self, pixels: &[u8], size: u32) -> RecognizerResult<Tensor4D> {
        let side = size as usize;
        let expected = side * side;
        if pixels.len() != expected {
            return Err(RecognizerError::invalid_input(format!(
                "expected {} pixels for a {}x{} input, got {}",
                expected,
                size,
                size,
                pixels.len()
            )));
        }
        let data = self.normalize(pixels);
        Ok(Tensor4D::from_shape_vec((1, 1, side, side), data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_extremes_map_to_unit_range() {
        let normalizer = NormalizePixels::default();
        assert!((normalizer.normalize_value(0) - (-1.0)).abs() < EPS);
        assert!((normalizer.normalize_value(255) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_midpoint_is_near_zero() {
        let normalizer = NormalizePixels::default();
        assert!(normalizer.normalize_value(127).abs() < 0.01);
        assert!(normalizer.normalize_value(128).abs() < 0.01);
    }

    #[test]
    fn test_monotonic_non_decreasing() {
        let normalizer = NormalizePixels::default();
        let all: Vec<u8> = (0..=255).collect();
        let values = normalizer.normalize(&all);
        assert_eq!(values.len(), 256);
        for pair in values.windows(2) {
            assert!(pair[1] >= pair[0], "{} < {}", pair[1], pair[0]);
        }
    }

    #[test]
    fn test_default_scale_divides_by_255() {
        let normalizer = NormalizePixels::default();
        for v in 0..=255u8 {
            let expected = (v as f32 / 255.0 - 0.5) / 0.5;
            assert_eq!(normalizer.normalize_value(v), expected, "pixel {}", v);
        }
    }

    #[test]
    fn test_blank_canvas_normalizes_to_minus_one() {
        let normalizer = NormalizePixels::default();
        let values = normalizer.normalize(&[0u8; 784]);
        assert_eq!(values.len(), 784);
        assert!(values.iter().all(|&v| (v + 1.0).abs() < EPS));
    }

    #[test]
    fn test_input_tensor_shape_and_layout() {
        let normalizer = NormalizePixels::default();
        let mut pixels = vec![0u8; 28 * 28];
        // Row 1, column 2
        pixels[28 + 2] = 255;
        let tensor = normalizer.to_input_tensor(&pixels, 28).unwrap();
        assert_eq!(tensor.shape(), &[1, 1, 28, 28]);
        assert!((tensor[[0, 0, 1, 2]] - 1.0).abs() < EPS);
        assert!((tensor[[0, 0, 2, 1]] + 1.0).abs() < EPS);
    }

    #[test]
    fn test_input_tensor_rejects_wrong_length() {
        let normalizer = NormalizePixels::default();
        let result = normalizer.to_input_tensor(&[0u8; 100], 28);
        assert!(matches!(result, Err(RecognizerError::InvalidInput { .. })));
    }

    #[test]
    fn test_new_validates_parameters() {
        assert!(NormalizePixels::new(0.0, 0.5, 0.5).is_err());
        assert!(NormalizePixels::new(1.0 / 255.0, f32::INFINITY, 0.5).is_err());
        assert!(NormalizePixels::new(1.0 / 255.0, 0.5, 0.0).is_err());
        let custom = NormalizePixels::new(1.0 / 255.0, 0.0, 1.0).unwrap();
        assert!((custom.normalize_value(255) - 1.0).abs() < EPS);
        assert!(custom.normalize_value(0).abs() < EPS);
    }
}
