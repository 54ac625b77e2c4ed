//! Pixel extraction from a drawing surface.
//!
//! The surface is a monochrome raster (white strokes on black). It is scaled
//! down to the model's S x S grid and one channel is read per position,
//! row-major.

use crate::core::errors::{RecognizerError, RecognizerResult};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, RgbaImage};

/// Samples S x S grayscale pixels from arbitrary rasters.
#[derive(Debug, Clone, Copy)]
pub struct PixelSampler {
    size: u32,
    filter: FilterType,
}

impl PixelSampler {
    /// Creates a sampler producing `size` x `size` buffers with a bilinear filter.
    pub fn new(size: u32) -> Self {
        Self {
            size,
            filter: FilterType::Triangle,
        }
    }

    /// Overrides the resampling filter.
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// Side length of the produced grid.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Downsamples an image and returns its luma values.
    ///
    /// The image is stretched to a square; a monochrome surface has equal
    /// channels so luma equals any single channel.
    pub fn sample_image(&self, image: &DynamicImage) -> Vec<u8> {
        let gray = image.to_luma8();
        self.sample_gray(&gray)
    }

    /// Downsamples a grayscale image.
    pub fn sample_gray(&self, image: &GrayImage) -> Vec<u8> {
        if image.width() == self.size && image.height() == self.size {
            return image.as_raw().clone();
        }
        imageops::resize(image, self.size, self.size, self.filter).into_raw()
    }

    /// Downsamples an RGBA buffer laid out like canvas `ImageData` and reads
    /// the red channel.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the buffer length is not `width * height * 4`
    /// or either dimension is zero.
    pub fn sample_rgba(&self, width: u32, height: u32, rgba: &[u8]) -> RecognizerResult<Vec<u8>> {
        let expected = (width as usize) * (height as usize) * 4;
        if width == 0 || height == 0 || rgba.len() != expected {
            return Err(RecognizerError::invalid_input(format!(
                "RGBA buffer for {}x{} must hold {} bytes, got {}",
                width,
                height,
                expected,
                rgba.len()
            )));
        }
        let image = RgbaImage::from_raw(width, height, rgba.to_vec()).ok_or_else(|| {
            RecognizerError::invalid_input("RGBA buffer does not match its dimensions")
        })?;
        let resized = if width == self.size && height == self.size {
            image
        } else {
            imageops::resize(&image, self.size, self.size, self.filter)
        };
        Ok(resized.pixels().map(|p| p.0[0]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgba};

    #[test]
    fn test_sample_gray_same_size_is_identity() {
        let mut img = GrayImage::new(28, 28);
        img.put_pixel(3, 1, Luma([200]));
        let pixels = PixelSampler::new(28).sample_gray(&img);
        assert_eq!(pixels.len(), 784);
        assert_eq!(pixels[28 + 3], 200);
    }

    #[test]
    fn test_sample_image_downsamples() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(280, 140, Luma([255])));
        let pixels = PixelSampler::new(28).sample_image(&img);
        assert_eq!(pixels.len(), 784);
        assert!(pixels.iter().all(|&v| v >= 254));
    }

    #[test]
    fn test_blank_surface_is_all_zero() {
        let img = DynamicImage::ImageRgb8(image::RgbImage::new(300, 300));
        let pixels = PixelSampler::new(28).sample_image(&img);
        assert!(pixels.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_sample_rgba_reads_red_channel() {
        let mut img = RgbaImage::from_pixel(28, 28, Rgba([0, 0, 0, 255]));
        img.put_pixel(5, 0, Rgba([180, 10, 20, 255]));
        let pixels = PixelSampler::new(28)
            .sample_rgba(28, 28, img.as_raw())
            .unwrap();
        assert_eq!(pixels.len(), 784);
        assert_eq!(pixels[5], 180);
        assert_eq!(pixels[6], 0);
    }

    #[test]
    fn test_sample_rgba_resizes() {
        let img = RgbaImage::from_pixel(56, 56, Rgba([255, 255, 255, 255]));
        let pixels = PixelSampler::new(28)
            .with_filter(FilterType::Nearest)
            .sample_rgba(56, 56, img.as_raw())
            .unwrap();
        assert_eq!(pixels.len(), 784);
        assert!(pixels.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_sample_rgba_rejects_bad_buffer() {
        let sampler = PixelSampler::new(28);
        assert!(sampler.sample_rgba(10, 10, &[0u8; 399]).is_err());
        assert!(sampler.sample_rgba(0, 10, &[]).is_err());
    }
}
