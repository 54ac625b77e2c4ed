//! Utility functions for loading images.

use crate::core::errors::RecognizerResult;
use image::DynamicImage;
use rayon::prelude::*;
use std::path::Path;

/// Number of images above which batch loading switches to rayon.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4;

/// Loads an image from a file path.
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded.
pub fn load_image(path: &Path) -> RecognizerResult<DynamicImage> {
    Ok(image::open(path)?)
}

/// Loads a batch of images, in parallel when there are more than
/// [`DEFAULT_PARALLEL_THRESHOLD`] of them.
///
/// Each entry carries its own result so one unreadable file does not abort
/// the rest of the batch.
pub fn load_images_batch<P: AsRef<Path> + Send + Sync>(
    paths: &[P],
) -> Vec<RecognizerResult<DynamicImage>> {
    load_images_batch_with_threshold(paths, DEFAULT_PARALLEL_THRESHOLD)
}

/// Loads a batch of images with a custom parallel threshold.
pub fn load_images_batch_with_threshold<P: AsRef<Path> + Send + Sync>(
    paths: &[P],
    threshold: usize,
) -> Vec<RecognizerResult<DynamicImage>> {
    if paths.len() > threshold {
        paths.par_iter().map(|p| load_image(p.as_ref())).collect()
    } else {
        paths.iter().map(|p| load_image(p.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::RecognizerError;

    #[test]
    fn test_missing_image_is_image_load_error() {
        let result = load_image(Path::new("/nonexistent/letter.png"));
        assert!(matches!(result, Err(RecognizerError::ImageLoad(_))));
    }

    #[test]
    fn test_batch_keeps_order_and_per_item_errors() {
        let paths: Vec<String> = (0..6).map(|i| format!("/nonexistent/{i}.png")).collect();
        let sequential = load_images_batch_with_threshold(&paths, 100);
        let parallel = load_images_batch_with_threshold(&paths, 0);
        assert_eq!(sequential.len(), 6);
        assert_eq!(parallel.len(), 6);
        assert!(parallel.iter().all(|r| r.is_err()));
    }
}
