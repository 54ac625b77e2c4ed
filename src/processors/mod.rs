//! Preprocessing and postprocessing stages of the recognition pipeline.
//!
//! * [`raster`] - downsample a drawing surface to the S x S pixel grid
//! * [`normalization`] - map pixel samples into the model's input range
//! * [`decode`] - softmax the logits and pick the most probable label

pub mod decode;
pub mod normalization;
pub mod raster;

pub use decode::{ClassificationDecoder, argmax, softmax};
pub use normalization::NormalizePixels;
pub use raster::PixelSampler;
