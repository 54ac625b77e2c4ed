//! # Letter OCR
//!
//! Recognizes a single handwritten letter drawn on a raster surface using a
//! pre-trained ONNX classifier.
//!
//! The surface is downsampled to 28x28, normalized to [-1, 1] and fed to the
//! model as a `[1, 1, 28, 28]` tensor. The 26 returned logits are turned into
//! probabilities with softmax and the most probable letter is reported with
//! its confidence.
//!
//! ## Modules
//!
//! * [`core`] - Configuration, error handling and the inference engine
//! * [`domain`] - Prediction results and their presentation
//! * [`pipeline`] - The preprocess-infer-decode recognizer
//! * [`processors`] - Pixel sampling, normalization and logit decoding
//! * [`utils`] - Image loading helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use letter_ocr::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let recognizer = LetterRecognizer::builder()
//!     .build_with_model(&ModelSource::file("models/letters.onnx"))?;
//!
//! let image = load_image(Path::new("drawing.png"))?;
//! if let Some(prediction) = recognizer.predict_image(&image)? {
//!     println!("{}", prediction);
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod pipeline;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// ```rust
/// use letter_ocr::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{ModelSource, RecognizerConfig, RecognizerError, RecognizerResult};
    pub use crate::domain::{Prediction, PredictionSink, TextDisplay};
    pub use crate::pipeline::{LetterRecognizer, LetterRecognizerBuilder};
    pub use crate::utils::load_image;
}
