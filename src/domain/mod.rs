//! Domain types: prediction results and their presentation.

pub mod display;
pub mod prediction;

pub use display::{PredictionSink, TextDisplay};
pub use prediction::{Classification, Prediction};
