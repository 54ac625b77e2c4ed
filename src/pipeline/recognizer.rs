//! Letter recognizer: the preprocess-infer-decode pipeline.
//!
//! A [`LetterRecognizer`] starts out without a model. Once a model has been
//! loaded (synchronously with [`LetterRecognizer::load`] or on a background
//! thread with [`LetterRecognizer::spawn_load`]) every prediction runs three
//! stages in order:
//!
//! 1. normalize the S x S pixel samples into a `[1, 1, S, S]` tensor
//! 2. run the inference engine and read the configured output
//! 3. softmax the logits and select the most probable label
//!
//! Predictions requested before the model is ready are declined with
//! `Ok(None)`.

use crate::core::config::{OrtSessionConfig, RecognizerConfig};
use crate::core::errors::{RecognizerError, RecognizerResult, SimpleError};
use crate::core::inference::{InferenceEngine, ModelSource, OrtInfer, Tensor4D};
use crate::domain::{Classification, Prediction, PredictionSink};
use crate::processors::{ClassificationDecoder, NormalizePixels, PixelSampler};
use image::DynamicImage;
use std::sync::{Arc, OnceLock};
use std::thread::JoinHandle;
use tracing::{debug, error, info, warn};

/// Recognizes a single drawn letter per call.
#[derive(Debug)]
pub struct LetterRecognizer {
    config: RecognizerConfig,
    normalizer: NormalizePixels,
    sampler: PixelSampler,
    decoder: ClassificationDecoder,
    engine: OnceLock<Box<dyn InferenceEngine>>,
}

impl LetterRecognizer {
    /// Creates a new builder for the letter recognizer.
    pub fn builder() -> LetterRecognizerBuilder {
        LetterRecognizerBuilder::new()
    }

    /// Creates a recognizer that has no model yet.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn new(config: RecognizerConfig) -> RecognizerResult<Self> {
        config.validate()?;
        let normalizer = NormalizePixels::new(
            config.normalize_scale,
            config.normalize_mean,
            config.normalize_std,
        )?;
        let sampler = PixelSampler::new(config.input_size);
        let decoder = ClassificationDecoder::from_alphabet(&config.alphabet);
        Ok(Self {
            config,
            normalizer,
            sampler,
            decoder,
            engine: OnceLock::new(),
        })
    }

    /// Creates a recognizer that is immediately ready with the given engine.
    pub fn with_engine(
        config: RecognizerConfig,
        engine: Box<dyn InferenceEngine>,
    ) -> RecognizerResult<Self> {
        let recognizer = Self::new(config)?;
        recognizer.install_engine(engine);
        Ok(recognizer)
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Returns the decoder holding the label alphabet.
    pub fn decoder(&self) -> &ClassificationDecoder {
        &self.decoder
    }

    /// Returns true once a model has been loaded.
    pub fn is_ready(&self) -> bool {
        self.engine.get().is_some()
    }

    /// Installs an engine. Returns false if one was already installed, in
    /// which case the new engine is dropped.
    pub fn install_engine(&self, engine: Box<dyn InferenceEngine>) -> bool {
        let model_name = engine.model_name().to_string();
        match self.engine.set(engine) {
            Ok(()) => {
                info!(model = %model_name, "recognizer ready");
                true
            }
            Err(_) => {
                warn!(model = %model_name, "model already loaded; ignoring new engine");
                false
            }
        }
    }

    /// Loads the model with ONNX Runtime. Loading happens at most once; calling
    /// this on a ready recognizer does nothing.
    ///
    /// # Errors
    ///
    /// Returns `ModelLoad` if the artifact is missing or not a valid model. The
    /// recognizer then stays not ready.
    pub fn load(&self, source: &ModelSource) -> RecognizerResult<()> {
        if self.is_ready() {
            debug!(model = %source.describe(), "model already loaded");
            return Ok(());
        }
        let engine = Self::load_engine(source, &self.config)?;
        self.install_engine(engine);
        Ok(())
    }

    /// Loads the model on a background thread.
    ///
    /// Predictions issued while the load is in flight return `Ok(None)`.
    pub fn spawn_load(self: &Arc<Self>, source: ModelSource) -> JoinHandle<RecognizerResult<()>> {
        let config = self.config.clone();
        self.spawn_load_with(move || Self::load_engine(&source, &config))
    }

    /// Runs `loader` on a background thread and installs the engine it returns.
    pub fn spawn_load_with<F>(self: &Arc<Self>, loader: F) -> JoinHandle<RecognizerResult<()>>
    where
        F: FnOnce() -> RecognizerResult<Box<dyn InferenceEngine>> + Send + 'static,
    {
        let recognizer = Arc::clone(self);
        std::thread::spawn(move || {
            let engine = loader().inspect_err(|e| error!("model load failed: {}", e))?;
            recognizer.install_engine(engine);
            Ok(())
        })
    }

    fn load_engine(
        source: &ModelSource,
        config: &RecognizerConfig,
    ) -> RecognizerResult<Box<dyn InferenceEngine>> {
        info!(model = %source.describe(), "loading model");
        let engine = OrtInfer::from_config(
            source,
            config.session_pool_size,
            config.ort_session.as_ref(),
        )?;
        ensure_output_declared(&source.describe(), engine.output_names(), &config.output_name)?;
        Ok(Box::new(engine))
    }

    /// Recognizes an S x S, row-major grayscale pixel buffer.
    ///
    /// Returns `Ok(None)` if no model has been loaded yet.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` if `pixels` does not hold S x S samples
    /// * `Inference` if the engine fails or returns unusable output
    pub fn predict(&self, pixels: &[u8]) -> RecognizerResult<Option<Prediction>> {
        let Some(engine) = self.engine.get() else {
            debug!("model not loaded; ignoring prediction request");
            return Ok(None);
        };

        let input = self.normalizer.to_input_tensor(pixels, self.config.input_size)?;
        let scores = self.infer(engine.as_ref(), &input)?;
        debug!(logits = ?scores, "raw scores");

        let prediction = self.decode(engine.as_ref(), &scores)?;
        debug!(probabilities = ?prediction.probabilities, "softmax");
        info!(
            label = %prediction.label,
            confidence = %format!("{:.1}%", prediction.confidence_percent()),
            "prediction"
        );
        Ok(Some(prediction))
    }

    /// Downsamples an image to S x S and recognizes it.
    pub fn predict_image(&self, image: &DynamicImage) -> RecognizerResult<Option<Prediction>> {
        if !self.is_ready() {
            debug!("model not loaded; ignoring prediction request");
            return Ok(None);
        }
        let pixels = self.sampler.sample_image(image);
        self.predict(&pixels)
    }

    /// Downsamples a canvas-style RGBA buffer to S x S and recognizes it.
    pub fn predict_rgba(
        &self,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> RecognizerResult<Option<Prediction>> {
        if !self.is_ready() {
            debug!("model not loaded; ignoring prediction request");
            return Ok(None);
        }
        let pixels = self.sampler.sample_rgba(width, height, rgba)?;
        self.predict(&pixels)
    }

    /// Recognizes `pixels` and hands the result to `sink`.
    ///
    /// The sink is only touched when a prediction is produced; on error or
    /// when not ready it keeps showing what it showed before.
    pub fn predict_into(
        &self,
        pixels: &[u8],
        sink: &mut dyn PredictionSink,
    ) -> RecognizerResult<Option<Prediction>> {
        let prediction = self.predict(pixels)?;
        if let Some(p) = &prediction {
            sink.show(p);
        }
        Ok(prediction)
    }

    /// The `k` most probable labels of a prediction, best first.
    pub fn top_k(&self, prediction: &Prediction, k: usize) -> Vec<Classification> {
        self.decoder.top_k(prediction, k)
    }

    fn infer(&self, engine: &dyn InferenceEngine, input: &Tensor4D) -> RecognizerResult<Vec<f32>> {
        let mut outputs = engine.run(&self.config.input_name, input)?;
        let output_name = &self.config.output_name;
        outputs.remove(output_name).ok_or_else(|| {
            let mut available: Vec<&String> = outputs.keys().collect();
            available.sort();
            RecognizerError::inference_error(
                engine.model_name(),
                &format!("output '{}' missing from model results", output_name),
                SimpleError::new(format!("available outputs: {:?}", available)),
            )
        })
    }

    fn decode(&self, engine: &dyn InferenceEngine, scores: &[f32]) -> RecognizerResult<Prediction> {
        if scores.len() != self.decoder.num_classes() {
            return Err(RecognizerError::inference_error(
                engine.model_name(),
                &format!(
                    "expected {} scores in output '{}', got {}",
                    self.decoder.num_classes(),
                    self.config.output_name,
                    scores.len()
                ),
                SimpleError::new("output size does not match the label alphabet"),
            ));
        }
        self.decoder.decode(scores).map_err(|e| {
            RecognizerError::inference_error(engine.model_name(), "unusable scores", e)
        })
    }
}

/// Fails the load when the model does not declare the output the recognizer
/// reads its scores from.
fn ensure_output_declared(
    model: &str,
    output_names: &[String],
    expected: &str,
) -> RecognizerResult<()> {
    if output_names.iter().any(|n| n == expected) {
        return Ok(());
    }
    warn!(
        expected = %expected,
        available = ?output_names,
        "model does not declare the configured output"
    );
    Err(RecognizerError::model_load_error(
        model,
        format!(
            "model has no output named '{}' (available: {})",
            expected,
            output_names.join(", ")
        ),
        Some("set output_name in the recognizer config to one of the model outputs"),
        None::<SimpleError>,
    ))
}

/// Builder for [`LetterRecognizer`].
#[derive(Debug, Clone, Default)]
pub struct LetterRecognizerBuilder {
    config: RecognizerConfig,
}

impl LetterRecognizerBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: RecognizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the side length of the model input.
    pub fn input_size(mut self, size: u32) -> Self {
        self.config.input_size = size;
        self
    }

    /// Sets the ordered class alphabet.
    pub fn alphabet(mut self, alphabet: impl Into<String>) -> Self {
        self.config.alphabet = alphabet.into();
        self
    }

    /// Sets the model input tensor name.
    pub fn input_name(mut self, name: impl Into<String>) -> Self {
        self.config.input_name = name.into();
        self
    }

    /// Sets the model output tensor name.
    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.config.output_name = name.into();
        self
    }

    /// Sets the normalization mean and standard deviation.
    pub fn normalization(mut self, mean: f32, std: f32) -> Self {
        self.config.normalize_mean = mean;
        self.config.normalize_std = std;
        self
    }

    /// Sets the session pool size.
    pub fn session_pool_size(mut self, size: usize) -> Self {
        self.config.session_pool_size = size;
        self
    }

    /// Sets the ONNX Runtime session configuration.
    pub fn with_ort_config(mut self, config: OrtSessionConfig) -> Self {
        self.config.ort_session = Some(config);
        self
    }

    /// Builds a recognizer without a model.
    pub fn build(self) -> RecognizerResult<LetterRecognizer> {
        LetterRecognizer::new(self.config)
    }

    /// Builds a recognizer and loads the model synchronously.
    pub fn build_with_model(self, source: &ModelSource) -> RecognizerResult<LetterRecognizer> {
        let recognizer = self.build()?;
        recognizer.load(source)?;
        Ok(recognizer)
    }

    /// Builds a recognizer around an existing engine.
    pub fn build_with_engine(
        self,
        engine: Box<dyn InferenceEngine>,
    ) -> RecognizerResult<LetterRecognizer> {
        LetterRecognizer::with_engine(self.config, engine)
    }
}
