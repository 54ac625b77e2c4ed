//! Letter Recognition CLI
//!
//! Loads a letter classification model and recognizes the letter drawn in
//! each input image (white strokes on a black background).
//!
//! # Usage
//!
//! ```bash
//! letter-ocr -m models/letters.onnx drawing1.png drawing2.png
//! ```
//!
//! Set `RUST_LOG=info` (or `debug` to see logits and probabilities) to enable
//! logging.

mod cli;

use clap::Parser;
use cli::Args;
use letter_ocr::core::config::{OrtExecutionProvider, OrtSessionConfig, RecognizerConfig};
use letter_ocr::core::{ModelSource, init_tracing};
use letter_ocr::domain::{PredictionSink, TextDisplay};
use letter_ocr::pipeline::LetterRecognizer;
use letter_ocr::utils::load_images_batch;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(failures) if failures == 0 => ExitCode::SUCCESS,
        Ok(failures) => {
            warn!("{} of {} images could not be recognized", failures, args.images.len());
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<usize, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => RecognizerConfig::from_json_file(path)?,
        None => RecognizerConfig::default(),
    };
    if let Some(alphabet) = &args.alphabet {
        config.alphabet = alphabet.clone();
    }
    let mut providers = OrtExecutionProvider::parse_device(&args.device)?;
    if cfg!(not(feature = "cuda")) && providers.len() > 1 {
        warn!("CUDA requested but cuda feature not enabled. Falling back to CPU.");
        providers = vec![OrtExecutionProvider::CPU];
    }
    let ort_config = config
        .ort_session
        .take()
        .unwrap_or_else(OrtSessionConfig::new)
        .with_execution_providers(providers);
    config.ort_session = Some(ort_config);

    let load_start = Instant::now();
    let recognizer = LetterRecognizer::builder()
        .config(config)
        .build_with_model(&ModelSource::file(&args.model_path))?;
    info!("Model loaded in {:.2?}", load_start.elapsed());

    let mut display = TextDisplay::new();
    let mut failures = 0usize;
    let images = load_images_batch(&args.images);

    for (path, image) in args.images.iter().zip(images) {
        display.reset();
        let image = match image {
            Ok(image) => image,
            Err(e) => {
                error!("Failed to load {}: {}", path.display(), e);
                failures += 1;
                continue;
            }
        };

        let start = Instant::now();
        let prediction = match recognizer.predict_image(&image) {
            Ok(Some(prediction)) => prediction,
            Ok(None) => {
                warn!("Model not ready, skipping {}", path.display());
                failures += 1;
                continue;
            }
            Err(e) => {
                error!("Prediction failed for {}: {}", path.display(), e);
                failures += 1;
                continue;
            }
        };
        display.show(&prediction);
        info!("{} recognized in {:.2?}", path.display(), start.elapsed());

        println!("{}: {}", path.display(), display);
        if args.topk > 1 {
            for (rank, c) in recognizer.top_k(&prediction, args.topk).iter().enumerate() {
                println!("  {}. {} ({:.1}%)", rank + 1, c.label, c.score * 100.0);
            }
        }
    }

    Ok(failures)
}
