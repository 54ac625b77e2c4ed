use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the letter recognizer
#[derive(Parser, Debug)]
#[command(name = "letter-ocr")]
#[command(about = "Recognizes a handwritten letter in each input image")]
pub struct Args {
    /// Path to the letter classification model (ONNX)
    #[arg(short, long)]
    pub model_path: PathBuf,

    /// Paths to input images (white strokes on black)
    #[arg(required = true)]
    pub images: Vec<PathBuf>,

    /// JSON recognizer configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the class alphabet (one symbol per model output)
    #[arg(long)]
    pub alphabet: Option<String>,

    /// Device to use for inference (e.g., 'cpu', 'cuda', 'cuda:0')
    #[arg(long, default_value = "cpu")]
    pub device: String,

    /// Number of ranked alternatives to print
    #[arg(long, default_value = "1")]
    pub topk: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_args() {
        let args = Args::try_parse_from(["letter-ocr", "-m", "model.onnx", "a.png"]).unwrap();
        assert_eq!(args.model_path, PathBuf::from("model.onnx"));
        assert_eq!(args.images, vec![PathBuf::from("a.png")]);
        assert_eq!(args.device, "cpu");
        assert_eq!(args.topk, 1);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_images_are_required() {
        assert!(Args::try_parse_from(["letter-ocr", "-m", "model.onnx"]).is_err());
    }

    #[test]
    fn test_parse_all_options() {
        let args = Args::try_parse_from([
            "letter-ocr",
            "--model-path",
            "m.onnx",
            "--config",
            "cfg.json",
            "--alphabet",
            "0123456789",
            "--device",
            "cuda:1",
            "--topk",
            "3",
            "x.png",
            "y.png",
        ])
        .unwrap();
        assert_eq!(args.images.len(), 2);
        assert_eq!(args.alphabet.as_deref(), Some("0123456789"));
        assert_eq!(args.device, "cuda:1");
        assert_eq!(args.topk, 3);
    }
}
