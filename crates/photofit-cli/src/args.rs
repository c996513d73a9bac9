use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use photofit_core::{CompressionOptions, FilterType};

/// Compress a photo until it fits under an upload size ceiling
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Input image (JPEG or PNG)
    pub input: PathBuf,

    /// Output JPEG file [default: <input>.compressed.jpg]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON file with compression options (camelCase keys); flags override it
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Maximum output size in bytes [default: 3000000]
    #[arg(long, value_name = "BYTES")]
    pub max_size: Option<u64>,

    /// Maximum output width in pixels [default: 1920]
    #[arg(long)]
    pub max_width: Option<u32>,

    /// Maximum output height in pixels [default: 1920]
    #[arg(long)]
    pub max_height: Option<u32>,

    /// First JPEG quality tried (1-100) [default: 100]
    #[arg(long)]
    pub start_quality: Option<u8>,

    /// Quality decrement per attempt [default: 10]
    #[arg(long)]
    pub quality_step: Option<u8>,

    /// Lowest JPEG quality tried (1-100) [default: 30]
    #[arg(long)]
    pub min_quality: Option<u8>,

    /// Resampling filter for downscaling [default: lanczos3]
    #[arg(long, value_enum)]
    pub filter: Option<FilterArg>,

    /// Print a JSON report instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Log every attempt
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    Nearest,
    Bilinear,
    Lanczos3,
}

impl From<FilterArg> for FilterType {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Nearest => FilterType::Nearest,
            FilterArg::Bilinear => FilterType::Bilinear,
            FilterArg::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl Args {
    /// Defaults, then the options file, then explicit flags.
    pub fn resolve_options(&self) -> Result<CompressionOptions> {
        let mut options = match &self.options {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read options file {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Invalid options file {}", path.display()))?
            }
            None => CompressionOptions::default(),
        };

        if let Some(v) = self.max_size {
            options.max_size_bytes = v;
        }
        if let Some(v) = self.max_width {
            options.max_width = v;
        }
        if let Some(v) = self.max_height {
            options.max_height = v;
        }
        if let Some(v) = self.start_quality {
            options.start_quality = v;
        }
        if let Some(v) = self.quality_step {
            options.quality_step = v;
        }
        if let Some(v) = self.min_quality {
            options.min_quality = v;
        }
        if let Some(v) = self.filter {
            options.filter = v.into();
        }
        Ok(options)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output(&self.input))
    }
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{}.compressed.jpg", stem))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("photofit").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["IMG_0001.jpg"]);
        assert_eq!(args.resolve_options().unwrap(), CompressionOptions::default());
        assert!(!args.json);
    }

    #[test]
    fn test_default_output_path() {
        let args = parse(&["photos/IMG_0001.jpg"]);
        assert_eq!(args.output_path(), PathBuf::from("photos/IMG_0001.compressed.jpg"));
    }

    #[test]
    fn test_explicit_output_path() {
        let args = parse(&["in.jpg", "-o", "out/upload.jpg"]);
        assert_eq!(args.output_path(), PathBuf::from("out/upload.jpg"));
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = parse(&[
            "in.jpg",
            "--max-size",
            "500000",
            "--min-quality",
            "50",
            "--quality-step",
            "5",
            "--filter",
            "bilinear",
        ]);
        let options = args.resolve_options().unwrap();

        assert_eq!(options.max_size_bytes, 500_000);
        assert_eq!(options.min_quality, 50);
        assert_eq!(options.quality_step, 5);
        assert_eq!(options.filter, FilterType::Bilinear);
        assert_eq!(options.start_quality, 100);
    }

    #[test]
    fn test_flags_override_options_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"maxSizeBytes": 1000000, "maxWidth": 800, "minQuality": 40}}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = parse(&["in.jpg", "--options", path.as_str(), "--min-quality", "20"]);
        let options = args.resolve_options().unwrap();

        assert_eq!(options.max_size_bytes, 1_000_000);
        assert_eq!(options.max_width, 800);
        assert_eq!(options.min_quality, 20);
        assert_eq!(options.max_height, 1920);
    }

    #[test]
    fn test_bad_options_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = parse(&["in.jpg", "--options", path.as_str()]);
        assert!(args.resolve_options().is_err());
    }
}
