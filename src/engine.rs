//! File-level pipeline: decode, extract alpha, encode.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::chroma_key::{chroma_key_with, ToleranceBand, DEFAULT_TOLERANCE};
use crate::codec;
use crate::color::{BackgroundSpec, Color};
use crate::difference::difference_matte;
use crate::error::{Error, Result};

/// Options controlling chroma key processing.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Background to key out.
    pub background: BackgroundSpec,
    /// Chroma key tolerance (0-255).
    pub tolerance: i32,
    /// Enable verbose logging.
    pub verbose: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            background: BackgroundSpec::Auto,
            tolerance: DEFAULT_TOLERANCE,
            verbose: false,
            quiet: false,
        }
    }
}

/// Result of processing a single output file.
#[derive(Debug)]
pub struct ProcessResult {
    /// Path of the (first) input file.
    pub path: PathBuf,
    /// Whether processing succeeded.
    pub success: bool,
    /// Background color that was keyed out, for chroma key runs.
    pub background: Option<Color>,
    /// Human-readable status message.
    pub message: String,
}

impl ProcessResult {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            success: false,
            background: None,
            message: String::new(),
        }
    }

    fn fail(mut self, err: &Error) -> Self {
        tracing::warn!(path = %self.path.display(), error = %err, "processing failed");
        self.message = err.to_string();
        self
    }
}

/// Chroma key a single file.
///
/// The tolerance is checked before the input is decoded.
#[must_use]
pub fn process_chroma_key_file(input: &Path, output: &Path, opts: &ProcessOptions) -> ProcessResult {
    let result = ProcessResult::new(input);

    let run = || -> Result<Color> {
        let band = ToleranceBand::new(opts.tolerance)?;
        let img = codec::decode(input)?;
        let color = opts.background.resolve(&img);
        tracing::debug!(
            path = %input.display(),
            background = %opts.background,
            %color,
            tolerance = opts.tolerance,
            "chroma keying file"
        );
        let keyed = chroma_key_with(&img, color, band);
        codec::encode(&keyed, output)?;
        Ok(color)
    };

    match run() {
        Ok(color) => ProcessResult {
            success: true,
            background: Some(color),
            message: format!("Keyed out {color} (tolerance {})", opts.tolerance),
            ..result
        },
        Err(e) => result.fail(&e),
    }
}

/// Difference-matte a white-pass and a black-pass file into `output`.
///
/// Nothing is written when the passes differ in size.
#[must_use]
pub fn process_difference_files(white: &Path, black: &Path, output: &Path) -> ProcessResult {
    let result = ProcessResult::new(white);

    let run = || -> Result<()> {
        let white_img = codec::decode(white)?;
        let black_img = codec::decode(black)?;
        let matte = difference_matte(&white_img, &black_img)?;
        codec::encode(&matte, output)
    };

    match run() {
        Ok(()) => ProcessResult {
            success: true,
            message: "Alpha recovered".to_string(),
            ..result
        },
        Err(e) => result.fail(&e),
    }
}

/// Chroma key every supported image in a directory.
///
/// Each `name.ext` is written to `output_dir/name.png`. Inputs that would
/// share an output path, or whose output would overwrite the input itself,
/// fail without writing anything. Uses parallel iteration when the
/// `parallel` feature is enabled (via rayon).
#[must_use]
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    opts: &ProcessOptions,
) -> Vec<ProcessResult> {
    let mut entries: Vec<PathBuf> = match std::fs::read_dir(input_dir) {
        Ok(rd) => rd
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .map(|e| e.path())
            .filter(|p| is_supported_image(p))
            .collect(),
        Err(e) => {
            return vec![ProcessResult {
                message: format!("Failed to read directory: {e}"),
                ..ProcessResult::new(input_dir)
            }];
        }
    };
    entries.sort();

    tracing::info!(count = entries.len(), dir = %input_dir.display(), "processing directory");

    let jobs: Vec<(PathBuf, PathBuf)> = entries
        .into_iter()
        .map(|input| {
            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            let output = output_dir.join(format!("{stem}.png"));
            (input, output)
        })
        .collect();

    let mut claims: HashMap<&Path, usize> = HashMap::new();
    for (_, output) in &jobs {
        *claims.entry(output.as_path()).or_default() += 1;
    }

    let process = |(input, output): &(PathBuf, PathBuf)| {
        if claims.get(output.as_path()).copied().unwrap_or(0) > 1 {
            let result = ProcessResult {
                message: format!(
                    "Output {} would be written by more than one input",
                    output.display()
                ),
                ..ProcessResult::new(input)
            };
            tracing::warn!(path = %input.display(), "{}", result.message);
            return result;
        }
        if same_file(input, output) {
            let result = ProcessResult {
                message: format!("Output {} would overwrite the input", output.display()),
                ..ProcessResult::new(input)
            };
            tracing::warn!(path = %input.display(), "{}", result.message);
            return result;
        }
        process_chroma_key_file(input, output, opts)
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        jobs.par_iter().map(process).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        jobs.iter().map(process).collect()
    }
}

/// Whether `output` names the same file as `input`.
fn same_file(input: &Path, output: &Path) -> bool {
    if input == output {
        return true;
    }
    match (input.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Check if a file has a supported input image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(
            ext.to_lowercase().as_str(),
            "jpg" | "jpeg" | "png" | "webp" | "bmp"
        ),
        None => false,
    }
}

/// Generate a default output path from an input path.
///
/// Example: `"photo.jpg"` becomes `"photo_transparent.png"`.
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let parent = input.parent().unwrap_or(Path::new("."));
    parent.join(format!("{stem}_transparent.png"))
}
