use std::error::Error;
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufWriter;
use std::path::{ Path, PathBuf };

use asset_impl::writer::{ export, ExportSummary };
use asset_obj::{ ObjDocument, ObjError };
use log::{ debug, error, info, warn };

use crate::settings::Settings;

#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("{}: doesn't look like an obj file", .0.display())]
    InvalidExtension(PathBuf),
    #[error("{}: unable to open", path.display())]
    Open { path: PathBuf, #[source] source: std::io::Error },
    #[error("{}: unable to create", path.display())]
    Create { path: PathBuf, #[source] source: std::io::Error },
    #[error("{}", path.display())]
    Parse { path: PathBuf, #[source] source: ObjError },
    #[error("{}: write failed", path.display())]
    Write { path: PathBuf, #[source] source: std::io::Error },
}

/// Formats an error followed by each of its sources, separated by `: `.
pub fn error_chain(err: &dyn Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub scale: f64,
    pub triangle_count: usize,
}

/// The asset path for {input}: same location, `.g` extension. Fails unless
/// {input} ends in `.obj` (any case).
pub fn output_path(input: &Path) -> Result<PathBuf, ConvertError> {
    let is_obj = input.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("obj"));
    if !is_obj {
        return Err(ConvertError::InvalidExtension(input.to_path_buf()));
    }
    Ok(input.with_extension("g"))
}

// Removes the output file when dropped, unless the conversion completed.
struct PartialOutput {
    path: PathBuf,
    complete: bool,
}

impl PartialOutput {
    fn new(path: PathBuf) -> Self {
        PartialOutput { path, complete: false }
    }

    fn complete(mut self) {
        self.complete = true;
    }
}

impl Drop for PartialOutput {
    fn drop(&mut self) {
        if self.complete {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed partial output {}", self.path.display()),
            Err(err) => warn!("Unable to remove partial output {}: {err}", self.path.display()),
        }
    }
}

/// Converts one OBJ file into an asset file next to it. On failure no
/// output file is left behind.
pub fn convert(input: &Path, settings: &Settings) -> Result<ConversionReport, ConvertError> {
    let output = output_path(input)?;

    let mut src = File::open(input)
        .map_err(|source| ConvertError::Open { path: input.to_path_buf(), source })?;
    let dst = File::create(&output)
        .map_err(|source| ConvertError::Create { path: output.clone(), source })?;
    let partial = PartialOutput::new(output.clone());

    // `dst` is closed by the time `partial` is dropped.
    let summary = rip(&mut src, input, dst, &output, settings.scale)?;
    partial.complete();

    info!("{} -> {}", input.display(), output.display());
    info!(" scale = {:.6}, num_tris={}", summary.scale, summary.triangle_count);

    Ok(ConversionReport {
        input: input.to_path_buf(),
        output,
        scale: summary.scale,
        triangle_count: summary.triangle_count,
    })
}

fn rip(src: &mut File, input: &Path, dst: File, output: &Path, scale: f64) -> Result<ExportSummary, ConvertError> {
    let parse_error = |source| ConvertError::Parse { path: input.to_path_buf(), source };

    let base_dir = input.parent().unwrap_or(Path::new(""));
    let doc = ObjDocument::parse_with_base(src, base_dir, scale).map_err(parse_error)?;
    let tris = doc.triangulate().map_err(parse_error)?;

    let mut writer = BufWriter::new(dst);
    export(&tris, scale, &mut writer)
        .map_err(|source| ConvertError::Write { path: output.to_path_buf(), source })
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub converted: Vec<ConversionReport>,
    pub failed: Vec<ConvertError>,
    /// Files never attempted because an earlier one failed.
    pub skipped: Vec<PathBuf>,
}

impl BatchOutcome {
    pub fn success(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }
}

/// Converts {paths} in order. Stops at the first failure unless
/// `settings.keep_going` is set.
pub fn convert_all<P: AsRef<Path>>(paths: &[P], settings: &Settings) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for (i, path) in paths.iter().enumerate() {
        match convert(path.as_ref(), settings) {
            Ok(report) => outcome.converted.push(report),
            Err(err) => {
                error!("{}", error_chain(&err));
                outcome.failed.push(err);
                if !settings.keep_going {
                    outcome.skipped = paths[i + 1..].iter().map(|p| p.as_ref().to_path_buf()).collect();
                    if !outcome.skipped.is_empty() {
                        warn!("Stopping, {} file(s) not converted", outcome.skipped.len());
                    }
                    break;
                }
            },
        }
    }
    outcome
}
