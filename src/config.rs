//! Command-line configuration.
//!
//! Every option can also be set through an environment variable with the
//! `TIFFTAGS_` prefix:
//!
//! - `TIFFTAGS_FORMAT` - Report format, `text` or `json` (default: text)
//! - `TIFFTAGS_OPEN` - Open the report in an editor after writing it
//! - `TIFFTAGS_EDITOR` - Editor command (default: platform opener, then `$VISUAL`, `$EDITOR`)
//! - `TIFFTAGS_MAX_PAGES` - Maximum number of pages to read (default: 4096)

use std::path::{Component, Path, PathBuf};

use clap::Parser;

use crate::format::tiff::DEFAULT_MAX_PAGES;
use crate::report::{ExtractOptions, ReportFormat};

/// Extension used for the default report path.
pub const DEFAULT_REPORT_EXTENSION: &str = "txt";

/// tifftags - Dump the metadata tags of every page of a TIFF, BigTIFF or SVS file.
#[derive(Parser, Debug, Clone)]
#[command(name = "tifftags")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// TIFF, BigTIFF or SVS file to read.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Report file to write.
    ///
    /// Defaults to the input path with a `.txt` extension.
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text, env = "TIFFTAGS_FORMAT")]
    pub format: ReportFormat,

    /// Open the report in an editor once it is written.
    #[arg(long, default_value_t = false, env = "TIFFTAGS_OPEN")]
    pub open: bool,

    /// Editor command used with --open, arguments allowed (e.g. "code --wait").
    #[arg(long, env = "TIFFTAGS_EDITOR")]
    pub editor: Option<String>,

    /// Maximum number of pages (IFDs) to read before rejecting the file.
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES, env = "TIFFTAGS_MAX_PAGES")]
    pub max_pages: usize,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_pages == 0 {
            return Err("max_pages must be greater than 0".to_string());
        }

        let output = self.output_path();
        if is_same_file(&self.input, &output) {
            return Err(format!(
                "Output path {} is the same file as the input {}; pass a different OUTPUT",
                output.display(),
                self.input.display()
            ));
        }

        if let Some(ref editor) = self.editor {
            if editor.trim().is_empty() {
                return Err("editor must not be blank. Unset --editor or TIFFTAGS_EDITOR".to_string());
            }
        }

        Ok(())
    }

    /// Where the report is written.
    pub fn output_path(&self) -> PathBuf {
        match self.output {
            Some(ref output) => output.clone(),
            None => self.input.with_extension(DEFAULT_REPORT_EXTENSION),
        }
    }

    /// Options for the extraction step.
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            max_pages: self.max_pages,
        }
    }
}

// =============================================================================
// Path identity
// =============================================================================

/// Whether `a` and `b` name the same file, however they are spelled.
///
/// Compares device and inode when both exist, otherwise the resolved paths.
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        if let (Ok(meta_a), Ok(meta_b)) = (std::fs::metadata(a), std::fs::metadata(b)) {
            return meta_a.dev() == meta_b.dev() && meta_a.ino() == meta_b.ino();
        }
    }

    resolve_path(a) == resolve_path(b)
}

/// Absolute form of `path` with symlinks resolved as far as the file system
/// allows. Components that do not exist yet are normalized lexically.
fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };
    let normalized = normalize_lexically(&absolute);

    match (normalized.parent(), normalized.file_name()) {
        (Some(parent), Some(name)) => match parent.canonicalize() {
            Ok(parent) => parent.join(name),
            Err(_) => normalized,
        },
        _ => normalized,
    }
}

/// Drop `.` and fold `..` into its parent without touching the file system.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
