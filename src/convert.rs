use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::Settings;
use crate::docx::{DOCX_EXTENSION, has_extension};
use crate::error::Error;
use crate::render::BuiltinBackend;
use crate::soffice::SofficeBackend;

pub const PDF_EXTENSION: &str = "pdf";

/// Performs the actual DOCX to PDF rendering once paths have been validated.
pub trait Backend {
    fn name(&self) -> &'static str;

    /// Writes a PDF rendering of `input` to `output`. The parent of `output` exists.
    fn convert(&self, input: &Path, output: &Path) -> Result<(), Error>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    #[default]
    Builtin,
    Soffice,
}

impl BackendKind {
    pub fn backend(self, settings: &Settings) -> Box<dyn Backend> {
        match self {
            BackendKind::Builtin => Box::new(BuiltinBackend),
            BackendKind::Soffice => Box::new(SofficeBackend::new(&settings.soffice_program)),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Builtin => f.write_str("builtin"),
            BackendKind::Soffice => f.write_str("soffice"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "builtin" => Ok(BackendKind::Builtin),
            "soffice" | "libreoffice" => Ok(BackendKind::Soffice),
            other => Err(format!("conversor desconhecido {other:?}")),
        }
    }
}

/// `dir/report.docx` -> `dir/report.pdf`
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(PDF_EXTENSION)
}

/// Validates `input`, resolves the output path and hands both to `backend`.
///
/// Without an explicit `output` the PDF lands next to the input. An explicit
/// output gets its parent directories created before the backend runs.
/// Returns the path of the written PDF.
pub fn convert(input: &Path, output: Option<&Path>, backend: &dyn Backend) -> Result<PathBuf, Error> {
    if !input.exists() {
        return Err(Error::FileNotFound(input.to_path_buf()));
    }
    if !has_extension(input, DOCX_EXTENSION) {
        return Err(Error::InvalidFormat {
            path: input.to_path_buf(),
            expected: DOCX_EXTENSION,
        });
    }

    let output = match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| Error::ConversionFailed {
                    path: input.to_path_buf(),
                    reason: format!("não foi possível criar {}: {e}", parent.display()),
                })?;
            }
            path.to_path_buf()
        }
        None => default_output_path(input),
    };

    log::info!(
        "converting {} to {} with {}",
        input.display(),
        output.display(),
        backend.name()
    );
    backend
        .convert(input, &output)
        .map_err(|e| Error::ConversionFailed {
            path: input.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok(output)
}

/// Converts with the built-in renderer.
pub fn convert_docx_to_pdf(input: &Path, output: Option<&Path>) -> Result<PathBuf, Error> {
    convert(input, output, &BuiltinBackend)
}
