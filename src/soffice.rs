use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::convert::{Backend, PDF_EXTENSION};
use crate::error::Error;

/// Converts through a headless LibreOffice (`soffice`) installation.
#[derive(Clone, Debug)]
pub struct SofficeBackend {
    program: PathBuf,
}

impl SofficeBackend {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        SofficeBackend { program: program.into() }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn failure(&self, reason: String) -> Error {
        Error::HostApplication {
            program: self.program.clone(),
            reason,
        }
    }
}

impl Backend for SofficeBackend {
    fn name(&self) -> &'static str {
        "soffice"
    }

    fn convert(&self, input: &Path, output: &Path) -> Result<(), Error> {
        // soffice names its result after the input, so let it write into a scratch dir
        let scratch = tempfile::tempdir()?;

        let result = Command::new(&self.program)
            .arg("--headless")
            .arg("--convert-to")
            .arg(PDF_EXTENSION)
            .arg("--outdir")
            .arg(scratch.path())
            .arg(input)
            .output();

        let result = match result {
            Ok(result) => result,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(self.failure("não está disponível".into()));
            }
            Err(e) => return Err(Error::Io(e)),
        };

        if !result.status.success() {
            let status = match result.status.code() {
                Some(code) => format!("terminou com código {code}"),
                None => "foi interrompido por um sinal".to_string(),
            };
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(self.failure(match stderr.trim() {
                "" => status,
                detail => format!("{status}: {detail}"),
            }));
        }

        let stem = input
            .file_stem()
            .ok_or_else(|| self.failure(format!("sem nome de arquivo em {}", input.display())))?;
        let mut file_name = stem.to_os_string();
        file_name.push(".");
        file_name.push(PDF_EXTENSION);
        let produced = scratch.path().join(file_name);
        if !produced.is_file() {
            return Err(self.failure(format!("não gerou {}", produced.display())));
        }

        log::debug!("copying {} to {}", produced.display(), output.display());
        std::fs::copy(&produced, output)?;
        Ok(())
    }
}
