use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    FileNotFound(PathBuf),
    InvalidFormat {
        path: PathBuf,
        expected: &'static str,
    },
    CorruptPackage {
        path: PathBuf,
        reason: String,
    },
    ConversionFailed {
        path: PathBuf,
        reason: String,
    },
    Extraction {
        path: PathBuf,
        reason: String,
    },
    HostApplication {
        program: PathBuf,
        reason: String,
    },
    ConfigParse(serde_yaml::Error),
    InvalidDocx(String),
    Zip(zip::result::ZipError),
    Xml(roxmltree::Error),
    Pdf(String),
    Io(std::io::Error),
}

impl Error {
    /// Process exit code reported by the CLI for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::FileNotFound(_) => 3,
            Error::InvalidFormat { .. } => 4,
            Error::CorruptPackage { .. } => 5,
            Error::ConversionFailed { .. } => 6,
            Error::Extraction { .. } => 7,
            Error::HostApplication { .. }
            | Error::ConfigParse(_)
            | Error::InvalidDocx(_)
            | Error::Zip(_)
            | Error::Xml(_)
            | Error::Pdf(_)
            | Error::Io(_) => 1,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FileNotFound(path) => {
                write!(f, "arquivo não encontrado em '{}'", path.display())
            }
            Error::InvalidFormat { path, expected } => {
                write!(f, "o arquivo '{}' não é um arquivo .{expected}", path.display())
            }
            Error::CorruptPackage { path, reason } => write!(
                f,
                "o arquivo '{}' não parece ser um DOCX válido ou está corrompido: {reason}",
                path.display()
            ),
            Error::ConversionFailed { path, reason } => write!(
                f,
                "falha durante a conversão do arquivo '{}': {reason}",
                path.display()
            ),
            Error::Extraction { path, reason } => write!(
                f,
                "falha ao ler metadados de '{}': {reason}",
                path.display()
            ),
            Error::HostApplication { program, reason } => {
                write!(f, "aplicativo externo '{}' {reason}", program.display())
            }
            Error::ConfigParse(e) => write!(f, "configuração inválida: {e}"),
            Error::InvalidDocx(reason) => write!(f, "não é um arquivo DOCX válido: {reason}"),
            Error::Zip(e) => write!(f, "erro de ZIP: {e}"),
            Error::Xml(e) => write!(f, "erro de XML: {e}"),
            Error::Pdf(e) => write!(f, "erro de PDF: {e}"),
            Error::Io(e) => write!(f, "erro de E/S: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ConfigParse(e) => Some(e),
            Error::Zip(e) => Some(e),
            Error::Xml(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Error::Zip(e)
    }
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::Xml(e)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::ConfigParse(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
