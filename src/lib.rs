mod config;
mod convert;
mod docx;
mod error;
mod metadata;
mod model;
mod pdf;
mod render;
mod soffice;

pub use config::{
    Config, DEFAULT_CONFIG_PATH, DEFAULT_OUTPUT_DIRECTORY, DEFAULT_SOFFICE_PROGRAM, Settings,
    load_config, try_load_config,
};
pub use convert::{
    Backend, BackendKind, PDF_EXTENSION, convert, convert_docx_to_pdf, default_output_path,
};
pub use error::Error;
pub use metadata::{Metadata, Value, get_metadata};
pub use render::BuiltinBackend;
pub use soffice::SofficeBackend;
