use std::path::Path;

use crate::convert::Backend;
use crate::docx::{self, Package};
use crate::error::Error;
use crate::pdf;

/// Renders the document text with a standard PDF font. No host application needed.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinBackend;

impl Backend for BuiltinBackend {
    fn name(&self) -> &'static str {
        "builtin"
    }

    fn convert(&self, input: &Path, output: &Path) -> Result<(), Error> {
        let doc = {
            let mut package = Package::open(input)?;
            docx::parse_text(&mut package)?
        };
        let bytes = pdf::render(&doc)?;
        std::fs::write(output, bytes).map_err(Error::Io)
    }
}
