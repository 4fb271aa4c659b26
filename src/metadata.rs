use std::fmt;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::docx::{self, CoreProperties, DOCX_EXTENSION, Package, has_extension};
use crate::error::Error;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Count(usize),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Count(n) => write!(f, "{n}"),
        }
    }
}

/// Descriptive properties and structural counts of one document, in a fixed field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(&'static str, Value)>,
}

impl Metadata {
    /// Appends a text field as written, unless it is absent or empty.
    fn push_text(&mut self, key: &'static str, value: Option<String>) {
        if let Some(text) = value.filter(|v| !v.is_empty()) {
            self.entries.push((key, Value::Text(text)));
        }
    }

    fn push_count(&mut self, key: &'static str, count: usize) {
        self.entries.push((key, Value::Count(count)));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `last_modified_by` -> `Last-Modified-By`
    pub fn display_key(key: &str) -> String {
        key.split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Parses a W3CDTF timestamp into UTC. Offsets are folded into the UTC value.
fn parse_w3cdtf(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    let date = match raw.len() {
        10 => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok(),
        7 => NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok(),
        4 => NaiveDate::parse_from_str(&format!("{raw}-01-01"), "%Y-%m-%d").ok(),
        _ => None,
    }?;
    date.and_hms_opt(0, 0, 0)
}

fn format_timestamp(raw: Option<String>) -> Option<String> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }
    match parse_w3cdtf(&raw) {
        Some(dt) => Some(dt.format(TIMESTAMP_FORMAT).to_string()),
        None => {
            log::debug!("ignoring unparseable timestamp {raw:?}");
            None
        }
    }
}

/// A present revision that is not a non-negative integer counts as 0.
fn parse_revision(raw: Option<String>) -> Option<usize> {
    let raw = raw?;
    match raw.trim().parse::<u32>() {
        Ok(n) => Some(n as usize),
        Err(_) => {
            log::debug!("revision {raw:?} is not a non-negative integer, using 0");
            Some(0)
        }
    }
}

/// Extracts the descriptive properties and body counts of the `.docx` at `path`.
///
/// Checks run in order and the first failing one wins: the path must name an
/// existing regular file, carry a `.docx` extension, and open as a package.
pub fn get_metadata(path: &Path) -> Result<Metadata, Error> {
    if !path.is_file() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    if !has_extension(path, DOCX_EXTENSION) {
        return Err(Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: DOCX_EXTENSION,
        });
    }

    let mut package = Package::open(path).map_err(|e| match e {
        Error::CorruptPackage { .. } => e,
        other => Error::Extraction {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    })?;

    read_metadata(&mut package).map_err(|e| Error::Extraction {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn read_metadata(package: &mut Package) -> Result<Metadata, Error> {
    let core = match package.core_xml()? {
        Some(xml_content) => docx::parse_core_properties(&xml_content)?,
        None => CoreProperties::default(),
    };
    let counts = docx::count_body(&package.document_xml()?)?;

    let filename = package
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());

    let mut metadata = Metadata::default();
    metadata.push_text("filename", filename);
    metadata.push_text("title", core.title);
    metadata.push_text("author", core.creator);
    metadata.push_text("subject", core.subject);
    metadata.push_text("keywords", core.keywords);
    metadata.push_text("category", core.category);
    metadata.push_text("comments", core.description);
    metadata.push_text("last_modified_by", core.last_modified_by);
    metadata.push_text("created", format_timestamp(core.created));
    metadata.push_text("modified", format_timestamp(core.modified));
    if let Some(revision) = parse_revision(core.revision) {
        metadata.push_count("revision", revision);
    }
    metadata.push_count("num_paragraphs", counts.paragraphs);
    metadata.push_count("num_tables", counts.tables);
    metadata.push_count("num_sections", counts.sections);

    log::debug!(
        "read {} metadata fields from {}",
        metadata.len(),
        package.path().display()
    );
    Ok(metadata)
}

