use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::model::{Block, DEFAULT_FONT_SIZE, PageGeometry, TextDocument};

pub(crate) const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const CP_NS: &str = "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
const DCTERMS_NS: &str = "http://purl.org/dc/terms/";

pub(crate) const DOCX_EXTENSION: &str = "docx";

const DOCUMENT_PART: &str = "word/document.xml";
const CORE_PART: &str = "docProps/core.xml";

/// Case-insensitive extension match; a bare `docx` file name has no extension.
pub(crate) fn has_extension(path: &Path, expected: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(expected))
}

pub(crate) fn twips_to_pts(twips: f32) -> f32 {
    twips / 20.0
}

pub(crate) fn is_wml(node: roxmltree::Node, name: &str) -> bool {
    node.tag_name().name() == name && node.tag_name().namespace() == Some(WML_NS)
}

pub(crate) fn wml<'a>(node: roxmltree::Node<'a, 'a>, name: &str) -> Option<roxmltree::Node<'a, 'a>> {
    node.children().find(|n| is_wml(*n, name))
}

pub(crate) fn wml_attr<'a>(node: roxmltree::Node<'a, 'a>, child: &str) -> Option<&'a str> {
    wml(node, child).and_then(|n| n.attribute((WML_NS, "val")))
}

pub(crate) fn twips_attr(node: roxmltree::Node, attr: &str) -> Option<f32> {
    node.attribute((WML_NS, attr))
        .and_then(|v| v.parse::<f32>().ok())
        .map(twips_to_pts)
}

/// An opened `.docx` package. The archive handle lives only as long as this value.
pub(crate) struct Package {
    path: PathBuf,
    zip: zip::ZipArchive<File>,
}

impl Package {
    /// Opens `path` as a ZIP archive holding a main document part.
    pub(crate) fn open(path: &Path) -> Result<Self, Error> {
        let file = File::open(path)?;
        let zip = zip::ZipArchive::new(file).map_err(|e| Error::CorruptPackage {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !zip.file_names().any(|n| n == DOCUMENT_PART) {
            return Err(Error::CorruptPackage {
                path: path.to_path_buf(),
                reason: format!("falta a parte {DOCUMENT_PART}"),
            });
        }
        Ok(Package { path: path.to_path_buf(), zip })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Reads a part as UTF-8 text, `None` when the archive has no such entry.
    fn read_part(&mut self, name: &str) -> Result<Option<String>, Error> {
        let mut file = match self.zip.by_name(name) {
            Ok(file) => file,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut xml_content = String::new();
        file.read_to_string(&mut xml_content)?;
        Ok(Some(xml_content))
    }

    pub(crate) fn document_xml(&mut self) -> Result<String, Error> {
        self.read_part(DOCUMENT_PART)?
            .ok_or(Error::Zip(zip::result::ZipError::FileNotFound))
    }

    pub(crate) fn core_xml(&mut self) -> Result<Option<String>, Error> {
        self.read_part(CORE_PART)
    }
}

/// Raw values of `docProps/core.xml`, untrimmed and unparsed.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct CoreProperties {
    pub(crate) title: Option<String>,
    pub(crate) creator: Option<String>,
    pub(crate) subject: Option<String>,
    pub(crate) keywords: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) last_modified_by: Option<String>,
    pub(crate) created: Option<String>,
    pub(crate) modified: Option<String>,
    pub(crate) revision: Option<String>,
}

pub(crate) fn parse_core_properties(xml_content: &str) -> Result<CoreProperties, Error> {
    let xml = roxmltree::Document::parse(xml_content)?;
    let mut props = CoreProperties::default();

    for node in xml.root_element().children().filter(|n| n.is_element()) {
        let text = node.text().map(str::to_string);
        let slot = match (node.tag_name().namespace(), node.tag_name().name()) {
            (Some(DC_NS), "title") => &mut props.title,
            (Some(DC_NS), "creator") => &mut props.creator,
            (Some(DC_NS), "subject") => &mut props.subject,
            (Some(DC_NS), "description") => &mut props.description,
            (Some(CP_NS), "keywords") => &mut props.keywords,
            (Some(CP_NS), "category") => &mut props.category,
            (Some(CP_NS), "lastModifiedBy") => &mut props.last_modified_by,
            (Some(CP_NS), "revision") => &mut props.revision,
            (Some(DCTERMS_NS), "created") => &mut props.created,
            (Some(DCTERMS_NS), "modified") => &mut props.modified,
            _ => continue,
        };
        *slot = text;
    }

    Ok(props)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BodyCounts {
    pub(crate) paragraphs: usize,
    pub(crate) tables: usize,
    pub(crate) sections: usize,
}

/// Counts top-level paragraphs and tables, and every section break of the body.
pub(crate) fn count_body(xml_content: &str) -> Result<BodyCounts, Error> {
    let xml = roxmltree::Document::parse(xml_content)?;
    let body = wml(xml.root_element(), "body")
        .ok_or_else(|| Error::InvalidDocx("falta o elemento w:body".into()))?;

    let mut counts = BodyCounts { paragraphs: 0, tables: 0, sections: 0 };
    for node in body.children() {
        if is_wml(node, "p") {
            counts.paragraphs += 1;
            // A paragraph-level sectPr closes every section but the last
            if wml(node, "pPr").and_then(|ppr| wml(ppr, "sectPr")).is_some() {
                counts.sections += 1;
            }
        } else if is_wml(node, "tbl") {
            counts.tables += 1;
        } else if is_wml(node, "sectPr") {
            counts.sections += 1;
        }
    }
    Ok(counts)
}

/// Page size and margins of the final section, US Letter with 1in margins when unset.
pub(crate) fn page_geometry(body: roxmltree::Node) -> PageGeometry {
    let sect = wml(body, "sectPr");
    let pg_sz = sect.and_then(|s| wml(s, "pgSz"));
    let pg_mar = sect.and_then(|s| wml(s, "pgMar"));

    PageGeometry {
        width: pg_sz.and_then(|n| twips_attr(n, "w")).unwrap_or(612.0),
        height: pg_sz.and_then(|n| twips_attr(n, "h")).unwrap_or(792.0),
        margin_top: pg_mar.and_then(|n| twips_attr(n, "top")).unwrap_or(72.0),
        margin_bottom: pg_mar.and_then(|n| twips_attr(n, "bottom")).unwrap_or(72.0),
        margin_left: pg_mar.and_then(|n| twips_attr(n, "left")).unwrap_or(72.0),
        margin_right: pg_mar.and_then(|n| twips_attr(n, "right")).unwrap_or(72.0),
    }
}

fn paragraph_text(para: roxmltree::Node) -> String {
    let mut text = String::new();
    for node in para.descendants() {
        if is_wml(node, "t") {
            text.push_str(node.text().unwrap_or_default());
        } else if is_wml(node, "tab") && node.parent().is_some_and(|p| is_wml(p, "r")) {
            text.push(' ');
        } else if is_wml(node, "br") || is_wml(node, "cr") {
            text.push('\n');
        }
    }
    text
}

/// Size of the first run that sets one, else the paragraph mark's size.
fn paragraph_font_size(para: roxmltree::Node) -> f32 {
    let half_points = para
        .descendants()
        .filter(|n| is_wml(*n, "r"))
        .filter_map(|r| wml(r, "rPr").and_then(|rpr| wml_attr(rpr, "sz")))
        .next()
        .or_else(|| {
            wml(para, "pPr")
                .and_then(|ppr| wml(ppr, "rPr"))
                .and_then(|rpr| wml_attr(rpr, "sz"))
        })
        .and_then(|v| v.parse::<f32>().ok());
    match half_points {
        Some(hp) if hp > 0.0 => hp / 2.0,
        _ => DEFAULT_FONT_SIZE,
    }
}

fn table_rows(tbl: roxmltree::Node, blocks: &mut Vec<Block>) {
    for row in tbl.children().filter(|n| is_wml(*n, "tr")) {
        let cells: Vec<String> = row
            .children()
            .filter(|n| is_wml(*n, "tc"))
            .map(|tc| {
                tc.children()
                    .filter(|n| is_wml(*n, "p"))
                    .map(|p| paragraph_text(p).replace('\n', " "))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        let font_size = row
            .descendants()
            .find(|n| is_wml(*n, "p"))
            .map(paragraph_font_size)
            .unwrap_or(DEFAULT_FONT_SIZE);
        blocks.push(Block { text: cells.join(" | "), font_size });
    }
}

/// Reads the main document part into paragraphs of plain text.
pub(crate) fn parse_text(package: &mut Package) -> Result<TextDocument, Error> {
    let xml_content = package.document_xml()?;
    let xml = roxmltree::Document::parse(&xml_content)?;
    let body = wml(xml.root_element(), "body")
        .ok_or_else(|| Error::InvalidDocx("falta o elemento w:body".into()))?;

    let mut blocks = Vec::new();
    for node in body.children() {
        if is_wml(node, "p") {
            blocks.push(Block {
                text: paragraph_text(node),
                font_size: paragraph_font_size(node),
            });
        } else if is_wml(node, "tbl") {
            table_rows(node, &mut blocks);
        }
    }

    log::debug!(
        "{}: {} text blocks",
        package.path().display(),
        blocks.len()
    );
    Ok(TextDocument { page: page_geometry(body), blocks })
}
