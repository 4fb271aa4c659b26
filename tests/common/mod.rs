#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

pub fn paragraph(text: &str) -> String {
    format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
}

pub fn sized_paragraph(text: &str, half_points: u32) -> String {
    format!(
        r#"<w:p><w:r><w:rPr><w:sz w:val="{half_points}"/></w:rPr><w:t>{text}</w:t></w:r></w:p>"#
    )
}

pub fn table(rows: &[&[&str]]) -> String {
    let mut xml = String::from("<w:tbl>");
    for row in rows {
        xml.push_str("<w:tr>");
        for cell in *row {
            xml.push_str(&format!("<w:tc>{}</w:tc>", paragraph(cell)));
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

/// Paragraph that closes a section.
pub fn section_break(text: &str) -> String {
    format!(r#"<w:p><w:pPr><w:sectPr/></w:pPr><w:r><w:t>{text}</w:t></w:r></w:p>"#)
}

pub const BODY_SECT_PR: &str = r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440"/></w:sectPr>"#;

pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{WML_NS}"><w:body>{body}</w:body></w:document>"#
    )
}

/// `fields` are qualified element names (`dc:title`, `cp:revision`, ...) and their text.
pub fn core_xml(fields: &[(&str, &str)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    );
    for (name, text) in fields {
        if name.starts_with("dcterms:") {
            xml.push_str(&format!(r#"<{name} xsi:type="dcterms:W3CDTF">{text}</{name}>"#));
        } else {
            xml.push_str(&format!("<{name}>{text}</{name}>"));
        }
    }
    xml.push_str("</cp:coreProperties>");
    xml
}

pub fn write_package(path: &Path, parts: &[(&str, &str)]) {
    let file = File::create(path).expect("create fixture");
    let mut zip = zip::ZipWriter::new(file);
    for (name, content) in parts {
        zip.start_file(*name, SimpleFileOptions::default())
            .expect("start zip entry");
        zip.write_all(content.as_bytes()).expect("write zip entry");
    }
    zip.finish().expect("finish zip");
}

pub fn write_docx(path: &Path, body: &str, core: Option<&str>) {
    let document = document_xml(body);
    let mut parts = vec![("word/document.xml", document.as_str())];
    if let Some(core) = core {
        parts.push(("docProps/core.xml", core));
    }
    write_package(path, &parts);
}

/// Number of page objects in a PDF written by the built-in backend.
pub fn pdf_page_count(bytes: &[u8]) -> usize {
    let needle = b"/Parent 2 0 R";
    bytes
        .windows(needle.len())
        .filter(|w| *w == needle.as_slice())
        .count()
}

fn decode_literal(body: &str) -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            bytes.push(c as u8);
            continue;
        }
        match chars.next() {
            Some('n') => bytes.push(b'\n'),
            Some('r') => bytes.push(b'\r'),
            Some('t') => bytes.push(b'\t'),
            Some(d @ '0'..='7') => {
                let mut code = d.to_digit(8).unwrap();
                for _ in 0..2 {
                    match chars.clone().next().and_then(|c| c.to_digit(8)) {
                        Some(next) => {
                            code = code * 8 + next;
                            chars.next();
                        }
                        None => break,
                    }
                }
                bytes.push(code as u8);
            }
            Some(other) => bytes.push(other as u8),
            None => {}
        }
    }
    bytes
}

/// Strings drawn with `Tj`, in content-stream order, decoded as Latin-1.
pub fn shown_text(pdf: &[u8]) -> Vec<String> {
    let text: String = pdf.iter().map(|&b| b as char).collect();
    text.lines()
        .filter_map(|line| line.trim().strip_suffix(" Tj"))
        .map(|operand| {
            let bytes: Vec<u8> = if let Some(hex) = operand.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
                hex.as_bytes()
                    .chunks(2)
                    .map(|pair| u8::from_str_radix(std::str::from_utf8(pair).unwrap(), 16).unwrap())
                    .collect()
            } else {
                let body = operand
                    .strip_prefix('(')
                    .and_then(|s| s.strip_suffix(')'))
                    .expect("string operand");
                decode_literal(body)
            };
            bytes.into_iter().map(|b| b as char).collect()
        })
        .collect()
}
