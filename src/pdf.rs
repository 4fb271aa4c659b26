use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use crate::error::Error;
use crate::model::TextDocument;

const LINE_HEIGHT: f32 = 1.2;
const PARAGRAPH_SPACING: f32 = 8.0;

/// Helvetica advance widths (1/1000 em) for U+0020..=U+007E.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

fn char_width(c: char) -> f32 {
    let code = c as u32;
    if (0x20..=0x7E).contains(&code) {
        HELVETICA_WIDTHS[(code - 0x20) as usize] as f32
    } else {
        556.0
    }
}

fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width).sum::<f32>() * font_size / 1000.0
}

/// Encodes `text` for a WinAnsi Type1 font. Unmappable characters become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{00A0}' => b' ',
            c if (0x20..=0x7E).contains(&(c as u32)) || (0xA1..=0xFF).contains(&(c as u32)) => {
                c as u8
            }
            _ => b'?',
        })
        .collect()
}

/// Greedy word wrap. Words wider than `max_width` are split between characters.
fn wrap(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for hard_line in text.split('\n') {
        let mut current = String::new();
        for word in hard_line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if text_width(&candidate, font_size) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            for c in word.chars() {
                current.push(c);
                if text_width(&current, font_size) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::replace(&mut current, c.to_string()));
                }
            }
        }
        lines.push(current);
    }
    lines
}

fn lay_out(doc: &TextDocument) -> Vec<Content> {
    let page = &doc.page;
    let top = page.height - page.margin_top;
    let max_width = page.text_width();

    let mut pages = vec![Content::new()];
    let mut cursor_y = top;

    for (i, block) in doc.blocks.iter().enumerate() {
        if i > 0 {
            cursor_y -= PARAGRAPH_SPACING;
        }
        let line_h = block.font_size * LINE_HEIGHT;
        for line in wrap(&block.text, block.font_size, max_width) {
            if cursor_y - line_h < page.margin_bottom && cursor_y < top {
                pages.push(Content::new());
                cursor_y = top;
            }
            let baseline = cursor_y - block.font_size;
            if !line.is_empty()
                && let Some(content) = pages.last_mut()
            {
                content
                    .begin_text()
                    .set_font(Name(b"F1"), block.font_size)
                    .next_line(page.margin_left, baseline)
                    .show(Str(&win_ansi(&line)))
                    .end_text();
            }
            cursor_y -= line_h;
        }
    }

    pages
}

pub(crate) fn render(doc: &TextDocument) -> Result<Vec<u8>, Error> {
    let (width, height) = (doc.page.width, doc.page.height);
    if !(width > 0.0 && height > 0.0) {
        return Err(Error::Pdf(format!("tamanho de página inválido {width}x{height}")));
    }

    let mut pdf = Pdf::new();

    let catalog_id = Ref::new(1);
    let pages_id = Ref::new(2);
    let font_id = Ref::new(3);

    let contents = lay_out(doc);
    let page_ids: Vec<Ref> = (0..contents.len())
        .map(|i| Ref::new(4 + 2 * i as i32))
        .collect();

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    for (content, page_id) in contents.into_iter().zip(&page_ids) {
        let content_id = Ref::new(page_id.get() + 1);
        pdf.stream(content_id, &content.finish());
        pdf.page(*page_id)
            .media_box(Rect::new(0.0, 0.0, width, height))
            .parent(pages_id)
            .contents(content_id)
            .resources()
            .fonts()
            .pair(Name(b"F1"), font_id);
    }

    pdf.type1_font(font_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    log::debug!("rendered {} page(s)", page_ids.len());
    Ok(pdf.finish())
}
