pub(crate) const DEFAULT_FONT_SIZE: f32 = 11.0;

/// Page size and margins in points.
pub(crate) struct PageGeometry {
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) margin_top: f32,
    pub(crate) margin_bottom: f32,
    pub(crate) margin_left: f32,
    pub(crate) margin_right: f32,
}

impl PageGeometry {
    pub(crate) fn text_width(&self) -> f32 {
        (self.width - self.margin_left - self.margin_right).max(1.0)
    }
}

/// Plain text view of a document body, enough for the built-in renderer.
pub(crate) struct TextDocument {
    pub(crate) page: PageGeometry,
    pub(crate) blocks: Vec<Block>,
}

/// One paragraph or table row. `\n` in `text` is a forced line break.
pub(crate) struct Block {
    pub(crate) text: String,
    pub(crate) font_size: f32,
}
