// File: crates/biblio-render/src/text.rs
// Summary: Text measurement and aligned drawing via Skia textlayout.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&[
            "Segoe UI",
            "Arial",
            "Helvetica",
            "Roboto",
            "DejaVu Sans",
            "sans-serif",
        ]);
        ts
    }

    fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let pstyle = ParagraphStyle::new();
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(size, color));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32) -> f32 {
        let p = self.layout(text, size, skia::Color::from_argb(0, 0, 0, 0));
        p.longest_line()
    }

    /// Draw with `y` as an approximate baseline, like canvas text APIs.
    pub fn draw_left(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: skia::Color,
    ) {
        let p = self.layout(text, size, color);
        // Paragraph draws from top-left; adjust by glyph height approximation
        p.paint(canvas, (x, y - size * 0.8));
    }

    pub fn draw_center(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        cx: f32,
        y: f32,
        size: f32,
        color: skia::Color,
    ) {
        let width = self.measure_width(text, size);
        self.draw_left(canvas, text, cx - width * 0.5, y, size, color);
    }

    pub fn draw_right(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        rx: f32,
        y: f32,
        size: f32,
        color: skia::Color,
    ) {
        let width = self.measure_width(text, size);
        self.draw_left(canvas, text, rx - width, y, size, color);
    }
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}
