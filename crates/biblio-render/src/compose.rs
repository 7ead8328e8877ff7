// File: crates/biblio-render/src/compose.rs
// Summary: Share-image composition: header, watermark, stacked panels, footer, branding.

use skia_safe as skia;
use tracing::warn;

use biblio_core::types::Statistics;

use crate::error::RenderError;
use crate::panel::encode_png;
use crate::sink::ShareSink;
use crate::text::TextShaper;
use crate::theme::{Labels, Theme};

/// Fixed vertical layout of the composite, in logical pixels.
#[derive(Clone, Copy, Debug)]
pub struct ShareLayout {
    pub header_height: f32,
    pub panel_gap: f32,
    pub footer_height: f32,
    pub min_width: f32,
    pub min_panel_height: f32,
    pub watermark_size: f32,
    pub watermark_inset: f32,
    pub footer_side_pad: f32,
}

impl Default for ShareLayout {
    fn default() -> Self {
        Self {
            header_height: 38.0,
            panel_gap: 16.0,
            footer_height: 96.0,
            min_width: 520.0,
            min_panel_height: 280.0,
            watermark_size: 28.0,
            watermark_inset: 4.0,
            footer_side_pad: 6.0,
        }
    }
}

/// Branding inputs for the composite's corner watermark and footer
/// line. The logo doubles as the watermark glyph.
#[derive(Default)]
pub struct Branding {
    pub logo: Option<skia::Image>,
    pub locale: String,
}

/// Assemble the shareable composite from two already-rendered panel
/// snapshots and encode it as PNG bytes.
///
/// Vertical layout, all horizontally centered: header with title and
/// date range, low-opacity watermark drawn before the panels, the two
/// panels stacked and scaled to the composite width, the word-wrapped
/// footer note, then one centered branding line.
#[allow(clippy::too_many_arguments)]
pub fn compose_share_image(
    panels: &[skia::Image; 2],
    statistics: &Statistics,
    footer_text: &str,
    branding: &Branding,
    layout: &ShareLayout,
    theme: &Theme,
    labels: &Labels,
    shaper: &TextShaper,
    pixel_ratio: f32,
) -> Result<Vec<u8>, RenderError> {
    let ratio = pixel_ratio.max(0.1);
    let width = panels
        .iter()
        .map(|p| p.width() as f32 / ratio)
        .fold(layout.min_width, f32::max);
    let panel_height = panels
        .iter()
        .map(|p| p.height() as f32 / ratio)
        .fold(layout.min_panel_height, f32::max);
    let total_height =
        layout.header_height + panel_height * 2.0 + layout.panel_gap + layout.footer_height;

    let physical_w = (width * ratio).floor() as i32;
    let physical_h = (total_height * ratio).floor() as i32;
    let mut surface = skia::surfaces::raster_n32_premul((physical_w.max(1), physical_h.max(1)))
        .ok_or(RenderError::Surface)?;
    let canvas = surface.canvas();
    canvas.scale((ratio, ratio));
    canvas.clear(theme.background);

    // Header
    shaper.draw_center(canvas, &labels.main_title, width * 0.5, 18.0, 15.0, theme.header_title);
    let range = format!("{} → {}", statistics.start_date, statistics.end_date);
    shaper.draw_center(canvas, &range, width * 0.5, 34.0, 11.0, theme.header_subtitle);

    // Watermark in the top-right corner, before the panels so it never
    // overdraws data.
    if let Some(logo) = &branding.logo {
        let mut paint = skia::Paint::default();
        paint.set_alpha((0.25 * 255.0) as u8);
        canvas.draw_image_rect(
            logo,
            None,
            skia::Rect::from_xywh(
                width - layout.watermark_inset - layout.watermark_size,
                layout.watermark_inset,
                layout.watermark_size,
                layout.watermark_size,
            ),
            &paint,
        );
    }

    // Panels, each scaled to the composite width.
    let paint = skia::Paint::default();
    canvas.draw_image_rect(
        &panels[0],
        None,
        skia::Rect::from_xywh(0.0, layout.header_height, width, panel_height),
        &paint,
    );
    canvas.draw_image_rect(
        &panels[1],
        None,
        skia::Rect::from_xywh(
            0.0,
            layout.header_height + panel_height + layout.panel_gap,
            width,
            panel_height,
        ),
        &paint,
    );

    // Footer note, word-wrapped and centered.
    let footer_top = layout.header_height + panel_height * 2.0 + layout.panel_gap;
    let footer_text = footer_text.trim();
    if !footer_text.is_empty() {
        draw_wrapped_text(
            canvas,
            shaper,
            footer_text,
            layout.footer_side_pad,
            footer_top + 12.0,
            width - layout.footer_side_pad * 2.0,
            12.0,
            10.0,
            theme.footer_text,
            true,
        );
    }

    draw_branding_line(canvas, branding, theme, labels, shaper, width, footer_top + 64.0);

    encode_png(&mut surface)
}

/// One centered line: optional logo glyph, locale-dependent product
/// name, separator, download label and URL. Centering sums each
/// piece's measured width before anything is drawn.
fn draw_branding_line(
    canvas: &skia::Canvas,
    branding: &Branding,
    theme: &Theme,
    labels: &Labels,
    shaper: &TextShaper,
    width: f32,
    base_y: f32,
) {
    let brand_name = labels.brand_name(&branding.locale);
    let download = format!("{} {}", labels.download_label, labels.download_url);
    let separator = " | ";

    let name_w = shaper.measure_width(brand_name, 10.0);
    let sep_w = shaper.measure_width(separator, 10.0);
    let download_w = shaper.measure_width(&download, 10.0);
    let (logo_w, logo_pad) = if branding.logo.is_some() { (20.0, 6.0) } else { (0.0, 0.0) };
    let total = logo_w + logo_pad + name_w + sep_w + download_w;

    let mut x = (width - total) * 0.5;
    if let Some(logo) = &branding.logo {
        let paint = skia::Paint::default();
        canvas.draw_image_rect(
            logo,
            None,
            skia::Rect::from_xywh(x, base_y - 12.0, 20.0, 20.0),
            &paint,
        );
        x += logo_w + logo_pad;
    }
    shaper.draw_left(canvas, brand_name, x, base_y, 10.0, theme.brand_text);
    shaper.draw_left(canvas, separator, x + name_w, base_y, 10.0, theme.brand_muted);
    shaper.draw_left(canvas, &download, x + name_w + sep_w, base_y, 10.0, theme.brand_muted);
}

/// Wrap `text` into `max_width` and draw it line by line from `y`,
/// centered within the wrap box or left-aligned at `x` per the flag.
#[allow(clippy::too_many_arguments)]
pub fn draw_wrapped_text(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    text: &str,
    x: f32,
    y: f32,
    max_width: f32,
    line_height: f32,
    size: f32,
    color: skia::Color,
    centered: bool,
) {
    let mut line_y = y;
    for line in wrap_text(shaper, text, max_width, size) {
        if centered {
            shaper.draw_center(canvas, &line, x + max_width * 0.5, line_y, size, color);
        } else {
            shaper.draw_left(canvas, &line, x, line_y, size, color);
        }
        line_y += line_height;
    }
}

/// Greedy word wrap: append words while the measured line fits; on
/// overflow flush the line and start the next one with the overflowing
/// word. A single oversized word still gets its own line.
pub fn wrap_text(shaper: &TextShaper, text: &str, max_width: f32, size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if shaper.measure_width(&candidate, size) > max_width && !line.is_empty() {
            lines.push(line);
            line = word.to_string();
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Hand the encoded composite to the export sink. Sink failures are an
/// outcome, never a panic: the caller shows a status message either way.
pub async fn export_share_image(png: &[u8], sink: &dyn ShareSink) -> bool {
    match sink.deliver(png).await {
        Ok(()) => true,
        Err(err) => {
            warn!(%err, "share sink delivery failed");
            false
        }
    }
}
