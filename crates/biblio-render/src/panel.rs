// File: crates/biblio-render/src/panel.rs
// Summary: Dual-scale panel rendering: daily bars, cumulative line, publication markers.

use chrono::NaiveDate;
use skia_safe as skia;

use biblio_core::types::{PublicationMarkers, Statistics};

use crate::error::RenderError;
use crate::text::TextShaper;
use crate::theme::{Labels, Theme};

/// Default logical panel size in CSS pixels.
pub const PANEL_WIDTH: i32 = 600;
pub const PANEL_HEIGHT: i32 = 280;

/// Panel margins, in logical pixels, leaving room for the two value
/// axes and the date labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelInsets {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Default for PanelInsets {
    fn default() -> Self {
        Self { top: 18, right: 52, bottom: 28, left: 52 }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PanelOptions {
    /// Logical size; the raster surface is this times `pixel_ratio`.
    pub width: i32,
    pub height: i32,
    /// Device pixel density ratio. Layout math stays in logical pixels;
    /// the canvas transform absorbs the ratio so output is sharp on
    /// high-density displays.
    pub pixel_ratio: f32,
    pub insets: PanelInsets,
    /// Disable for byte-deterministic output across font stacks.
    pub draw_labels: bool,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            width: PANEL_WIDTH,
            height: PANEL_HEIGHT,
            pixel_ratio: 1.0,
            insets: PanelInsets::default(),
            draw_labels: true,
        }
    }
}

/// One bar+line+marker panel over a dense daily series.
pub struct PanelChart {
    pub title: String,
    pub daily: Vec<u64>,
    pub cumulative: Vec<u64>,
    pub labels: Vec<String>,
    pub markers: PublicationMarkers,
}

impl PanelChart {
    /// Panel over the full "all records" series.
    pub fn all_items(stats: &Statistics, markers: &PublicationMarkers, title: &str) -> Self {
        Self {
            title: title.to_string(),
            daily: stats.daily.iter().map(|p| p.added_count).collect(),
            cumulative: stats.daily.iter().map(|p| p.cumulative_count).collect(),
            labels: stats.daily.iter().map(|p| p.day.clone()).collect(),
            markers: markers.clone(),
        }
    }

    /// Panel over the focal subset series.
    pub fn focal_items(stats: &Statistics, markers: &PublicationMarkers, title: &str) -> Self {
        Self {
            title: title.to_string(),
            daily: stats.daily.iter().map(|p| p.focal_added_count).collect(),
            cumulative: stats.daily.iter().map(|p| p.focal_cumulative_count).collect(),
            labels: stats.daily.iter().map(|p| p.day.clone()).collect(),
            markers: markers.clone(),
        }
    }

    /// Render onto a canvas whose transform already absorbs the pixel
    /// ratio; every coordinate below is in logical pixels.
    pub fn render(
        &self,
        canvas: &skia::Canvas,
        opts: &PanelOptions,
        theme: &Theme,
        labels: &Labels,
        shaper: &TextShaper,
    ) {
        let width = opts.width as f32;
        let height = opts.height as f32;
        let left = opts.insets.left as f32;
        let top = opts.insets.top as f32;
        let plot_w = width - left - opts.insets.right as f32;
        let plot_h = height - top - opts.insets.bottom as f32;
        let bottom = top + plot_h;

        canvas.clear(theme.background);

        let n = self.labels.len();
        if n == 0 {
            if opts.draw_labels {
                shaper.draw_center(
                    canvas,
                    &labels.no_data,
                    width * 0.5,
                    height * 0.5,
                    12.0,
                    theme.date_label,
                );
            }
            return;
        }

        let max_daily = self.daily.iter().copied().max().unwrap_or(0).max(1) as f32;
        let max_cum = self.cumulative.iter().copied().max().unwrap_or(0).max(1) as f32;
        // A single-day series pins to the left plot edge.
        let x = |i: usize| left + (i as f32 / (n.max(2) - 1) as f32) * plot_w;
        let y_daily = |v: f32| top + plot_h - (v / max_daily) * plot_h;
        let y_cum = |v: f32| top + plot_h - (v / max_cum) * plot_h;

        self.draw_grid(canvas, theme, left, top, plot_w, plot_h);
        self.draw_bars(canvas, theme, &x, &y_daily, bottom, plot_w, n);
        self.draw_cumulative(canvas, theme, &x, &y_cum);
        self.draw_markers(canvas, opts, theme, shaper, &x, &y_cum);

        if opts.draw_labels {
            shaper.draw_left(canvas, &self.title, left, 12.0, 12.0, theme.title);
            self.draw_axis_ticks(canvas, theme, shaper, left, top, plot_w, plot_h, max_daily, max_cum);
            self.draw_date_labels(canvas, theme, shaper, &x, height, n);
            self.draw_legend(canvas, theme, labels, shaper, left, top);
        }
    }

    pub fn render_to_surface(
        &self,
        opts: &PanelOptions,
        theme: &Theme,
        labels: &Labels,
        shaper: &TextShaper,
    ) -> Result<skia::Surface, RenderError> {
        let ratio = opts.pixel_ratio.max(0.1);
        let physical_w = ((opts.width as f32) * ratio).floor() as i32;
        let physical_h = ((opts.height as f32) * ratio).floor() as i32;
        let mut surface = skia::surfaces::raster_n32_premul((physical_w.max(1), physical_h.max(1)))
            .ok_or(RenderError::Surface)?;
        let canvas = surface.canvas();
        canvas.scale((ratio, ratio));
        self.render(canvas, opts, theme, labels, shaper);
        Ok(surface)
    }

    pub fn render_to_png_bytes(
        &self,
        opts: &PanelOptions,
        theme: &Theme,
        labels: &Labels,
        shaper: &TextShaper,
    ) -> Result<Vec<u8>, RenderError> {
        let mut surface = self.render_to_surface(opts, theme, labels, shaper)?;
        encode_png(&mut surface)
    }

    /// RGBA8 readback of the rendered surface; returns pixels, width,
    /// height and row stride in bytes.
    pub fn render_to_rgba8(
        &self,
        opts: &PanelOptions,
        theme: &Theme,
        labels: &Labels,
        shaper: &TextShaper,
    ) -> Result<(Vec<u8>, i32, i32, usize), RenderError> {
        let mut surface = self.render_to_surface(opts, theme, labels, shaper)?;
        let (w, h) = (surface.width(), surface.height());
        let info = skia::ImageInfo::new(
            (w, h),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(RenderError::Encode);
        }
        Ok((pixels, w, h, stride))
    }

    fn draw_grid(
        &self,
        canvas: &skia::Canvas,
        theme: &Theme,
        left: f32,
        top: f32,
        plot_w: f32,
        plot_h: f32,
    ) {
        let mut paint = skia::Paint::default();
        paint.set_color(theme.grid);
        paint.set_anti_alias(true);
        paint.set_stroke_width(1.0);
        for i in 0..=GRID_DIVISIONS {
            let y = top + plot_h * (i as f32 / GRID_DIVISIONS as f32);
            canvas.draw_line((left, y), (left + plot_w, y), &paint);
        }
    }

    fn draw_bars(
        &self,
        canvas: &skia::Canvas,
        theme: &Theme,
        x: &dyn Fn(usize) -> f32,
        y_daily: &dyn Fn(f32) -> f32,
        bottom: f32,
        plot_w: f32,
        n: usize,
    ) {
        let mut paint = skia::Paint::default();
        paint.set_color(theme.bar_fill);
        paint.set_anti_alias(true);
        let bar_w = plot_w / n.max(1) as f32;
        for (i, &v) in self.daily.iter().enumerate() {
            let y = y_daily(v as f32);
            let rect = skia::Rect::from_xywh(
                x(i) - bar_w * 0.45,
                y,
                (bar_w * 0.9).max(1.0),
                bottom - y,
            );
            canvas.draw_rect(rect, &paint);
        }
    }

    fn draw_cumulative(
        &self,
        canvas: &skia::Canvas,
        theme: &Theme,
        x: &dyn Fn(usize) -> f32,
        y_cum: &dyn Fn(f32) -> f32,
    ) {
        if self.cumulative.is_empty() {
            return;
        }
        let mut path = skia::Path::new();
        path.move_to((x(0), y_cum(self.cumulative[0] as f32)));
        for (i, &v) in self.cumulative.iter().enumerate().skip(1) {
            path.line_to((x(i), y_cum(v as f32)));
        }

        let mut stroke = skia::Paint::default();
        stroke.set_anti_alias(true);
        stroke.set_style(skia::paint::Style::Stroke);
        stroke.set_stroke_width(2.0);
        stroke.set_color(theme.cumulative_stroke);
        canvas.draw_path(&path, &stroke);

        // Light fill under the line down to the zero baseline.
        let mut area = path;
        area.line_to((x(self.cumulative.len() - 1), y_cum(0.0)));
        area.line_to((x(0), y_cum(0.0)));
        area.close();
        let mut fill = skia::Paint::default();
        fill.set_anti_alias(true);
        fill.set_color(theme.cumulative_fill);
        canvas.draw_path(&area, &fill);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_axis_ticks(
        &self,
        canvas: &skia::Canvas,
        theme: &Theme,
        shaper: &TextShaper,
        left: f32,
        top: f32,
        plot_w: f32,
        plot_h: f32,
        max_daily: f32,
        max_cum: f32,
    ) {
        for i in 0..=GRID_DIVISIONS {
            let frac = i as f32 / GRID_DIVISIONS as f32;
            let y = top + plot_h * frac;
            let daily_value = (max_daily * (1.0 - frac)).round() as u64;
            let cum_value = (max_cum * (1.0 - frac)).round() as u64;
            shaper.draw_right(
                canvas,
                &daily_value.to_string(),
                left - 6.0,
                y + 3.0,
                10.0,
                theme.axis_label,
            );
            shaper.draw_left(
                canvas,
                &cum_value.to_string(),
                left + plot_w + 6.0,
                y + 3.0,
                10.0,
                theme.axis_label,
            );
        }
    }

    fn draw_date_labels(
        &self,
        canvas: &skia::Canvas,
        theme: &Theme,
        shaper: &TextShaper,
        x: &dyn Fn(usize) -> f32,
        height: f32,
        n: usize,
    ) {
        // At most ~6 labels regardless of series length.
        let stride = n.div_ceil(MAX_DATE_LABELS).max(1);
        for i in (0..n).step_by(stride) {
            shaper.draw_center(
                canvas,
                &self.labels[i],
                x(i),
                height - 6.0,
                10.0,
                theme.date_label,
            );
        }
    }

    fn draw_markers(
        &self,
        canvas: &skia::Canvas,
        opts: &PanelOptions,
        theme: &Theme,
        shaper: &TextShaper,
        x: &dyn Fn(usize) -> f32,
        y_cum: &dyn Fn(f32) -> f32,
    ) {
        if self.markers.is_empty() {
            return;
        }
        let mut fill = skia::Paint::default();
        fill.set_anti_alias(true);
        fill.set_color(theme.marker_fill);
        let mut outline = skia::Paint::default();
        outline.set_anti_alias(true);
        outline.set_style(skia::paint::Style::Stroke);
        outline.set_stroke_width(1.0);
        outline.set_color(theme.marker_outline);

        for day in &self.markers.days {
            let Some(idx) = marker_index(&self.labels, day) else {
                continue;
            };
            let px = x(idx);
            let py = y_cum(self.cumulative.get(idx).copied().unwrap_or(0) as f32);
            canvas.draw_circle((px, py), 3.5, &fill);
            canvas.draw_circle((px, py), 3.5, &outline);

            if opts.draw_labels {
                if let Some(&count) = self.markers.cumulative_by_day.get(day) {
                    if count > 0 {
                        shaper.draw_left(
                            canvas,
                            &count.to_string(),
                            px + 6.0,
                            py - 6.0,
                            10.0,
                            theme.marker_fill,
                        );
                    }
                }
            }
        }
    }

    fn draw_legend(
        &self,
        canvas: &skia::Canvas,
        theme: &Theme,
        labels: &Labels,
        shaper: &TextShaper,
        left: f32,
        top: f32,
    ) {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);

        paint.set_color(theme.bar_fill);
        canvas.draw_rect(skia::Rect::from_xywh(left, top - 2.0, 10.0, 10.0), &paint);
        shaper.draw_left(canvas, &labels.legend_daily, left + 15.0, top + 6.0, 10.0, theme.title);

        paint.set_color(theme.cumulative_stroke);
        canvas.draw_rect(skia::Rect::from_xywh(left, top + 12.0, 10.0, 10.0), &paint);
        shaper.draw_left(
            canvas,
            &labels.legend_cumulative,
            left + 15.0,
            top + 20.0,
            10.0,
            theme.title,
        );

        paint.set_color(theme.marker_fill);
        canvas.draw_circle((left + 5.0, top + 28.0), 4.0, &paint);
        shaper.draw_left(
            canvas,
            &labels.legend_markers,
            left + 15.0,
            top + 32.0,
            10.0,
            theme.title,
        );
    }
}

const GRID_DIVISIONS: u32 = 4;
const MAX_DATE_LABELS: usize = 6;

/// Resolve a marker day to a series index: exact label match first,
/// then the nearest parseable label by absolute time difference.
/// `None` when neither resolves, in which case the marker is skipped.
pub fn marker_index(labels: &[String], day: &str) -> Option<usize> {
    if let Some(idx) = labels.iter().position(|l| l == day) {
        return Some(idx);
    }
    let target = NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;
    let mut best: Option<(usize, i64)> = None;
    for (i, label) in labels.iter().enumerate() {
        let Ok(date) = NaiveDate::parse_from_str(label, "%Y-%m-%d") else {
            continue;
        };
        let diff = (date - target).num_days().abs();
        if best.map_or(true, |(_, d)| diff < d) {
            best = Some((i, diff));
        }
    }
    best.map(|(i, _)| i)
}

pub(crate) fn encode_png(surface: &mut skia::Surface) -> Result<Vec<u8>, RenderError> {
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or(RenderError::Encode)?;
    Ok(data.as_bytes().to_vec())
}
