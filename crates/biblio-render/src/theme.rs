// File: crates/biblio-render/src/theme.rs
// Summary: Fixed chart palette and UI label constants.

use skia_safe as skia;

/// The fixed color set used by panels and the share composite. The
/// host passes no theming system in; these are constants.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub background: skia::Color,
    pub bar_fill: skia::Color,
    pub cumulative_stroke: skia::Color,
    pub cumulative_fill: skia::Color,
    pub marker_fill: skia::Color,
    pub marker_outline: skia::Color,
    pub grid: skia::Color,
    pub title: skia::Color,
    pub axis_label: skia::Color,
    pub date_label: skia::Color,
    pub header_title: skia::Color,
    pub header_subtitle: skia::Color,
    pub footer_text: skia::Color,
    pub brand_text: skia::Color,
    pub brand_muted: skia::Color,
}

impl Theme {
    pub fn share_default() -> Self {
        Self {
            background: skia::Color::from_argb(255, 255, 255, 255),
            bar_fill: skia::Color::from_argb(179, 76, 114, 176), // #4C72B0 at 0.7
            cumulative_stroke: skia::Color::from_argb(255, 221, 132, 82), // #DD8452
            cumulative_fill: skia::Color::from_argb(31, 221, 132, 82), // #DD8452 at 0.12
            marker_fill: skia::Color::from_argb(255, 42, 157, 143), // #2A9D8F
            marker_outline: skia::Color::from_argb(255, 255, 255, 255),
            grid: skia::Color::from_argb(20, 0, 0, 0), // 8% black
            title: skia::Color::from_argb(255, 51, 51, 51),
            axis_label: skia::Color::from_argb(255, 102, 102, 102),
            date_label: skia::Color::from_argb(255, 153, 153, 153),
            header_title: skia::Color::from_argb(255, 17, 17, 17),
            header_subtitle: skia::Color::from_argb(255, 102, 102, 102),
            footer_text: skia::Color::from_argb(255, 102, 102, 102),
            brand_text: skia::Color::from_argb(255, 17, 17, 17),
            brand_muted: skia::Color::from_argb(255, 102, 102, 102),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::share_default()
    }
}

/// UI strings handed in as fixed constants; actual locale lookup stays
/// with the host. Only the brand name varies by locale here.
#[derive(Clone, Debug)]
pub struct Labels {
    pub main_title: String,
    pub all_items_title: String,
    pub focal_items_title: String,
    pub legend_daily: String,
    pub legend_cumulative: String,
    pub legend_markers: String,
    pub brand_name_en: String,
    pub brand_name_zh: String,
    pub download_label: String,
    pub download_url: String,
    pub share_success: String,
    pub share_failed: String,
    pub no_data: String,
}

impl Labels {
    pub fn english() -> Self {
        Self {
            main_title: "Library Growth".into(),
            all_items_title: "All items".into(),
            focal_items_title: "Focal items".into(),
            legend_daily: "Daily added".into(),
            legend_cumulative: "Cumulative".into(),
            legend_markers: "My publications".into(),
            brand_name_en: "Bibliograph".into(),
            brand_name_zh: "文献图谱".into(),
            download_label: "Get it at".into(),
            download_url: "github.com/you/bibliograph".into(),
            share_success: "Share image copied".into(),
            share_failed: "Share failed".into(),
            no_data: "No data yet".into(),
        }
    }

    /// The branding line shows the Chinese product name for `zh-*`
    /// locales and the English one otherwise.
    pub fn brand_name(&self, locale: &str) -> &str {
        if locale.starts_with("zh") {
            &self.brand_name_zh
        } else {
            &self.brand_name_en
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::Labels;

    #[test]
    fn brand_name_follows_locale() {
        let labels = Labels::english();
        assert_eq!(labels.brand_name("zh-CN"), labels.brand_name_zh);
        assert_eq!(labels.brand_name("en-US"), labels.brand_name_en);
        assert_eq!(labels.brand_name(""), labels.brand_name_en);
    }
}
