// File: crates/demo/src/main.rs
// Summary: Demo opens a library SQLite file, runs the refresh pipeline, renders both
//          panels and composes the share PNG to a file (optionally the clipboard).

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use biblio_core::{
    refresh, LibraryScope, MemoryPreferences, PreferenceStore, RefreshGate, RefreshOutcome,
};
use biblio_render::theme::Labels;
use biblio_render::{
    compose_share_image, export_share_image, Branding, FileSink, PanelChart, PanelOptions,
    ShareLayout, ShareSink, SinkError, TextShaper, Theme,
};
use biblio_sqlite::LibraryDatabase;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Args: <library.sqlite> [tag-filter] [out.png] [--clipboard]
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let use_clipboard = if let Some(pos) = args.iter().position(|a| a == "--clipboard") {
        args.remove(pos);
        true
    } else {
        false
    };
    let library_path = args
        .first()
        .cloned()
        .context("usage: bibliograph-demo <library.sqlite> [tag-filter] [out.png] [--clipboard]")?;
    let tag_filter = args.get(1).cloned().unwrap_or_default();
    let out_path = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("target/out/share.png"));

    // The saved filter string round-trips through the preference store,
    // the way the host UI persists it.
    let mut prefs = MemoryPreferences::default();
    prefs.set_tag_filter(&tag_filter);
    let saved_filter = prefs.tag_filter().unwrap_or_default();

    let store = LibraryDatabase::open(&library_path)
        .with_context(|| format!("failed to open library '{library_path}'"))?;
    let scope = LibraryScope::new(1);
    let gate = RefreshGate::new();

    let snapshot = match refresh(&gate, &store, scope, &saved_filter).await {
        RefreshOutcome::Fresh(snapshot) => snapshot,
        RefreshOutcome::Superseded => unreachable!("single refresh cannot be superseded"),
    };

    let labels = Labels::english();
    if snapshot.statistics.is_empty() {
        println!("{}", labels.no_data);
        return Ok(());
    }

    println!(
        "{} items ({} focal) from {} to {}",
        snapshot.statistics.total_count,
        snapshot.statistics.focal_count,
        snapshot.statistics.start_date,
        snapshot.statistics.end_date,
    );
    println!("{} publication markers", snapshot.markers.days.len());

    let theme = Theme::share_default();
    let shaper = TextShaper::new();
    let opts = PanelOptions::default();

    let mut all_panel = PanelChart::all_items(
        &snapshot.statistics,
        &snapshot.markers,
        &labels.all_items_title,
    )
    .render_to_surface(&opts, &theme, &labels, &shaper)?;
    let mut focal_panel = PanelChart::focal_items(
        &snapshot.statistics,
        &snapshot.markers,
        &labels.focal_items_title,
    )
    .render_to_surface(&opts, &theme, &labels, &shaper)?;
    let panels = [all_panel.image_snapshot(), focal_panel.image_snapshot()];

    let footer = if saved_filter.trim().is_empty() {
        String::new()
    } else {
        format!("Focal tags: {}", saved_filter.trim())
    };
    let branding = Branding {
        logo: None,
        locale: std::env::var("LANG").unwrap_or_default(),
    };
    let png = compose_share_image(
        &panels,
        &snapshot.statistics,
        &footer,
        &branding,
        &ShareLayout::default(),
        &theme,
        &labels,
        &shaper,
        1.0,
    )?;

    let file_sink = FileSink::new(&out_path);
    if export_share_image(&png, &file_sink).await {
        println!("Wrote {}", out_path.display());
    } else {
        println!("{}", labels.share_failed);
    }

    if use_clipboard {
        let ok = export_share_image(&png, &ClipboardSink).await;
        println!(
            "{}",
            if ok { &labels.share_success } else { &labels.share_failed }
        );
    }

    Ok(())
}

/// Copies the composite to the system clipboard. Clipboard access can
/// be absent (headless sessions); that surfaces as a failed delivery.
struct ClipboardSink;

#[async_trait]
impl ShareSink for ClipboardSink {
    async fn deliver(&self, png_bytes: &[u8]) -> Result<(), SinkError> {
        let decoded = image::load_from_memory(png_bytes)
            .map_err(|e| SinkError::Delivery(e.to_string()))?
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        debug!(width, height, "copying composite to clipboard");

        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| SinkError::Unavailable(e.to_string()))?;
        clipboard
            .set_image(arboard::ImageData {
                width: width as usize,
                height: height as usize,
                bytes: decoded.into_raw().into(),
            })
            .map_err(|e| SinkError::Delivery(e.to_string()))
    }
}
