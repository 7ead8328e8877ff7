// File: crates/biblio-render/src/lib.rs
// Summary: Renderer library entry point; panel charts, share composition, sinks.

pub mod compose;
pub mod error;
pub mod panel;
pub mod sink;
pub mod text;
pub mod theme;

pub use compose::{compose_share_image, export_share_image, Branding, ShareLayout};
pub use error::RenderError;
pub use panel::{marker_index, PanelChart, PanelInsets, PanelOptions, PANEL_HEIGHT, PANEL_WIDTH};
pub use sink::{FileSink, ShareSink, SinkError};
pub use text::TextShaper;
pub use theme::{Labels, Theme};
