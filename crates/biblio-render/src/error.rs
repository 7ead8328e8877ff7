// File: crates/biblio-render/src/error.rs
// Summary: Renderer-side failures (surface construction, image encoding).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create raster surface")]
    Surface,
    #[error("image encode failed")]
    Encode,
}
