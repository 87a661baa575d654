//! `qux-figma` - imports Figma files into the qux widget model.
//!
//! The pipeline fetches a file through [`FigmaApi`], walks every page's
//! top-level frames into a [`qux_model::Document`], resolves navigation
//! lines, then backfills rendered images for vector widgets in concurrent
//! batches.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Rendered image backfill.
pub mod backfill;
/// REST client and the API seam.
pub mod client;
/// Importer configuration.
pub mod config;
/// Import errors.
pub mod error;
/// Bounds, colors and names.
pub mod geometry;
/// Import pipeline entry point.
pub mod import;
/// Source scene graph types.
pub mod node;
/// Plugin metadata overlays.
pub mod overlay;
/// Classification and style derivation.
pub mod style;
/// Tree walk and line resolution.
pub mod walker;

pub use client::{FigmaApi, FigmaClient, ImageResponse};
pub use config::ImportConfig;
pub use error::{ImportError, ImportResult};
pub use import::Importer;
pub use overlay::Overlay;
pub use walker::{build_document, resolve_lines, SourceIndex, MAX_WALK_DEPTH};
