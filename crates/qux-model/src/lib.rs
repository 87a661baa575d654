//! `qux-model` - normalized widget model for imported design documents.
//!
//! A [`Document`] owns flat registries of [`Screen`]s, [`Widget`]s and
//! navigation [`Line`]s. Everything is addressed by generated id; the
//! registries never hold references into the source tree.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Document header, registries and counters.
pub mod document;
/// Navigation edges between widgets and screens.
pub mod line;
/// Computed visual style records.
pub mod style;
/// Screens, widgets and their props.
pub mod widget;

pub use document::{Document, Grid, ScreenSize};
pub use line::{Line, LinePoint};
pub use style::{BoxShadow, Gradient, GradientStop, Style, StyleDelta, VerticalAlign};
pub use widget::{
    Bounds, Breakpoints, Callbacks, Capabilities, DataBinding, Resize, Screen, Widget,
    WidgetProps, WidgetType,
};
