//! Computed visual style records.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Font stack every imported element starts with.
pub const DEFAULT_FONT_FAMILY: &str = "Helvetica Neue,Helvetica,Arial,sans-serif";

const fn is_false(value: &bool) -> bool {
    !*value
}

/// Vertical text alignment inside a widget box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

/// One color stop of a linear gradient. `p` is a percentage (0..=100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub c: String,
    pub p: f64,
}

/// Linear gradient background. `direction` is in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub direction: f64,
    pub colors: Vec<GradientStop>,
}

/// Box shadow: vertical/horizontal offset, blur, spread, inset flag, color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxShadow {
    pub v: f64,
    pub h: f64,
    pub b: f64,
    pub s: f64,
    pub i: bool,
    pub c: String,
}

/// Style overrides applied while a widget is hovered or focused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl StyleDelta {
    pub fn is_empty(&self) -> bool {
        self.background.is_none() && self.border_color.is_none() && self.color.is_none()
    }
}

/// Computed style of a screen or widget.
///
/// Border widths are always present (zero when the element has no stroke);
/// everything else is only emitted when the source element defines it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    pub font_family: String,
    pub border_bottom_width: f64,
    pub border_top_width: f64,
    pub border_left_width: f64,
    pub border_right_width: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Gradient>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_top_left_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_top_right_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom_right_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom_left_radius: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_top_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_left_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_right_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<BoxShadow>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<SmolStr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,

    #[serde(skip_serializing_if = "is_false")]
    pub fixed: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub overlay: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub has_background: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            border_bottom_width: 0.0,
            border_top_width: 0.0,
            border_left_width: 0.0,
            border_right_width: 0.0,
            background_color: None,
            color: None,
            background: None,
            border_top_left_radius: None,
            border_top_right_radius: None,
            border_bottom_right_radius: None,
            border_bottom_left_radius: None,
            border_bottom_color: None,
            border_top_color: None,
            border_left_color: None,
            border_right_color: None,
            box_shadow: None,
            font_size: None,
            font_weight: None,
            line_height: None,
            letter_spacing: None,
            text_align: None,
            vertical_align: None,
            fixed: false,
            overlay: false,
            has_background: false,
        }
    }
}

impl Style {
    /// Sets all four corner radii to the same value.
    pub fn set_uniform_radius(&mut self, radius: f64) {
        self.border_top_left_radius = Some(radius);
        self.border_top_right_radius = Some(radius);
        self.border_bottom_right_radius = Some(radius);
        self.border_bottom_left_radius = Some(radius);
    }

    /// Sets all four border colors.
    pub fn set_border_color(&mut self, color: &str) {
        self.border_bottom_color = Some(color.to_string());
        self.border_top_color = Some(color.to_string());
        self.border_left_color = Some(color.to_string());
        self.border_right_color = Some(color.to_string());
    }

    /// Sets all four border widths.
    pub fn set_border_width(&mut self, width: f64) {
        self.border_bottom_width = width;
        self.border_top_width = width;
        self.border_left_width = width;
        self.border_right_width = width;
    }
}
