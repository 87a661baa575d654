//! Screens, widgets and their props.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smol_str::SmolStr;

use crate::style::{Style, StyleDelta};

const fn is_false(value: &bool) -> bool {
    !*value
}

/// Semantic widget type.
///
/// The importer only produces `Screen`, `Label`, `Button` and `Vector` on its
/// own; any other name arrives through a metadata override and is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "SmolStr", into = "SmolStr")]
pub enum WidgetType {
    Screen,
    Label,
    Button,
    Vector,
    Custom(SmolStr),
}

impl WidgetType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Screen => "Screen",
            Self::Label => "Label",
            Self::Button => "Button",
            Self::Vector => "Vector",
            Self::Custom(name) => name.as_str(),
        }
    }

    pub fn is_label(&self) -> bool {
        matches!(self, Self::Label)
    }
}

impl From<SmolStr> for WidgetType {
    fn from(value: SmolStr) -> Self {
        match value.as_str() {
            "Screen" => Self::Screen,
            "Label" => Self::Label,
            "Button" => Self::Button,
            "Vector" => Self::Vector,
            _ => Self::Custom(value),
        }
    }
}

impl From<&str> for WidgetType {
    fn from(value: &str) -> Self {
        Self::from(SmolStr::new(value))
    }
}

impl From<WidgetType> for SmolStr {
    fn from(value: WidgetType) -> Self {
        match value {
            WidgetType::Custom(name) => name,
            other => SmolStr::new(other.as_str()),
        }
    }
}

impl std::fmt::Display for WidgetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Absolute box in integer pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl Bounds {
    /// Grows the box by `amount` on every side.
    pub fn inflate(&mut self, amount: i64) {
        self.x -= amount;
        self.y -= amount;
        self.w += amount * 2;
        self.h += amount * 2;
    }
}

/// Resize behavior when the enclosing screen changes size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resize {
    pub right: bool,
    pub left: bool,
    pub up: bool,
    pub down: bool,
    pub fixed_horizontal: bool,
    pub fixed_vertical: bool,
}

impl Default for Resize {
    fn default() -> Self {
        Self {
            right: true,
            left: true,
            up: false,
            down: false,
            fixed_horizontal: false,
            fixed_vertical: false,
        }
    }
}

/// Breakpoints on which a widget is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    #[serde(skip_serializing_if = "is_false")]
    pub mobile: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub tablet: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub desktop: bool,
}

/// Data binding slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataBinding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Names of host callbacks bound to widget events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Callbacks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<String>,
}

/// Free-form properties of a screen or widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_transform: Option<Value>,
    #[serde(skip_serializing_if = "is_false")]
    pub is_vector: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize: Option<Resize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakpoints: Option<Breakpoints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub databinding: Option<DataBinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callbacks: Option<Callbacks>,
    #[serde(skip_serializing_if = "is_false")]
    pub placeholder: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_component: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub start: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub figma_image: Option<String>,
}

/// Semantic facets a widget supports in the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Capabilities {
    #[serde(skip_serializing_if = "is_false")]
    pub label: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub padding: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub advanced_text: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub background_color: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub border: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub onclick: bool,
}

impl Capabilities {
    /// Facets for a widget of the given type.
    pub fn for_type(widget_type: &WidgetType) -> Self {
        match widget_type {
            WidgetType::Label => Self {
                label: true,
                padding: true,
                advanced_text: true,
                ..Self::default()
            },
            WidgetType::Button => Self {
                label: true,
                background_color: true,
                border: true,
                onclick: true,
                padding: true,
                ..Self::default()
            },
            _ => Self::default(),
        }
    }
}

/// A top-level frame of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub id: String,
    pub figma_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    #[serde(flatten)]
    pub bounds: Bounds,
    pub style: Style,
    /// Direct child widget ids in placement order.
    pub children: Vec<String>,
    pub props: WidgetProps,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover: Option<StyleDelta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<StyleDelta>,
}

/// An accepted, positioned element below a screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: String,
    /// Id of the owning screen or of a widget created earlier in the walk.
    pub parent_id: String,
    pub figma_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    pub figma_type: SmolStr,
    #[serde(flatten)]
    pub bounds: Bounds,
    /// Paint order; strictly increasing in visitation order.
    pub z: u32,
    pub style: Style,
    pub props: WidgetProps,
    pub has: Capabilities,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover: Option<StyleDelta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<StyleDelta>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_type_serializes_as_plain_name() {
        let json = serde_json::to_string(&WidgetType::Button).unwrap();
        assert_eq!(json, "\"Button\"");
        let custom: WidgetType = serde_json::from_str("\"DropDown\"").unwrap();
        assert_eq!(custom, WidgetType::Custom(SmolStr::new("DropDown")));
        let known: WidgetType = serde_json::from_str("\"Vector\"").unwrap();
        assert_eq!(known, WidgetType::Vector);
    }

    #[test]
    fn inflate_grows_box_on_every_side() {
        let mut bounds = Bounds {
            x: 10,
            y: 20,
            w: 100,
            h: 40,
        };
        bounds.inflate(2);
        assert_eq!(
            bounds,
            Bounds {
                x: 8,
                y: 18,
                w: 104,
                h: 44
            }
        );
    }

    #[test]
    fn capabilities_follow_widget_type() {
        let label = Capabilities::for_type(&WidgetType::Label);
        assert!(label.label && label.advanced_text && !label.onclick);
        let button = Capabilities::for_type(&WidgetType::Button);
        assert!(button.onclick && button.border && button.background_color);
        assert_eq!(
            Capabilities::for_type(&WidgetType::Vector),
            Capabilities::default()
        );
    }
}
