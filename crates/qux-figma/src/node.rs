//! Source scene graph as exported by the design tool's REST API.
//!
//! Only the attributes the importer reads are modelled; everything else in
//! the payload is ignored during deserialization.

#![allow(missing_docs)]

use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;
use smol_str::SmolStr;

pub const NODE_TEXT: &str = "TEXT";
pub const NODE_RECTANGLE: &str = "RECTANGLE";
pub const NODE_FRAME: &str = "FRAME";
pub const NODE_GROUP: &str = "GROUP";
pub const NODE_INSTANCE: &str = "INSTANCE";

pub const PAINT_SOLID: &str = "SOLID";
pub const PAINT_GRADIENT_LINEAR: &str = "GRADIENT_LINEAR";

pub const EFFECT_DROP_SHADOW: &str = "DROP_SHADOW";
pub const EFFECT_INNER_SHADOW: &str = "INNER_SHADOW";

pub const STROKE_INSIDE: &str = "INSIDE";

/// Top-level response of the file endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    #[serde(default)]
    pub name: String,
    pub document: Node,
}

/// Visibility and opacity of a node or paint, used when formatting colors.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Appearance {
    pub visible: Option<bool>,
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Color channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColorStop {
    pub color: Color,
    pub position: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Paint {
    #[serde(rename = "type")]
    pub paint_type: SmolStr,
    pub visible: Option<bool>,
    pub opacity: Option<f64>,
    pub color: Option<Color>,
    pub gradient_handle_positions: Vec<Vector2>,
    pub gradient_stops: Vec<ColorStop>,
}

impl Paint {
    pub fn is_solid(&self) -> bool {
        self.paint_type == PAINT_SOLID
    }

    pub fn appearance(&self) -> Appearance {
        Appearance {
            visible: self.visible,
            opacity: self.opacity,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Effect {
    #[serde(rename = "type")]
    pub effect_type: SmolStr,
    pub visible: Option<bool>,
    pub color: Option<Color>,
    pub offset: Option<Vector2>,
    pub radius: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    pub line_height_percent: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub text_align_horizontal: Option<SmolStr>,
    pub text_align_vertical: Option<SmolStr>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConstraint {
    pub vertical: Option<SmolStr>,
    pub horizontal: Option<SmolStr>,
}

/// Raw plugin annotations. Every value arrives as a string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginData {
    pub qux_type: Option<String>,
    pub qux_smart_container_type: Option<String>,
    pub qux_type_custom: Option<String>,
    pub qux_data_binding_default: Option<String>,
    pub qux_data_binding_output: Option<String>,
    pub qux_on_click_callback: Option<String>,
    pub qux_on_load_callback: Option<String>,
    pub qux_on_change_callback: Option<String>,
    pub qux_style_hover_background: Option<String>,
    pub qux_style_hover_border: Option<String>,
    pub qux_style_hover_color: Option<String>,
    pub qux_style_focus_background: Option<String>,
    pub qux_style_focus_border: Option<String>,
    pub qux_style_focus_color: Option<String>,
    pub qux_fixed_horizontal: Option<String>,
    pub qux_fixed_vertical: Option<String>,
    pub qux_start_screen: Option<String>,
    pub qux_overlay_screen: Option<String>,
    pub qux_has_overlay_background: Option<String>,
    pub qux_breakpoint_mobile: Option<String>,
    pub qux_breakpoint_tablet: Option<String>,
    pub qux_breakpoint_desktop: Option<String>,
}

/// One node of the scene graph: document, canvas, frame, shape or text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: SmolStr,
    pub visible: Option<bool>,
    pub opacity: Option<f64>,
    pub children: Vec<Node>,
    pub absolute_bounding_box: Option<Rect>,
    pub background_color: Option<Color>,
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub stroke_weight: Option<f64>,
    pub stroke_align: Option<SmolStr>,
    pub effects: Vec<Effect>,
    pub corner_radius: Option<f64>,
    pub rectangle_corner_radii: Option<Vec<f64>>,
    pub style: Option<TypeStyle>,
    pub constraints: Option<LayoutConstraint>,
    pub characters: Option<String>,
    #[serde(rename = "transitionNodeID")]
    pub transition_node_id: Option<String>,
    pub transition_duration: Option<f64>,
    pub is_fixed: bool,
    pub stroke_geometry: Option<Value>,
    pub relative_transform: Option<Value>,
    pub plugin_data: FxHashMap<String, PluginData>,
}

impl Node {
    pub fn appearance(&self) -> Appearance {
        Appearance {
            visible: self.visible,
            opacity: self.opacity,
        }
    }

    /// `visible: false` or an opacity of zero or less.
    pub fn is_hidden(&self) -> bool {
        self.visible == Some(false) || self.opacity.is_some_and(|opacity| opacity <= 0.0)
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NODE_TEXT
    }

    pub fn plugin_data(&self, plugin_id: &str) -> Option<&PluginData> {
        self.plugin_data.get(plugin_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_rest_payload_fields() {
        let node: Node = serde_json::from_value(json!({
            "id": "1:2",
            "name": "Login",
            "type": "RECTANGLE",
            "absoluteBoundingBox": { "x": 10.4, "y": 20.6, "width": 100, "height": 40 },
            "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 0, "b": 0, "a": 1 } }],
            "transitionNodeID": "3:4",
            "pluginData": { "858477504263032980": { "quxType": "TextBox", "somethingElse": "x" } },
            "exportSettings": []
        }))
        .expect("decode node");
        assert_eq!(node.node_type, NODE_RECTANGLE);
        assert_eq!(node.transition_node_id.as_deref(), Some("3:4"));
        assert!(node.fills[0].is_solid());
        assert_eq!(
            node.plugin_data("858477504263032980")
                .and_then(|data| data.qux_type.as_deref()),
            Some("TextBox")
        );
        assert!(node.children.is_empty());
    }

    #[test]
    fn hidden_covers_visibility_and_opacity() {
        let visible = Node::default();
        assert!(!visible.is_hidden());
        let invisible = Node {
            visible: Some(false),
            ..Node::default()
        };
        assert!(invisible.is_hidden());
        let transparent = Node {
            opacity: Some(0.0),
            ..Node::default()
        };
        assert!(transparent.is_hidden());
    }
}
