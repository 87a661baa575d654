//! Classification, style derivation and widget props.

use qux_model::{
    Bounds, BoxShadow, Gradient, GradientStop, Resize, Style, VerticalAlign, WidgetProps,
    WidgetType,
};
use smol_str::SmolStr;
use tracing::{trace, warn};

use crate::geometry::get_color;
use crate::node::{
    Appearance, Node, Paint, EFFECT_DROP_SHADOW, EFFECT_INNER_SHADOW, NODE_FRAME, NODE_GROUP,
    NODE_INSTANCE, NODE_RECTANGLE, NODE_TEXT, PAINT_GRADIENT_LINEAR, STROKE_INSIDE,
};

/// Node types that may render as plain buttons or labels.
pub const BUTTON_TYPES: &[&str] = &[
    NODE_RECTANGLE,
    NODE_TEXT,
    NODE_FRAME,
    NODE_GROUP,
    NODE_INSTANCE,
];

/// More fills, strokes or effects than a styled box can express.
pub fn is_too_complex(node: &Node) -> bool {
    node.fills.len() > 1
        || (node.fills.len() == 1 && !node.fills[0].is_solid())
        || node.strokes.len() > 1
        || node.effects.len() > 1
}

fn is_button(node: &Node) -> bool {
    BUTTON_TYPES.contains(&node.node_type.as_str()) && !is_too_complex(node)
}

/// Decides how a node renders: as a rasterized vector, a button or a label.
pub fn classify(node: &Node, all_as_vector: bool) -> WidgetType {
    if all_as_vector || !is_button(node) {
        return WidgetType::Vector;
    }
    if node.is_text() {
        WidgetType::Label
    } else {
        WidgetType::Button
    }
}

/// What the style pass needs to know about the element being styled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleTarget {
    /// Fills color the text instead of the background.
    pub is_label: bool,
    /// Strokes, shadows and typography are left to the rendered image.
    pub is_vector: bool,
    /// The node or one of its ancestors is pinned.
    pub fixed: bool,
}

impl StyleTarget {
    /// Target for a widget of the given classified type.
    pub fn for_widget(widget_type: &WidgetType, fixed: bool) -> Self {
        Self {
            is_label: widget_type.is_label(),
            is_vector: *widget_type == WidgetType::Vector,
            fixed,
        }
    }
}

/// Derives the style of `node`.
///
/// Strokes drawn outside the shape grow `bounds` by the stroke weight on
/// every side.
pub fn compute_style(node: &Node, target: StyleTarget, bounds: &mut Bounds) -> Style {
    let mut style = Style::default();

    if let Some(color) = &node.background_color {
        style.background_color = Some(get_color(color, node.appearance()));
    }

    if target.fixed {
        style.fixed = true;
    }

    if let [fill] = node.fills.as_slice() {
        apply_fill(node, fill, target, &mut style);
    }

    if let Some(radius) = node.corner_radius.filter(|radius| *radius != 0.0) {
        style.set_uniform_radius(radius);
    }
    if let Some([top_left, top_right, bottom_right, bottom_left]) =
        node.rectangle_corner_radii.as_deref()
    {
        style.border_top_left_radius = Some(*top_left);
        style.border_top_right_radius = Some(*top_right);
        style.border_bottom_right_radius = Some(*bottom_right);
        style.border_bottom_left_radius = Some(*bottom_left);
    }

    if !target.is_vector {
        apply_stroke(node, &mut style, bounds);
        apply_shadow(node, &mut style);
        apply_typography(node, &mut style);
    }

    if target.is_label && style.vertical_align != Some(VerticalAlign::Bottom) {
        let stretches = node
            .constraints
            .as_ref()
            .and_then(|constraints| constraints.vertical.as_deref())
            == Some("TOP_BOTTOM");
        if stretches {
            style.vertical_align = Some(VerticalAlign::Middle);
        }
    }

    style
}

fn apply_fill(node: &Node, fill: &Paint, target: StyleTarget, style: &mut Style) {
    if fill.is_solid() {
        let Some(color) = &fill.color else {
            return;
        };
        let appearance = Appearance {
            visible: fill.visible,
            opacity: fill
                .opacity
                .filter(|opacity| *opacity < 1.0)
                .or(node.opacity),
        };
        let color = get_color(color, appearance);
        if target.is_label {
            style.color = Some(color);
        } else {
            style.background_color = Some(color);
        }
        return;
    }

    if fill.paint_type == PAINT_GRADIENT_LINEAR {
        if target.is_label {
            trace!(node = %node.id, "gradients are not supported on labels");
            return;
        }
        style.background = linear_gradient(node, fill);
    }
}

fn linear_gradient(node: &Node, fill: &Paint) -> Option<Gradient> {
    let [start, end, ..] = fill.gradient_handle_positions.as_slice() else {
        warn!(node = %node.id, "linear gradient without handle positions");
        return None;
    };
    let direction = (start.y - end.y).atan2(start.x - end.x).to_degrees();
    let colors = fill
        .gradient_stops
        .iter()
        .map(|stop| GradientStop {
            c: get_color(&stop.color, Appearance::default()),
            p: stop.position * 100.0,
        })
        .collect();
    Some(Gradient { direction, colors })
}

#[allow(clippy::cast_possible_truncation)]
fn apply_stroke(node: &Node, style: &mut Style, bounds: &mut Bounds) {
    let Some(stroke) = node.strokes.first() else {
        return;
    };
    if let Some(color) = &stroke.color {
        style.set_border_color(&get_color(color, node.appearance()));
    }
    let Some(weight) = node.stroke_weight.filter(|weight| *weight > 0.0) else {
        return;
    };
    style.set_border_width(weight);
    if node.stroke_align.as_deref() != Some(STROKE_INSIDE) {
        bounds.inflate(weight.round() as i64);
    }
}

fn apply_shadow(node: &Node, style: &mut Style) {
    let shadow = node.effects.iter().find_map(|effect| {
        let inset = match effect.effect_type.as_str() {
            EFFECT_DROP_SHADOW => false,
            EFFECT_INNER_SHADOW => true,
            _ => return None,
        };
        let offset = effect.offset.unwrap_or_default();
        Some(BoxShadow {
            v: offset.y,
            h: offset.x,
            b: effect.radius,
            s: 0.0,
            i: inset,
            c: effect
                .color
                .as_ref()
                .map(|color| get_color(color, node.appearance()))
                .unwrap_or_default(),
        })
    });
    if shadow.is_some() {
        style.box_shadow = shadow;
    }
}

fn apply_typography(node: &Node, style: &mut Style) {
    let Some(text) = &node.style else {
        return;
    };
    style.font_size = text.font_size;
    style.font_weight = text.font_weight;
    // Source line height is a percentage of the font size.
    style.line_height = text.line_height_percent.map(|percent| percent / 100.0);
    style.letter_spacing = text.letter_spacing;
    if let Some(align) = &text.text_align_horizontal {
        style.text_align = Some(SmolStr::new(align.to_ascii_lowercase()));
    }
    match text.text_align_vertical.as_deref() {
        Some("CENTER") => style.vertical_align = Some(VerticalAlign::Middle),
        Some("TOP") => style.vertical_align = Some(VerticalAlign::Top),
        Some("BOTTOM") => style.vertical_align = Some(VerticalAlign::Bottom),
        _ => {}
    }
}

/// Props derived from the node itself, before metadata overlays.
pub fn compute_props(node: &Node, widget_type: &WidgetType) -> WidgetProps {
    let mut props = WidgetProps::default();
    if *widget_type == WidgetType::Vector {
        props.paths = node.stroke_geometry.clone();
        props.relative_transform = node.relative_transform.clone();
        props.is_vector = true;
    }
    if widget_type.is_label() {
        props.label = Some(node.characters.clone().unwrap_or_else(|| node.name.clone()));
    }

    let mut resize = Resize::default();
    let horizontal = node
        .constraints
        .as_ref()
        .and_then(|constraints| constraints.horizontal.as_deref());
    if horizontal == Some("RIGHT") {
        resize.left = false;
        resize.right = true;
    }
    props.resize = Some(resize);
    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: serde_json::Value) -> Node {
        serde_json::from_value(value).expect("decode node")
    }

    fn style_of(node: &Node, all_as_vector: bool) -> (Style, Bounds) {
        let widget_type = classify(node, all_as_vector);
        let mut bounds = crate::geometry::compute_bounds(node);
        let style = compute_style(node, StyleTarget::for_widget(&widget_type, false), &mut bounds);
        (style, bounds)
    }

    #[test]
    fn two_solid_fills_force_vector() {
        let rect = node(json!({
            "type": "RECTANGLE",
            "fills": [
                { "type": "SOLID", "color": { "r": 1, "g": 0, "b": 0, "a": 1 } },
                { "type": "SOLID", "color": { "r": 0, "g": 0, "b": 1, "a": 1 } }
            ]
        }));
        assert!(is_too_complex(&rect));
        assert_eq!(classify(&rect, false), WidgetType::Vector);
    }

    #[test]
    fn classification_by_type_and_mode() {
        let text = node(json!({ "type": "TEXT" }));
        assert_eq!(classify(&text, false), WidgetType::Label);
        assert_eq!(classify(&text, true), WidgetType::Vector);
        let frame = node(json!({
            "type": "FRAME",
            "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 1, "b": 1 } }]
        }));
        assert_eq!(classify(&frame, false), WidgetType::Button);
        let ellipse = node(json!({ "type": "ELLIPSE" }));
        assert_eq!(classify(&ellipse, false), WidgetType::Vector);
        let shadows = node(json!({
            "type": "RECTANGLE",
            "effects": [{ "type": "DROP_SHADOW" }, { "type": "INNER_SHADOW" }]
        }));
        assert_eq!(classify(&shadows, false), WidgetType::Vector);
        let image = node(json!({ "type": "RECTANGLE", "fills": [{ "type": "IMAGE" }] }));
        assert_eq!(classify(&image, false), WidgetType::Vector);
    }

    #[test]
    fn solid_fill_colors_background_or_text() {
        let fill = json!([{ "type": "SOLID", "color": { "r": 1, "g": 0, "b": 0, "a": 1 } }]);
        let (button, _) = style_of(&node(json!({ "type": "RECTANGLE", "fills": fill })), false);
        assert_eq!(button.background_color.as_deref(), Some("rgba(255, 0, 0, 1)"));
        assert_eq!(button.color, None);

        let (label, _) = style_of(&node(json!({ "type": "TEXT", "fills": fill })), false);
        assert_eq!(label.color.as_deref(), Some("rgba(255, 0, 0, 1)"));
        assert_eq!(label.background_color, None);

        let (faded, _) = style_of(
            &node(json!({ "type": "RECTANGLE", "opacity": 0.5, "fills": fill })),
            false,
        );
        assert_eq!(faded.background_color.as_deref(), Some("rgba(255, 0, 0, 0.5)"));
    }

    #[test]
    fn gradient_is_skipped_on_labels() {
        let gradient = json!([{
            "type": "GRADIENT_LINEAR",
            "gradientHandlePositions": [{ "x": 0, "y": 0 }, { "x": 1, "y": 0 }],
            "gradientStops": [
                { "color": { "r": 1, "g": 0, "b": 0, "a": 1 }, "position": 0 },
                { "color": { "r": 0, "g": 0, "b": 1, "a": 1 }, "position": 0.5 }
            ]
        }]);
        let text = node(json!({ "type": "TEXT", "fills": gradient }));
        let mut bounds = Bounds::default();
        let style = compute_style(
            &text,
            StyleTarget {
                is_label: true,
                ..StyleTarget::default()
            },
            &mut bounds,
        );
        assert_eq!(style.background, None);

        let rect = node(json!({ "type": "RECTANGLE", "fills": gradient }));
        let style = compute_style(&rect, StyleTarget::default(), &mut bounds);
        let background = style.background.expect("gradient background");
        assert!((background.direction - 180.0).abs() < 1e-9);
        assert_eq!(background.colors.len(), 2);
        assert_eq!(background.colors[0].c, "rgba(255, 0, 0, 1)");
        assert!((background.colors[1].p - 50.0).abs() < 1e-9);
    }

    #[test]
    fn outside_stroke_inflates_bounds() {
        let rect = node(json!({
            "type": "RECTANGLE",
            "absoluteBoundingBox": { "x": 10, "y": 10, "width": 100, "height": 50 },
            "strokes": [{ "type": "SOLID", "color": { "r": 0, "g": 0, "b": 0, "a": 1 } }],
            "strokeWeight": 2,
            "strokeAlign": "OUTSIDE"
        }));
        let (style, bounds) = style_of(&rect, false);
        assert_eq!(style.border_top_color.as_deref(), Some("rgba(0, 0, 0, 1)"));
        assert!((style.border_left_width - 2.0).abs() < f64::EPSILON);
        assert_eq!(
            bounds,
            Bounds {
                x: 8,
                y: 8,
                w: 104,
                h: 54
            }
        );

        let inside = node(json!({
            "type": "RECTANGLE",
            "absoluteBoundingBox": { "x": 10, "y": 10, "width": 100, "height": 50 },
            "strokes": [{ "type": "SOLID", "color": { "r": 0, "g": 0, "b": 0, "a": 1 } }],
            "strokeWeight": 2,
            "strokeAlign": "INSIDE"
        }));
        let (_, bounds) = style_of(&inside, false);
        assert_eq!(bounds.w, 100);
    }

    #[test]
    fn corner_radii_follow_clockwise_order() {
        let rect = node(json!({
            "type": "RECTANGLE",
            "cornerRadius": 4,
            "rectangleCornerRadii": [1, 2, 3, 4]
        }));
        let (style, _) = style_of(&rect, false);
        assert_eq!(style.border_top_left_radius, Some(1.0));
        assert_eq!(style.border_top_right_radius, Some(2.0));
        assert_eq!(style.border_bottom_right_radius, Some(3.0));
        assert_eq!(style.border_bottom_left_radius, Some(4.0));
    }

    #[test]
    fn first_matching_effect_becomes_shadow() {
        let rect = node(json!({
            "type": "RECTANGLE",
            "effects": [{
                "type": "INNER_SHADOW",
                "color": { "r": 0, "g": 0, "b": 0, "a": 0.25 },
                "offset": { "x": 1, "y": 3 },
                "radius": 6
            }]
        }));
        let (style, _) = style_of(&rect, false);
        let shadow = style.box_shadow.expect("shadow");
        assert!(shadow.i);
        assert_eq!(shadow.c, "rgba(0, 0, 0, 0.25)");
        assert!((shadow.v - 3.0).abs() < f64::EPSILON);
        assert!((shadow.h - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn typography_uses_fractional_line_height() {
        let text = node(json!({
            "type": "TEXT",
            "style": {
                "fontSize": 16,
                "fontWeight": 700,
                "lineHeightPercent": 125,
                "letterSpacing": 0.5,
                "textAlignHorizontal": "CENTER",
                "textAlignVertical": "TOP"
            }
        }));
        let (style, _) = style_of(&text, false);
        assert_eq!(style.font_size, Some(16.0));
        assert_eq!(style.line_height, Some(1.25));
        assert_eq!(style.text_align.as_deref(), Some("center"));
        assert_eq!(style.vertical_align, Some(VerticalAlign::Top));

        let (vector, _) = style_of(&text, true);
        assert_eq!(vector.font_size, None);
    }

    #[test]
    fn stretched_label_is_vertically_centered_unless_bottom() {
        let stretched = node(json!({
            "type": "TEXT",
            "constraints": { "vertical": "TOP_BOTTOM", "horizontal": "LEFT" },
            "style": { "textAlignVertical": "TOP" }
        }));
        let (style, _) = style_of(&stretched, false);
        assert_eq!(style.vertical_align, Some(VerticalAlign::Middle));

        let bottom = node(json!({
            "type": "TEXT",
            "constraints": { "vertical": "TOP_BOTTOM" },
            "style": { "textAlignVertical": "BOTTOM" }
        }));
        let (style, _) = style_of(&bottom, false);
        assert_eq!(style.vertical_align, Some(VerticalAlign::Bottom));
    }

    #[test]
    fn props_carry_label_vector_and_constraints() {
        let text = node(json!({
            "type": "TEXT",
            "name": "Title",
            "characters": "Hello",
            "constraints": { "horizontal": "RIGHT" }
        }));
        let props = compute_props(&text, &WidgetType::Label);
        assert_eq!(props.label.as_deref(), Some("Hello"));
        let resize = props.resize.expect("resize");
        assert!(resize.right && !resize.left && !resize.up);

        let unnamed = node(json!({ "type": "TEXT", "name": "Fallback" }));
        assert_eq!(
            compute_props(&unnamed, &WidgetType::Label).label.as_deref(),
            Some("Fallback")
        );

        let vector = node(json!({ "type": "VECTOR", "strokeGeometry": [{ "path": "M0 0" }] }));
        let props = compute_props(&vector, &WidgetType::Vector);
        assert!(props.is_vector);
        assert_eq!(props.paths, Some(json!([{ "path": "M0 0" }])));
        assert!(props.label.is_none());
    }
}
