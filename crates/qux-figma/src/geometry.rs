//! Positions, colors and names.

use qux_model::Bounds;
use tracing::warn;

use crate::node::{Appearance, Color, Node};

/// Absolute box of `node`, rounded to whole pixels.
///
/// A node without an absolute bounding box yields an empty box.
#[allow(clippy::cast_possible_truncation)]
pub fn compute_bounds(node: &Node) -> Bounds {
    let Some(rect) = node.absolute_bounding_box else {
        warn!(node = %node.id, name = %node.name, "node has no absolute bounding box");
        return Bounds::default();
    };
    Bounds {
        x: rect.x.round() as i64,
        y: rect.y.round() as i64,
        w: rect.width.round() as i64,
        h: rect.height.round() as i64,
    }
}

/// Formats `color` as a CSS `rgba()` string.
///
/// Returns an empty string when the element is explicitly invisible. An
/// element opacity below 1 replaces the color's own alpha.
pub fn get_color(color: &Color, element: Appearance) -> String {
    if element.visible == Some(false) {
        return String::new();
    }
    let alpha = element
        .opacity
        .filter(|opacity| *opacity < 1.0)
        .unwrap_or(color.a);
    format!(
        "rgba({}, {}, {}, {})",
        channel(color.r),
        channel(color.g),
        channel(color.b),
        alpha
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Widget name with `#` and `&` dropped and `/` turned into `-`.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter_map(|ch| match ch {
            '#' | '&' => None,
            '/' => Some('-'),
            other => Some(other),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Rect;

    const RED: Color = Color {
        r: 1.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    #[test]
    fn opaque_element_keeps_color_alpha() {
        assert_eq!(get_color(&RED, Appearance::default()), "rgba(255, 0, 0, 1)");
        let full = Appearance {
            visible: Some(true),
            opacity: Some(1.0),
        };
        assert_eq!(get_color(&RED, full), "rgba(255, 0, 0, 1)");
    }

    #[test]
    fn element_opacity_overrides_alpha() {
        let half = Appearance {
            visible: None,
            opacity: Some(0.5),
        };
        assert_eq!(get_color(&RED, half), "rgba(255, 0, 0, 0.5)");
    }

    #[test]
    fn invisible_element_has_no_color() {
        let hidden = Appearance {
            visible: Some(false),
            opacity: None,
        };
        assert_eq!(get_color(&RED, hidden), "");
    }

    #[test]
    fn channels_round_to_nearest() {
        let grey = Color {
            r: 0.5,
            g: 0.2,
            b: 0.999,
            a: 0.25,
        };
        assert_eq!(
            get_color(&grey, Appearance::default()),
            "rgba(128, 51, 255, 0.25)"
        );
    }

    #[test]
    fn bounds_are_rounded() {
        let node = Node {
            absolute_bounding_box: Some(Rect {
                x: 10.4,
                y: -3.6,
                width: 99.6,
                height: 40.0,
            }),
            ..Node::default()
        };
        assert_eq!(
            compute_bounds(&node),
            Bounds {
                x: 10,
                y: -4,
                w: 100,
                h: 40
            }
        );
    }

    #[test]
    fn missing_box_is_empty() {
        assert_eq!(compute_bounds(&Node::default()), Bounds::default());
    }

    #[test]
    fn names_lose_reserved_punctuation() {
        assert_eq!(sanitize_name("#Icons/Home & Back"), "Icons-Home  Back");
    }
}
