//! Plugin metadata overlays.
//!
//! The raw annotation bag is decoded once into an [`Overlay`]; applying it to
//! a widget never looks at strings again.

#![allow(missing_docs)]

use qux_model::{
    Breakpoints, Callbacks, DataBinding, Resize, Screen, Style, StyleDelta, Widget, WidgetProps,
    WidgetType,
};
use smol_str::SmolStr;
use tracing::trace;

use crate::node::PluginData;

/// Generic container type whose concrete kind lives in a second annotation.
pub const SMART_CONTAINER: &str = "SmartContainer";

/// Typed view of one node's plugin annotations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    pub widget_type: Option<WidgetType>,
    pub custom_component: Option<String>,
    pub databinding: DataBinding,
    pub callbacks: Callbacks,
    pub hover: StyleDelta,
    pub focus: StyleDelta,
    pub fixed_horizontal: bool,
    pub fixed_vertical: bool,
    pub start_screen: bool,
    pub overlay_screen: bool,
    pub overlay_background: bool,
    pub breakpoints: Breakpoints,
}

fn text(value: Option<&String>) -> Option<String> {
    value.filter(|value| !value.is_empty()).cloned()
}

fn flag(value: Option<&String>) -> bool {
    value.is_some_and(|value| value == "true")
}

impl From<&PluginData> for Overlay {
    fn from(data: &PluginData) -> Self {
        let widget_type = text(data.qux_type.as_ref()).map(|base| {
            match text(data.qux_smart_container_type.as_ref()) {
                Some(sub_type) if base == SMART_CONTAINER => WidgetType::from(SmolStr::new(sub_type)),
                _ => WidgetType::from(SmolStr::new(base)),
            }
        });
        Self {
            widget_type,
            custom_component: text(data.qux_type_custom.as_ref()),
            databinding: DataBinding {
                default: text(data.qux_data_binding_default.as_ref()),
                output: text(data.qux_data_binding_output.as_ref()),
            },
            callbacks: Callbacks {
                click: text(data.qux_on_click_callback.as_ref()),
                load: text(data.qux_on_load_callback.as_ref()),
                change: text(data.qux_on_change_callback.as_ref()),
            },
            hover: StyleDelta {
                background: text(data.qux_style_hover_background.as_ref()),
                border_color: text(data.qux_style_hover_border.as_ref()),
                color: text(data.qux_style_hover_color.as_ref()),
            },
            focus: StyleDelta {
                background: text(data.qux_style_focus_background.as_ref()),
                border_color: text(data.qux_style_focus_border.as_ref()),
                color: text(data.qux_style_focus_color.as_ref()),
            },
            fixed_horizontal: flag(data.qux_fixed_horizontal.as_ref()),
            fixed_vertical: flag(data.qux_fixed_vertical.as_ref()),
            start_screen: flag(data.qux_start_screen.as_ref()),
            overlay_screen: flag(data.qux_overlay_screen.as_ref()),
            overlay_background: flag(data.qux_has_overlay_background.as_ref()),
            breakpoints: Breakpoints {
                mobile: flag(data.qux_breakpoint_mobile.as_ref()),
                tablet: flag(data.qux_breakpoint_tablet.as_ref()),
                desktop: flag(data.qux_breakpoint_desktop.as_ref()),
            },
        }
    }
}

/// Applies `overlay` to a widget and returns it.
pub fn apply_overlay(overlay: &Overlay, mut widget: Widget) -> Widget {
    override_type(overlay, &widget.id, &mut widget.widget_type, &mut widget.props);
    merge_delta(&mut widget.hover, &overlay.hover);
    merge_delta(&mut widget.focus, &overlay.focus);
    apply_shared(overlay, &mut widget.props, &mut widget.style);
    widget
}

/// Applies `overlay` to a screen, including the screen-only flags.
pub fn apply_screen_overlay(overlay: &Overlay, screen: &mut Screen) {
    override_type(overlay, &screen.id, &mut screen.widget_type, &mut screen.props);
    merge_delta(&mut screen.hover, &overlay.hover);
    merge_delta(&mut screen.focus, &overlay.focus);
    apply_shared(overlay, &mut screen.props, &mut screen.style);
}

fn override_type(overlay: &Overlay, id: &str, target: &mut WidgetType, props: &mut WidgetProps) {
    if let Some(widget_type) = &overlay.widget_type {
        trace!(element = id, %widget_type, "type override");
        *target = widget_type.clone();
        props.placeholder = true;
    }
}

fn apply_shared(overlay: &Overlay, props: &mut WidgetProps, style: &mut Style) {
    if let Some(component) = &overlay.custom_component {
        props.custom_component = Some(component.clone());
    }

    if overlay.databinding != DataBinding::default() {
        let binding = props.databinding.get_or_insert_with(DataBinding::default);
        if let Some(default) = &overlay.databinding.default {
            binding.default = Some(default.clone());
        }
        if let Some(output) = &overlay.databinding.output {
            binding.output = Some(output.clone());
        }
    }

    if overlay.callbacks != Callbacks::default() {
        let callbacks = props.callbacks.get_or_insert_with(Callbacks::default);
        if let Some(click) = &overlay.callbacks.click {
            callbacks.click = Some(click.clone());
        }
        if let Some(load) = &overlay.callbacks.load {
            callbacks.load = Some(load.clone());
        }
        if let Some(change) = &overlay.callbacks.change {
            callbacks.change = Some(change.clone());
        }
    }

    if overlay.fixed_horizontal {
        props.resize.get_or_insert_with(Resize::default).fixed_horizontal = true;
    }
    if overlay.fixed_vertical {
        props.resize.get_or_insert_with(Resize::default).fixed_vertical = true;
    }

    if overlay.start_screen {
        props.start = true;
    }
    if overlay.overlay_screen {
        style.overlay = true;
    }
    if overlay.overlay_background {
        style.has_background = true;
    }

    if overlay.breakpoints != Breakpoints::default() {
        let breakpoints = props.breakpoints.get_or_insert_with(Breakpoints::default);
        breakpoints.mobile |= overlay.breakpoints.mobile;
        breakpoints.tablet |= overlay.breakpoints.tablet;
        breakpoints.desktop |= overlay.breakpoints.desktop;
    }
}

fn merge_delta(target: &mut Option<StyleDelta>, delta: &StyleDelta) {
    if delta.is_empty() {
        return;
    }
    let target = target.get_or_insert_with(StyleDelta::default);
    if let Some(background) = &delta.background {
        target.background = Some(background.clone());
    }
    if let Some(border_color) = &delta.border_color {
        target.border_color = Some(border_color.clone());
    }
    if let Some(color) = &delta.color {
        target.color = Some(color.clone());
    }
}
