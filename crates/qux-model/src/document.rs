//! Document header, registries and counters.

#![allow(missing_docs)]

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smol_str::SmolStr;

use crate::line::Line;
use crate::widget::{Screen, Widget};

pub const DOCUMENT_VERSION: f64 = 2.1;
/// First value handed out by [`Document::next_id`].
pub const FIRST_GENERATED_ID: u64 = 10_000;
const INITIAL_LAYER: u32 = 1;
const DEFAULT_DEVICE_TYPE: &str = "smartphone";

/// Largest screen extent seen so far. `None` until the first screen lands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub w: Option<i64>,
    pub h: Option<i64>,
}

impl ScreenSize {
    pub fn widen(&mut self, w: i64, h: i64) {
        self.w = Some(self.w.map_or(w, |current| current.max(w)));
        self.h = Some(self.h.map_or(h, |current| current.max(h)));
    }
}

/// Editor grid settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub w: u32,
    pub h: u32,
    pub style: String,
    pub color: String,
    pub visible: bool,
    pub enabled: bool,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            w: 8,
            h: 8,
            style: "line".to_string(),
            color: "#cecece".to_string(),
            visible: false,
            enabled: false,
        }
    }
}

/// Translation result: header data plus flat registries keyed by generated id.
///
/// Every registry key equals the `id` of the record stored under it; use the
/// `insert_*` helpers to keep that true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub version: f64,
    pub figma_id: String,
    pub name: String,
    pub description: String,
    pub screen_size: ScreenSize,
    #[serde(rename = "type")]
    pub device_type: SmolStr,
    pub screens: IndexMap<String, Screen>,
    pub widgets: IndexMap<String, Widget>,
    pub lines: IndexMap<String, Line>,
    pub groups: IndexMap<String, Value>,
    #[serde(rename = "lastUUID")]
    pub last_uuid: u64,
    pub last_z: u32,
    pub last_update: u64,
    pub created: u64,
    pub start_screen: String,
    pub grid: Grid,
}

impl Document {
    pub fn new(figma_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            figma_id: figma_id.into(),
            name: name.into(),
            description: String::new(),
            screen_size: ScreenSize::default(),
            device_type: SmolStr::new(DEFAULT_DEVICE_TYPE),
            screens: IndexMap::new(),
            widgets: IndexMap::new(),
            lines: IndexMap::new(),
            groups: IndexMap::new(),
            last_uuid: FIRST_GENERATED_ID,
            last_z: INITIAL_LAYER,
            last_update: 0,
            created: 0,
            start_screen: String::new(),
            grid: Grid::default(),
        }
    }

    /// Draws the next value of the shared id counter.
    pub fn next_id(&mut self) -> u64 {
        let id = self.last_uuid;
        self.last_uuid += 1;
        id
    }

    /// Draws the next paint layer.
    pub fn next_layer(&mut self) -> u32 {
        self.last_z += 1;
        self.last_z
    }

    pub fn insert_screen(&mut self, screen: Screen) {
        self.screen_size.widen(screen.bounds.w, screen.bounds.h);
        self.screens.insert(screen.id.clone(), screen);
    }

    pub fn insert_widget(&mut self, widget: Widget) {
        self.widgets.insert(widget.id.clone(), widget);
    }

    pub fn insert_line(&mut self, line: Line) {
        self.lines.insert(line.id.clone(), line);
    }

    /// Returns true when every registry key matches the id of its record.
    pub fn registries_consistent(&self) -> bool {
        self.screens.iter().all(|(key, screen)| key == &screen.id)
            && self.widgets.iter().all(|(key, widget)| key == &widget.id)
            && self.lines.iter().all(|(key, line)| key == &line.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn counters_start_at_fixed_offsets() {
        let mut doc = Document::new("file", "Demo");
        assert_eq!(doc.next_id(), 10_000);
        assert_eq!(doc.next_id(), 10_001);
        assert_eq!(doc.next_layer(), 2);
        assert_eq!(doc.next_layer(), 3);
        assert_eq!(doc.last_uuid, 10_002);
    }

    #[test]
    fn screen_size_widens_to_maximum() {
        let mut size = ScreenSize::default();
        assert_eq!(size.w, None);
        size.widen(375, 812);
        size.widen(320, 900);
        assert_eq!(size.w, Some(375));
        assert_eq!(size.h, Some(900));
    }

    #[test]
    fn empty_document_header_serializes_with_defaults() {
        let doc = Document::new("abc", "Shop");
        let json = serde_json::to_string_pretty(&doc).expect("serialize document");
        expect![[r##"
{
  "version": 2.1,
  "figmaId": "abc",
  "name": "Shop",
  "description": "",
  "screenSize": {
    "w": null,
    "h": null
  },
  "type": "smartphone",
  "screens": {},
  "widgets": {},
  "lines": {},
  "groups": {},
  "lastUUID": 10000,
  "lastZ": 1,
  "lastUpdate": 0,
  "created": 0,
  "startScreen": "",
  "grid": {
    "w": 8,
    "h": 8,
    "style": "line",
    "color": "#cecece",
    "visible": false,
    "enabled": false
  }
}"##]]
        .assert_eq(&json);
    }
}
