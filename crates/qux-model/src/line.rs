//! Navigation edges between widgets and screens.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Event a line fires on unless an importer says otherwise.
pub const DEFAULT_LINE_EVENT: &str = "click";

/// A click-triggered screen transition.
///
/// `figma_from`/`figma_to` hold source ids recorded during the walk;
/// `from`/`to` stay `None` until the document-wide resolution pass, and stay
/// `None` afterwards when the source id has no generated counterpart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub figma_from: String,
    pub figma_to: String,
    pub points: Vec<LinePoint>,
    pub event: SmolStr,
    pub animation: String,
    pub duration: Option<f64>,
}

/// Bend point of a line; not produced by the importer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub x: i64,
    pub y: i64,
}

impl Line {
    pub fn new(id: String, figma_from: String, figma_to: String, duration: Option<f64>) -> Self {
        Self {
            id,
            from: None,
            to: None,
            figma_from,
            figma_to,
            points: Vec::new(),
            event: SmolStr::new(DEFAULT_LINE_EVENT),
            animation: String::new(),
            duration,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }
}
