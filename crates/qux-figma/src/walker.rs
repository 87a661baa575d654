//! Tree walk from the source scene graph to the widget model.

use qux_model::{Capabilities, Document, Line, Screen, Widget, WidgetProps, WidgetType};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace, warn};

use crate::config::ImportConfig;
use crate::geometry::{compute_bounds, sanitize_name};
use crate::node::{FileResponse, Node};
use crate::overlay::{apply_overlay, apply_screen_overlay, Overlay};
use crate::style::{classify, compute_props, compute_style, StyleTarget};

/// Nodes nested deeper than this below their screen are not visited.
pub const MAX_WALK_DEPTH: usize = 256;

/// Parent links and pin flags of the source tree, built once before the walk.
#[derive(Debug, Default)]
pub struct SourceIndex {
    parents: FxHashMap<String, String>,
    pinned: FxHashSet<String>,
    duplicates: FxHashSet<String>,
}

impl SourceIndex {
    /// Indexes `root` and everything below it. The first occurrence of a
    /// repeated id wins.
    pub fn build(root: &Node) -> Self {
        let mut index = Self::default();
        let mut seen = FxHashSet::default();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if !seen.insert(node.id.as_str()) {
                index.duplicates.insert(node.id.clone());
                continue;
            }
            if node.is_fixed {
                index.pinned.insert(node.id.clone());
            }
            for child in node.children.iter().rev() {
                index
                    .parents
                    .entry(child.id.clone())
                    .or_insert_with(|| node.id.clone());
                stack.push(child);
            }
        }
        index
    }

    /// Source id of the node's parent.
    pub fn parent(&self, id: &str) -> Option<&str> {
        self.parents.get(id).map(String::as_str)
    }

    /// Source ids from the direct parent up to the root.
    pub fn ancestors<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        std::iter::successors(self.parent(id), |current| self.parent(current))
            .take(MAX_WALK_DEPTH)
    }

    /// The node or one of its ancestors is pinned.
    pub fn is_fixed(&self, id: &str) -> bool {
        self.pinned.contains(id) || self.ancestors(id).any(|ancestor| self.pinned.contains(ancestor))
    }

    /// Number of ids seen more than once.
    pub fn duplicates(&self) -> usize {
        self.duplicates.len()
    }
}

/// Walks every page's top-level frames and resolves navigation lines.
pub fn build_document(key: &str, file: &FileResponse, config: &ImportConfig) -> Document {
    let index = SourceIndex::build(&file.document);
    if index.duplicates() > 0 {
        warn!(count = index.duplicates(), "source tree repeats node ids");
    }
    let mut walker = Walker {
        config,
        index,
        doc: Document::new(key, file.name.as_str()),
        visited: FxHashSet::default(),
    };
    for page in &file.document.children {
        for screen in &page.children {
            walker.screen(screen);
        }
    }
    let mut doc = walker.doc;
    resolve_lines(&mut doc);
    doc
}

/// Rewrites every line's `from`/`to` from source ids to generated ids.
///
/// Origins are looked up among widgets, destinations among screens.
/// References without a match stay `None`.
pub fn resolve_lines(doc: &mut Document) {
    let widgets: FxHashMap<&str, &str> = doc
        .widgets
        .values()
        .map(|widget| (widget.figma_id.as_str(), widget.id.as_str()))
        .collect();
    let screens: FxHashMap<&str, &str> = doc
        .screens
        .values()
        .map(|screen| (screen.figma_id.as_str(), screen.id.as_str()))
        .collect();
    for line in doc.lines.values_mut() {
        line.from = widgets.get(line.figma_from.as_str()).map(|id| (*id).to_string());
        line.to = screens.get(line.figma_to.as_str()).map(|id| (*id).to_string());
        if !line.is_resolved() {
            debug!(
                line = %line.id,
                from = %line.figma_from,
                to = %line.figma_to,
                "navigation line left unresolved"
            );
        }
    }
}

struct Walker<'a> {
    config: &'a ImportConfig,
    index: SourceIndex,
    doc: Document,
    visited: FxHashSet<String>,
}

struct ScreenScope {
    id: String,
    children: Vec<String>,
}

impl Walker<'_> {
    fn screen(&mut self, node: &Node) {
        let id = format!("s{}", self.doc.next_id());
        debug!(screen = %id, name = %node.name, "walking screen");
        self.visited.insert(node.id.clone());

        let mut bounds = compute_bounds(node);
        let target = StyleTarget {
            is_label: false,
            is_vector: classify(node, self.config.all_as_vector) == WidgetType::Vector,
            fixed: self.index.is_fixed(&node.id),
        };
        let style = compute_style(node, target, &mut bounds);
        let mut screen = Screen {
            id: id.clone(),
            figma_id: node.id.clone(),
            name: node.name.clone(),
            widget_type: WidgetType::Screen,
            bounds,
            style,
            children: Vec::new(),
            props: WidgetProps::default(),
            hover: None,
            focus: None,
        };
        if let Some(data) = node.plugin_data(&self.config.plugin_id) {
            let overlay = Overlay::from(data);
            apply_screen_overlay(&overlay, &mut screen);
            if overlay.start_screen {
                self.doc.start_screen.clone_from(&id);
            }
        }

        let mut scope = ScreenScope {
            id,
            children: Vec::new(),
        };
        let parent = scope.id.clone();
        for child in &node.children {
            self.element(child, &parent, &mut scope, 1);
        }
        screen.children = scope.children;
        self.doc.insert_screen(screen);
    }

    fn element(&mut self, node: &Node, parent_id: &str, scope: &mut ScreenScope, depth: usize) {
        if depth > MAX_WALK_DEPTH {
            warn!(node = %node.id, depth, "maximum nesting depth reached, subtree skipped");
            return;
        }
        if !node.id.is_empty() && !self.visited.insert(node.id.clone()) {
            warn!(node = %node.id, name = %node.name, "node already visited, skipped");
            return;
        }

        let skipped = self.config.is_ignored_type(&node.node_type) || node.is_hidden();
        let (next_parent, flattened) = if skipped {
            trace!(node = %node.id, kind = %node.node_type, "node skipped");
            let is_vector = classify(node, self.config.all_as_vector) == WidgetType::Vector;
            (parent_id.to_string(), is_vector)
        } else {
            let (id, is_vector) = self.widget(node, parent_id);
            if parent_id == scope.id {
                scope.children.push(id.clone());
            }
            (id, is_vector)
        };

        if flattened {
            if !node.children.is_empty() {
                trace!(node = %node.id, children = node.children.len(), "vector subtree flattened");
            }
        } else {
            for child in &node.children {
                self.element(child, &next_parent, scope, depth + 1);
            }
        }

        self.record_line(node);
    }

    /// Creates the widget for an accepted node. Returns its id and whether it
    /// renders as a vector.
    fn widget(&mut self, node: &Node, parent_id: &str) -> (String, bool) {
        let id = format!("w{}", self.doc.next_id());
        let z = self.doc.next_layer();
        let widget_type = classify(node, self.config.all_as_vector);
        let is_vector = widget_type == WidgetType::Vector;

        let mut bounds = compute_bounds(node);
        let target = StyleTarget::for_widget(&widget_type, self.index.is_fixed(&node.id));
        let style = compute_style(node, target, &mut bounds);
        let props = compute_props(node, &widget_type);

        let mut widget = Widget {
            id: id.clone(),
            parent_id: parent_id.to_string(),
            figma_id: node.id.clone(),
            name: sanitize_name(&node.name),
            has: Capabilities::for_type(&widget_type),
            widget_type,
            figma_type: node.node_type.clone(),
            bounds,
            z,
            style,
            props,
            hover: None,
            focus: None,
        };
        if let Some(data) = node.plugin_data(&self.config.plugin_id) {
            widget = apply_overlay(&Overlay::from(data), widget);
        }
        trace!(widget = %id, kind = %widget.widget_type, z, "widget created");
        self.doc.insert_widget(widget);
        (id, is_vector)
    }

    fn record_line(&mut self, node: &Node) {
        let Some(target) = node
            .transition_node_id
            .as_deref()
            .filter(|target| !target.is_empty())
        else {
            return;
        };
        let origin = self.first_non_ignored(node);
        let id = format!("l{}", self.doc.next_id());
        debug!(line = %id, from = %origin.id, to = %target, "navigation line recorded");
        self.doc.insert_line(Line::new(
            id,
            origin.id.clone(),
            target.to_string(),
            node.transition_duration,
        ));
    }

    /// Descends through ignored wrappers along first children.
    fn first_non_ignored<'n>(&self, node: &'n Node) -> &'n Node {
        let mut current = node;
        while self.config.is_ignored_type(&current.node_type) {
            match current.children.first() {
                Some(child) => current = child,
                None => break,
            }
        }
        current
    }
}
