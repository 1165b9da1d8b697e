//! Tooltip presenter.
//!
//! One shared copy tooltip floats above the card it reports on; side
//! navigation items have their own hover tooltips. Layout comes from the
//! [`Geometry`] collaborator, and positions are written to the node's
//! `style` attribute. Timing is owned by the page's scheduler.

use crate::dom::{Document, NodeId};
use std::collections::HashMap;

/// Distance kept from every viewport edge.
const EDGE_MARGIN: f64 = 10.0;
/// Gap between the copy tooltip and its anchor.
const ANCHOR_GAP: f64 = 10.0;
/// Horizontal offset of nav tooltips from their item.
const NAV_OFFSET: f64 = 15.0;
const PARKED_LEFT: &str = "-9999px";

// ============================================================================
// Geometry
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Layout collaborator: where a node currently sits in the viewport.
pub trait Geometry {
    fn bounding_rect(&self, doc: &Document, node: NodeId) -> Rect;
}

/// Geometry with explicitly assigned rectangles; unknown nodes get the
/// fallback rectangle.
#[derive(Debug, Clone, Default)]
pub struct FixedGeometry {
    rects: HashMap<NodeId, Rect>,
    fallback: Rect,
}

impl FixedGeometry {
    pub fn new(fallback: Rect) -> Self {
        Self {
            rects: HashMap::new(),
            fallback,
        }
    }

    pub fn set(&mut self, node: NodeId, rect: Rect) {
        self.rects.insert(node, rect);
    }
}

impl Geometry for FixedGeometry {
    fn bounding_rect(&self, _doc: &Document, node: NodeId) -> Rect {
        self.rects.get(&node).copied().unwrap_or(self.fallback)
    }
}

/// Center `size` above `target`, clamped inside the viewport.
pub fn position_above(target: Rect, size: Rect, viewport: Viewport) -> (f64, f64) {
    let centered = target.left + target.width / 2.0 - size.width / 2.0;
    let left = centered
        .min(viewport.width - size.width - EDGE_MARGIN)
        .max(EDGE_MARGIN);
    let top = (target.top - size.height - ANCHOR_GAP)
        .min(viewport.height - size.height - EDGE_MARGIN)
        .max(EDGE_MARGIN);
    (left, top)
}

// ============================================================================
// Copy Tooltip
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipKind {
    Success,
    Warning,
    Error,
    Info,
}

impl TooltipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TooltipKind::Success => "success",
            TooltipKind::Warning => "warning",
            TooltipKind::Error => "error",
            TooltipKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tooltip {
    pub element: NodeId,
    class: String,
    message: String,
    kind: Option<TooltipKind>,
    anchor: Option<NodeId>,
    position: Option<(f64, f64)>,
}

impl Tooltip {
    /// Append the tooltip element to the document root.
    pub fn create(doc: &mut Document, class: &str) -> Self {
        let root = doc.root();
        let element = doc.create_element(root, "div");
        doc.add_class(element, class);
        doc.set_attr(element, "role", "status");
        Self {
            element,
            class: class.to_string(),
            message: String::new(),
            kind: None,
            anchor: None,
            position: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> Option<TooltipKind> {
        self.kind
    }

    pub fn anchor(&self) -> Option<NodeId> {
        self.anchor
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        self.position
    }

    pub fn is_visible(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn show(
        &mut self,
        doc: &mut Document,
        geometry: &dyn Geometry,
        viewport: Viewport,
        message: &str,
        kind: TooltipKind,
        anchor: NodeId,
    ) {
        self.message = message.to_string();
        self.kind = Some(kind);
        self.anchor = Some(anchor);
        doc.set_classes(self.element, &[self.class.as_str(), kind.as_str(), "show"]);
        doc.set_text_content(self.element, message);
        self.reposition(doc, geometry, viewport);
    }

    pub fn hide(&mut self, doc: &mut Document) {
        doc.remove_class(self.element, "show");
        self.anchor = None;
    }

    /// Follow the anchor after a layout change. No-op while hidden.
    pub fn reposition(&mut self, doc: &mut Document, geometry: &dyn Geometry, viewport: Viewport) {
        let Some(anchor) = self.anchor else {
            return;
        };
        let target = geometry.bounding_rect(doc, anchor);
        let size = geometry.bounding_rect(doc, self.element);
        let (left, top) = position_above(target, size, viewport);
        self.position = Some((left, top));
        doc.set_attr(
            self.element,
            "style",
            &format!("transform: translate3d({}px, {}px, 0); left: 0; top: 0", left, top),
        );
    }
}

// ============================================================================
// Nav Tooltips
// ============================================================================

/// Hover tooltips of the side navigation. Only one is visible at a time.
#[derive(Debug, Clone, Default)]
pub struct NavTooltips {
    active: Option<NodeId>,
    pending: Option<(NodeId, NodeId)>,
}

impl NavTooltips {
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    /// Pointer entered `item`; the tooltip shows once the delay elapses.
    pub fn enter(&mut self, doc: &mut Document, item: NodeId, tooltip: NodeId) {
        if let Some(previous) = self.active.filter(|&t| t != tooltip) {
            doc.remove_class(previous, "visible");
        }
        self.active = Some(tooltip);
        self.pending = Some((item, tooltip));
    }

    /// The show delay elapsed: place the pending tooltip and reveal it.
    pub fn show_pending(&mut self, doc: &mut Document, geometry: &dyn Geometry, viewport: Viewport) {
        let Some((item, tooltip)) = self.pending.take() else {
            return;
        };
        if self.active != Some(tooltip) {
            return;
        }
        let item_rect = geometry.bounding_rect(doc, item);
        let tip = geometry.bounding_rect(doc, tooltip);

        let mut top = item_rect.top + item_rect.height / 2.0 - tip.height / 2.0;
        if top < EDGE_MARGIN {
            top = EDGE_MARGIN;
        } else if top + tip.height > viewport.height - EDGE_MARGIN {
            top = viewport.height - tip.height - EDGE_MARGIN;
        }
        let left = item_rect.right() + NAV_OFFSET;

        doc.set_attr(tooltip, "style", &format!("left: {}px; top: {}px", left, top));
        doc.add_class(tooltip, "visible");
    }

    /// Hide `tooltip`; it is parked once the fade-out ends.
    pub fn leave(&mut self, doc: &mut Document, tooltip: NodeId) {
        doc.remove_class(tooltip, "visible");
        if self.pending.is_some_and(|(_, t)| t == tooltip) {
            self.pending = None;
        }
        if self.active == Some(tooltip) {
            self.active = None;
        }
    }

    /// Move a tooltip that stayed hidden out of view.
    pub fn park(&self, doc: &mut Document, tooltip: NodeId) {
        if doc.has_class(tooltip, "visible") {
            return;
        }
        let top = style_value(doc.attr(tooltip, "style").unwrap_or(""), "top");
        let style = match top {
            Some(top) => format!("left: {}; top: {}", PARKED_LEFT, top),
            None => format!("left: {}", PARKED_LEFT),
        };
        doc.set_attr(tooltip, "style", &style);
    }

    /// Follow the pointer vertically, staying within the item.
    pub fn follow(
        &self,
        doc: &mut Document,
        geometry: &dyn Geometry,
        item: NodeId,
        tooltip: NodeId,
        pointer_y: f64,
    ) {
        if !doc.has_class(tooltip, "visible") {
            return;
        }
        let item_rect = geometry.bounding_rect(doc, item);
        let tip = geometry.bounding_rect(doc, tooltip);
        let top = (pointer_y - tip.height / 2.0)
            .min(item_rect.bottom() - tip.height)
            .max(item_rect.top);
        let left = style_value(doc.attr(tooltip, "style").unwrap_or(""), "left")
            .unwrap_or_else(|| format!("{}px", item_rect.right() + NAV_OFFSET));
        doc.set_attr(tooltip, "style", &format!("left: {}; top: {}px", left, top));
    }
}

/// Value of one declaration in an inline style string.
fn style_value(style: &str, property: &str) -> Option<String> {
    style.split(';').find_map(|decl| {
        let (name, value) = decl.split_once(':')?;
        (name.trim() == property).then(|| value.trim().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            width: 800.0,
            height: 600.0,
        }
    }

    #[test]
    fn test_position_centers_above_target() {
        let target = Rect::new(300.0, 200.0, 200.0, 50.0);
        let size = Rect::new(0.0, 0.0, 100.0, 20.0);
        assert_eq!(position_above(target, size, viewport()), (350.0, 170.0));
    }

    #[test]
    fn test_position_clamps_to_viewport() {
        let size = Rect::new(0.0, 0.0, 100.0, 20.0);
        // near the left and top edges
        let target = Rect::new(0.0, 5.0, 40.0, 20.0);
        assert_eq!(position_above(target, size, viewport()), (10.0, 10.0));
        // near the right edge
        let target = Rect::new(780.0, 300.0, 40.0, 20.0);
        assert_eq!(position_above(target, size, viewport()), (690.0, 270.0));
        // far below the fold
        let target = Rect::new(300.0, 2000.0, 200.0, 20.0);
        assert_eq!(position_above(target, size, viewport()).1, 570.0);
    }

    #[test]
    fn test_show_and_hide() {
        let mut doc = Document::new();
        let root = doc.root();
        let card = doc.create_element(root, "div");
        let mut tooltip = Tooltip::create(&mut doc, "copy-tooltip");
        let mut geometry = FixedGeometry::new(Rect::new(0.0, 0.0, 100.0, 20.0));
        geometry.set(card, Rect::new(300.0, 200.0, 200.0, 50.0));

        tooltip.show(&mut doc, &geometry, viewport(), "Copied", TooltipKind::Success, card);
        assert!(tooltip.is_visible());
        assert_eq!(doc.text_content(tooltip.element), "Copied");
        assert!(doc.has_class(tooltip.element, "success"));
        assert!(doc.has_class(tooltip.element, "show"));
        assert_eq!(tooltip.position(), Some((350.0, 170.0)));

        tooltip.show(&mut doc, &geometry, viewport(), "Oops", TooltipKind::Error, card);
        assert!(!doc.has_class(tooltip.element, "success"));
        assert!(doc.has_class(tooltip.element, "error"));

        tooltip.hide(&mut doc);
        assert!(!tooltip.is_visible());
        assert!(!doc.has_class(tooltip.element, "show"));
        assert!(doc.has_class(tooltip.element, "copy-tooltip"));
    }

    #[test]
    fn test_nav_tooltip_lifecycle() {
        let mut doc = Document::new();
        let root = doc.root();
        let item = doc.create_element(root, "div");
        let tip = doc.create_element(item, "span");
        let mut geometry = FixedGeometry::new(Rect::new(0.0, 0.0, 80.0, 20.0));
        geometry.set(item, Rect::new(0.0, 100.0, 50.0, 40.0));

        let mut nav = NavTooltips::default();
        nav.enter(&mut doc, item, tip);
        assert!(!doc.has_class(tip, "visible"));
        nav.show_pending(&mut doc, &geometry, viewport());
        assert!(doc.has_class(tip, "visible"));
        assert_eq!(doc.attr(tip, "style"), Some("left: 65px; top: 110px"));

        nav.follow(&mut doc, &geometry, item, tip, 200.0);
        assert_eq!(doc.attr(tip, "style"), Some("left: 65px; top: 120px"));

        nav.leave(&mut doc, tip);
        assert_eq!(nav.active(), None);
        nav.park(&mut doc, tip);
        assert_eq!(doc.attr(tip, "style"), Some("left: -9999px; top: 120px"));
    }

    #[test]
    fn test_nav_tooltip_clamped_to_viewport_bottom() {
        let mut doc = Document::new();
        let root = doc.root();
        let item = doc.create_element(root, "div");
        let tip = doc.create_element(item, "span");
        let mut geometry = FixedGeometry::new(Rect::new(0.0, 0.0, 80.0, 40.0));
        geometry.set(item, Rect::new(0.0, 590.0, 50.0, 20.0));

        let mut nav = NavTooltips::default();
        nav.enter(&mut doc, item, tip);
        nav.show_pending(&mut doc, &geometry, viewport());
        assert_eq!(doc.attr(tip, "style"), Some("left: 65px; top: 550px"));
    }
}
