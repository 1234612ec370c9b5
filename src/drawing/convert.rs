use super::{Drawing, Placement};
use crate::error::Error;
use crate::tree::{Element, NodeId, Tree};

/// Children an inline and an anchor have in common, in schema order.
const SHARED: [&str; 5] = [
    "wp:extent",
    "wp:effectExtent",
    "wp:docPr",
    "wp:cNvGraphicFramePr",
    "a:graphic",
];

fn shared_nodes(tree: &Tree, container: NodeId) -> Option<Vec<NodeId>> {
    SHARED
        .iter()
        .map(|name| tree.first_child(container, name))
        .collect()
}

fn with_zero_distances(element: Element) -> Element {
    element
        .attr("distT", 0)
        .attr("distB", 0)
        .attr("distL", 0)
        .attr("distR", 0)
}

/// Anchor defaults: overlapping allowed, in front of text, top-left of the margin.
fn anchor_shell() -> Element {
    with_zero_distances(Element::new("wp:anchor"))
        .attr("simplePos", 0)
        .attr("relativeHeight", 0)
        .attr("behindDoc", 0)
        .attr("locked", 0)
        .attr("layoutInCell", 0)
        .attr("allowOverlap", 1)
        .child(Element::new("wp:simplePos").attr("x", 0).attr("y", 0))
        .child(
            Element::new("wp:positionH")
                .attr("relativeFrom", "margin")
                .child(Element::new("wp:align").text("left")),
        )
        .child(
            Element::new("wp:positionV")
                .attr("relativeFrom", "margin")
                .child(Element::new("wp:align").text("top")),
        )
}

pub(super) fn inline_shell() -> Element {
    with_zero_distances(Element::new("wp:inline"))
}

impl<'a> Drawing<'a> {
    /// Replaces `source` with `target`, moving the shared children across.
    fn transplant(&mut self, source: NodeId, shared: Vec<NodeId>, target: Element, mut wrap: Option<Element>) {
        let id = self.id;
        let tree = self.tree_mut();
        let target = tree.import(target);
        for (i, node) in shared.into_iter().enumerate() {
            tree.append_child(target, node);
            if i == 1
                && let Some(wrap) = wrap.take()
            {
                let wrap = tree.import(wrap);
                tree.append_child(target, wrap);
            }
        }
        let index = tree.index_of(id, source).unwrap_or(0);
        tree.insert_child(id, index, target);
        tree.remove(source);
    }

    /// Turns an inline drawing into a floating one with default anchor
    /// settings. No-op when already anchored or when the inline is malformed.
    pub fn to_anchored(mut self) -> Result<Self, Error> {
        let Placement::Inline(inline) = self.placement() else {
            return Ok(self);
        };
        let Some(shared) = shared_nodes(self.tree(), inline) else {
            log::warn!("Inline drawing is missing extent, docPr or graphic, leaving it inline");
            return Ok(self);
        };
        let wrap = Element::new("wp:wrapSquare").attr("wrapText", "bothSides");
        self.transplant(inline, shared, anchor_shell(), Some(wrap));
        log::debug!("Drawing {:?} anchored", self.id);
        Ok(self)
    }

    /// Turns a floating drawing back into an inline one, dropping position,
    /// wrapping and behavior settings.
    pub fn to_inlined(mut self) -> Result<Self, Error> {
        let Placement::Anchored(anchor) = self.placement() else {
            return Ok(self);
        };
        let Some(shared) = shared_nodes(self.tree(), anchor) else {
            log::warn!("Anchored drawing is missing extent, docPr or graphic, leaving it anchored");
            return Ok(self);
        };
        self.transplant(anchor, shared, inline_shell(), None);
        log::debug!("Drawing {:?} inlined", self.id);
        Ok(self)
    }
}
