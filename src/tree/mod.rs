//! Mutable, arena-backed XML element tree.
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeId`], the same
//! layout `roxmltree` uses for its read-only documents. Element and attribute
//! names are stored qualified (`"w:b"`, `"r:embed"`); the namespace bindings
//! for those prefixes are kept by the part that owns the tree.

mod element;
pub(crate) mod xml;

pub use element::{Content, Element};

/// Slot index plus the slot's generation when the node was allocated. A
/// removed node's id stays dead even after its slot is reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    fn index(self) -> usize {
        self.index as usize
    }
}

#[derive(Clone, Debug)]
enum NodeKind {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Clone, Debug)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    data: Option<NodeData>,
}

#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
}

impl Tree {
    pub fn new(root: Element) -> Self {
        let mut tree = Tree {
            nodes: Vec::new(),
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        };
        tree.root = tree.import(root);
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.data.as_ref())
    }

    fn data_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.data.as_mut())
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let data = NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        };
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.nodes[index as usize];
                slot.generation = slot.generation.wrapping_add(1);
                slot.data = Some(data);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.nodes.push(Slot {
                    generation: 0,
                    data: Some(data),
                });
                NodeId {
                    index: (self.nodes.len() - 1) as u32,
                    generation: 0,
                }
            }
        }
    }

    /// False once the node has been removed, even if its slot was reused.
    pub fn contains(&self, id: NodeId) -> bool {
        self.data(id).is_some()
    }

    /// Element name, `None` for text nodes and removed ids.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        match &self.data(id)?.kind {
            NodeKind::Element { name, .. } => Some(name),
            NodeKind::Text(_) => None,
        }
    }

    pub fn is_element(&self, id: NodeId, name: &str) -> bool {
        self.name(id) == Some(name)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.data(id)?.kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.data(id).map(|d| d.children.as_slice()).unwrap_or(&[])
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |c| self.name(*c).is_some())
    }

    pub fn first_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|c| self.is_element(*c, name))
    }

    pub fn children_named(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.is_element(*c, name))
            .collect()
    }

    pub fn index_of(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|c| *c == child)
    }

    /// Pre-order, `id` itself excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    pub fn descendants_named(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|d| self.is_element(*d, name))
            .collect()
    }

    /// Walks `path` one child name at a time.
    pub fn find_path(&self, id: NodeId, path: &[&str]) -> Option<NodeId> {
        path.iter()
            .try_fold(id, |current, name| self.first_child(current, name))
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.data(id)?.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        match self.data(id).map(|d| &d.kind) {
            Some(NodeKind::Element { attributes, .. }) => attributes,
            _ => &[],
        }
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(NodeKind::Element { attributes, .. }) = self.data_mut(id).map(|d| &mut d.kind) {
            match attributes.iter_mut().find(|(k, _)| k == name) {
                Some(slot) => slot.1 = value,
                None => attributes.push((name.to_string(), value)),
            }
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        let Some(NodeKind::Element { attributes, .. }) = self.data_mut(id).map(|d| &mut d.kind)
        else {
            return None;
        };
        let pos = attributes.iter().position(|(k, _)| k == name)?;
        Some(attributes.remove(pos).1)
    }

    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.alloc(NodeKind::Element {
            name: name.to_string(),
            attributes: Vec::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text(text.to_string()))
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let at = self.child_count(parent);
        self.insert_child(parent, at, child);
    }

    /// Inserts `child` at `index` (clamped), detaching it from any previous parent.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) || parent == child {
            return;
        }
        self.detach(child);
        if let Some(data) = self.data_mut(parent) {
            let index = index.min(data.children.len());
            data.children.insert(index, child);
        }
        if let Some(data) = self.data_mut(child) {
            data.parent = Some(parent);
        }
    }

    /// Unlinks `id` from its parent; the subtree stays allocated.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(data) = self.data_mut(parent) {
            data.children.retain(|c| *c != id);
        }
        if let Some(data) = self.data_mut(id) {
            data.parent = None;
        }
    }

    /// Detaches `id` and frees its whole subtree.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root || !self.contains(id) {
            return;
        }
        self.detach(id);
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if self.data(next).is_none() {
                continue;
            }
            if let Some(data) = self.nodes[next.index()].data.take() {
                stack.extend(data.children);
                self.free.push(next.index);
            }
        }
    }

    pub fn remove_children_named(&mut self, parent: NodeId, name: &str) -> usize {
        let doomed = self.children_named(parent, name);
        for id in &doomed {
            self.remove(*id);
        }
        doomed.len()
    }

    pub fn clear_children(&mut self, parent: NodeId) {
        for id in self.children(parent).to_vec() {
            self.remove(id);
        }
    }

    /// Detached copy of the subtree rooted at `id`.
    pub fn deep_clone(&mut self, id: NodeId) -> Option<NodeId> {
        let element = self.export(id)?;
        Some(self.import(element))
    }

    pub fn export(&self, id: NodeId) -> Option<Element> {
        let data = self.data(id)?;
        let NodeKind::Element { name, attributes } = &data.kind else {
            return None;
        };
        let children = data
            .children
            .iter()
            .filter_map(|c| match &self.data(*c)?.kind {
                NodeKind::Text(text) => Some(Content::Text(text.clone())),
                NodeKind::Element { .. } => self.export(*c).map(Content::Element),
            })
            .collect();
        Some(Element {
            name: name.clone(),
            attributes: attributes.clone(),
            children,
        })
    }

    /// Moves a fragment into the arena as a detached subtree.
    pub fn import(&mut self, element: Element) -> NodeId {
        let id = self.alloc(NodeKind::Element {
            name: element.name,
            attributes: element.attributes,
        });
        for child in element.children {
            let child_id = match child {
                Content::Element(e) => self.import(e),
                Content::Text(t) => self.alloc(NodeKind::Text(t)),
            };
            self.append_child(id, child_id);
        }
        id
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.text(d))
            .collect()
    }

    /// Replaces all children of `id` with a single text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.clear_children(id);
        let t = self.create_text(text);
        self.append_child(id, t);
    }

    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |p| self.parent(*p))
    }

    /// Whether `id` is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == self.root || self.ancestors(id).any(|a| a == self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree {
        Tree::new(
            Element::new("w:body").child(
                Element::new("w:p")
                    .child(Element::new("w:pPr").child(Element::new("w:jc").attr("w:val", "center")))
                    .child(Element::new("w:r").child(Element::new("w:t").text("hello"))),
            ),
        )
    }

    #[test]
    fn lookup_and_attributes() {
        let tree = sample();
        let p = tree.first_child(tree.root(), "w:p").unwrap();
        let jc = tree.find_path(p, &["w:pPr", "w:jc"]).unwrap();
        assert_eq!(tree.attribute(jc, "w:val"), Some("center"));
        assert_eq!(tree.text_content(p), "hello");
        assert_eq!(tree.child_count(p), 2);
    }

    #[test]
    fn remove_frees_slots_for_reuse() {
        let mut tree = sample();
        let p = tree.first_child(tree.root(), "w:p").unwrap();
        let ppr = tree.first_child(p, "w:pPr").unwrap();
        let before = tree.nodes.len();
        tree.remove(ppr);
        assert!(!tree.contains(ppr));
        assert_eq!(tree.child_count(p), 1);
        let fresh = tree.create_element("w:pPr");
        assert_eq!(tree.nodes.len(), before);
        tree.insert_child(p, 0, fresh);
        assert_eq!(tree.children(p)[0], fresh);
    }

    #[test]
    fn stale_ids_do_not_alias_reused_slots() {
        let mut tree = sample();
        let p = tree.first_child(tree.root(), "w:p").unwrap();
        let ppr = tree.first_child(p, "w:pPr").unwrap();
        let jc = tree.first_child(ppr, "w:jc").unwrap();
        let before = tree.nodes.len();
        tree.remove(ppr);
        // both freed slots get reused
        let fresh = [tree.create_element("w:rPr"), tree.create_element("w:b")];
        assert_eq!(tree.nodes.len(), before);
        for id in fresh {
            tree.append_child(p, id);
        }

        for stale in [ppr, jc] {
            assert!(!tree.contains(stale));
            assert_eq!(tree.name(stale), None);
            tree.set_attribute(stale, "w:val", "x");
            tree.remove(stale);
        }
        for id in fresh {
            assert!(tree.contains(id));
            assert!(tree.attributes(id).is_empty());
        }
        assert_eq!(tree.child_count(p), 3);
    }

    #[test]
    fn deep_clone_is_detached_and_equal() {
        let mut tree = sample();
        let p = tree.first_child(tree.root(), "w:p").unwrap();
        let copy = tree.deep_clone(p).unwrap();
        assert_eq!(tree.parent(copy), None);
        assert_eq!(tree.export(copy), tree.export(p));
        assert!(!tree.is_attached(copy));
        assert!(tree.is_attached(p));
    }

    #[test]
    fn insert_moves_between_parents() {
        let mut tree = sample();
        let p = tree.first_child(tree.root(), "w:p").unwrap();
        let r = tree.first_child(p, "w:r").unwrap();
        let root = tree.root();
        tree.append_child(root, r);
        assert_eq!(tree.parent(r), Some(root));
        assert_eq!(tree.child_count(p), 1);
    }
}
