//! Render tree
//!
//! Elements are flattened into a slotmap arena with parent links. The tree
//! answers id lookups for the components' null-checks, computes document
//! bounds for scroll triggers, and receives animated values before output.

use folio_animation::PropertyValues;
use folio_core::{Bounds, BoundsLookup, Target, Viewport};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, Key, SlotMap};

use crate::element::{Element, ElementParts, Flow, Height};

new_key_type! {
    pub struct NodeId;
}

impl NodeId {
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }
}

/// Height of a text-only element
const LINE_HEIGHT: f32 = 24.0;

/// A node in the render tree
#[derive(Clone, Debug)]
pub struct RenderNode {
    pub element: ElementParts,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    bounds: Bounds,
}

impl RenderNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.element.classes.iter().any(|c| c == class)
    }
}

/// Flattened element tree with id lookup and computed bounds
#[derive(Clone, Debug)]
pub struct RenderTree {
    nodes: SlotMap<NodeId, RenderNode>,
    root: NodeId,
    ids: FxHashMap<Target, NodeId>,
    viewport: Viewport,
}

impl RenderTree {
    /// Flatten `root` and lay it out for `viewport`
    pub fn new(root: Element, viewport: Viewport) -> Self {
        let mut nodes = SlotMap::with_key();
        let mut ids = FxHashMap::default();
        let root = Self::insert(&mut nodes, &mut ids, root, None);
        let mut tree = Self {
            nodes,
            root,
            ids,
            viewport,
        };
        tree.layout();
        tree
    }

    fn insert(
        nodes: &mut SlotMap<NodeId, RenderNode>,
        ids: &mut FxHashMap<Target, NodeId>,
        element: Element,
        parent: Option<NodeId>,
    ) -> NodeId {
        let (parts, children) = element.into_parts();
        let target = parts.id.clone();
        let id = nodes.insert(RenderNode {
            element: parts,
            parent,
            children: Vec::with_capacity(children.len()),
            bounds: Bounds::default(),
        });
        if let Some(target) = target {
            if ids.insert(target.clone(), id).is_some() {
                tracing::warn!(element = %target, "duplicate element id, later element wins");
            }
        }
        for child in children {
            let child_id = Self::insert(nodes, ids, child, Some(id));
            if let Some(node) = nodes.get_mut(id) {
                node.children.push(child_id);
            }
        }
        id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn node(&self, id: NodeId) -> Option<&RenderNode> {
        self.nodes.get(id)
    }

    pub fn lookup(&self, target: &Target) -> Option<NodeId> {
        self.ids.get(target).copied()
    }

    pub fn get(&self, target: &Target) -> Option<&RenderNode> {
        self.lookup(target).and_then(|id| self.nodes.get(id))
    }

    pub fn contains(&self, target: &Target) -> bool {
        self.ids.contains_key(target)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in document order starting at `from`
    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Targets of the family `prefix` that end in an index, in document order
    ///
    /// `projects-card` finds `projects-card-0`, `projects-card-1`, ... but not
    /// `projects-card-0-preview`.
    pub fn indexed_targets(&self, prefix: &str) -> Vec<Target> {
        self.descendants(self.root)
            .into_iter()
            .filter_map(|id| self.nodes[id].element.id.clone())
            .filter(|t| t.index_in(prefix).is_some())
            .collect()
    }

    /// Whitespace-joined text of an element and its descendants
    pub fn text_content(&self, target: &Target) -> Option<String> {
        let id = self.lookup(target)?;
        let text: Vec<&str> = self
            .descendants(id)
            .into_iter()
            .filter_map(|n| self.nodes[n].element.text.as_deref())
            .collect();
        Some(text.join(" "))
    }

    pub fn attr(&self, target: &Target, name: &str) -> Option<&str> {
        self.get(target)?
            .element
            .attrs
            .get(name)
            .map(String::as_str)
    }

    pub fn has_class(&self, target: &Target, class: &str) -> bool {
        self.get(target).is_some_and(|n| n.has_class(class))
    }

    /// Number of nodes carrying `class`
    pub fn count_class(&self, class: &str) -> usize {
        self.nodes.values().filter(|n| n.has_class(class)).count()
    }

    /// Overlay animated values onto element styles
    ///
    /// Values for targets that are not in the tree are skipped; returns how
    /// many were applied.
    pub fn apply_values<'a, I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = (&'a Target, &'a PropertyValues)>,
    {
        let mut applied = 0;
        for (target, values) in values {
            let Some(node) = self.ids.get(target).and_then(|id| self.nodes.get_mut(*id)) else {
                tracing::trace!(element = %target, "animated element not rendered");
                continue;
            };
            node.element.style.apply(values);
            applied += 1;
        }
        applied
    }

    /// Compute document bounds with block flow
    pub fn layout(&mut self) {
        self.layout_node(self.root, 0.0);
    }

    fn layout_node(&mut self, id: NodeId, top: f32) -> f32 {
        let Some(node) = self.nodes.get(id) else {
            return 0.0;
        };
        let children = node.children.clone();
        let has_text = node.element.text.is_some();
        let height_rule = node.element.height;

        let mut cursor = top;
        for child in children {
            let in_flow = self
                .nodes
                .get(child)
                .is_some_and(|c| c.element.flow == Flow::InFlow);
            let child_top = if in_flow { cursor } else { top };
            let child_height = self.layout_node(child, child_top);
            if in_flow {
                cursor += child_height;
            }
        }

        let intrinsic = match cursor - top {
            h if h <= 0.0 && has_text => LINE_HEIGHT,
            h => h,
        };
        let height = match height_rule {
            Height::Auto => intrinsic,
            Height::Px(px) => px,
            Height::Viewport(fraction) => fraction * self.viewport.height,
        };

        if let Some(node) = self.nodes.get_mut(id) {
            node.bounds = Bounds::new(top, height);
        }
        height
    }
}

impl BoundsLookup for RenderTree {
    fn bounds_of(&self, target: &Target) -> Option<Bounds> {
        self.get(target).map(RenderNode::bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::*;
    use folio_animation::Property;

    fn page() -> RenderTree {
        let root = div()
            .id("page")
            .child(div().id("nav").overlay().h_px(64.0))
            .child(section("hero").h_screen())
            .child(
                section("projects")
                    .child(h2("Projects").id("projects-heading"))
                    .children((0..3).map(|i| {
                        div()
                            .id(Target::indexed("projects-card", i))
                            .h_px(300.0)
                            .child(div().id(Target::indexed("projects-card", i).child("preview")))
                    })),
            );
        RenderTree::new(root, Viewport::new(1440.0, 900.0))
    }

    #[test]
    fn test_block_layout() {
        let tree = page();
        assert_eq!(tree.bounds_of(&Target::id("nav")), Some(Bounds::new(0.0, 64.0)));
        assert_eq!(tree.bounds_of(&Target::id("hero")), Some(Bounds::new(0.0, 900.0)));

        let projects = tree.bounds_of(&Target::id("projects")).unwrap();
        assert_eq!(projects.top, 900.0);
        assert_eq!(projects.height, LINE_HEIGHT + 900.0);

        let card = tree.bounds_of(&Target::indexed("projects-card", 1)).unwrap();
        assert_eq!(card.top, 900.0 + LINE_HEIGHT + 300.0);
        assert!(tree.bounds_of(&Target::id("missing")).is_none());
    }

    #[test]
    fn test_indexed_targets_in_document_order() {
        let tree = page();
        let cards = tree.indexed_targets("projects-card");
        assert_eq!(
            cards,
            (0..3).map(|i| Target::indexed("projects-card", i)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_text_and_parent_links() {
        let tree = page();
        assert_eq!(
            tree.text_content(&Target::id("projects")).as_deref(),
            Some("Projects")
        );
        let heading = tree.lookup(&Target::id("projects-heading")).unwrap();
        let parent = tree.node(heading).and_then(RenderNode::parent).unwrap();
        assert_eq!(Some(parent), tree.lookup(&Target::id("projects")));
    }

    #[test]
    fn test_apply_values_skips_absent_targets() {
        let mut tree = page();
        let hero = Target::id("hero");
        let gone = Target::id("page-transition-trail");
        let values = PropertyValues::new().with(Property::Opacity, 0.5);
        let applied = tree.apply_values([(&hero, &values), (&gone, &values)]);
        assert_eq!(applied, 1);
        assert_eq!(tree.get(&hero).unwrap().element.style.opacity, Some(0.5));
    }
}
