use anyhow::{anyhow, bail, Context, Result};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;
use crate::model::types::*;

/// Read-only hierarchy queries used by the renderer
pub trait TreeIndex {
    fn node(&self, id: NodeId) -> &TypeNode;

    /// Direct children of `id`: sub-interfaces for interfaces, sub-enums in
    /// enum mode, subclasses otherwise
    fn children(&self, id: NodeId, enum_mode: bool) -> &[NodeId];

    fn base_roots(&self, kind: RootKind) -> &[NodeId];

    /// True when `roots` is the enum root set itself. Compared by identity:
    /// class and enum roots usually hold the same types (`java.lang.Object`).
    fn is_enum_roots(&self, roots: &[NodeId]) -> bool {
        !roots.is_empty() && std::ptr::eq(roots, self.base_roots(RootKind::Enums))
    }
}

/// Arena-backed class tree loaded from its serialized form.
///
/// Root sets and child lists are sorted by qualified name, every reference is
/// resolved and the child graph is known to be acyclic.
#[derive(Debug, Default)]
pub struct ClassTree {
    nodes: Vec<TypeNode>,
    by_name: HashMap<String, NodeId>,
    base_classes: Vec<NodeId>,
    base_interfaces: Vec<NodeId>,
    base_annotation_types: Vec<NodeId>,
    base_enums: Vec<NodeId>,
    subclasses: HashMap<NodeId, Vec<NodeId>>,
    subinterfaces: HashMap<NodeId, Vec<NodeId>>,
    subenums: HashMap<NodeId, Vec<NodeId>>,
}

impl ClassTree {
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawHierarchy =
            serde_json::from_str(json).context("invalid class hierarchy JSON")?;
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: RawHierarchy) -> Result<Self> {
        let mut tree = ClassTree::default();

        // First pass: allocate every declared type so references can resolve
        for raw_type in &raw.types {
            if tree.by_name.contains_key(&raw_type.name) {
                bail!("duplicate type '{}'", raw_type.name);
            }
            let package = raw_type
                .package
                .clone()
                .unwrap_or_else(|| TypeNode::package_of(&raw_type.name).to_string());
            let id = NodeId(tree.nodes.len());
            tree.nodes.push(TypeNode {
                name: raw_type.name.clone(),
                kind: raw_type.kind,
                is_public: raw_type.public,
                package,
                interfaces: Vec::new(),
                link: raw_type.link.clone(),
            });
            tree.by_name.insert(raw_type.name.clone(), id);
        }

        // Second pass: interface references, kept in declaration order
        for (position, raw_type) in raw.types.iter().enumerate() {
            let context = format!("the interfaces of '{}'", raw_type.name);
            let interfaces = raw_type
                .interfaces
                .iter()
                .map(|name| tree.resolve(name, &context))
                .collect::<Result<Vec<_>>>()?;
            tree.nodes[position].interfaces = interfaces;
        }

        tree.base_classes = tree.resolve_sorted(&raw.base_classes, "base_classes")?;
        tree.base_interfaces = tree.resolve_sorted(&raw.base_interfaces, "base_interfaces")?;
        tree.base_annotation_types =
            tree.resolve_sorted(&raw.base_annotation_types, "base_annotation_types")?;
        tree.base_enums = tree.resolve_sorted(&raw.base_enums, "base_enums")?;
        tree.subclasses = tree.resolve_children(&raw.subclasses, "subclasses")?;
        tree.subinterfaces = tree.resolve_children(&raw.subinterfaces, "subinterfaces")?;
        tree.subenums = tree.resolve_children(&raw.subenums, "subenums")?;

        tree.check_acyclic(false)?;
        tree.check_acyclic(true)?;

        debug!(
            types = tree.nodes.len(),
            base_classes = tree.base_classes.len(),
            base_interfaces = tree.base_interfaces.len(),
            base_enums = tree.base_enums.len(),
            "loaded class hierarchy"
        );

        Ok(tree)
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Sorted, distinct packages of the documented (linked) types
    pub fn packages(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|node| node.link.is_some() && !node.package.is_empty())
            .map(|node| node.package.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn resolve(&self, name: &str, context: &str) -> Result<NodeId> {
        self.find(name)
            .ok_or_else(|| anyhow!("unknown type '{}' referenced by {}", name, context))
    }

    fn resolve_sorted(&self, names: &[String], context: &str) -> Result<Vec<NodeId>> {
        let mut ids = names
            .iter()
            .map(|name| self.resolve(name, context))
            .collect::<Result<Vec<_>>>()?;
        ids.sort_by(|a, b| self.nodes[a.0].name.cmp(&self.nodes[b.0].name));
        ids.dedup();
        Ok(ids)
    }

    fn resolve_children(
        &self,
        map: &HashMap<String, Vec<String>>,
        field: &str,
    ) -> Result<HashMap<NodeId, Vec<NodeId>>> {
        let mut resolved = HashMap::with_capacity(map.len());
        for (parent, children) in map {
            let parent_id = self.resolve(parent, field)?;
            let context = format!("{} of '{}'", field, parent);
            resolved.insert(parent_id, self.resolve_sorted(children, &context)?);
        }
        Ok(resolved)
    }

    fn list<'a>(&self, map: &'a HashMap<NodeId, Vec<NodeId>>, id: NodeId) -> &'a [NodeId] {
        map.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Checks the edges the renderer follows in one mode (see `children`)
    fn check_acyclic(&self, enum_mode: bool) -> Result<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.nodes.len()];

        // Iterative DFS: an externally supplied hierarchy may be arbitrarily deep
        for start in 0..self.nodes.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            let mut stack: Vec<(NodeId, Vec<NodeId>)> = Vec::new();
            marks[start] = Mark::InProgress;
            stack.push((NodeId(start), self.children(NodeId(start), enum_mode).to_vec()));

            while let Some((current, pending)) = stack.last_mut() {
                let current = *current;
                match pending.pop() {
                    Some(next) => match marks[next.0] {
                        Mark::InProgress => bail!(
                            "class hierarchy contains a cycle through '{}'",
                            self.nodes[next.0].name
                        ),
                        Mark::Unvisited => {
                            marks[next.0] = Mark::InProgress;
                            stack.push((next, self.children(next, enum_mode).to_vec()));
                        }
                        Mark::Done => {}
                    },
                    None => {
                        marks[current.0] = Mark::Done;
                        stack.pop();
                    }
                }
            }
        }

        Ok(())
    }
}

impl TreeIndex for ClassTree {
    fn node(&self, id: NodeId) -> &TypeNode {
        &self.nodes[id.0]
    }

    fn children(&self, id: NodeId, enum_mode: bool) -> &[NodeId] {
        if self.nodes[id.0].is_interface() {
            self.list(&self.subinterfaces, id)
        } else if enum_mode {
            self.list(&self.subenums, id)
        } else {
            self.list(&self.subclasses, id)
        }
    }

    fn base_roots(&self, kind: RootKind) -> &[NodeId] {
        match kind {
            RootKind::Classes => &self.base_classes,
            RootKind::Interfaces => &self.base_interfaces,
            RootKind::AnnotationTypes => &self.base_annotation_types,
            RootKind::Enums => &self.base_enums,
        }
    }
}
