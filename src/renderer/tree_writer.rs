use anyhow::{bail, Result};
use tracing::{debug, trace};
use crate::model::*;
use crate::renderer::markup::*;
use crate::renderer::traits::*;

/// Deepest hierarchy rendered before giving up on the input
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Renders class trees as nested lists.
///
/// Each type becomes a `<li class="circle">` holding its qualified name, the
/// interfaces it implements (or, for an interface, additionally extends) and
/// the list of its own subtypes.
pub struct HierarchyRenderer<'a> {
    index: &'a dyn TreeIndex,
    labels: &'a dyn LabelSource,
    links: &'a dyn LinkFormatter,
    html_version: HtmlVersion,
    max_depth: usize,
}

impl<'a> HierarchyRenderer<'a> {
    pub fn new(
        index: &'a dyn TreeIndex,
        labels: &'a dyn LabelSource,
        links: &'a dyn LinkFormatter,
    ) -> Self {
        Self {
            index,
            labels,
            links,
            html_version: HtmlVersion::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_html_version(mut self, html_version: HtmlVersion) -> Self {
        self.html_version = html_version;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn index(&self) -> &'a dyn TreeIndex {
        self.index
    }

    pub fn labels(&self) -> &'a dyn LabelSource {
        self.labels
    }

    pub fn links(&self) -> &'a dyn LinkFormatter {
        self.links
    }

    /// Adds one hierarchy section: a heading followed by the tree below
    /// `roots`. Nothing at all is added for an empty root set.
    ///
    /// Enum mode applies only when `roots` is the slice returned by
    /// `base_roots(RootKind::Enums)`, not a copy of it.
    pub fn render_tree(&self, roots: &[NodeId], heading_key: &str, container: &mut HtmlTree) -> Result<()> {
        let Some(&first) = roots.first() else {
            return Ok(());
        };

        let heading = HtmlTree::heading(HtmlTag::H2, true, self.labels.label(heading_key)?);
        let is_enum = self.index.is_enum_roots(roots);

        // Interface trees have no common parent; class trees are rendered
        // relative to their first root
        let parent = if self.index.node(first).is_interface() {
            None
        } else {
            Some(first)
        };

        debug!(heading = heading_key, roots = roots.len(), is_enum, "rendering hierarchy");

        if self.html_version.allows_section() {
            let mut section = HtmlTree::section(heading);
            self.add_level(parent, roots, is_enum, &mut section, 0)?;
            container.add_content(section);
        } else {
            container.add_content(heading);
            self.add_level(parent, roots, is_enum, container, 0)?;
        }

        Ok(())
    }

    /// Adds the list for one level of the tree and, recursively, every level
    /// below it
    pub fn render_level(
        &self,
        parent: Option<NodeId>,
        children: &[NodeId],
        is_enum: bool,
        out: &mut HtmlTree,
    ) -> Result<()> {
        self.add_level(parent, children, is_enum, out, 0)
    }

    fn add_level(
        &self,
        parent: Option<NodeId>,
        children: &[NodeId],
        is_enum: bool,
        out: &mut HtmlTree,
        depth: usize,
    ) -> Result<()> {
        if children.is_empty() {
            return Ok(());
        }
        if depth >= self.max_depth {
            bail!(
                "class hierarchy exceeds maximum depth of {} at '{}'",
                self.max_depth,
                self.index.node(children[0]).name
            );
        }

        let mut ul = HtmlTree::new(HtmlTag::Ul);
        for &child in children {
            let mut li = HtmlTree::new(HtmlTag::Li);
            li.add_style(HtmlStyle::Circle);
            self.links.add_tree_link(self.index.node(child), true, &mut li);
            self.render_relations(parent, child, &mut li)?;
            self.add_level(
                Some(child),
                self.index.children(child, is_enum),
                is_enum,
                &mut li,
                depth + 1,
            )?;
            ul.add_content(li);
        }
        out.add_content(ul);

        Ok(())
    }

    /// Adds " (implements A, B)" or, for an interface, " (also extends A, B)"
    /// listing the interfaces of `id` other than `parent`.
    pub fn render_relations(&self, parent: Option<NodeId>, id: NodeId, out: &mut HtmlTree) -> Result<()> {
        let node = self.index.node(id);

        // The model lists an interface among its own interfaces, so one entry
        // on an interface means there is nothing else to show
        let threshold = if node.is_interface() { 1 } else { 0 };
        if node.interfaces.len() <= threshold {
            return Ok(());
        }

        let mut interfaces = node.interfaces.clone();
        interfaces.sort_by(|a, b| self.index.node(*a).name.cmp(&self.index.node(*b).name));

        let mut counter = 0;
        for intf in interfaces {
            if Some(intf) == parent || intf == id {
                continue;
            }
            let intf_node = self.index.node(intf);
            if !(intf_node.is_public || self.links.is_linkable(intf_node)) {
                trace!(node = %node.name, interface = %intf_node.name, "skipping hidden interface");
                continue;
            }
            if counter == 0 {
                if node.is_interface() {
                    out.add_text(" (");
                    out.add_text(&self.labels.label("doclet.also")?);
                    out.add_text(" extends ");
                } else {
                    out.add_text(" (implements ");
                }
            } else {
                out.add_text(", ");
            }
            self.links.add_tree_link(intf_node, false, out);
            counter += 1;
        }
        if counter > 0 {
            out.add_text(")");
        }

        Ok(())
    }

    /// Navigation bar cell marking the tree page as current
    pub fn nav_link_tree(&self) -> Result<HtmlTree> {
        Ok(HtmlTree::li(
            HtmlStyle::NavBarCell1Rev,
            self.labels.label("doclet.Tree")?,
        ))
    }
}
