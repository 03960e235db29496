use crate::model::TypeNode;
use crate::renderer::markup::*;
use crate::renderer::traits::*;

/// Link formatter for tree pages.
///
/// Names are printed package-qualified: the package prefix is plain text and
/// only the simple name carries the hyperlink.
#[derive(Debug, Clone, Default)]
pub struct HtmlLinkFormatter {
    /// Relative path from the generated page to the documentation root,
    /// e.g. `../../` for a package tree page
    root_path: String,
}

impl HtmlLinkFormatter {
    pub fn new(root_path: &str) -> Self {
        let mut root_path = root_path.to_string();
        if !root_path.is_empty() && !root_path.ends_with('/') {
            root_path.push('/');
        }
        Self { root_path }
    }

    pub fn href(&self, target: &str) -> String {
        format!("{}{}", self.root_path, target)
    }

    fn title_for(node: &TypeNode) -> String {
        if node.package.is_empty() {
            node.kind.description().to_string()
        } else {
            format!("{} in {}", node.kind.description(), node.package)
        }
    }
}

impl LinkFormatter for HtmlLinkFormatter {
    fn is_linkable(&self, node: &TypeNode) -> bool {
        node.link.is_some()
    }

    fn add_tree_link(&self, node: &TypeNode, strong: bool, out: &mut HtmlTree) {
        if !node.package.is_empty() && node.simple_name() != node.name {
            out.add_text(&format!("{}.", node.package));
        }

        let label: Content = if strong {
            HtmlTree::span(HtmlStyle::TypeNameLink, node.simple_name()).into()
        } else {
            node.simple_name().into()
        };

        match &node.link {
            Some(target) if self.is_linkable(node) => {
                let title = Self::title_for(node);
                out.add_content(HtmlTree::link(&self.href(target), Some(&title), label));
            }
            _ => out.add_content(label),
        }
    }

    fn add_package_tree_link(&self, package: &str, out: &mut HtmlTree) {
        let target = format!("{}/package-tree.html", package.replace('.', "/"));
        out.add_content(HtmlTree::link(&self.href(&target), None, package));
    }
}
