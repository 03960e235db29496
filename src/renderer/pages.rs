use anyhow::Result;
use tracing::info;
use crate::model::RootKind;
use crate::renderer::markup::*;
use crate::renderer::tree_writer::HierarchyRenderer;
use crate::resources::format_label;

/// Which tree page is being generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeScope {
    /// The overview tree. `packages` are linked from the header; an empty
    /// list omits the "Package Hierarchies:" line.
    AllPackages { packages: Vec<String> },
    /// The tree of a single package
    Package(String),
}

/// Builds the body of a tree page: header plus the class, interface,
/// annotation type and enum hierarchies.
pub struct TreePageWriter<'r, 'a> {
    renderer: &'r HierarchyRenderer<'a>,
}

impl<'r, 'a> TreePageWriter<'r, 'a> {
    pub fn new(renderer: &'r HierarchyRenderer<'a>) -> Self {
        Self { renderer }
    }

    pub fn render(&self, scope: &TreeScope) -> Result<HtmlTree> {
        let mut body = HtmlTree::new(HtmlTag::Div);
        body.add_content(self.header(scope)?);

        let mut container = HtmlTree::new(HtmlTag::Div).with_style(HtmlStyle::ContentContainer);
        let index = self.renderer.index();
        for kind in RootKind::ALL {
            self.renderer
                .render_tree(index.base_roots(kind), kind.heading_key(), &mut container)?;
        }
        body.add_content(container);

        info!(scope = ?scope, "rendered tree page");
        Ok(body)
    }

    fn header(&self, scope: &TreeScope) -> Result<HtmlTree> {
        let labels = self.renderer.labels();
        let mut header = HtmlTree::new(HtmlTag::Div).with_style(HtmlStyle::Header);

        let title = match scope {
            TreeScope::AllPackages { .. } => labels.label("doclet.Hierarchy_For_All_Packages")?,
            TreeScope::Package(name) => {
                format_label(&labels.label("doclet.Hierarchy_For_Package")?, &[name.as_str()])
            }
        };
        let mut heading = HtmlTree::heading(HtmlTag::H1, false, title);
        heading.add_style(HtmlStyle::Title);
        header.add_content(heading);

        if let TreeScope::AllPackages { packages } = scope {
            if !packages.is_empty() {
                header.add_content(HtmlTree::span(
                    HtmlStyle::PackageHierarchyLabel,
                    labels.label("doclet.Package_Hierarchies")?,
                ));
                header.add_content(self.package_links(packages));
            }
        }

        Ok(header)
    }

    fn package_links(&self, packages: &[String]) -> HtmlTree {
        let links = self.renderer.links();
        let mut ul = HtmlTree::new(HtmlTag::Ul).with_style(HtmlStyle::Horizontal);
        for (i, package) in packages.iter().enumerate() {
            let mut li = HtmlTree::new(HtmlTag::Li);
            links.add_package_tree_link(package, &mut li);
            if i < packages.len() - 1 {
                li.add_text(", ");
            }
            ul.add_content(li);
        }
        ul
    }
}
