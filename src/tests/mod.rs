#[cfg(test)]
mod hierarchy_tests {
    use anyhow::{anyhow, Result};
    use serde_json::json;
    use crate::{
        ClassTree, HierarchyRenderer, HtmlLinkFormatter, HtmlTag, HtmlTree, HtmlVersion,
        MockLabelSource, NodeId, OutputFormat, Render, RenderContext, Resources, RootKind,
        TreeIndex, TreePageWriter, TreeScope,
    };

    fn load(value: serde_json::Value) -> ClassTree {
        ClassTree::from_json(&value.to_string()).expect("fixture hierarchy should load")
    }

    fn id(tree: &ClassTree, name: &str) -> NodeId {
        tree.find(name).unwrap_or_else(|| panic!("no type {}", name))
    }

    /// Root A with one subclass B that implements a public interface X
    fn simple_tree() -> ClassTree {
        load(json!({
            "types": [
                {"name": "A", "kind": "class"},
                {"name": "B", "kind": "class", "interfaces": ["X"]},
                {"name": "X", "kind": "interface"}
            ],
            "base_classes": ["A"],
            "base_interfaces": ["X"],
            "subclasses": {"A": ["B"]}
        }))
    }

    fn render_level_html(tree: &ClassTree, parent: Option<NodeId>, roots: &[NodeId]) -> Result<String> {
        let resources = Resources::new();
        let links = HtmlLinkFormatter::new("");
        let renderer = HierarchyRenderer::new(tree, &resources, &links);
        let mut out = HtmlTree::new(HtmlTag::Div);
        renderer.render_level(parent, roots, false, &mut out)?;
        Ok(out.to_html())
    }

    fn relations_html(tree: &ClassTree, parent: Option<&str>, node: &str) -> Result<String> {
        let resources = Resources::new();
        let links = HtmlLinkFormatter::new("");
        let renderer = HierarchyRenderer::new(tree, &resources, &links);
        let mut out = HtmlTree::new(HtmlTag::Li);
        renderer.render_relations(parent.map(|p| id(tree, p)), id(tree, node), &mut out)?;
        Ok(out.to_html())
    }

    #[test]
    fn test_empty_root_set_renders_nothing() -> Result<()> {
        let tree = simple_tree();
        let resources = Resources::new();
        let links = HtmlLinkFormatter::new("");
        let mut container = HtmlTree::new(HtmlTag::Div);

        for version in [HtmlVersion::Html4, HtmlVersion::Html5] {
            let renderer = HierarchyRenderer::new(&tree, &resources, &links).with_html_version(version);
            renderer.render_tree(tree.base_roots(RootKind::Enums), "doclet.Enum_Hierarchy", &mut container)?;
        }

        assert!(container.is_empty());
        Ok(())
    }

    #[test]
    fn test_empty_root_set_does_not_look_up_heading() -> Result<()> {
        let tree = simple_tree();
        let mut labels = MockLabelSource::new();
        labels.expect_label().never();
        let links = HtmlLinkFormatter::new("");
        let renderer = HierarchyRenderer::new(&tree, &labels, &links);

        let mut container = HtmlTree::new(HtmlTag::Div);
        renderer.render_tree(&[], "doclet.Class_Hierarchy", &mut container)?;
        assert!(container.is_empty());
        Ok(())
    }

    #[test]
    fn test_class_tree_example() -> Result<()> {
        let tree = simple_tree();
        let a = id(&tree, "A");
        assert_eq!(
            render_level_html(&tree, Some(a), &[a])?,
            "<div><ul><li class=\"circle\"><span class=\"typeNameLink\">A</span>\
             <ul><li class=\"circle\"><span class=\"typeNameLink\">B</span> (implements X)</li></ul>\
             </li></ul></div>"
        );
        Ok(())
    }

    #[test]
    fn test_section_wraps_heading_and_lists() -> Result<()> {
        let tree = simple_tree();
        let resources = Resources::new();
        let links = HtmlLinkFormatter::new("");
        let renderer = HierarchyRenderer::new(&tree, &resources, &links)
            .with_html_version(HtmlVersion::Html5);

        let mut container = HtmlTree::new(HtmlTag::Div);
        renderer.render_tree(tree.base_roots(RootKind::Classes), "doclet.Class_Hierarchy", &mut container)?;

        // Exactly one block: the section
        assert_eq!(container.content.len(), 1);
        let html = container.to_html();
        assert!(html.starts_with(
            "<div><section><h2 title=\"Class Hierarchy\">Class Hierarchy</h2><ul><li class=\"circle\">"
        ));
        assert!(html.ends_with("</ul></section></div>"));
        Ok(())
    }

    #[test]
    fn test_without_section_heading_goes_into_container() -> Result<()> {
        let tree = simple_tree();
        let resources = Resources::new();
        let links = HtmlLinkFormatter::new("");
        let renderer = HierarchyRenderer::new(&tree, &resources, &links)
            .with_html_version(HtmlVersion::Html4);

        let mut container = HtmlTree::new(HtmlTag::Div);
        renderer.render_tree(tree.base_roots(RootKind::Classes), "doclet.Class_Hierarchy", &mut container)?;

        assert_eq!(container.content.len(), 2);
        let html = container.to_html();
        assert!(html.starts_with("<div><h2 title=\"Class Hierarchy\">Class Hierarchy</h2><ul>"));
        assert!(!html.contains("<section>"));
        Ok(())
    }

    #[test]
    fn test_hidden_interface_is_not_listed() -> Result<()> {
        let tree = load(json!({
            "types": [
                {"name": "A", "kind": "class"},
                {"name": "B", "kind": "class", "interfaces": ["Y", "X"]},
                {"name": "X", "kind": "interface"},
                {"name": "Y", "kind": "interface", "public": false}
            ]
        }));
        assert_eq!(relations_html(&tree, Some("A"), "B")?, "<li> (implements X)</li>");
        Ok(())
    }

    #[test]
    fn test_non_public_but_linkable_interface_is_listed() -> Result<()> {
        let tree = load(json!({
            "types": [
                {"name": "p.B", "kind": "class", "interfaces": ["p.Y"]},
                {"name": "p.Y", "kind": "interface", "public": false, "link": "p/Y.html"}
            ]
        }));
        assert_eq!(
            relations_html(&tree, None, "p.B")?,
            "<li> (implements p.<a href=\"p/Y.html\" title=\"interface in p\">Y</a>)</li>"
        );
        Ok(())
    }

    #[test]
    fn test_only_hidden_interfaces_render_nothing() -> Result<()> {
        let tree = load(json!({
            "types": [
                {"name": "B", "kind": "class", "interfaces": ["Y"]},
                {"name": "Y", "kind": "interface", "public": false}
            ]
        }));
        assert_eq!(relations_html(&tree, None, "B")?, "<li></li>");
        Ok(())
    }

    #[test]
    fn test_interface_self_reference_is_skipped() -> Result<()> {
        let tree = load(json!({
            "types": [
                {"name": "I", "kind": "interface", "interfaces": ["I", "Z"]},
                {"name": "Z", "kind": "interface", "public": false, "link": "Z.html"}
            ]
        }));
        assert_eq!(
            relations_html(&tree, None, "I")?,
            "<li> (also extends <a href=\"Z.html\" title=\"interface\">Z</a>)</li>"
        );
        Ok(())
    }

    #[test]
    fn test_interface_with_single_entry_shows_nothing() -> Result<()> {
        // One entry on an interface is the model's self-reference slot
        let tree = load(json!({
            "types": [
                {"name": "I", "kind": "interface", "interfaces": ["Z"]},
                {"name": "Z", "kind": "interface"}
            ]
        }));
        assert_eq!(relations_html(&tree, None, "I")?, "<li></li>");
        Ok(())
    }

    #[test]
    fn test_parent_is_excluded_and_entries_are_sorted() -> Result<()> {
        let tree = load(json!({
            "types": [
                {"name": "Base", "kind": "interface"},
                {"name": "Sub", "kind": "interface", "interfaces": ["Sub", "Zed", "Base", "Alpha"]},
                {"name": "Alpha", "kind": "interface"},
                {"name": "Zed", "kind": "interface"}
            ]
        }));
        assert_eq!(
            relations_html(&tree, Some("Base"), "Sub")?,
            "<li> (also extends Alpha, Zed)</li>"
        );
        Ok(())
    }

    #[test]
    fn test_class_with_no_interfaces_renders_nothing() -> Result<()> {
        let tree = simple_tree();
        assert_eq!(relations_html(&tree, Some("A"), "A")?, "<li></li>");
        Ok(())
    }

    #[test]
    fn test_interface_tree_has_no_parent() -> Result<()> {
        let tree = load(json!({
            "types": [
                {"name": "I", "kind": "interface"},
                {"name": "J", "kind": "interface", "interfaces": ["J", "I", "K"]},
                {"name": "K", "kind": "interface"}
            ],
            "base_interfaces": ["I", "K"],
            "subinterfaces": {"I": ["J"]}
        }));
        let resources = Resources::new();
        let links = HtmlLinkFormatter::new("");
        let renderer = HierarchyRenderer::new(&tree, &resources, &links);

        let mut container = HtmlTree::new(HtmlTag::Div);
        renderer.render_tree(tree.base_roots(RootKind::Interfaces), "doclet.Interface_Hierarchy", &mut container)?;

        let text = container.render(&RenderContext::new().with_format(OutputFormat::Text));
        assert_eq!(
            text,
            "## Interface Hierarchy\n\n- I\n  - J (also extends K)\n- K\n\n"
        );
        Ok(())
    }

    #[test]
    fn test_enum_roots_follow_subenums() -> Result<()> {
        let tree = load(json!({
            "types": [
                {"name": "java.lang.Object", "kind": "class"},
                {"name": "java.lang.Enum", "kind": "class"},
                {"name": "p.Color", "kind": "enum"},
                {"name": "p.Plain", "kind": "class"}
            ],
            "base_classes": ["java.lang.Object"],
            "base_enums": ["java.lang.Enum"],
            "subclasses": {"java.lang.Object": ["java.lang.Enum", "p.Plain"]},
            "subenums": {"java.lang.Enum": ["p.Color"]}
        }));
        let resources = Resources::new();
        let links = HtmlLinkFormatter::new("");
        let renderer = HierarchyRenderer::new(&tree, &resources, &links);
        let context = RenderContext::new().with_format(OutputFormat::Text);

        let mut enums = HtmlTree::new(HtmlTag::Div);
        renderer.render_tree(tree.base_roots(RootKind::Enums), "doclet.Enum_Hierarchy", &mut enums)?;
        assert_eq!(
            enums.render(&context),
            "## Enum Hierarchy\n\n- java.lang.Enum\n  - p.Color\n\n"
        );

        let mut classes = HtmlTree::new(HtmlTag::Div);
        renderer.render_tree(tree.base_roots(RootKind::Classes), "doclet.Class_Hierarchy", &mut classes)?;
        assert_eq!(
            classes.render(&context),
            "## Class Hierarchy\n\n- java.lang.Object\n  - java.lang.Enum\n  - p.Plain\n\n"
        );
        Ok(())
    }

    #[test]
    fn test_shared_class_and_enum_roots_keep_their_modes() -> Result<()> {
        let tree = load(json!({
            "types": [
                {"name": "java.lang.Object", "kind": "class"},
                {"name": "p.Color", "kind": "enum"},
                {"name": "p.Plain", "kind": "class"}
            ],
            "base_classes": ["java.lang.Object"],
            "base_enums": ["java.lang.Object"],
            "subclasses": {"java.lang.Object": ["p.Plain"]},
            "subenums": {"java.lang.Object": ["p.Color"]}
        }));
        let resources = Resources::new();
        let links = HtmlLinkFormatter::new("");
        let renderer = HierarchyRenderer::new(&tree, &resources, &links);
        let context = RenderContext::new().with_format(OutputFormat::Text);

        let mut classes = HtmlTree::new(HtmlTag::Div);
        renderer.render_tree(tree.base_roots(RootKind::Classes), "doclet.Class_Hierarchy", &mut classes)?;
        assert_eq!(
            classes.render(&context),
            "## Class Hierarchy\n\n- java.lang.Object\n  - p.Plain\n\n"
        );

        let mut enums = HtmlTree::new(HtmlTag::Div);
        renderer.render_tree(tree.base_roots(RootKind::Enums), "doclet.Enum_Hierarchy", &mut enums)?;
        assert_eq!(
            enums.render(&context),
            "## Enum Hierarchy\n\n- java.lang.Object\n  - p.Color\n\n"
        );
        Ok(())
    }

    #[test]
    fn test_rendering_is_idempotent() -> Result<()> {
        let tree = simple_tree();
        let resources = Resources::new();
        let links = HtmlLinkFormatter::new("");
        let renderer = HierarchyRenderer::new(&tree, &resources, &links);
        let roots = tree.base_roots(RootKind::Classes);

        let mut first = HtmlTree::new(HtmlTag::Div);
        let mut second = HtmlTree::new(HtmlTag::Div);
        renderer.render_level(Some(roots[0]), roots, false, &mut first)?;
        renderer.render_level(Some(roots[0]), roots, false, &mut second)?;

        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_depth_guard() -> Result<()> {
        let tree = load(json!({
            "types": [
                {"name": "L0", "kind": "class"},
                {"name": "L1", "kind": "class"},
                {"name": "L2", "kind": "class"}
            ],
            "base_classes": ["L0"],
            "subclasses": {"L0": ["L1"], "L1": ["L2"]}
        }));
        let resources = Resources::new();
        let links = HtmlLinkFormatter::new("");
        let roots = tree.base_roots(RootKind::Classes);

        let shallow = HierarchyRenderer::new(&tree, &resources, &links).with_max_depth(2);
        let mut out = HtmlTree::new(HtmlTag::Div);
        let err = shallow.render_level(None, roots, false, &mut out).unwrap_err();
        assert_eq!(err.to_string(), "class hierarchy exceeds maximum depth of 2 at 'L2'");

        let deep_enough = HierarchyRenderer::new(&tree, &resources, &links).with_max_depth(3);
        let mut out = HtmlTree::new(HtmlTag::Div);
        deep_enough.render_level(None, roots, false, &mut out)?;
        assert_eq!(out.text_content(), "L0L1L2");
        Ok(())
    }

    #[test]
    fn test_missing_heading_label_propagates() {
        let tree = simple_tree();
        let mut labels = MockLabelSource::new();
        labels
            .expect_label()
            .returning(|key| Err(anyhow!("missing resource label '{}'", key)));
        let links = HtmlLinkFormatter::new("");
        let renderer = HierarchyRenderer::new(&tree, &labels, &links);

        let mut container = HtmlTree::new(HtmlTag::Div);
        let err = renderer
            .render_tree(tree.base_roots(RootKind::Classes), "doclet.Class_Hierarchy", &mut container)
            .unwrap_err();
        assert_eq!(err.to_string(), "missing resource label 'doclet.Class_Hierarchy'");
        assert!(container.is_empty());
    }

    #[test]
    fn test_also_label_is_looked_up() -> Result<()> {
        let tree = load(json!({
            "types": [
                {"name": "I", "kind": "interface", "interfaces": ["I", "Z"]},
                {"name": "Z", "kind": "interface"}
            ]
        }));
        let mut labels = MockLabelSource::new();
        labels
            .expect_label()
            .withf(|key| key.to_string() == "doclet.also")
            .times(1)
            .returning(|_| Ok("ebenso".to_string()));
        let links = HtmlLinkFormatter::new("");
        let renderer = HierarchyRenderer::new(&tree, &labels, &links);

        let mut out = HtmlTree::new(HtmlTag::Li);
        renderer.render_relations(None, id(&tree, "I"), &mut out)?;
        assert_eq!(out.text_content(), " (ebenso extends Z)");
        Ok(())
    }

    #[test]
    fn test_nav_link_tree() -> Result<()> {
        let tree = simple_tree();
        let resources = Resources::new();
        let links = HtmlLinkFormatter::new("");
        let renderer = HierarchyRenderer::new(&tree, &resources, &links);
        assert_eq!(renderer.nav_link_tree()?.to_html(), "<li class=\"navBarCell1Rev\">Tree</li>");
        Ok(())
    }

    #[test]
    fn test_package_page_text() -> Result<()> {
        let tree = simple_tree();
        let resources = Resources::new();
        let links = HtmlLinkFormatter::new("");
        let renderer = HierarchyRenderer::new(&tree, &resources, &links);

        let page = TreePageWriter::new(&renderer).render(&TreeScope::Package("demo".to_string()))?;
        let text = page.render(&RenderContext::new().with_format(OutputFormat::Text));
        assert_eq!(
            text,
            "# Hierarchy For Package demo\n\n\
             ## Class Hierarchy\n\n- A\n  - B (implements X)\n\n\
             ## Interface Hierarchy\n\n- X\n\n"
        );
        Ok(())
    }

    #[test]
    fn test_overview_header_links_packages() -> Result<()> {
        let tree = simple_tree();
        let resources = Resources::new();
        let links = HtmlLinkFormatter::new("");
        let renderer = HierarchyRenderer::new(&tree, &resources, &links);

        let scope = TreeScope::AllPackages {
            packages: vec!["java.lang".to_string(), "java.util".to_string()],
        };
        let html = TreePageWriter::new(&renderer).render(&scope)?.to_html();
        assert!(html.starts_with(
            "<div><div class=\"header\"><h1 class=\"title\">Hierarchy For All Packages</h1>\
             <span class=\"packageHierarchyLabel\">Package Hierarchies:</span>\
             <ul class=\"horizontal\"><li><a href=\"java/lang/package-tree.html\">java.lang</a>, </li>\
             <li><a href=\"java/util/package-tree.html\">java.util</a></li></ul></div>\
             <div class=\"contentContainer\"><section>"
        ));
        Ok(())
    }
}
