use crate::renderer::traits::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlTag {
    Div,
    Section,
    H1,
    H2,
    Ul,
    Li,
    A,
    Span,
}

impl HtmlTag {
    pub fn name(self) -> &'static str {
        match self {
            HtmlTag::Div => "div",
            HtmlTag::Section => "section",
            HtmlTag::H1 => "h1",
            HtmlTag::H2 => "h2",
            HtmlTag::Ul => "ul",
            HtmlTag::Li => "li",
            HtmlTag::A => "a",
            HtmlTag::Span => "span",
        }
    }

    pub fn is_inline(self) -> bool {
        matches!(self, HtmlTag::A | HtmlTag::Span)
    }
}

/// CSS classes understood by the documentation stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlStyle {
    Circle,
    TypeNameLink,
    NavBarCell1Rev,
    Header,
    Title,
    ContentContainer,
    PackageHierarchyLabel,
    Horizontal,
}

impl HtmlStyle {
    pub fn class_name(self) -> &'static str {
        match self {
            HtmlStyle::Circle => "circle",
            HtmlStyle::TypeNameLink => "typeNameLink",
            HtmlStyle::NavBarCell1Rev => "navBarCell1Rev",
            HtmlStyle::Header => "header",
            HtmlStyle::Title => "title",
            HtmlStyle::ContentContainer => "contentContainer",
            HtmlStyle::PackageHierarchyLabel => "packageHierarchyLabel",
            HtmlStyle::Horizontal => "horizontal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Tree(HtmlTree),
}

impl From<HtmlTree> for Content {
    fn from(tree: HtmlTree) -> Self {
        Content::Tree(tree)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

/// An element of the generated page. Children are appended in order and the
/// finished tree is owned by whoever it is appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTree {
    pub tag: HtmlTag,
    pub style: Option<HtmlStyle>,
    pub attrs: Vec<(String, String)>,
    pub content: Vec<Content>,
}

impl HtmlTree {
    pub fn new(tag: HtmlTag) -> Self {
        Self {
            tag,
            style: None,
            attrs: Vec::new(),
            content: Vec::new(),
        }
    }

    pub fn with_style(mut self, style: HtmlStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn add_style(&mut self, style: HtmlStyle) {
        self.style = Some(style);
    }

    pub fn add_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attrs.push((name.to_string(), value.into()));
    }

    pub fn add_content(&mut self, content: impl Into<Content>) {
        match content.into() {
            Content::Text(text) => self.add_text(&text),
            tree => self.content.push(tree),
        }
    }

    /// Appends text, merging with a directly preceding text node
    pub fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Content::Text(last)) = self.content.last_mut() {
            last.push_str(text);
        } else {
            self.content.push(Content::Text(text.to_string()));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// A heading; `print_title` repeats the text in a `title` attribute
    pub fn heading(tag: HtmlTag, print_title: bool, text: impl Into<String>) -> Self {
        let text = text.into();
        let mut heading = HtmlTree::new(tag);
        if print_title {
            heading.add_attr("title", text.clone());
        }
        heading.add_text(&text);
        heading
    }

    pub fn section(content: impl Into<Content>) -> Self {
        let mut section = HtmlTree::new(HtmlTag::Section);
        section.add_content(content);
        section
    }

    pub fn li(style: HtmlStyle, content: impl Into<Content>) -> Self {
        let mut li = HtmlTree::new(HtmlTag::Li).with_style(style);
        li.add_content(content);
        li
    }

    pub fn span(style: HtmlStyle, content: impl Into<Content>) -> Self {
        let mut span = HtmlTree::new(HtmlTag::Span).with_style(style);
        span.add_content(content);
        span
    }

    pub fn link(href: &str, title: Option<&str>, content: impl Into<Content>) -> Self {
        let mut a = HtmlTree::new(HtmlTag::A);
        a.add_attr("href", href);
        if let Some(title) = title {
            a.add_attr("title", title);
        }
        a.add_content(content);
        a
    }

    /// Concatenated text of this tree, markup stripped
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text, false);
        text
    }

    fn collect_text(&self, out: &mut String, skip_lists: bool) {
        for child in &self.content {
            match child {
                Content::Text(text) => out.push_str(text),
                Content::Tree(tree) if skip_lists && tree.tag == HtmlTag::Ul => {}
                Content::Tree(tree) => tree.collect_text(out, skip_lists),
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        self.write_html(&mut html);
        html
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag.name());
        if let Some(style) = self.style {
            out.push_str(&format!(" class=\"{}\"", style.class_name()));
        }
        for (name, value) in &self.attrs {
            out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
        }
        out.push('>');
        for child in &self.content {
            match child {
                Content::Text(text) => out.push_str(&escape_html(text)),
                Content::Tree(tree) => tree.write_html(out),
            }
        }
        out.push_str(&format!("</{}>", self.tag.name()));
    }

    fn to_text(&self, context: &RenderContext) -> String {
        match self.tag {
            HtmlTag::H1 => format!("# {}\n\n", self.text_content()),
            HtmlTag::H2 => format!("## {}\n\n", self.text_content()),
            HtmlTag::A | HtmlTag::Span => self.text_content(),
            // Items already carry their separators
            HtmlTag::Ul if self.style == Some(HtmlStyle::Horizontal) => {
                format!("{}\n\n", self.text_content().trim())
            }
            HtmlTag::Ul => {
                let mut output = String::new();
                for child in &self.content {
                    if let Content::Tree(item) = child {
                        output.push_str(&item.to_text(context));
                    }
                }
                // Blank line after a top-level list
                if context.depth == 0 {
                    output.push('\n');
                }
                output
            }
            HtmlTag::Li => {
                let mut line = String::new();
                self.collect_text(&mut line, true);
                let mut output = format!("{}- {}\n", context.indent(), line.trim_end());

                let nested_context = context.with_depth(context.depth + 1);
                for child in &self.content {
                    if let Content::Tree(tree) = child {
                        if tree.tag == HtmlTag::Ul {
                            output.push_str(&tree.to_text(&nested_context));
                        }
                    }
                }
                output
            }
            HtmlTag::Div | HtmlTag::Section => {
                let mut output = String::new();
                let mut inline = String::new();
                for child in &self.content {
                    match child {
                        Content::Text(text) => inline.push_str(text),
                        Content::Tree(tree) if tree.tag.is_inline() => {
                            inline.push_str(&tree.text_content())
                        }
                        Content::Tree(tree) => {
                            flush_inline(&mut inline, &mut output);
                            output.push_str(&tree.to_text(context));
                        }
                    }
                }
                flush_inline(&mut inline, &mut output);
                output
            }
        }
    }
}

fn flush_inline(inline: &mut String, output: &mut String) {
    let line = inline.trim();
    if !line.is_empty() {
        output.push_str(line);
        output.push_str("\n\n");
    }
    inline.clear();
}

impl Render for HtmlTree {
    fn render(&self, context: &RenderContext) -> String {
        match context.format {
            OutputFormat::Html => self.to_html(),
            OutputFormat::Text => self.to_text(context),
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
