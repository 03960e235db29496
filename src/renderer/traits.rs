use anyhow::{bail, Result};
use serde::Deserialize;
use std::str::FromStr;
use crate::model::TypeNode;
use crate::renderer::markup::HtmlTree;

/// Configuration context for rendering operations
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub depth: usize,
    pub format: OutputFormat,
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            depth: 0,
            format: OutputFormat::Html,
        }
    }

    pub fn with_depth(&self, depth: usize) -> Self {
        Self {
            depth,
            format: self.format,
        }
    }

    pub fn with_format(&self, format: OutputFormat) -> Self {
        Self {
            depth: self.depth,
            format,
        }
    }

    pub fn indent(&self) -> String {
        "  ".repeat(self.depth)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Output format configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Text,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "text" | "txt" => Ok(OutputFormat::Text),
            other => bail!("unknown output format '{}'", other),
        }
    }
}

/// Generation of HTML being produced; decides which tags are allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HtmlVersion {
    Html4,
    #[default]
    Html5,
}

impl HtmlVersion {
    pub fn allows_section(self) -> bool {
        matches!(self, HtmlVersion::Html5)
    }
}

impl FromStr for HtmlVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "4" | "html4" => Ok(HtmlVersion::Html4),
            "5" | "html5" => Ok(HtmlVersion::Html5),
            other => bail!("unknown HTML version '{}'", other),
        }
    }
}

/// Core rendering trait for output trees
pub trait Render {
    fn render(&self, context: &RenderContext) -> String;
}

/// Localized label lookup. A missing key is a configuration error.
#[cfg_attr(test, mockall::automock)]
pub trait LabelSource {
    fn label(&self, key: &str) -> Result<String>;
}

/// Renders type names, hyperlinked where the link policy allows
pub trait LinkFormatter {
    fn is_linkable(&self, node: &TypeNode) -> bool;

    /// Appends the package-qualified name of `node` in tree style. A strong
    /// link emphasizes the simple name.
    fn add_tree_link(&self, node: &TypeNode, strong: bool, out: &mut HtmlTree);

    /// Appends a link to the tree page of `package`
    fn add_package_tree_link(&self, package: &str, out: &mut HtmlTree);
}
