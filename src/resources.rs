use anyhow::{anyhow, Result};
use std::collections::HashMap;
use crate::renderer::LabelSource;

/// English labels used by the tree pages
const DEFAULT_LABELS: &[(&str, &str)] = &[
    ("doclet.Tree", "Tree"),
    ("doclet.also", "also"),
    ("doclet.Class_Hierarchy", "Class Hierarchy"),
    ("doclet.Interface_Hierarchy", "Interface Hierarchy"),
    ("doclet.Annotation_Type_Hierarchy", "Annotation Type Hierarchy"),
    ("doclet.Enum_Hierarchy", "Enum Hierarchy"),
    ("doclet.Hierarchy_For_All_Packages", "Hierarchy For All Packages"),
    ("doclet.Hierarchy_For_Package", "Hierarchy For Package {0}"),
    ("doclet.Package_Hierarchies", "Package Hierarchies:"),
];

/// Flat label bundle: built-in defaults, optionally overridden from config
#[derive(Debug, Clone)]
pub struct Resources {
    labels: HashMap<String, String>,
}

impl Resources {
    pub fn new() -> Self {
        Self {
            labels: DEFAULT_LABELS
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut resources = Self::new();
        resources
            .labels
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        resources
    }

    /// A bundle holding only the given labels, without defaults
    pub fn from_labels(labels: HashMap<String, String>) -> Self {
        Self { labels }
    }
}

impl Default for Resources {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelSource for Resources {
    fn label(&self, key: &str) -> Result<String> {
        self.labels
            .get(key)
            .cloned()
            .ok_or_else(|| anyhow!("missing resource label '{}'", key))
    }
}

/// Substitutes `{0}`, `{1}`, ... in a label template
pub fn format_label(template: &str, args: &[&str]) -> String {
    args.iter()
        .enumerate()
        .fold(template.to_string(), |text, (i, arg)| {
            text.replace(&format!("{{{}}}", i), arg)
        })
}
