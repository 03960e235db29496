use serde::Deserialize;
use std::collections::HashMap;

// Serialized form of a pre-built class hierarchy

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

impl TypeKind {
    /// Annotation types count as interfaces, the way the hierarchy model treats them
    pub fn is_interface(self) -> bool {
        matches!(self, TypeKind::Interface | TypeKind::Annotation)
    }

    /// Word used in link titles, e.g. "class in java.lang"
    pub fn description(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Annotation => "annotation",
        }
    }
}

fn default_public() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawType {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default = "default_public")]
    pub public: bool,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub package: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHierarchy {
    pub types: Vec<RawType>,
    #[serde(default)]
    pub base_classes: Vec<String>,
    #[serde(default)]
    pub base_interfaces: Vec<String>,
    #[serde(default)]
    pub base_annotation_types: Vec<String>,
    #[serde(default)]
    pub base_enums: Vec<String>,
    #[serde(default)]
    pub subclasses: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub subinterfaces: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub subenums: HashMap<String, Vec<String>>,
}

// Resolved structures - names replaced by arena indices

/// Index of a type in the [`crate::ClassTree`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
pub struct TypeNode {
    /// Fully qualified name, e.g. `java.lang.Object`
    pub name: String,
    pub kind: TypeKind,
    pub is_public: bool,
    pub package: String,
    /// Declared interfaces in declaration order
    pub interfaces: Vec<NodeId>,
    /// Documentation page, relative to the documentation root
    pub link: Option<String>,
}

impl TypeNode {
    pub fn is_interface(&self) -> bool {
        self.kind.is_interface()
    }

    /// Name without the package prefix. Nested types keep their outer type,
    /// e.g. `Map.Entry` in package `java.util`.
    pub fn simple_name(&self) -> &str {
        if self.package.is_empty() {
            return &self.name;
        }
        self.name
            .strip_prefix(self.package.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(&self.name)
    }

    /// Package derived from a qualified name when the model does not state it
    pub fn package_of(qualified_name: &str) -> &str {
        qualified_name
            .rsplit_once('.')
            .map(|(package, _)| package)
            .unwrap_or("")
    }
}

/// The four root sets of a class tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    Classes,
    Interfaces,
    AnnotationTypes,
    Enums,
}

impl RootKind {
    pub const ALL: [RootKind; 4] = [
        RootKind::Classes,
        RootKind::Interfaces,
        RootKind::AnnotationTypes,
        RootKind::Enums,
    ];

    /// Resource key of the section heading for this root set
    pub fn heading_key(self) -> &'static str {
        match self {
            RootKind::Classes => "doclet.Class_Hierarchy",
            RootKind::Interfaces => "doclet.Interface_Hierarchy",
            RootKind::AnnotationTypes => "doclet.Annotation_Type_Hierarchy",
            RootKind::Enums => "doclet.Enum_Hierarchy",
        }
    }
}
