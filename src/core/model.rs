//! Serializable API model produced by extraction.
//!
//! The JSON shape follows the react-docgen conventions (`{"name": kind,
//! "value": payload}` for prop types, `{value, computed}` for defaults) with
//! the comment-sourced metadata merged in.

use std::{collections::BTreeMap, path::PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};


/// Separator between a root component and its sub-component (`Input.Hint`).
pub const NAME_SEPARATOR: char = '.';

/// Declared runtime type of a prop, decoded from its PropTypes expression.
///
/// The kind is owned by the component-metadata parser; merging comment
/// metadata never changes it (enum values only gain descriptions).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "name", content = "value", rename_all = "camelCase")]
pub enum PropType {
    Any,
    Array,
    Bool,
    Func,
    Number,
    Object,
    String,
    Symbol,
    Node,
    Element,
    ElementType,
    Enum(Vec<EnumValue>),
    Union(Vec<PropType>),
    ArrayOf(Box<PropType>),
    ObjectOf(Box<PropType>),
    InstanceOf(String),
    Shape(IndexMap<String, ShapeField>),
    Exact(IndexMap<String, ShapeField>),
    Custom(String),
}

impl PropType {
    /// Map a bare `PropTypes.<name>` member to its kind.
    pub fn from_simple_name(name: &str) -> Option<Self> {
        Some(match name {
            "any" => Self::Any,
            "array" => Self::Array,
            "bool" => Self::Bool,
            "func" => Self::Func,
            "number" => Self::Number,
            "object" => Self::Object,
            "string" => Self::String,
            "symbol" => Self::Symbol,
            "node" => Self::Node,
            "element" => Self::Element,
            "elementType" => Self::ElementType,
            _ => return None,
        })
    }

    /// The kind used to decide which comment tags apply.
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Func => TypeKind::Function,
            Self::Object | Self::ObjectOf(_) | Self::Shape(_) | Self::Exact(_) => {
                TypeKind::ObjectLike
            }
            Self::Enum(values) => TypeKind::Enum { len: values.len() },
            _ => TypeKind::Plain,
        }
    }
}

/// Coarse kind a comment is interpreted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// `@param` and `@returns` apply.
    Function,
    /// `@property` applies.
    ObjectLike,
    /// `@enumdesc` applies, aligned to `len` declared values.
    Enum { len: usize },
    /// Free-form: only the kind-independent tags apply.
    Plain,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValue {
    /// Raw source text of the value (quotes included for string literals).
    pub value: String,
    pub computed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeField {
    #[serde(rename = "type")]
    pub prop_type: PropType,
    pub required: bool,
}

/// Type written inside a comment tag, e.g. `{String|Number}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocType {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<String>>,
}

impl DocType {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn union(members: Vec<String>) -> Self {
        Self {
            name: "union".to_string(),
            value: Some(members),
        }
    }

    pub fn mixed() -> Self {
        Self::named("mixed")
    }
}

/// A `@param` or `@property` entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagEntry {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<DocType>,
}

/// A `@returns` entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnEntry {
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<DocType>,
}

/// A value carried in the react-docgen `{value, computed}` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedValue {
    pub value: String,
    pub computed: bool,
}

impl TaggedValue {
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            computed: false,
        }
    }
}

/// A documented prop: declared type plus merged comment metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropDescriptor {
    #[serde(rename = "type")]
    pub prop_type: PropType,
    pub required: bool,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<TaggedValue>,
    pub docblock: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<TagEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<ReturnEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<TagEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<TaggedValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<TaggedValue>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub custom_tags: IndexMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Static,
}

/// A documented component method or exported static function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDescriptor {
    pub name: String,
    pub docblock: String,
    pub description: Option<String>,
    pub modifiers: Vec<Modifier>,
    pub params: Vec<TagEntry>,
    pub returns: Option<ReturnEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md: Option<String>,
}

impl MethodDescriptor {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }
}

/// `@propsExtends` directive: a parent component name, or `false` to opt out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropsExtends {
    Disabled,
    Component(String),
}

impl PropsExtends {
    pub fn parse(text: &str) -> Self {
        if text == "false" {
            Self::Disabled
        } else {
            Self::Component(text.to_string())
        }
    }
}

impl Serialize for PropsExtends {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Disabled => serializer.serialize_bool(false),
            Self::Component(name) => serializer.serialize_str(name),
        }
    }
}

/// API description of one logical component.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentApi {
    pub name: String,
    pub props: IndexMap<String, PropDescriptor>,
    pub methods: Vec<MethodDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props_extends: Option<PropsExtends>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(rename = "propsMD", skip_serializing_if = "Option::is_none")]
    pub props_md: Option<String>,
    /// Only set on the root model returned by directory extraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_components: Option<Vec<ComponentApi>>,
}

impl ComponentApi {
    /// A model with a name and nothing else, used for a synthesized root.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn is_sub_component_name(&self) -> bool {
        self.name.contains(NAME_SEPARATOR)
    }
}

/// Where a component inherits its props from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParentRef {
    /// Full (dotted) name of the parent component.
    pub name: String,
    /// Directory holding the parent component's files.
    #[serde(alias = "relativePath")]
    pub path: PathBuf,
}

/// Maps a dotted component name to the component whose props it inherits.
pub type ParentMap = BTreeMap<String, ParentRef>;
