//! Comment-tag interpretation.
//!
//! Turns one structured comment into an [`Annotation`]: the typed record the
//! resolver merges onto a declared prop or method. Which tags are interpreted
//! depends on the documented thing's [`TypeKind`]; every tag that is not
//! interpreted is kept verbatim in `custom_tags`.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::core::{
    model::{ReturnEntry, TagEntry, TypeKind},
    parsers::docblock::{DocBlock, DocTag, parse_docblock},
};

static ENUM_DESC_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*").unwrap());

const PARAM_TAGS: &[&str] = &["param", "params"];
const RETURN_TAGS: &[&str] = &["return", "returns"];
const PROPERTY_TAG: &str = "property";
const ENUM_DESC_TAG: &str = "enumdesc";
const DEFAULT_TAG: &str = "default";
const DEVICE_TAG: &str = "device";
const VERSION_TAG: &str = "version";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Annotation {
    pub description: Option<String>,
    pub params: Vec<TagEntry>,
    pub returns: Option<ReturnEntry>,
    pub properties: Vec<TagEntry>,
    /// Per-value descriptions aligned to the declared enum values. Empty when
    /// the comment has no `@enumdesc`.
    pub enum_values: Vec<Option<String>>,
    pub default_value: Option<String>,
    pub device: Option<String>,
    pub version: Option<String>,
    pub custom_tags: IndexMap<String, String>,
}

impl Annotation {
    /// Parse `comment` and interpret its tags for a value of `kind`.
    pub fn parse(comment: &str, kind: TypeKind) -> Self {
        Self::from_docblock(&parse_docblock(comment), kind)
    }

    pub fn from_docblock(doc: &DocBlock, kind: TypeKind) -> Self {
        let mut annotation = Annotation {
            description: (!doc.description.is_empty()).then(|| doc.description.clone()),
            ..Default::default()
        };

        match kind {
            TypeKind::Function => {
                annotation.params = doc.tags_titled(PARAM_TAGS).map(to_entry).collect();
                annotation.returns = doc.tags_titled(RETURN_TAGS).next().map(|tag| ReturnEntry {
                    description: tag.description.clone(),
                    doc_type: tag.doc_type.clone(),
                });
            }
            TypeKind::ObjectLike => {
                annotation.properties = doc.tags_titled(&[PROPERTY_TAG]).map(to_entry).collect();
            }
            TypeKind::Enum { len } => {
                if let Some(descriptions) = doc.tag(ENUM_DESC_TAG).and_then(|t| t.description.as_deref()) {
                    let descriptions: Vec<&str> = ENUM_DESC_SEPARATOR.split(descriptions).collect();
                    annotation.enum_values = (0..len)
                        .map(|i| descriptions.get(i).map(|d| d.to_string()))
                        .collect();
                }
            }
            TypeKind::Plain => {}
        }

        annotation.default_value = tag_text(doc, DEFAULT_TAG);
        annotation.device = tag_text(doc, DEVICE_TAG);
        annotation.version = tag_text(doc, VERSION_TAG);

        for tag in &doc.tags {
            if !is_interpreted(&tag.title, kind) {
                annotation
                    .custom_tags
                    .entry(tag.title.clone())
                    .or_insert_with(|| tag.raw.clone());
            }
        }

        annotation
    }

    /// Raw content of an uninterpreted tag, e.g. a directive like `@order`.
    pub fn tag(&self, title: &str) -> Option<&str> {
        self.custom_tags.get(title).map(String::as_str)
    }
}

fn to_entry(tag: &DocTag) -> TagEntry {
    TagEntry {
        name: tag.name.clone().unwrap_or_default(),
        description: tag.description.clone(),
        doc_type: tag.doc_type.clone(),
    }
}

/// Non-empty description of the first tag with this title.
fn tag_text(doc: &DocBlock, title: &str) -> Option<String> {
    doc.tag(title).and_then(|tag| tag.description.clone())
}

fn is_interpreted(title: &str, kind: TypeKind) -> bool {
    if [DEFAULT_TAG, DEVICE_TAG, VERSION_TAG].contains(&title) {
        return true;
    }
    match kind {
        TypeKind::Function => PARAM_TAGS.contains(&title) || RETURN_TAGS.contains(&title),
        TypeKind::ObjectLike => title == PROPERTY_TAG,
        TypeKind::Enum { .. } => title == ENUM_DESC_TAG,
        TypeKind::Plain => false,
    }
}
