use swc_common::{Spanned, comments::CommentKind};

use crate::core::{
    annotation::Annotation,
    model::{MethodDescriptor, Modifier, TypeKind},
    parsers::{
        docblock::{clean_comment, parse_docblock},
        jsx::ParsedSource,
    },
};

const EXPORT_NAME_TAG: &str = "exportName";

/// Collect top-level functions documented with `@exportName`.
///
/// The tag, not the declaration, marks a function as public: any top-level
/// statement whose first leading comment is a block comment with a non-empty
/// `@exportName` becomes a static method named after the tag.
pub fn scan_static_methods(parsed: &ParsedSource) -> Vec<MethodDescriptor> {
    parsed
        .module
        .body
        .iter()
        .filter_map(|item| {
            let comment = parsed.comments.leading_at(item.span_lo()).first()?;
            if comment.kind != CommentKind::Block {
                return None;
            }

            let docblock = clean_comment(&comment.text);
            let doc = parse_docblock(&docblock);
            let name = doc.tag(EXPORT_NAME_TAG)?.description.clone()?;
            let annotation = Annotation::from_docblock(&doc, TypeKind::Function);

            Some(MethodDescriptor {
                name,
                docblock,
                description: annotation.description,
                modifiers: vec![Modifier::Static],
                params: annotation.params,
                returns: annotation.returns,
                md: None,
            })
        })
        .collect()
}
