//! Annotation resolution: merging comment metadata onto declared props and methods.
//!
//! The declared type always comes from the component parser; the comment only
//! contributes descriptive metadata (description, params, returns, properties,
//! enum descriptions, default, device, version). Props and methods without a
//! comment are not part of the public API and are dropped here.

use indexmap::IndexMap;

use crate::core::{
    annotation::Annotation,
    component::{RawMethod, RawParam, RawProp},
    model::{DocType, MethodDescriptor, PropDescriptor, PropType, TagEntry, TaggedValue, TypeKind},
};

/// Resolve every documented prop, keeping declaration order.
pub fn resolve_props(props: IndexMap<String, RawProp>) -> IndexMap<String, PropDescriptor> {
    props
        .into_iter()
        .filter_map(|(name, raw)| Some((name, resolve_prop(raw)?)))
        .collect()
}

/// Resolve every documented method, keeping declaration order.
pub fn resolve_methods(methods: Vec<RawMethod>) -> Vec<MethodDescriptor> {
    methods.into_iter().filter_map(resolve_method).collect()
}

pub fn resolve_prop(raw: RawProp) -> Option<PropDescriptor> {
    let docblock = raw.docblock.filter(|doc| !doc.is_empty())?;
    let annotation = Annotation::parse(&docblock, raw.prop_type.kind());

    let mut prop_type = raw.prop_type;
    if let PropType::Enum(values) = &mut prop_type {
        for (value, description) in values.iter_mut().zip(&annotation.enum_values) {
            value.description = description.clone();
        }
    }

    Some(PropDescriptor {
        prop_type,
        required: raw.required,
        description: annotation.description,
        default_value: annotation
            .default_value
            .map(TaggedValue::literal)
            .or(raw.default_value),
        docblock,
        params: annotation.params,
        returns: annotation.returns,
        properties: annotation.properties,
        device: annotation.device.map(TaggedValue::literal),
        version: annotation.version.map(TaggedValue::literal),
        custom_tags: annotation.custom_tags,
    })
}

pub fn resolve_method(raw: RawMethod) -> Option<MethodDescriptor> {
    let docblock = raw.docblock.filter(|doc| !doc.is_empty())?;
    let annotation = Annotation::parse(&docblock, TypeKind::Function);

    let params = if annotation.params.is_empty() {
        raw.params.iter().map(declared_param).collect()
    } else {
        annotation
            .params
            .into_iter()
            .map(|mut entry| {
                if entry.doc_type.is_none() {
                    entry.doc_type = raw
                        .params
                        .iter()
                        .find(|param| param.name == entry.name)
                        .and_then(|param| param.type_name.clone())
                        .map(DocType::named);
                }
                entry
            })
            .collect()
    };

    Some(MethodDescriptor {
        name: raw.name,
        docblock,
        description: annotation.description,
        modifiers: raw.modifiers,
        params,
        returns: annotation.returns,
        md: None,
    })
}

fn declared_param(param: &RawParam) -> TagEntry {
    TagEntry {
        name: param.name.clone(),
        description: None,
        doc_type: param.type_name.clone().map(DocType::named),
    }
}
