//! Markdown summaries derived from a resolved model.
//!
//! Rendering is a pure function of the model. It is strict about one thing:
//! every prop that reaches a table must have a description.

use anyhow::{Result, bail};
use indexmap::IndexMap;

use crate::core::model::{DocType, PropDescriptor, PropType, ReturnEntry, TagEntry};

const HEADER: &str = "Param | Description | Type | Default Value";
const SEPARATOR: &str = "-----|-----|-----|-----";

/// Render the props table, or an empty string when there are no props.
///
/// A `Version` column is added when any prop carries a `@version`.
pub fn render_props_table(props: &IndexMap<String, PropDescriptor>) -> Result<String> {
    if props.is_empty() {
        return Ok(String::new());
    }

    let with_version = props.values().any(|prop| prop.version.is_some());
    let (header, separator) = if with_version {
        (format!("{HEADER} | Version"), format!("{SEPARATOR}|-----"))
    } else {
        (HEADER.to_string(), SEPARATOR.to_string())
    };

    let mut table = format!("\n{header}\n{separator}\n");
    for (name, prop) in props.iter() {
        table.push_str(&render_prop_row(name, prop, with_version)?);
    }
    Ok(table)
}

fn render_prop_row(name: &str, prop: &PropDescriptor, with_version: bool) -> Result<String> {
    let Some(description) = prop.description.as_deref().filter(|d| !d.is_empty()) else {
        bail!("Can not get description of '{name}' prop");
    };
    let description = description.replace('\n', "<br>");

    let extra = match &prop.prop_type {
        PropType::Func => format!(
            "<br><br>{}",
            render_method_signature(&prop.params, prop.returns.as_ref())
        ),
        PropType::Object | PropType::ObjectOf(_) | PropType::Shape(_) | PropType::Exact(_)
            if !prop.properties.is_empty() =>
        {
            format!("<br><br>**Properties**:<br>{}", render_entries(&prop.properties))
        }
        PropType::Enum(values) => {
            let has_description = values.iter().any(|v| has_text(v.description.as_deref()));
            let rendered: Vec<String> = values
                .iter()
                .map(|v| match v.description.as_deref() {
                    Some(desc) if !desc.is_empty() => format!("{}({desc})", v.value),
                    _ => v.value.clone(),
                })
                .collect();
            let joined = rendered.join(if has_description { "<br>" } else { ", " });
            format!("<br><br>**Values**:<br>{joined}")
        }
        _ => String::new(),
    };

    let default_value = prop
        .default_value
        .as_ref()
        .map(|d| escape_cell(&d.value))
        .unwrap_or_else(|| "-".to_string());

    let mut row = format!(
        "{name} | {description}{extra} | {} | {default_value}",
        display_type(&prop.prop_type)
    );
    if with_version {
        let version = prop.version.as_ref().map_or("-", |v| v.value.as_str());
        row.push_str(&format!(" | {version}"));
    }
    row.push('\n');
    Ok(row)
}

/// Signature block for a function prop or a method.
pub fn render_method_signature(params: &[TagEntry], returns: Option<&ReturnEntry>) -> String {
    let signature = params
        .iter()
        .filter(|param| !param.name.contains('.'))
        .map(|param| format!("{}: {}", param.name, type_label(param.doc_type.as_ref())))
        .collect::<Vec<_>>()
        .join(", ");
    let return_type = returns.map_or_else(|| "void".to_string(), |r| type_label(r.doc_type.as_ref()));

    let mut block = format!("**Signature**:<br>Function({signature}) => {return_type}");
    if !params.is_empty() {
        block.push_str("<br>**Params**:<br>");
        block.push_str(&render_entries(params));
    }
    if let Some(returns) = returns {
        let line = format!(
            "{{{}}} {}",
            type_label(returns.doc_type.as_ref()),
            returns.description.as_deref().unwrap_or_default()
        );
        block.push_str("<br>**Return**:<br>");
        block.push_str(line.trim_end());
        block.push_str("<br>");
    }
    block
}

fn render_entries(entries: &[TagEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "*{}*: {{{}}} {}",
                entry.name,
                type_label(entry.doc_type.as_ref()),
                entry.description.as_deref().unwrap_or_default()
            )
            .trim_end()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("<br>")
}

fn type_label(doc_type: Option<&DocType>) -> String {
    match doc_type {
        None => "unknown".to_string(),
        Some(DocType {
            value: Some(members),
            ..
        }) => members.join("/"),
        Some(doc_type) => doc_type.name.clone(),
    }
}

/// Human-facing name of a declared prop type.
pub fn display_type(prop_type: &PropType) -> String {
    let name = match prop_type {
        PropType::Union(members) => {
            return members.iter().map(display_type).collect::<Vec<_>>().join("/");
        }
        PropType::InstanceOf(class_name) => return class_name.clone(),
        PropType::ArrayOf(inner) => return format!("Array&lt;{}&gt;", display_type(inner)),
        PropType::Any => "any",
        PropType::Array => "Array",
        PropType::Bool => "Boolean",
        PropType::Custom(_) => "custom",
        PropType::Element => "ReactElement",
        PropType::ElementType => "ElementType",
        PropType::Enum(_) => "Enum",
        PropType::Func => "Function",
        PropType::Node => "ReactNode",
        PropType::Number => "Number",
        PropType::Object | PropType::ObjectOf(_) | PropType::Shape(_) | PropType::Exact(_) => {
            "Object"
        }
        PropType::String => "String",
        PropType::Symbol => "Symbol",
    };
    name.to_string()
}

fn has_text(text: Option<&str>) -> bool {
    text.is_some_and(|t| !t.is_empty())
}

fn escape_cell(value: &str) -> String {
    value
        .replace('\n', " ")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
