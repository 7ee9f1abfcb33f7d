use std::{fs, path::Path};

use anyhow::{Context, Result};

use super::{ExtractOptions, compose::merge_composed, static_methods::scan_static_methods};
use crate::core::{
    annotation::Annotation,
    component::{RawComponent, parse_component},
    model::{ComponentApi, MethodDescriptor, PropsExtends, TypeKind},
    parsers::jsx::{ParsedSource, parse_source},
    render::{render_method_signature, render_props_table},
    resolve::{resolve_methods, resolve_props},
};

const DESCRIPTION_TAG: &str = "description";
const PROPS_EXTENDS_TAG: &str = "propsExtends";
const ORDER_TAG: &str = "order";

/// What one file contributes to a directory extraction.
#[derive(Debug, Default)]
pub struct FileExtraction {
    /// `None` when the file exports no component, leaves it undocumented, or
    /// failed and was reported to the error handler.
    pub component: Option<ComponentApi>,
    /// `@exportName` functions, found whether or not there is a component.
    pub static_methods: Vec<MethodDescriptor>,
}

/// Extract the documented component of one file.
pub fn extract_file(path: &Path, options: &ExtractOptions) -> Result<Option<ComponentApi>> {
    Ok(extract_source_file(path, options)?.component)
}

/// Extract the documented component and the static methods of one file.
///
/// Read, parse and composition failures go to `options.on_error` when it is
/// set. Markdown rendering failures always propagate.
pub fn extract_source_file(path: &Path, options: &ExtractOptions) -> Result<FileExtraction> {
    let parsed = match read_and_parse(path) {
        Ok(parsed) => parsed,
        Err(err) => return handle_error(err, options, Vec::new()),
    };

    let static_methods = scan_static_methods(&parsed);

    let Some(RawComponent {
        description,
        props,
        methods,
        composes,
    }) = parse_component(&parsed)
    else {
        return Ok(FileExtraction {
            component: None,
            static_methods,
        });
    };

    // A component has to document itself to be part of the API.
    let Some(docblock) = description.filter(|doc| !doc.is_empty()) else {
        return Ok(FileExtraction {
            component: None,
            static_methods,
        });
    };

    let props = match merge_composed(path, props, &composes, &options.extensions) {
        Ok(props) => props,
        Err(err) => return handle_error(err, options, static_methods),
    };

    let header = Annotation::parse(&docblock, TypeKind::Plain);
    let mut component = ComponentApi {
        name: header
            .description
            .as_deref()
            .and_then(|d| d.lines().next())
            .unwrap_or_default()
            .trim()
            .to_string(),
        props: resolve_props(props),
        methods: resolve_methods(methods),
        description: header
            .tag(DESCRIPTION_TAG)
            .filter(|d| !d.is_empty())
            .map(str::to_string),
        props_extends: header
            .tag(PROPS_EXTENDS_TAG)
            .filter(|d| !d.is_empty())
            .map(PropsExtends::parse),
        order: header.tag(ORDER_TAG).and_then(parse_order),
        ..Default::default()
    };

    if options.md {
        render_markdown(&mut component)
            .with_context(|| format!("failed to render {}", path.display()))?;
    }

    Ok(FileExtraction {
        component: Some(component),
        static_methods,
    })
}

fn read_and_parse(path: &Path) -> Result<ParsedSource> {
    let code = fs::read_to_string(path)
        .with_context(|| format!("failed to read component source: {}", path.display()))?;
    parse_source(code, path)
        .with_context(|| format!("failed to parse component source: {}", path.display()))
}

fn handle_error(
    err: anyhow::Error,
    options: &ExtractOptions,
    static_methods: Vec<MethodDescriptor>,
) -> Result<FileExtraction> {
    match options.on_error {
        Some(handler) => {
            handler(&err);
            Ok(FileExtraction {
                component: None,
                static_methods,
            })
        }
        None => Err(err),
    }
}

fn render_markdown(component: &mut ComponentApi) -> Result<()> {
    for method in &mut component.methods {
        method.md = Some(render_method_signature(&method.params, method.returns.as_ref()));
    }
    component.props_md = Some(render_props_table(&component.props)?);
    Ok(())
}

/// Leading integer of an `@order` value: `"2"` → 2, `"-1 first"` → -1.
fn parse_order(text: &str) -> Option<i64> {
    let text = text.trim();
    let digits_end = text
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(text.len(), |(i, _)| i);
    text[..digits_end].parse().ok()
}
