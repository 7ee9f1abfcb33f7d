//! Component-metadata parser.
//!
//! Reads the exported React component of one parsed module and reports its
//! declared props (with decoded PropTypes and defaults), its methods and the
//! modules it composes props from. Comments are attached raw; interpreting
//! them is the resolver's job.

mod definition;
mod helpers;
mod prop_types;

use indexmap::IndexMap;
use swc_common::{BytePos, Spanned};
use swc_ecma_ast::{
    Class, ClassMember, Expr, Function, MethodKind, ObjectLit, Pat, Prop, PropOrSpread,
};

use crate::core::{
    model::{Modifier, PropType, TaggedValue},
    parsers::{docblock::clean_comment, jsx::ParsedSource},
};
use definition::{Definition, DefinitionKind, ModuleIndex};
use helpers::{is_static_value, member_name, prop_name, ts_type_name, unwrap_expr};
use prop_types::PropTypeDecoder;

/// Methods React calls itself; never part of a component's public API.
const LIFECYCLE_METHODS: &[&str] = &[
    "constructor",
    "render",
    "componentWillMount",
    "UNSAFE_componentWillMount",
    "componentDidMount",
    "componentWillReceiveProps",
    "UNSAFE_componentWillReceiveProps",
    "shouldComponentUpdate",
    "componentWillUpdate",
    "UNSAFE_componentWillUpdate",
    "getSnapshotBeforeUpdate",
    "componentDidUpdate",
    "componentWillUnmount",
    "componentDidCatch",
    "getDerivedStateFromProps",
    "getDerivedStateFromError",
    "getChildContext",
];

/// Static class properties with a meaning to React.
const RESERVED_STATICS: &[&str] = &[
    "propTypes",
    "defaultProps",
    "contextTypes",
    "childContextTypes",
    "contextType",
    "displayName",
];

#[derive(Debug, Clone, PartialEq)]
pub struct RawProp {
    pub prop_type: PropType,
    pub required: bool,
    /// Cleaned leading comment, if the prop has one.
    pub docblock: Option<String>,
    pub default_value: Option<TaggedValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawParam {
    pub name: String,
    pub type_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawMethod {
    pub name: String,
    pub docblock: Option<String>,
    pub modifiers: Vec<Modifier>,
    pub params: Vec<RawParam>,
}

/// Everything the parser knows about a component before comments are interpreted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawComponent {
    /// Cleaned comment attached to the component definition or its export.
    pub description: Option<String>,
    pub props: IndexMap<String, RawProp>,
    pub methods: Vec<RawMethod>,
    /// Import sources whose `propTypes` are spread into this component's.
    pub composes: Vec<String>,
}

/// Read the exported component of `parsed`, or `None` if the module exports none.
pub fn parse_component(parsed: &ParsedSource) -> Option<RawComponent> {
    let index = ModuleIndex::build(&parsed.module);
    let definition = index.find_component()?;
    Some(ComponentReader::new(parsed, &index).read(&definition))
}

struct ComponentReader<'a> {
    parsed: &'a ParsedSource,
    index: &'a ModuleIndex<'a>,
    decoder: PropTypeDecoder<'a>,
}

impl<'a> ComponentReader<'a> {
    fn new(parsed: &'a ParsedSource, index: &'a ModuleIndex<'a>) -> Self {
        Self {
            parsed,
            index,
            decoder: PropTypeDecoder::new(parsed, &index.constants),
        }
    }

    fn read(&self, definition: &Definition) -> RawComponent {
        let mut component = RawComponent {
            description: definition
                .doc_positions
                .iter()
                .find_map(|pos| self.docblock(*pos)),
            ..Default::default()
        };

        let mut prop_types: Vec<&Expr> = Vec::new();
        let mut default_props: Vec<&Expr> = Vec::new();

        if let DefinitionKind::Class(class) = definition.kind {
            for member in &class.body {
                if let ClassMember::ClassProp(prop) = member
                    && prop.is_static
                    && let Some(value) = prop.value.as_deref()
                {
                    match prop_name(&prop.key).as_deref() {
                        Some("propTypes") => prop_types.push(value),
                        Some("defaultProps") => default_props.push(value),
                        _ => {}
                    }
                }
            }
        }

        if let Some(statics) = definition
            .name
            .as_deref()
            .and_then(|name| self.index.statics.get(name))
        {
            prop_types.extend(statics.prop_types);
            default_props.extend(statics.default_props);
        }

        for expr in prop_types {
            if let Expr::Object(object) = unwrap_expr(expr) {
                self.read_prop_types(object, &mut component);
            }
        }
        for expr in default_props {
            if let Expr::Object(object) = unwrap_expr(expr) {
                self.read_defaults(object, &mut component.props);
            }
        }

        if let DefinitionKind::Class(class) = definition.kind {
            component.methods = self.read_methods(class);
        }

        component
    }

    fn docblock(&self, pos: BytePos) -> Option<String> {
        self.parsed.comments.docblock_at(pos).map(clean_comment)
    }

    fn read_prop_types(&self, object: &ObjectLit, component: &mut RawComponent) {
        for prop in &object.props {
            match prop {
                PropOrSpread::Spread(spread) => {
                    if let Some(source) = self.spread_source(&spread.expr)
                        && !component.composes.contains(&source)
                    {
                        component.composes.push(source);
                    }
                }
                PropOrSpread::Prop(prop) => match &**prop {
                    Prop::KeyValue(kv) => {
                        let Some(name) = prop_name(&kv.key) else {
                            continue;
                        };
                        let (prop_type, required) = self.decoder.decode(&kv.value);
                        component.props.insert(
                            name,
                            RawProp {
                                prop_type,
                                required,
                                docblock: self.docblock(kv.key.span_lo()),
                                default_value: None,
                            },
                        );
                    }
                    Prop::Shorthand(ident) => {
                        component.props.insert(
                            ident.sym.to_string(),
                            RawProp {
                                prop_type: PropType::Custom(ident.sym.to_string()),
                                required: false,
                                docblock: self.docblock(ident.span.lo),
                                default_value: None,
                            },
                        );
                    }
                    _ => {}
                },
            }
        }
    }

    /// `...Base.propTypes` → the module `Base` is imported from.
    fn spread_source(&self, expr: &Expr) -> Option<String> {
        let Expr::Member(member) = unwrap_expr(expr) else {
            return None;
        };
        if member_name(member) != Some("propTypes") {
            return None;
        }
        let Expr::Ident(object) = unwrap_expr(&member.obj) else {
            return None;
        };
        self.index.imports.get(object.sym.as_str()).cloned()
    }

    /// Attach defaults to declared props; defaults for undeclared props are ignored.
    fn read_defaults(&self, object: &ObjectLit, props: &mut IndexMap<String, RawProp>) {
        for prop in &object.props {
            let PropOrSpread::Prop(prop) = prop else {
                continue;
            };
            let (name, value) = match &**prop {
                Prop::KeyValue(kv) => (
                    prop_name(&kv.key),
                    TaggedValue {
                        value: self.parsed.snippet(kv.value.span()),
                        computed: !is_static_value(&kv.value),
                    },
                ),
                Prop::Method(method) => (
                    prop_name(&method.key),
                    TaggedValue::literal(self.parsed.snippet(prop.span())),
                ),
                Prop::Shorthand(ident) => (
                    Some(ident.sym.to_string()),
                    TaggedValue {
                        value: ident.sym.to_string(),
                        computed: true,
                    },
                ),
                _ => continue,
            };
            if let Some(name) = name
                && let Some(raw) = props.get_mut(&name)
            {
                raw.default_value = Some(value);
            }
        }
    }

    fn read_methods(&self, class: &Class) -> Vec<RawMethod> {
        class
            .body
            .iter()
            .filter_map(|member| {
                let (name, is_static, pos, params) = match member {
                    ClassMember::Method(method) if method.kind == MethodKind::Method => (
                        prop_name(&method.key)?,
                        method.is_static,
                        method.span.lo,
                        function_params(&method.function),
                    ),
                    ClassMember::ClassProp(prop) => {
                        let params = match unwrap_expr(prop.value.as_deref()?) {
                            Expr::Arrow(arrow) => arrow.params.iter().filter_map(pat_param).collect(),
                            Expr::Fn(func) => function_params(&func.function),
                            _ => return None,
                        };
                        (prop_name(&prop.key)?, prop.is_static, prop.span.lo, params)
                    }
                    _ => return None,
                };

                if LIFECYCLE_METHODS.contains(&name.as_str())
                    || (is_static && RESERVED_STATICS.contains(&name.as_str()))
                {
                    return None;
                }

                Some(RawMethod {
                    docblock: self.docblock(pos),
                    modifiers: if is_static { vec![Modifier::Static] } else { Vec::new() },
                    name,
                    params,
                })
            })
            .collect()
    }
}

fn function_params(function: &Function) -> Vec<RawParam> {
    function
        .params
        .iter()
        .filter_map(|param| pat_param(&param.pat))
        .collect()
}

fn pat_param(pat: &Pat) -> Option<RawParam> {
    match pat {
        Pat::Ident(binding) => Some(RawParam {
            name: binding.id.sym.to_string(),
            type_name: binding
                .type_ann
                .as_deref()
                .and_then(|ann| ts_type_name(&ann.type_ann)),
        }),
        Pat::Assign(assign) => pat_param(&assign.left),
        Pat::Rest(rest) => pat_param(&rest.arg).map(|param| RawParam {
            name: format!("...{}", param.name),
            ..param
        }),
        _ => None,
    }
}
