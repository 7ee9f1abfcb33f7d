//! Locating the component definition a module exports.
//!
//! The module is indexed once (top-level bindings, imports, `Name.static = ...`
//! assignments, exports); the default export is resolved first, through
//! identifiers and wrapper calls such as `hoc(Component)`, then the named
//! exports in source order.

use std::collections::HashMap;

use swc_common::BytePos;
use swc_ecma_ast::{
    ArrowExpr, AssignOp, AssignTarget, CallExpr, Callee, Class, ClassMember, Decl, DefaultDecl,
    Expr, Function, ImportSpecifier, JSXElement, JSXFragment, Module, ModuleDecl, ModuleItem, Pat,
    SimpleAssignTarget, Stmt, VarDeclKind,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::helpers::{last_segment, member_name, prop_name, unwrap_expr};

/// How many identifier or wrapper hops are followed from an export.
const MAX_RESOLVE_DEPTH: usize = 8;

const COMPONENT_BASES: &[&str] = &["Component", "PureComponent"];

#[derive(Clone, Copy)]
pub(super) enum FunctionLike<'a> {
    Function(&'a Function),
    Arrow(&'a ArrowExpr),
}

#[derive(Clone, Copy)]
pub(super) enum DefinitionKind<'a> {
    Class(&'a Class),
    Function(FunctionLike<'a>),
}

pub(super) struct Definition<'a> {
    pub name: Option<String>,
    pub kind: DefinitionKind<'a>,
    /// Positions a documentation comment may be attached to, outermost first.
    pub doc_positions: Vec<BytePos>,
}

#[derive(Clone, Copy)]
enum BindingValue<'a> {
    Class(&'a Class),
    Function(&'a Function),
    Expr(&'a Expr),
}

#[derive(Clone)]
struct Binding<'a> {
    value: BindingValue<'a>,
    doc_positions: Vec<BytePos>,
}

/// Values assigned as `Name.propTypes = ...` and `Name.defaultProps = ...`.
#[derive(Default)]
pub(super) struct StaticAssignments<'a> {
    pub prop_types: Option<&'a Expr>,
    pub default_props: Option<&'a Expr>,
}

#[derive(Default)]
pub(super) struct ModuleIndex<'a> {
    bindings: HashMap<String, Binding<'a>>,
    pub statics: HashMap<String, StaticAssignments<'a>>,
    /// Local binding name → import source.
    pub imports: HashMap<String, String>,
    /// Initializers of top-level `const` bindings.
    pub constants: HashMap<String, &'a Expr>,
    default_export: Option<(Option<String>, Binding<'a>)>,
    named_exports: Vec<String>,
}

impl<'a> ModuleIndex<'a> {
    pub fn build(module: &'a Module) -> Self {
        let mut index = Self::default();

        for item in &module.body {
            match item {
                ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => {
                    let Some(source) = import.src.value.as_str() else {
                        continue;
                    };
                    for specifier in &import.specifiers {
                        let local = match specifier {
                            ImportSpecifier::Named(named) => &named.local,
                            ImportSpecifier::Default(default) => &default.local,
                            ImportSpecifier::Namespace(namespace) => &namespace.local,
                        };
                        index
                            .imports
                            .insert(local.sym.to_string(), source.to_string());
                    }
                }
                ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
                    index.collect_constants(&export.decl);
                    for (name, binding) in decl_bindings(&export.decl, Some(export.span.lo)) {
                        index.named_exports.push(name.clone());
                        index.bindings.insert(name, binding);
                    }
                }
                ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(export)) => {
                    let (name, value, decl_pos) = match &export.decl {
                        DefaultDecl::Class(class) => (
                            class.ident.as_ref().map(|i| i.sym.to_string()),
                            BindingValue::Class(&class.class),
                            class.class.span.lo,
                        ),
                        DefaultDecl::Fn(func) => (
                            func.ident.as_ref().map(|i| i.sym.to_string()),
                            BindingValue::Function(&func.function),
                            func.function.span.lo,
                        ),
                        DefaultDecl::TsInterfaceDecl(_) => continue,
                    };
                    let binding = Binding {
                        value,
                        doc_positions: vec![export.span.lo, decl_pos],
                    };
                    if let Some(name) = &name {
                        index.bindings.insert(name.clone(), binding.clone());
                    }
                    index.default_export = Some((name, binding));
                }
                ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) => {
                    index.default_export = Some((
                        None,
                        Binding {
                            value: BindingValue::Expr(&export.expr),
                            doc_positions: vec![export.span.lo],
                        },
                    ));
                }
                ModuleItem::Stmt(Stmt::Decl(decl)) => {
                    index.collect_constants(decl);
                    for (name, binding) in decl_bindings(decl, None) {
                        index.bindings.insert(name, binding);
                    }
                }
                ModuleItem::Stmt(Stmt::Expr(stmt)) => index.collect_static_assignment(&stmt.expr),
                _ => {}
            }
        }

        index
    }

    fn collect_constants(&mut self, decl: &'a Decl) {
        let Decl::Var(var) = decl else {
            return;
        };
        if var.kind != VarDeclKind::Const {
            return;
        }
        for declarator in &var.decls {
            if let Pat::Ident(binding) = &declarator.name
                && let Some(init) = declarator.init.as_deref()
            {
                self.constants.insert(binding.id.sym.to_string(), init);
            }
        }
    }

    fn collect_static_assignment(&mut self, expr: &'a Expr) {
        if let Expr::Assign(assign) = expr
            && assign.op == AssignOp::Assign
            && let AssignTarget::Simple(SimpleAssignTarget::Member(member)) = &assign.left
            && let Expr::Ident(object) = &*member.obj
            && let Some(property) = member_name(member)
        {
            let entry = self.statics.entry(object.sym.to_string()).or_default();
            match property {
                "propTypes" => entry.prop_types = Some(&*assign.right),
                "defaultProps" => entry.default_props = Some(&*assign.right),
                _ => {}
            }
        }
    }

    /// The exported component: the default export when it is one, otherwise
    /// the first named export that is.
    pub fn find_component(&self) -> Option<Definition<'a>> {
        if let Some((name, binding)) = &self.default_export
            && let Some(definition) = self.resolve(name.clone(), binding.clone(), 0)
            && self.is_component(&definition)
        {
            return Some(definition);
        }

        self.named_exports.iter().find_map(|name| {
            let binding = self.bindings.get(name)?.clone();
            self.resolve(Some(name.clone()), binding, 0)
                .filter(|definition| self.is_component(definition))
        })
    }

    fn resolve(&self, name: Option<String>, binding: Binding<'a>, depth: usize) -> Option<Definition<'a>> {
        let Binding {
            value,
            mut doc_positions,
        } = binding;

        let kind = match value {
            BindingValue::Class(class) => DefinitionKind::Class(class),
            BindingValue::Function(function) => {
                DefinitionKind::Function(FunctionLike::Function(function))
            }
            BindingValue::Expr(expr) => {
                if depth >= MAX_RESOLVE_DEPTH {
                    return None;
                }
                return match unwrap_expr(expr) {
                    Expr::Ident(ident) => {
                        let target = self.bindings.get(ident.sym.as_str())?;
                        doc_positions.extend(target.doc_positions.iter().copied());
                        self.resolve(
                            Some(ident.sym.to_string()),
                            Binding {
                                value: target.value,
                                doc_positions,
                            },
                            depth + 1,
                        )
                    }
                    Expr::Class(class) => {
                        doc_positions.push(class.class.span.lo);
                        Some(Definition {
                            name: class.ident.as_ref().map(|i| i.sym.to_string()).or(name),
                            kind: DefinitionKind::Class(&class.class),
                            doc_positions,
                        })
                    }
                    Expr::Fn(func) => {
                        doc_positions.push(func.function.span.lo);
                        Some(Definition {
                            name: func.ident.as_ref().map(|i| i.sym.to_string()).or(name),
                            kind: DefinitionKind::Function(FunctionLike::Function(&func.function)),
                            doc_positions,
                        })
                    }
                    Expr::Arrow(arrow) => Some(Definition {
                        name,
                        kind: DefinitionKind::Function(FunctionLike::Arrow(arrow)),
                        doc_positions,
                    }),
                    Expr::Call(call) => {
                        let wrapped = wrapped_component(call)?;
                        self.resolve(
                            name,
                            Binding {
                                value: BindingValue::Expr(wrapped),
                                doc_positions,
                            },
                            depth + 1,
                        )
                    }
                    _ => None,
                };
            }
        };

        Some(Definition {
            name,
            kind,
            doc_positions,
        })
    }

    pub fn is_component(&self, definition: &Definition) -> bool {
        let has_prop_type_assignment = definition
            .name
            .as_deref()
            .and_then(|name| self.statics.get(name))
            .is_some_and(|statics| statics.prop_types.is_some());
        if has_prop_type_assignment {
            return true;
        }

        match definition.kind {
            DefinitionKind::Class(class) => is_component_class(class),
            DefinitionKind::Function(function) => match definition.name.as_deref() {
                Some(name) => name.starts_with(|c: char| c.is_ascii_uppercase()),
                None => returns_jsx(function),
            },
        }
    }
}

/// Top-level bindings a declaration introduces, with their comment positions.
fn decl_bindings(decl: &Decl, export_pos: Option<BytePos>) -> Vec<(String, Binding<'_>)> {
    let mut doc_positions: Vec<BytePos> = export_pos.into_iter().collect();

    match decl {
        Decl::Class(class) => {
            doc_positions.push(class.class.span.lo);
            vec![(
                class.ident.sym.to_string(),
                Binding {
                    value: BindingValue::Class(&class.class),
                    doc_positions,
                },
            )]
        }
        Decl::Fn(func) => {
            doc_positions.push(func.function.span.lo);
            vec![(
                func.ident.sym.to_string(),
                Binding {
                    value: BindingValue::Function(&func.function),
                    doc_positions,
                },
            )]
        }
        Decl::Var(var) => {
            doc_positions.push(var.span.lo);
            var.decls
                .iter()
                .filter_map(|declarator| {
                    let Pat::Ident(binding) = &declarator.name else {
                        return None;
                    };
                    let init = declarator.init.as_deref()?;
                    Some((
                        binding.id.sym.to_string(),
                        Binding {
                            value: BindingValue::Expr(init),
                            doc_positions: doc_positions.clone(),
                        },
                    ))
                })
                .collect()
        }
        _ => Vec::new(),
    }
}

/// First argument of a wrapper call such as `connect(mapState)(Component)`
/// or `React.memo(Component)`.
fn wrapped_component(call: &CallExpr) -> Option<&Expr> {
    if !matches!(call.callee, Callee::Expr(_)) {
        return None;
    }
    call.args
        .first()
        .filter(|arg| arg.spread.is_none())
        .map(|arg| &*arg.expr)
}

fn is_component_class(class: &Class) -> bool {
    if class
        .super_class
        .as_deref()
        .and_then(last_segment)
        .is_some_and(|base| COMPONENT_BASES.contains(&base))
    {
        return true;
    }

    class.body.iter().any(|member| match member {
        ClassMember::Method(method) => {
            !method.is_static && prop_name(&method.key).as_deref() == Some("render")
        }
        ClassMember::ClassProp(prop) => {
            prop.is_static && prop_name(&prop.key).as_deref() == Some("propTypes")
        }
        _ => false,
    })
}

fn returns_jsx(function: FunctionLike) -> bool {
    let mut finder = JsxFinder::default();
    match function {
        FunctionLike::Function(function) => function.visit_with(&mut finder),
        FunctionLike::Arrow(arrow) => arrow.visit_with(&mut finder),
    }
    finder.found
}

#[derive(Default)]
struct JsxFinder {
    found: bool,
}

impl Visit for JsxFinder {
    fn visit_jsx_element(&mut self, _: &JSXElement) {
        self.found = true;
    }

    fn visit_jsx_fragment(&mut self, _: &JSXFragment) {
        self.found = true;
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Callee::Expr(callee) = &node.callee
            && last_segment(callee) == Some("createElement")
        {
            self.found = true;
            return;
        }
        node.visit_children_with(self);
    }
}
