//! Decoding of `PropTypes` expressions into [`PropType`].

use std::collections::HashMap;

use indexmap::IndexMap;
use swc_common::Spanned;
use swc_ecma_ast::{CallExpr, Callee, Expr, Prop, PropOrSpread};

use super::helpers::{is_literal, member_name, prop_name, unwrap_expr};
use crate::core::{
    model::{EnumValue, PropType, ShapeField},
    parsers::jsx::ParsedSource,
};

pub(super) struct PropTypeDecoder<'a> {
    parsed: &'a ParsedSource,
    /// Top-level `const` initializers, for `oneOf(SIZES)`-style references.
    constants: &'a HashMap<String, &'a Expr>,
}

impl<'a> PropTypeDecoder<'a> {
    pub fn new(parsed: &'a ParsedSource, constants: &'a HashMap<String, &'a Expr>) -> Self {
        Self { parsed, constants }
    }

    /// Decode a prop's validator, returning its type and `isRequired` flag.
    pub fn decode(&self, expr: &Expr) -> (PropType, bool) {
        let expr = unwrap_expr(expr);
        if let Expr::Member(member) = expr
            && member_name(member) == Some("isRequired")
        {
            return (self.decode(&member.obj).0, true);
        }
        (self.decode_type(expr), false)
    }

    fn decode_type(&self, expr: &Expr) -> PropType {
        let decoded = match expr {
            Expr::Member(member) => member_name(member).and_then(PropType::from_simple_name),
            Expr::Call(call) => self.decode_call(call),
            _ => None,
        };
        decoded.unwrap_or_else(|| PropType::Custom(self.parsed.snippet(expr.span())))
    }

    fn decode_call(&self, call: &CallExpr) -> Option<PropType> {
        let Callee::Expr(callee) = &call.callee else {
            return None;
        };
        let name = match unwrap_expr(callee) {
            Expr::Member(member) => member_name(member)?,
            Expr::Ident(ident) => ident.sym.as_str(),
            _ => return None,
        };
        let arg = call
            .args
            .first()
            .filter(|arg| arg.spread.is_none())
            .map(|arg| unwrap_expr(&arg.expr))?;

        Some(match name {
            "oneOf" => PropType::Enum(
                self.array_elements(arg)?
                    .into_iter()
                    .map(|element| EnumValue {
                        value: self.parsed.snippet(element.span()),
                        computed: !is_literal(element),
                        description: None,
                    })
                    .collect(),
            ),
            "oneOfType" => PropType::Union(
                self.array_elements(arg)?
                    .into_iter()
                    .map(|element| self.decode(element).0)
                    .collect(),
            ),
            "arrayOf" => PropType::ArrayOf(Box::new(self.decode(arg).0)),
            "objectOf" => PropType::ObjectOf(Box::new(self.decode(arg).0)),
            "instanceOf" => PropType::InstanceOf(self.parsed.snippet(arg.span())),
            "shape" => PropType::Shape(self.shape_fields(arg)?),
            "exact" => PropType::Exact(self.shape_fields(arg)?),
            _ => return None,
        })
    }

    fn shape_fields(&self, expr: &Expr) -> Option<IndexMap<String, ShapeField>> {
        let Expr::Object(object) = expr else {
            return None;
        };

        let mut fields = IndexMap::new();
        for prop in &object.props {
            if let PropOrSpread::Prop(prop) = prop
                && let Prop::KeyValue(kv) = &**prop
                && let Some(name) = prop_name(&kv.key)
            {
                let (prop_type, required) = self.decode(&kv.value);
                fields.insert(name, ShapeField { prop_type, required });
            }
        }
        Some(fields)
    }

    /// Elements of an array literal, or of the array a top-level constant holds.
    fn array_elements<'e>(&self, expr: &'e Expr) -> Option<Vec<&'e Expr>>
    where
        'a: 'e,
    {
        let expr = match expr {
            Expr::Ident(ident) => unwrap_expr(*self.constants.get(ident.sym.as_str())?),
            _ => expr,
        };
        let Expr::Array(array) = expr else {
            return None;
        };
        Some(
            array
                .elems
                .iter()
                .flatten()
                .filter(|element| element.spread.is_none())
                .map(|element| unwrap_expr(&element.expr))
                .collect(),
        )
    }
}
