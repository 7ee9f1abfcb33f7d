use swc_ecma_ast::{Expr, MemberExpr, MemberProp, PropName, TsEntityName, TsKeywordTypeKind, TsType};

/// Strip TypeScript assertions and parentheses around an expression.
pub(super) fn unwrap_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::TsAs(ts_as) => unwrap_expr(&ts_as.expr),
        Expr::TsConstAssertion(ts_const) => unwrap_expr(&ts_const.expr),
        Expr::TsSatisfies(ts_sat) => unwrap_expr(&ts_sat.expr),
        Expr::TsNonNull(ts_non_null) => unwrap_expr(&ts_non_null.expr),
        Expr::Paren(paren) => unwrap_expr(&paren.expr),
        _ => expr,
    }
}

/// Static name of an object or class key.
pub(super) fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(str::to_string),
        PropName::Num(n) => Some(n.value.to_string()),
        _ => None,
    }
}

/// `obj.name` → `name`; computed members have no static name.
pub(super) fn member_name(member: &MemberExpr) -> Option<&str> {
    match &member.prop {
        MemberProp::Ident(ident) => Some(ident.sym.as_str()),
        _ => None,
    }
}

/// Last segment of a possibly dotted callee or superclass: `React.Component` → `Component`.
pub(super) fn last_segment(expr: &Expr) -> Option<&str> {
    match unwrap_expr(expr) {
        Expr::Ident(ident) => Some(ident.sym.as_str()),
        Expr::Member(member) => member_name(member),
        _ => None,
    }
}

/// Display name of a TypeScript parameter annotation.
pub(super) fn ts_type_name(ts_type: &TsType) -> Option<String> {
    let name = match ts_type {
        TsType::TsKeywordType(keyword) => match keyword.kind {
            TsKeywordTypeKind::TsStringKeyword => "String",
            TsKeywordTypeKind::TsNumberKeyword => "Number",
            TsKeywordTypeKind::TsBooleanKeyword => "Boolean",
            TsKeywordTypeKind::TsObjectKeyword => "Object",
            TsKeywordTypeKind::TsSymbolKeyword => "Symbol",
            TsKeywordTypeKind::TsAnyKeyword => "any",
            TsKeywordTypeKind::TsVoidKeyword => "void",
            _ => return None,
        },
        TsType::TsArrayType(_) => "Array",
        TsType::TsFnOrConstructorType(_) => "Function",
        TsType::TsTypeRef(type_ref) => {
            return Some(match &type_ref.type_name {
                TsEntityName::Ident(ident) => ident.sym.to_string(),
                TsEntityName::TsQualifiedName(qualified) => qualified.right.sym.to_string(),
            });
        }
        _ => return None,
    };
    Some(name.to_string())
}

/// Whether a value expression is fully known from its source text.
///
/// Mirrors react-docgen's `computed` flag: literals and literal-only
/// collections are not computed, references and calls are.
pub(super) fn is_static_value(expr: &Expr) -> bool {
    match unwrap_expr(expr) {
        Expr::Lit(_) => true,
        Expr::Tpl(tpl) => tpl.exprs.is_empty(),
        Expr::Unary(unary) => matches!(unwrap_expr(&unary.arg), Expr::Lit(_)),
        Expr::Array(_) | Expr::Object(_) | Expr::Arrow(_) | Expr::Fn(_) => true,
        _ => false,
    }
}

/// Whether an enum member is a literal (as opposed to a referenced constant).
pub(super) fn is_literal(expr: &Expr) -> bool {
    match unwrap_expr(expr) {
        Expr::Lit(_) => true,
        Expr::Tpl(tpl) => tpl.exprs.is_empty(),
        Expr::Unary(unary) => matches!(unwrap_expr(&unary.arg), Expr::Lit(_)),
        _ => false,
    }
}
