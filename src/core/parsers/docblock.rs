//! Structured (JSDoc-style) comment parsing.
//!
//! Turns a block comment body into a leading description plus an ordered list
//! of `@tag` entries. Parsing never fails: malformed tag syntax degrades to
//! plain description text.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::model::DocType;

static TAG_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z_][\w-]*)(?:\s+(.*))?$").unwrap());

/// Tags whose body is `{type} name description`.
const NAMED_TAGS: &[&str] = &["param", "params", "arg", "argument", "property", "prop"];

/// Tags whose body is `{type} description`.
const RETURN_TAGS: &[&str] = &["return", "returns"];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocBlock {
    pub description: String,
    pub tags: Vec<DocTag>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocTag {
    pub title: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub doc_type: Option<DocType>,
    /// Tag body exactly as written (after the title), trimmed.
    pub raw: String,
}

impl DocBlock {
    /// First tag with the given title.
    pub fn tag(&self, title: &str) -> Option<&DocTag> {
        self.tags.iter().find(|tag| tag.title == title)
    }

    /// All tags whose title is one of `titles`, in source order.
    pub fn tags_titled<'a>(&'a self, titles: &'a [&str]) -> impl Iterator<Item = &'a DocTag> {
        self.tags
            .iter()
            .filter(move |tag| titles.contains(&tag.title.as_str()))
    }
}

/// Strip comment decoration (`/**`, leading `*`, `*/`) from every line.
pub fn clean_comment(text: &str) -> String {
    let text = text.trim();
    let text = text.strip_prefix("/**").or_else(|| text.strip_prefix("/*")).unwrap_or(text);
    let text = text.strip_suffix("*/").unwrap_or(text);

    let lines: Vec<&str> = text
        .lines()
        .map(|line| line.trim().trim_start_matches('*').trim())
        .collect();

    lines.join("\n").trim().to_string()
}

/// Parse a comment body into description and tags.
pub fn parse_docblock(text: &str) -> DocBlock {
    let cleaned = clean_comment(text);

    let mut description_lines: Vec<&str> = Vec::new();
    let mut raw_tags: Vec<(String, String)> = Vec::new();

    for line in cleaned.lines() {
        if let Some(caps) = TAG_LINE_REGEX.captures(line) {
            let title = caps[1].to_string();
            let body = caps.get(2).map_or("", |m| m.as_str()).to_string();
            raw_tags.push((title, body));
        } else if let Some((_, body)) = raw_tags.last_mut() {
            body.push('\n');
            body.push_str(line);
        } else {
            description_lines.push(line);
        }
    }

    DocBlock {
        description: description_lines.join("\n").trim().to_string(),
        tags: raw_tags
            .into_iter()
            .map(|(title, body)| parse_tag(title, body.trim()))
            .collect(),
    }
}

fn parse_tag(title: String, body: &str) -> DocTag {
    let raw = body.to_string();

    if NAMED_TAGS.contains(&title.as_str()) {
        let (doc_type, rest) = split_type(body);
        let (name, rest) = split_name(rest);
        return DocTag {
            title,
            name,
            description: non_empty(strip_hyphen(rest)),
            doc_type,
            raw,
        };
    }

    if RETURN_TAGS.contains(&title.as_str()) {
        let (doc_type, rest) = split_type(body);
        return DocTag {
            title,
            name: None,
            description: non_empty(strip_hyphen(rest)),
            doc_type,
            raw,
        };
    }

    DocTag {
        title,
        name: None,
        description: non_empty(body),
        doc_type: None,
        raw,
    }
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn strip_hyphen(text: &str) -> &str {
    let text = text.trim_start();
    text.strip_prefix("- ").unwrap_or(text)
}

/// Split a leading `{type}` off a tag body.
///
/// An unclosed brace leaves the body untouched.
fn split_type(body: &str) -> (Option<DocType>, &str) {
    let body = body.trim_start();
    if !body.starts_with('{') {
        return (None, body);
    }

    let mut depth = 0usize;
    for (i, c) in body.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let expr = &body[1..i];
                    return (parse_doc_type(expr), &body[i + 1..]);
                }
            }
            _ => {}
        }
    }

    (None, body)
}

/// Split the parameter name off, accepting `[name]` and `[name=default]`.
fn split_name(rest: &str) -> (Option<String>, &str) {
    let rest = rest.trim_start();
    if rest.is_empty() {
        return (None, rest);
    }

    if let Some(inner) = rest.strip_prefix('[')
        && let Some(end) = inner.find(']')
    {
        let name = inner[..end].split('=').next().unwrap_or_default().trim();
        return (non_empty(name), &inner[end + 1..]);
    }

    match rest.find(char::is_whitespace) {
        Some(end) => (Some(rest[..end].to_string()), &rest[end..]),
        None => (Some(rest.to_string()), ""),
    }
}

/// Interpret a type expression written between braces.
pub fn parse_doc_type(expr: &str) -> Option<DocType> {
    let expr = strip_parens(expr.trim());
    if expr.is_empty() {
        return None;
    }
    if expr == "*" {
        return Some(DocType::mixed());
    }

    let members = split_top_level(expr, '|');
    if members.len() > 1 {
        return Some(DocType::union(members.into_iter().map(base_name).collect()));
    }

    Some(DocType::named(base_name(expr)))
}

fn strip_parens(expr: &str) -> &str {
    let mut expr = expr;
    while expr.starts_with('(') && expr.ends_with(')') && expr.len() >= 2 {
        expr = expr[1..expr.len() - 1].trim();
    }
    expr
}

/// Split on `sep` outside of any bracket nesting.
fn split_top_level(expr: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in expr.char_indices() {
        match c {
            '(' | '<' | '{' | '[' => depth += 1,
            ')' | '>' | '}' | ']' => depth -= 1,
            c if c == sep && depth == 0 => {
                parts.push(expr[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(expr[start..].trim());
    parts
}

/// Reduce a single type to its base name: `?String=` → `String`,
/// `Array.<String>` → `Array`, `String[]` → `Array`.
fn base_name(expr: &str) -> String {
    let expr = strip_parens(expr.trim());
    let expr = expr.strip_prefix("...").unwrap_or(expr);
    let expr = expr.trim_start_matches(['?', '!']);
    let expr = expr.trim_end_matches(['=', '?', '!']);
    let expr = strip_parens(expr);

    if expr == "*" {
        return "mixed".to_string();
    }
    if expr.starts_with('{') {
        return "Object".to_string();
    }
    if expr.ends_with("[]") {
        return "Array".to_string();
    }

    let end = expr.find(['<', '[']).unwrap_or(expr.len());
    expr[..end].trim_end_matches('.').trim().to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_clean_comment() {
        assert_eq!(clean_comment("* Input "), "Input");
        assert_eq!(
            clean_comment("*\n     * 样式前缀\n     "),
            "样式前缀"
        );
        assert_eq!(clean_comment("/** MyComponent\n **/"), "MyComponent");
    }

    #[test]
    fn test_description_only() {
        let doc = parse_docblock("*\n * Description of prop \"aaa\"\n **");
        assert_eq!(doc.description, "Description of prop \"aaa\"");
        assert!(doc.tags.is_empty());
    }

    #[test]
    fn test_multiline_description() {
        let doc = parse_docblock("* first line\n * second line\n * @order 2");
        assert_eq!(doc.description, "first line\nsecond line");
        assert_eq!(doc.tag("order").unwrap().description.as_deref(), Some("2"));
    }

    #[test]
    fn test_param_and_return() {
        let doc = parse_docblock(
            "* Callback\n * @param {String} value the value\n * @param {Event} e - DOM event\n * @returns {Number} length",
        );
        assert_eq!(doc.description, "Callback");
        assert_eq!(doc.tags.len(), 3);

        let value = &doc.tags[0];
        assert_eq!(value.title, "param");
        assert_eq!(value.name.as_deref(), Some("value"));
        assert_eq!(value.description.as_deref(), Some("the value"));
        assert_eq!(value.doc_type, Some(DocType::named("String")));

        assert_eq!(doc.tags[1].description.as_deref(), Some("DOM event"));

        let returns = doc.tag("returns").unwrap();
        assert_eq!(returns.name, None);
        assert_eq!(returns.description.as_deref(), Some("length"));
        assert_eq!(returns.doc_type, Some(DocType::named("Number")));
    }

    #[test]
    fn test_optional_param_name() {
        let doc = parse_docblock("@param {Number} [count=1] how many");
        assert_eq!(doc.tags[0].name.as_deref(), Some("count"));
        assert_eq!(doc.tags[0].description.as_deref(), Some("how many"));
    }

    #[test]
    fn test_doc_types() {
        assert_eq!(
            parse_doc_type("String|Number"),
            Some(DocType::union(vec!["String".into(), "Number".into()]))
        );
        assert_eq!(
            parse_doc_type("(String|Array.<String>)"),
            Some(DocType::union(vec!["String".into(), "Array".into()]))
        );
        assert_eq!(parse_doc_type("*"), Some(DocType::mixed()));
        assert_eq!(parse_doc_type("?String="), Some(DocType::named("String")));
        assert_eq!(parse_doc_type("Array<Item>"), Some(DocType::named("Array")));
        assert_eq!(parse_doc_type("String[]"), Some(DocType::named("Array")));
        assert_eq!(parse_doc_type(""), None);
    }

    #[test]
    fn test_other_tag_keeps_raw_text() {
        let doc = parse_docblock("* 状态\n * @enumdesc , 错误, 校验中, 成功");
        let tag = doc.tag("enumdesc").unwrap();
        assert_eq!(tag.description.as_deref(), Some(", 错误, 校验中, 成功"));
        assert_eq!(tag.raw, ", 错误, 校验中, 成功");
    }

    #[test]
    fn test_empty_tag_has_no_description() {
        let doc = parse_docblock("@default");
        assert_eq!(doc.tags[0].title, "default");
        assert_eq!(doc.tags[0].description, None);
    }

    #[test]
    fn test_unclosed_type_is_not_fatal() {
        let doc = parse_docblock("@param {String value broken");
        let tag = &doc.tags[0];
        assert_eq!(tag.doc_type, None);
        assert_eq!(tag.name.as_deref(), Some("{String"));
        assert_eq!(tag.description.as_deref(), Some("value broken"));
    }

    #[test]
    fn test_tag_continuation_lines() {
        let doc = parse_docblock("@returns {Boolean} whether\n the value\n is valid");
        assert_eq!(
            doc.tag("returns").unwrap().description.as_deref(),
            Some("whether\nthe value\nis valid")
        );
    }
}
