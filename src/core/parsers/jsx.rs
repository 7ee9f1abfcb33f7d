use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use swc_common::{
    BytePos, FileName, Globals, SourceMap, SourceMapper, Span, Spanned,
    comments::{Comment, CommentKind, SingleThreadedComments},
};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

/// Map of byte positions to comments.
pub type CommentMap = HashMap<BytePos, Vec<Comment>>;

/// Leading comments copied out of SingleThreadedComments during parsing.
#[derive(Debug, Clone)]
pub struct ExtractedComments {
    pub leading: CommentMap,
}

impl ExtractedComments {
    /// Extract comments from SingleThreadedComments.
    /// This must be called before SingleThreadedComments is dropped.
    pub fn from_swc(comments: &SingleThreadedComments) -> Self {
        let (leading, _) = comments.borrow_all();
        Self {
            leading: leading.iter().map(|(k, v)| (*k, v.clone())).collect(),
        }
    }

    /// Comments attached in front of the token starting at `pos`.
    pub fn leading_at(&self, pos: BytePos) -> &[Comment] {
        self.leading.get(&pos).map(Vec::as_slice).unwrap_or_default()
    }

    /// The `/** ... */` comment closest in front of `pos`, as raw comment text.
    pub fn docblock_at(&self, pos: BytePos) -> Option<&str> {
        self.leading_at(pos)
            .iter()
            .rev()
            .find(|c| c.kind == CommentKind::Block && c.text.starts_with('*'))
            .map(|c| &*c.text)
    }
}

pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub comments: ExtractedComments,
}

impl ParsedSource {
    /// Source text covered by `span`, or an empty string for synthesized spans.
    pub fn snippet(&self, span: Span) -> String {
        self.source_map.span_to_snippet(span).unwrap_or_default()
    }
}

/// Pick the parser syntax from the file extension.
///
/// `.ts` files are parsed without JSX so `<T>expr` casts stay valid; every
/// other extension accepts JSX.
fn syntax_for(file_path: &Path) -> Syntax {
    match file_path.extension().and_then(|e| e.to_str()) {
        Some("ts" | "mts" | "cts") => Syntax::Typescript(TsSyntax {
            decorators: true,
            ..Default::default()
        }),
        Some("tsx") => Syntax::Typescript(TsSyntax {
            tsx: true,
            decorators: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            decorators: true,
            decorators_before_export: true,
            fn_bind: true,
            ..Default::default()
        }),
    }
}

/// Parse component source code into an AST with its comments.
pub fn parse_source(code: String, file_path: &Path) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    let source_map = Arc::new(SourceMap::default());

    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(
            FileName::Real(file_path.to_path_buf()).into(),
            code,
        );

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(
            syntax_for(file_path),
            StringInput::from(&*source_file),
            Some(&comments),
        );

        let module = parser.parse_module().map_err(|e| {
            let line = source_map.lookup_char_pos(e.span().lo).line;
            anyhow!("Failed to parse source at line {}: {:?}", line, e.kind())
        })?;

        // Extract comments immediately (before SingleThreadedComments drops)
        let extracted_comments = ExtractedComments::from_swc(&comments);

        Ok(ParsedSource {
            module,
            source_map: source_map.clone(),
            comments: extracted_comments,
        })
    })
}
