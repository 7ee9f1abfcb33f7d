//! Source and comment parsers.
//!
//! - `jsx`: JS/JSX/TS/TSX source parser (uses swc for AST generation)
//! - `docblock`: Structured (JSDoc-style) comment parser

pub mod docblock;
pub mod jsx;
