//! Extraction engine.
//!
//! Data flows one way through the layers:
//!
//! 1. `parsers`: source text to AST plus comments, comment text to tags
//! 2. `component`: AST to raw component metadata (props, methods, composes)
//! 3. `annotation` + `resolve`: comment tags merged onto props and methods
//! 4. `extract`: one file to one [`ComponentApi`]
//! 5. `aggregate`: one directory to a root component with sub-components
//!
//! `render` derives Markdown summaries from a finished model.

pub mod aggregate;
pub mod annotation;
pub mod component;
pub mod extract;
pub mod file_scanner;
pub mod model;
pub mod parsers;
pub mod render;
pub mod resolve;

pub use aggregate::{MAX_INHERITANCE_DEPTH, extract};
pub use extract::{ExtractOptions, extract_file};
pub use model::{ComponentApi, MethodDescriptor, ParentMap, ParentRef, PropDescriptor, PropType};
