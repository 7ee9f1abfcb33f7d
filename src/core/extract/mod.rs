//! Single-file extraction.
//!
//! Turns one component source file into a [`ComponentApi`](crate::core::model::ComponentApi):
//! the component parser supplies declared props and methods, composed modules
//! contribute props underneath, comments are resolved onto every prop and
//! method, and the file-level comment supplies name, ordering and inheritance
//! directives. Exported static functions are scanned independently.

mod compose;
mod file;
mod static_methods;

pub use compose::resolve_reference;
pub use file::{FileExtraction, extract_file, extract_source_file};
pub use static_methods::scan_static_methods;

/// Extensions treated as component sources when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

/// Callback invoked with a file's error instead of failing the extraction.
pub type ErrorHandler<'a> = &'a dyn Fn(&anyhow::Error);

#[derive(Clone)]
pub struct ExtractOptions<'a> {
    /// Also render `propsMD` and per-method `md` summaries.
    pub md: bool,
    pub verbose: bool,
    /// Candidate source extensions, without the leading dot.
    pub extensions: Vec<String>,
    /// Walk exclusions, relative to the extracted directory.
    pub ignores: Vec<String>,
    /// When set, a file that cannot be read or parsed is reported here and skipped.
    pub on_error: Option<ErrorHandler<'a>>,
}

impl Default for ExtractOptions<'_> {
    fn default() -> Self {
        Self {
            md: false,
            verbose: false,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            ignores: Vec::new(),
            on_error: None,
        }
    }
}
