pub mod markdown;

pub use markdown::{render_method_signature, render_props_table};
