//! propdoc - API documentation extractor for React components
//!
//! propdoc reads component sources and merges their `propTypes`, JSDoc
//! comments and file-level directives (`@order`, `@propsExtends`,
//! `@description`, `@exportName`) into a JSON model of the component API,
//! including composed props, inherited props and sub-components.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, output)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (parsing, resolution, aggregation, rendering)

pub mod cli;
pub mod config;
pub mod core;
