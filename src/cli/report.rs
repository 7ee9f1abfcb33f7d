//! Terminal output of the CLI.
//!
//! Everything here goes to stderr so that stdout carries only the JSON model.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;

use crate::{config::CONFIG_FILE_NAME, core::ComponentApi};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print a summary of an extracted model.
pub fn print_extracted(component: &ComponentApi, out: Option<&Path>) {
    print_extracted_to(component, out, &mut io::stderr().lock());
}

pub fn print_extracted_to<W: Write>(component: &ComponentApi, out: Option<&Path>, writer: &mut W) {
    let sub_count = component.sub_components.as_ref().map_or(0, Vec::len);
    let mut msg = format!(
        "Extracted {} ({} {}, {} {}, {} {})",
        component.name,
        component.props.len(),
        plural(component.props.len(), "prop", "props"),
        component.methods.len(),
        plural(component.methods.len(), "method", "methods"),
        sub_count,
        plural(sub_count, "sub-component", "sub-components"),
    );
    if let Some(out) = out {
        msg.push_str(&format!(" to {}", out.display()));
    }
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

/// Print that a directory holds no documented component.
pub fn print_no_component(dir: &Path) {
    print_no_component_to(dir, &mut io::stderr().lock());
}

pub fn print_no_component_to<W: Write>(dir: &Path, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        FAILURE_MARK.red(),
        format!("No documented component found in {}", dir.display()).red()
    );
}

/// Print a file that was skipped because it could not be processed.
pub fn print_skipped_file(err: &anyhow::Error, verbose: bool) {
    print_skipped_file_to(err, verbose, &mut io::stderr().lock());
}

pub fn print_skipped_file_to<W: Write>(err: &anyhow::Error, verbose: bool, writer: &mut W) {
    if verbose {
        let _ = writeln!(writer, "{} {:#}", "warning:".bold().yellow(), err);
    }
}

/// Print how many files were skipped, pointing at `-v` when details were hidden.
pub fn print_skipped_summary(count: usize, verbose: bool) {
    print_skipped_summary_to(count, verbose, &mut io::stderr().lock());
}

pub fn print_skipped_summary_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count == 0 {
        return;
    }
    if verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be processed",
            "warning:".bold().yellow(),
            count
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be processed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

/// Note that no config file was found, only in verbose mode.
pub fn print_default_config(verbose: bool) {
    if verbose {
        eprintln!(
            "{} no {} found, using defaults",
            "note:".bold().cyan(),
            CONFIG_FILE_NAME
        );
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
