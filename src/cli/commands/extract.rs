use std::{cell::Cell, fs};

use anyhow::{Context, Result};

use super::super::{args::ExtractCommand, exit_status::ExitStatus, report};
use crate::{
    config::{ConfigLoadResult, load_config, load_parent_map},
    core::{ExtractOptions, aggregate, extract::ErrorHandler},
};

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let ExtractCommand {
        dir,
        out,
        md,
        parents,
        ignore,
        keep_going,
        verbose,
    } = cmd;

    if !dir.is_dir() {
        anyhow::bail!("Directory not found: {}", dir.display());
    }

    let ConfigLoadResult {
        mut config,
        from_file,
    } = load_config(&dir)?;
    if !from_file {
        report::print_default_config(verbose);
    }
    config.ignores.extend(ignore);
    config.validate()?;

    let parents = match parents {
        Some(path) => load_parent_map(&path)?,
        None => config.parents,
    };

    let failures = Cell::new(0usize);
    let on_error = |err: &anyhow::Error| {
        failures.set(failures.get() + 1);
        report::print_skipped_file(err, verbose);
    };
    let handler: ErrorHandler = &on_error;

    let options = ExtractOptions {
        md: md || config.md,
        verbose,
        extensions: config.extensions,
        ignores: config.ignores,
        on_error: keep_going.then_some(handler),
    };

    let Some(component) = aggregate::extract(&dir, &options, &parents)? else {
        report::print_skipped_summary(failures.get(), verbose);
        report::print_no_component(&dir);
        return Ok(ExitStatus::Failure);
    };

    let json = serde_json::to_string_pretty(&component)
        .context("Failed to serialize component model")?;

    let out = out.or(config.output);
    match &out {
        Some(path) => {
            fs::write(path, format!("{json}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => println!("{json}"),
    }

    report::print_skipped_summary(failures.get(), verbose);
    report::print_extracted(&component, out.as_deref());

    Ok(ExitStatus::Success)
}
