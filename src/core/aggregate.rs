//! Directory extraction.
//!
//! Every candidate file under a directory is extracted; the models are then
//! assembled into one root component with ordered sub-components, the
//! exported static methods of every file attached to the root. Components
//! listed in the [`ParentMap`] inherit the props of their parent, which is
//! found by extracting the parent's directory.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Result;
use colored::Colorize;

use crate::core::{
    extract::{ExtractOptions, extract_source_file},
    file_scanner::{ScanResult, scan_files},
    model::{ComponentApi, MethodDescriptor, NAME_SEPARATOR, ParentMap, ParentRef},
};

/// Bound on nested parent lookups; the same-directory rule alone does not
/// stop a cycle that spans several directories.
pub const MAX_INHERITANCE_DEPTH: usize = 16;

/// Models and static methods found under one directory, in walk order.
#[derive(Debug, Default)]
struct DirectoryScan {
    components: Vec<ComponentApi>,
    static_methods: Vec<MethodDescriptor>,
}

/// Extract the component documented under `root_dir`.
///
/// Returns `Ok(None)` when no file yields a documented component.
pub fn extract(
    root_dir: &Path,
    options: &ExtractOptions,
    parents: &ParentMap,
) -> Result<Option<ComponentApi>> {
    let parent_options = ExtractOptions {
        md: false,
        ..options.clone()
    };
    let mut aggregator = Aggregator {
        parents,
        parent_options: &parent_options,
        parent_scans: HashMap::new(),
    };
    let scan = aggregator.scan_directory(root_dir, options, true, 0)?;
    Ok(assemble(scan.components, scan.static_methods))
}

/// State shared by one top-level extraction.
struct Aggregator<'p, 'o> {
    parents: &'p ParentMap,
    /// Options for parent directories: same filters, never Markdown.
    parent_options: &'o ExtractOptions<'o>,
    /// Components of parent directories already scanned, keyed by canonical
    /// directory and whether inheritance was still active.
    parent_scans: HashMap<(PathBuf, bool), Vec<ComponentApi>>,
}

impl Aggregator<'_, '_> {
    fn scan_directory(
        &mut self,
        dir: &Path,
        options: &ExtractOptions,
        mut deep: bool,
        depth: usize,
    ) -> Result<DirectoryScan> {
        let ScanResult {
            files,
            skipped_count,
        } = scan_files(dir, &options.extensions, &options.ignores, options.verbose);

        if skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                skipped_count,
                if options.verbose { "" } else { " (use -v for details)" }
            );
        }

        let parents = self.parents;
        let mut scan = DirectoryScan::default();

        for file in &files {
            let extraction = extract_source_file(file, options)?;
            scan.static_methods.extend(extraction.static_methods);

            let Some(mut component) = extraction.component else {
                continue;
            };

            if deep && let Some(parent) = parents.get(&component.name) {
                if depth >= MAX_INHERITANCE_DEPTH {
                    if options.verbose {
                        eprintln!(
                            "{} Inheritance depth limit reached at '{}', parent '{}' not applied",
                            "warning:".bold().yellow(),
                            component.name,
                            parent.name
                        );
                    }
                } else {
                    // Reaching the parent's own directory ends inheritance for the
                    // rest of this walk.
                    if same_dir(dir, &parent.path) {
                        deep = false;
                    }
                    self.inherit_props(&mut component, parent, deep, depth)?;
                }
            }

            scan.components.push(component);
        }

        Ok(scan)
    }

    /// Components of a parent directory, scanned at most once per `deep` flag.
    fn parent_components(
        &mut self,
        dir: &Path,
        deep: bool,
        depth: usize,
    ) -> Result<&[ComponentApi]> {
        let key = (canonical(dir), deep);
        if !self.parent_scans.contains_key(&key) {
            let options = self.parent_options;
            let scan = self.scan_directory(dir, options, deep, depth)?;
            self.parent_scans.insert(key.clone(), scan.components);
        }
        Ok(self.parent_scans[&key].as_slice())
    }

    /// Merge the parent's props underneath the component's own.
    fn inherit_props(
        &mut self,
        component: &mut ComponentApi,
        parent: &ParentRef,
        deep: bool,
        depth: usize,
    ) -> Result<()> {
        let verbose = self.parent_options.verbose;
        let parent_model = self
            .parent_components(&parent.path, deep, depth + 1)?
            .iter()
            .find(|candidate| candidate.name == parent.name);

        match parent_model {
            Some(parent_model) => {
                let mut merged = parent_model.props.clone();
                merged.extend(std::mem::take(&mut component.props));
                component.props = merged;
            }
            None => {
                if verbose {
                    eprintln!(
                        "{} Parent component '{}' of '{}' not found in {}",
                        "warning:".bold().yellow(),
                        parent.name,
                        component.name,
                        parent.path.display()
                    );
                }
            }
        }

        Ok(())
    }
}

fn canonical(dir: &Path) -> PathBuf {
    dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf())
}

fn same_dir(a: &Path, b: &Path) -> bool {
    canonical(a) == canonical(b)
}

/// Pick the root, rename and order the sub-components, attach static methods.
fn assemble(
    mut components: Vec<ComponentApi>,
    static_methods: Vec<MethodDescriptor>,
) -> Option<ComponentApi> {
    let first_name = components.first()?.name.clone();

    let mut root = match components
        .iter()
        .position(|component| !component.is_sub_component_name())
    {
        Some(index) => components.remove(index),
        None => {
            let root_name = first_name
                .split(NAME_SEPARATOR)
                .next()
                .unwrap_or_default();
            ComponentApi::named(root_name)
        }
    };

    for component in &mut components {
        if let Some((_, child)) = component.name.split_once(NAME_SEPARATOR) {
            component.name = child.to_string();
        }
    }

    let (mut ordered, unordered): (Vec<_>, Vec<_>) = components
        .into_iter()
        .partition(|component| component.order.is_some());
    ordered.sort_by_key(|component| component.order);
    ordered.extend(unordered);

    root.sub_components = Some(ordered);
    root.methods.extend(static_methods);
    Some(root)
}
