use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use indexmap::IndexMap;

use crate::core::{
    component::{RawProp, parse_component},
    parsers::jsx::parse_source,
};

/// Locate the file a module reference points at, relative to `dir`.
///
/// Tries the reference as written when it already carries a known extension,
/// then with each extension appended, then as a directory `index` file.
pub fn resolve_reference(dir: &Path, reference: &str, extensions: &[String]) -> Option<PathBuf> {
    let base = dir.join(reference);

    let has_known_extension = base
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext));
    if has_known_extension && base.is_file() {
        return Some(base);
    }

    extensions
        .iter()
        .map(|ext| dir.join(format!("{reference}.{ext}")))
        .chain(extensions.iter().map(|ext| base.join(format!("index.{ext}"))))
        .find(|candidate| candidate.is_file())
}

/// Merge the props of every composed module underneath `props`.
///
/// Composition is one level deep: a composed module's own `composes` are not
/// followed. References that resolve to no file are skipped, and so are
/// modules that export no component.
pub(super) fn merge_composed(
    file_path: &Path,
    props: IndexMap<String, RawProp>,
    composes: &[String],
    extensions: &[String],
) -> Result<IndexMap<String, RawProp>> {
    let dir = file_path.parent().unwrap_or_else(|| Path::new(""));
    let mut props = props;

    for reference in composes {
        let Some(target) = resolve_reference(dir, reference, extensions) else {
            continue;
        };

        let code = fs::read_to_string(&target)
            .with_context(|| format!("failed to read composed file: {}", target.display()))?;
        let parsed = parse_source(code, &target).with_context(|| {
            format!(
                "failed to parse composed component: {} (composed by {})",
                target.display(),
                file_path.display()
            )
        })?;

        // Own props win a collision but the composed declaration order stays.
        if let Some(composed) = parse_component(&parsed) {
            let mut merged = composed.props;
            merged.extend(props);
            props = merged;
        }
    }

    Ok(props)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn extensions() -> Vec<String> {
        vec!["jsx".to_string(), "js".to_string()]
    }

    #[test]
    fn test_resolve_reference_appends_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("base.jsx"), "").unwrap();

        assert_eq!(
            resolve_reference(dir.path(), "./base", &extensions()),
            Some(dir.path().join("./base.jsx"))
        );
        assert_eq!(
            resolve_reference(dir.path(), "./base.jsx", &extensions()),
            Some(dir.path().join("./base.jsx"))
        );
    }

    #[test]
    fn test_resolve_reference_directory_index() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("base")).unwrap();
        fs::write(dir.path().join("base").join("index.js"), "").unwrap();

        assert_eq!(
            resolve_reference(dir.path(), "./base", &extensions()),
            Some(dir.path().join("./base").join("index.js"))
        );
    }

    #[test]
    fn test_resolve_reference_missing() {
        let dir = tempdir().unwrap();
        assert_eq!(resolve_reference(dir.path(), "./nothing", &extensions()), None);
        assert_eq!(resolve_reference(dir.path(), "prop-types", &extensions()), None);
    }

    #[test]
    fn test_merge_composed_current_wins() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("base.jsx"),
            r#"
export default class Base extends React.Component {
    static propTypes = {
        /** 样式前缀 */
        prefix: PropTypes.string,
        /** 基础尺寸 */
        size: PropTypes.number,
    };
    render() { return null; }
}
"#,
        )
        .unwrap();
        let current = dir.path().join("input.jsx");
        fs::write(
            &current,
            r#"
import Base from './base';
export default class Input extends React.Component {
    static propTypes = {
        ...Base.propTypes,
        /** 尺寸 */
        size: PropTypes.string,
    };
    render() { return null; }
}
"#,
        )
        .unwrap();

        let parsed = parse_source(fs::read_to_string(&current).unwrap(), &current).unwrap();
        let raw = parse_component(&parsed).unwrap();
        let merged = merge_composed(&current, raw.props, &raw.composes, &extensions()).unwrap();

        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["prefix", "size"]);
        assert_eq!(
            merged.get("size").unwrap().docblock.as_deref(),
            Some("尺寸")
        );
    }

    #[test]
    fn test_merge_composed_parse_error_names_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("base.jsx"), "class {").unwrap();
        let current = dir.path().join("input.jsx");

        let err = merge_composed(
            &current,
            IndexMap::new(),
            &["./base".to_string()],
            &extensions(),
        )
        .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("failed to parse composed component"));
        assert!(message.contains("base.jsx"));
    }
}
