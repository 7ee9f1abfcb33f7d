use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{extract::DEFAULT_EXTENSIONS, model::ParentMap};

pub const CONFIG_FILE_NAME: &str = ".propdocrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub parents: ParentMap,
    #[serde(default)]
    pub md: bool,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            extensions: default_extensions(),
            parents: ParentMap::new(),
            md: false,
            output: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or no
    /// extension is configured.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
            }
        }

        if self.extensions.is_empty() {
            anyhow::bail!("'extensions' must list at least one file extension");
        }

        Ok(())
    }

    /// Make relative parent directories and the output path absolute against `base`.
    fn resolve_paths(&mut self, base: &Path) {
        for parent in self.parents.values_mut() {
            if parent.path.is_relative() {
                parent.path = base.join(&parent.path);
            }
        }
        if let Some(output) = &self.output
            && output.is_relative()
        {
            self.output = Some(base.join(output));
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir
        .canonicalize()
        .unwrap_or_else(|_| start_dir.to_path_buf());

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let mut config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            if let Some(config_dir) = path.parent() {
                config.resolve_paths(config_dir);
            }
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

/// Read a standalone parent map file; relative paths resolve against its directory.
pub fn load_parent_map(path: &Path) -> Result<ParentMap> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read parent map: {:?}", path))?;
    let mut parents: ParentMap = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse parent map: {:?}", path))?;

    if let Some(base) = path.parent() {
        for parent in parents.values_mut() {
            if parent.path.is_relative() {
                parent.path = base.join(&parent.path);
            }
        }
    }
    Ok(parents)
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use pretty_assertions::assert_eq;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ignores.is_empty());
        assert_eq!(config.extensions, vec!["js", "jsx", "ts", "tsx"]);
        assert!(config.parents.is_empty());
        assert!(!config.md);
        assert_eq!(config.output, None);
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "ignores": ["**/__tests__/**"],
              "extensions": ["jsx"],
              "md": true,
              "parents": {
                  "Nav.Item": { "name": "Menu.Item", "relativePath": "../menu" }
              }
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.ignores, vec!["**/__tests__/**"]);
        assert_eq!(config.extensions, vec!["jsx"]);
        assert!(config.md);
        assert_eq!(config.parents["Nav.Item"].name, "Menu.Item");
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let sub_dir = root.join("src").join("input");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = root.join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        assert!(find_config_file(dir.path()).is_none());
    }

    #[test]
    fn test_load_config_resolves_relative_paths() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::write(
            root.join(CONFIG_FILE_NAME),
            r#"{ "output": "api.json", "parents": { "Nav": { "name": "Menu", "path": "src/menu" } } }"#,
        )
        .unwrap();

        let result = load_config(&root).unwrap();
        assert!(result.from_file);
        assert_eq!(result.config.output, Some(root.join("api.json")));
        assert_eq!(result.config.parents["Nav"].path, root.join("src/menu"));
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert_eq!(result.config.extensions, default_extensions());
    }

    #[test]
    fn test_validate_invalid_ignore_pattern() {
        let config = Config {
            ignores: vec!["**/[invalid".to_string()],
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ignores"));
    }

    #[test]
    fn test_validate_literal_ignore_is_valid() {
        let config = Config {
            ignores: vec!["demo".to_string(), "src/[locale]".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_extensions() {
        let config = Config {
            extensions: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_with_invalid_json_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "{ ignores: ").unwrap();

        let err = load_config(dir.path()).err().unwrap();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_parent_map() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("parents.json");
        fs::write(
            &path,
            r#"{ "Nav": { "name": "Menu", "relativePath": "menu" } }"#,
        )
        .unwrap();

        let parents = load_parent_map(&path).unwrap();
        assert_eq!(parents["Nav"].name, "Menu");
        assert_eq!(parents["Nav"].path, dir.path().join("menu"));
    }

    #[test]
    fn test_default_config_json_round_trips() {
        let json = default_config_json().unwrap();
        let config: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config.extensions, default_extensions());
    }
}
