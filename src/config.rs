//! Configuration module for Plinth
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (PLINTH_*)
//! 3. Site config (plinth.toml at the site root)
//! 4. Built-in defaults (lowest priority)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PlinthError, PlinthResult};

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "plinth.toml";

/// Site metadata
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteSection {
    #[serde(default)]
    pub title: Option<String>,
}

/// Build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSection {
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            output: default_output(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("_site")
}

/// Preview server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeSection {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServeSection {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

/// Deploy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploySection {
    #[serde(default = "default_script")]
    pub script: PathBuf,
}

impl Default for DeploySection {
    fn default() -> Self {
        Self {
            script: default_script(),
        }
    }
}

fn default_script() -> PathBuf {
    PathBuf::from("_scripts/deploy.sh")
}

/// Main configuration structure (plinth.toml)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,

    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub serve: ServeSection,

    #[serde(default)]
    pub deploy: DeploySection,
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
}

impl SiteConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PlinthResult<Self> {
        let (config, _warnings) = Self::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> PlinthResult<(Self, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path)?;

        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(&content);

        let config: Self = serde_ignored::deserialize(deserializer, |path| {
            unknown_paths.push(path.to_string());
        })
        .map_err(|e| PlinthError::Config {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let warnings = unknown_paths
            .into_iter()
            .map(|key| ConfigWarning {
                key,
                file: path.to_path_buf(),
            })
            .collect();

        Ok((config, warnings))
    }

    /// Load from the site root, falling back to defaults when plinth.toml is absent.
    ///
    /// A present-but-invalid file is an error; silence there would make
    /// config typos indistinguishable from defaults.
    pub fn load_or_default(site_root: &Path) -> PlinthResult<(Self, Vec<ConfigWarning>)> {
        let path = site_root.join(CONFIG_FILE);
        if path.exists() {
            let (config, warnings) = Self::load_with_warnings(&path)?;
            Ok((config.with_env_overrides(), warnings))
        } else {
            Ok((Self::default().with_env_overrides(), Vec::new()))
        }
    }

    /// Apply environment variable overrides (PLINTH_* prefix)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(output) = std::env::var("PLINTH_OUTPUT") {
            if !output.is_empty() {
                self.build.output = PathBuf::from(output);
            }
        }

        if let Ok(port) = std::env::var("PLINTH_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.serve.port = port;
            }
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.build.output, PathBuf::from("_site"));
        assert_eq!(config.serve.port, 3000);
        assert_eq!(config.deploy.script, PathBuf::from("_scripts/deploy.sh"));
        assert_eq!(config.site.title, None);
    }

    #[test]
    fn test_load_full_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
[site]
title = "Pest Toast"

[build]
output = "public"

[serve]
port = 8080

[deploy]
script = "bin/publish.sh"
"#,
        )
        .unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.site.title.as_deref(), Some("Pest Toast"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.serve.port, 8080);
        assert_eq!(config.deploy.script, PathBuf::from("bin/publish.sh"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[site]\ntitle = \"Minimal\"\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.site.title.as_deref(), Some("Minimal"));
        assert_eq!(config.build.output, PathBuf::from("_site"));
        assert_eq!(config.serve.port, 3000);
    }

    #[test]
    fn test_unknown_key_produces_warning() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[build]\noutput = \"dist\"\ncolour = true\n").unwrap();

        let (config, warnings) = SiteConfig::load_with_warnings(&path).unwrap();
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].key, "build.colour");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[serve]\nport = \"not a number\"\n").unwrap();

        let err = SiteConfig::load(&path).unwrap_err();
        assert!(matches!(err, PlinthError::Config { .. }));
        assert!(err.to_string().contains("plinth.toml"));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempdir().unwrap();
        let (config, warnings) = SiteConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.build.output, PathBuf::from("_site"));
        assert!(warnings.is_empty());
    }
}
