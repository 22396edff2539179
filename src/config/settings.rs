//! Configuration file support for podctl

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub pod: PodSettings,
}

/// Default values for the run
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Defaults {
    /// Namespace used for both creating and listing pods
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Optional kubeconfig used when in-cluster configuration is unavailable.
    /// If not set, `$HOME/.kube/config` is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig_path: Option<String>,
}

/// The pod that gets created
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PodSettings {
    #[serde(default = "default_pod_name")]
    pub name: String,

    #[serde(default = "default_labels")]
    pub labels: BTreeMap<String, String>,

    #[serde(default = "default_container_name")]
    pub container_name: String,

    #[serde(default = "default_image")]
    pub image: String,

    #[serde(default = "default_pull_policy")]
    pub image_pull_policy: String,

    #[serde(default = "default_command")]
    pub command: Vec<String>,
}

// Default value functions
fn default_namespace() -> String {
    "default".to_string()
}

fn default_pod_name() -> String {
    "my-test-pod".to_string()
}

fn default_labels() -> BTreeMap<String, String> {
    BTreeMap::from([("app".to_string(), "demo".to_string())])
}

fn default_container_name() -> String {
    "busybox".to_string()
}

fn default_image() -> String {
    "busybox".to_string()
}

fn default_pull_policy() -> String {
    "IfNotPresent".to_string()
}

fn default_command() -> Vec<String> {
    vec!["sleep".to_string(), "3600".to_string()]
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            kubeconfig_path: None,
        }
    }
}

impl Default for PodSettings {
    fn default() -> Self {
        Self {
            name: default_pod_name(),
            labels: default_labels(),
            container_name: default_container_name(),
            image: default_image(),
            image_pull_policy: default_pull_policy(),
            command: default_command(),
        }
    }
}

impl Settings {
    /// Load settings from the first config file found, or return defaults
    pub fn load() -> Self {
        match Self::find_config_file() {
            Some(path) => Self::load_from_file(&path).unwrap_or_else(|e| {
                crate::log_warn!("Ignoring config file {}: {:#}", path.display(), e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Find config file in standard locations
    /// Priority:
    /// 1. .podctl.toml in current directory
    /// 2. ~/.config/podctl/config.toml (XDG config directory)
    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from(".podctl.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("podctl").join("config.toml");
            if xdg_config.exists() {
                return Some(xdg_config);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.defaults.namespace, "default");
        assert!(settings.defaults.kubeconfig_path.is_none());
        assert_eq!(settings.pod.name, "my-test-pod");
        assert_eq!(settings.pod.labels.get("app").map(String::as_str), Some("demo"));
        assert_eq!(settings.pod.command, vec!["sleep", "3600"]);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let toml_str = r#"
[defaults]
namespace = "sandbox"

[pod]
image = "busybox:1.36"
"#;
        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.defaults.namespace, "sandbox");
        assert_eq!(settings.pod.image, "busybox:1.36");
        assert_eq!(settings.pod.name, "my-test-pod");
        assert_eq!(settings.pod.image_pull_policy, "IfNotPresent");
    }

    #[test]
    fn test_empty_file_is_default() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[defaults]\nkubeconfig_path = \"/tmp/kc\"").unwrap();

        let settings = Settings::load_from_file(file.path()).unwrap();
        assert_eq!(settings.defaults.kubeconfig_path.as_deref(), Some("/tmp/kc"));
        assert_eq!(settings.defaults.namespace, "default");
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[defaults\nnamespace = ").unwrap();

        let err = Settings::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Settings::load_from_file(Path::new("/nonexistent/podctl.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
