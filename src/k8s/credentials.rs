//! Cluster credential resolution
//!
//! In-cluster service account credentials are tried first. When they are not
//! available the local kubeconfig file is used instead. If both fail, the
//! returned error carries both reasons so either path can be diagnosed.

use kube::Client;
use kube::config::{Config, InClusterError, KubeConfigOptions, Kubeconfig, KubeconfigError};
use std::ffi::OsString;
use std::future::Future;
use std::path::{Path, PathBuf};
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from turning the environment into a usable client
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(
        "{primary} as well as {fallback} failed. Error in {primary}: {primary_error}\nError in {fallback}: {fallback_error}"
    )]
    Exhausted {
        primary: String,
        primary_error: BoxError,
        fallback: String,
        fallback_error: BoxError,
    },

    #[error("Failed creating client. Error: {0}")]
    Client(#[source] kube::Error),
}

/// A place cluster credentials can be loaded from
pub trait ConfigSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short label used in diagnostics
    fn describe(&self) -> String;

    fn load(&self) -> impl Future<Output = Result<Config, Self::Error>>;
}

/// Service account credentials mounted into a pod
#[derive(Debug, Clone, Copy, Default)]
pub struct InClusterSource;

impl ConfigSource for InClusterSource {
    type Error = InClusterError;

    fn describe(&self) -> String {
        "in-cluster configuration".to_string()
    }

    async fn load(&self) -> Result<Config, InClusterError> {
        Config::incluster()
    }
}

/// A kubeconfig file at a fixed path, using its current context
#[derive(Debug, Clone)]
pub struct KubeconfigFileSource {
    pub path: PathBuf,
}

impl KubeconfigFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigSource for KubeconfigFileSource {
    type Error = KubeconfigError;

    fn describe(&self) -> String {
        format!("kubeconfig {}", self.path.display())
    }

    async fn load(&self) -> Result<Config, KubeconfigError> {
        let kubeconfig = Kubeconfig::read_from(&self.path)?;
        Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await
    }
}

/// `$HOME/.kube/config`
pub fn default_kubeconfig_path() -> PathBuf {
    kubeconfig_path_in(std::env::var_os("HOME"))
}

/// `<home>/.kube/config`
///
/// An unset or empty `home` falls back to the platform home directory.
pub fn kubeconfig_path_in(home: Option<OsString>) -> PathBuf {
    let home = home
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_default();
    home.join(".kube").join("config")
}

/// Resolve credentials from the cluster environment, falling back to `kubeconfig`
pub async fn resolve(kubeconfig: &Path) -> Result<Config, ResolveError> {
    resolve_with(&InClusterSource, &KubeconfigFileSource::new(kubeconfig)).await
}

/// Try `primary`, and only if it fails try `fallback`
pub async fn resolve_with<P, F>(primary: &P, fallback: &F) -> Result<Config, ResolveError>
where
    P: ConfigSource,
    F: ConfigSource,
{
    let primary_error = match primary.load().await {
        Ok(config) => {
            crate::log_debug!("Using {}", primary.describe());
            return Ok(config);
        }
        Err(e) => e,
    };

    crate::log_debug!(
        "Unable to load {}: {}. Falling back to {}",
        primary.describe(),
        primary_error,
        fallback.describe()
    );

    match fallback.load().await {
        Ok(config) => {
            crate::log_debug!("Using {}", fallback.describe());
            Ok(config)
        }
        Err(fallback_error) => Err(ResolveError::Exhausted {
            primary: primary.describe(),
            primary_error: Box::new(primary_error),
            fallback: fallback.describe(),
            fallback_error: Box::new(fallback_error),
        }),
    }
}

/// Build the API client for a resolved configuration
pub fn build_client(config: Config) -> Result<Client, ResolveError> {
    Client::try_from(config).map_err(ResolveError::Client)
}
