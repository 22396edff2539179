//! Enhanced error types with actionable suggestions

use crate::k8s::credentials::ResolveError;
use colored::Colorize;
use thiserror::Error;

/// Enhanced error with suggestions and documentation links
#[derive(Error, Debug)]
#[error("{message}")]
pub struct PodctlError {
    pub message: String,
    pub suggestions: Vec<String>,
    pub docs_link: Option<String>,
}

impl PodctlError {
    /// Create a new error with suggestions
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestions: Vec::new(),
            docs_link: None,
        }
    }

    /// Add a suggestion to the error
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a documentation link
    pub fn with_docs(mut self, link: impl Into<String>) -> Self {
        self.docs_link = Some(link.into());
        self
    }

    /// Display the error with suggestions
    pub fn display(&self) {
        crate::log_error!("{}", self.message);

        if !self.suggestions.is_empty() {
            eprintln!();
            eprintln!("{}", "Suggestions:".yellow().bold());
            for suggestion in &self.suggestions {
                eprintln!("  {} {}", "→".blue(), suggestion);
            }
        }

        if let Some(docs) = &self.docs_link {
            eprintln!();
            eprintln!("{} {}", "Documentation:".cyan(), docs);
        }
    }

    // Common error patterns

    /// Neither in-cluster nor kubeconfig credentials could be loaded
    pub fn credentials_unavailable(message: &str) -> Self {
        Self::new(message)
            .suggest("Inside a pod: make sure a service account token is mounted")
            .suggest("Outside a cluster: check that ~/.kube/config exists and has a current-context")
            .suggest("Use --kubeconfig to point at a different kubeconfig file")
            .with_docs("https://kubernetes.io/docs/tasks/access-application-cluster/access-cluster/")
    }

    /// The config was resolved but no client could be built from it
    pub fn client_unavailable(message: &str) -> Self {
        Self::new(message)
            .suggest("Verify the cluster server URL and certificates in your kubeconfig")
            .suggest("Run with -vv to see more details")
    }

    /// Permission denied error
    pub fn permission_denied(operation: &str) -> Self {
        Self::new(format!("Permission denied: {}", operation))
            .suggest("Verify you have sufficient permissions on pods in the namespace")
            .suggest("Check the RBAC bindings of your user or service account")
    }

    /// Connection failure error
    pub fn connection_failed(message: &str) -> Self {
        Self::new(format!("Unable to reach the cluster: {}", message))
            .suggest("Check if the cluster is healthy")
            .suggest("Verify network connectivity to the API server")
    }
}

impl From<ResolveError> for PodctlError {
    fn from(err: ResolveError) -> Self {
        let message = err.to_string();
        match err {
            ResolveError::Exhausted { .. } => Self::credentials_unavailable(&message),
            ResolveError::Client(_) => Self::client_unavailable(&message),
        }
    }
}

/// Helper to display error and exit
pub fn display_error_and_exit(error: PodctlError) -> ! {
    error.display();
    std::process::exit(1);
}

/// Convert anyhow error to PodctlError when possible
pub fn enhance_error(err: anyhow::Error) -> PodctlError {
    let err = match err.downcast::<ResolveError>() {
        Ok(resolve) => return resolve.into(),
        Err(err) => err,
    };

    let err_str = format!("{:#}", err);
    let lowered = err_str.to_lowercase();

    if lowered.contains("unauthorized") || lowered.contains("forbidden") {
        return PodctlError::permission_denied(&err_str);
    }

    if lowered.contains("connection refused") || lowered.contains("timed out") {
        return PodctlError::connection_failed(&err_str);
    }

    PodctlError::new(err_str).suggest("Run with -vv for more details")
}
