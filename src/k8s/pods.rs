//! Pod operations: building the descriptor, creating it, listing pods

use crate::config::settings::PodSettings;
use k8s_openapi::api::core::v1::{Container, Pod, PodSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::Client;
use kube::api::{Api, ListParams, PostParams};
use std::collections::BTreeMap;

/// Namespace used when nothing else is configured
pub const DEFAULT_NAMESPACE: &str = "default";

/// The parts of a pod descriptor that are not its namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodTemplate {
    pub name: String,
    pub labels: BTreeMap<String, String>,
    pub container_name: String,
    pub image: String,
    pub image_pull_policy: String,
    pub command: Vec<String>,
}

impl Default for PodTemplate {
    fn default() -> Self {
        Self::from(&PodSettings::default())
    }
}

impl From<&PodSettings> for PodTemplate {
    fn from(settings: &PodSettings) -> Self {
        Self {
            name: settings.name.clone(),
            labels: settings.labels.clone(),
            container_name: settings.container_name.clone(),
            image: settings.image.clone(),
            image_pull_policy: settings.image_pull_policy.clone(),
            command: settings.command.clone(),
        }
    }
}

impl PodTemplate {
    /// Build the typed descriptor for this template in `namespace`
    pub fn to_pod(&self, namespace: &str) -> Pod {
        Pod {
            metadata: ObjectMeta {
                name: Some(self.name.clone()),
                namespace: Some(namespace.to_string()),
                labels: Some(self.labels.clone()),
                ..ObjectMeta::default()
            },
            spec: Some(PodSpec {
                containers: vec![Container {
                    name: self.container_name.clone(),
                    image: Some(self.image.clone()),
                    image_pull_policy: Some(self.image_pull_policy.clone()),
                    command: Some(self.command.clone()),
                    ..Container::default()
                }],
                ..PodSpec::default()
            }),
            ..Pod::default()
        }
    }
}

/// The fixed test pod: `my-test-pod` in `default`, one busybox container
/// sleeping for an hour
pub fn build_pod_descriptor() -> Pod {
    PodTemplate::default().to_pod(DEFAULT_NAMESPACE)
}

/// Submit `pod` to the pods collection of its own namespace
///
/// A descriptor without a namespace goes to the client's default namespace.
pub async fn create_pod(client: Client, pod: &Pod) -> Result<Pod, kube::Error> {
    let pods: Api<Pod> = match pod.metadata.namespace.as_deref() {
        Some(ns) => Api::namespaced(client, ns),
        None => Api::default_namespaced(client),
    };
    pods.create(&PostParams::default(), pod).await
}

/// All pods currently in `namespace`
pub async fn list_pods(client: Client, namespace: &str) -> Result<Vec<Pod>, kube::Error> {
    let pods: Api<Pod> = Api::namespaced(client, namespace);
    let list = pods.list(&ListParams::default()).await?;
    Ok(list.items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_is_deterministic() {
        let a = serde_json::to_vec(&build_pod_descriptor()).unwrap();
        let b = serde_json::to_vec(&build_pod_descriptor()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_descriptor_contents() {
        let pod = build_pod_descriptor();
        assert_eq!(pod.metadata.name.as_deref(), Some("my-test-pod"));
        assert_eq!(pod.metadata.namespace.as_deref(), Some("default"));

        let labels = pod.metadata.labels.unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels.get("app").map(String::as_str), Some("demo"));

        let spec = pod.spec.unwrap();
        assert_eq!(spec.containers.len(), 1);
        let container = &spec.containers[0];
        assert_eq!(container.name, "busybox");
        assert_eq!(container.image.as_deref(), Some("busybox"));
        assert_eq!(container.image_pull_policy.as_deref(), Some("IfNotPresent"));
        assert_eq!(
            container.command.as_deref(),
            Some(&["sleep".to_string(), "3600".to_string()][..])
        );
    }

    #[test]
    fn test_template_uses_given_namespace() {
        let pod = PodTemplate::default().to_pod("sandbox");
        assert_eq!(pod.metadata.namespace.as_deref(), Some("sandbox"));
        assert_eq!(pod.metadata.name.as_deref(), Some("my-test-pod"));
    }

    #[test]
    fn test_template_from_settings() {
        let settings = PodSettings {
            name: "probe".to_string(),
            image: "alpine:3.20".to_string(),
            ..PodSettings::default()
        };
        let pod = PodTemplate::from(&settings).to_pod(DEFAULT_NAMESPACE);
        assert_eq!(pod.metadata.name.as_deref(), Some("probe"));
        let spec = pod.spec.unwrap();
        assert_eq!(spec.containers[0].image.as_deref(), Some("alpine:3.20"));
        assert_eq!(spec.containers[0].name, "busybox");
    }
}
