//! Kubernetes operations

pub mod credentials;
pub mod pods;
