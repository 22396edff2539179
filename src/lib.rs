//! Podctl - create a test pod and list the pods of a namespace

pub mod commands;
pub mod config;
pub mod k8s;
pub mod utils;
