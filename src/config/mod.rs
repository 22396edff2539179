//! Configuration management

pub mod settings;

pub use settings::Settings;
