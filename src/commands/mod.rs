//! Command implementations for the podctl CLI

pub mod run;
