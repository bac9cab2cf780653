//! nucleus-lib: install-time reconciliation for nucleus-deploy.
//!
//! This crate keeps a consumer project's `nucleus.yaml` and `package.json`
//! in line with what nucleus-deploy ships, without destroying user edits:
//! - `merge`: structural deep merge of two [`document::Document`]s
//! - `store`: YAML/JSON documents on disk, with deterministic serialization
//! - `reconcile`: fill `nucleus.yaml` with template defaults, quarantining corrupt files
//! - `scripts`: add missing recommended scripts to `package.json`
//! - `install`: the postinstall sequence tying the two together

pub mod config;
pub mod consts;
pub mod deploy;
pub mod document;
pub mod install;
pub mod merge;
pub mod paths;
pub mod reconcile;
pub mod scripts;
pub mod store;
pub mod summary;
