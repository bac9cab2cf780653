//! Template content shipped with nucleus-deploy.

/// Default `nucleus.yaml` written into consumer projects.
pub const NUCLEUS_YAML_TEMPLATE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/nucleus.yaml"));
