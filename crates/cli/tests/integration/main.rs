//! CLI integration tests.

mod common;
mod deploy_tests;
mod install_tests;
