//! Deploy command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn deploy_reports_project_and_environments() {
  let env = TestEnv::empty();
  env.write_file(
    "nucleus.yaml",
    "projectName: shop\nenvironments:\n  - name: prod\n  - name: staging\n",
  );

  env
    .nucleus_cmd()
    .arg("deploy")
    .assert()
    .success()
    .stdout(predicate::str::contains("project: shop"))
    .stdout(predicate::str::contains("environments: prod, staging"))
    .stdout(predicate::str::contains("deploy finished"));
}

#[test]
fn deploy_passes_extra_args_through() {
  let env = TestEnv::empty();
  env.write_file("nucleus.yaml", "projectName: shop\n");

  env
    .nucleus_cmd()
    .args(["deploy", "--", "--canary", "eu"])
    .assert()
    .success()
    .stdout(predicate::str::contains("args: --canary eu"));
}

#[test]
fn deploy_after_install_uses_defaults() {
  let env = TestEnv::empty();

  env.nucleus_cmd().arg("install").assert().success();

  env
    .nucleus_cmd()
    .arg("deploy")
    .assert()
    .success()
    .stdout(predicate::str::contains("project: (unset)"))
    .stdout(predicate::str::contains("environments: (none)"));
}

#[test]
fn deploy_with_invalid_config_fails() {
  let env = TestEnv::with_fixtures(&[("invalid.yaml", "nucleus.yaml")]);

  env
    .nucleus_cmd()
    .arg("deploy")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Could not read nucleus.yaml"));
}
