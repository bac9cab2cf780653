//! Install command integration tests.

use predicates::prelude::*;

use super::common::{TestEnv, fixture_path};

#[test]
fn install_creates_config_and_notes_missing_manifest() {
  let env = TestEnv::empty();

  env
    .nucleus_cmd()
    .arg("install")
    .assert()
    .success()
    .stdout(predicate::str::contains("- Created nucleus.yaml"))
    .stdout(predicate::str::contains("Notes:"))
    .stdout(predicate::str::contains("No package.json found"));

  let config = env.read_file("nucleus.yaml");
  assert!(config.contains("projectName"));
  assert!(config.contains("environments"));
  assert!(!env.exists("package.json"));
}

#[test]
fn install_prints_actions_then_notes_then_next_steps() {
  let env = TestEnv::with_fixtures(&[("invalid.yaml", "nucleus.yaml")]);

  let output = env.nucleus_cmd().arg("install").output().unwrap();
  assert!(output.status.success());
  let stdout = String::from_utf8(output.stdout).unwrap();

  let action = stdout.find("- Backed up invalid nucleus.yaml").unwrap();
  let notes = stdout.find("Notes:").unwrap();
  let next = stdout.find("Next steps:").unwrap();
  assert!(action < notes && notes < next, "unexpected ordering:\n{stdout}");
}

#[test]
fn install_is_idempotent() {
  let env = TestEnv::with_fixtures(&[("partial.yaml", "nucleus.yaml"), ("package.json", "package.json")]);

  env
    .nucleus_cmd()
    .arg("install")
    .assert()
    .success()
    .stdout(predicate::str::contains("Updated nucleus.yaml with missing defaults"))
    .stdout(predicate::str::contains("Added package.json scripts: nucleus:help, nucleus:hello"));

  let config = env.read_file("nucleus.yaml");
  let manifest = env.read_file("package.json");

  env
    .nucleus_cmd()
    .arg("install")
    .assert()
    .success()
    .stdout(predicate::str::contains("nucleus.yaml already up to date"))
    .stdout(predicate::str::contains("All recommended package.json scripts already present"))
    .stdout(predicate::str::contains("Notes:").not());

  assert_eq!(env.read_file("nucleus.yaml"), config);
  assert_eq!(env.read_file("package.json"), manifest);
}

#[test]
fn install_keeps_user_values() {
  let env = TestEnv::with_fixtures(&[("partial.yaml", "nucleus.yaml"), ("package.json", "package.json")]);

  env.nucleus_cmd().arg("install").assert().success();

  let config = env.read_file("nucleus.yaml");
  assert!(config.contains("region: eu-west-1"));
  assert!(config.contains("- lint"));

  let manifest: serde_json::Value = serde_json::from_str(&env.read_file("package.json")).unwrap();
  assert_eq!(manifest["scripts"]["nucleus:deploy"], "custom-deploy --fast");
  assert_eq!(manifest["scripts"]["test"], "jest");
  assert_eq!(manifest["scripts"]["nucleus:help"], "nucleus-deploy help");
}

#[test]
fn install_quarantines_invalid_config() {
  let env = TestEnv::with_fixtures(&[("invalid.yaml", "nucleus.yaml")]);

  env
    .nucleus_cmd()
    .arg("install")
    .assert()
    .success()
    .stdout(predicate::str::contains("Please manually merge from nucleus.yaml.bak"));

  assert_eq!(env.read_file("nucleus.yaml.bak"), std::fs::read_to_string(fixture_path("invalid.yaml")).unwrap());
  assert!(env.read_file("nucleus.yaml").contains("projectName"));
}

#[test]
fn install_json_format() {
  let env = TestEnv::empty();

  let output = env
    .nucleus_cmd()
    .args(["install", "--format", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(summary["actions"], serde_json::json!(["Created nucleus.yaml"]));
  assert_eq!(summary["notes"].as_array().unwrap().len(), 1);
}

#[test]
fn install_root_flag_overrides_init_cwd() {
  let env = TestEnv::empty();
  let other = TestEnv::empty();

  env
    .nucleus_cmd()
    .arg("install")
    .arg("--root")
    .arg(other.root())
    .assert()
    .success();

  assert!(other.exists("nucleus.yaml"));
  assert!(!env.exists("nucleus.yaml"));
}

#[test]
fn install_failure_does_not_fail_the_process() {
  let env = TestEnv::with_fixtures(&[("invalid.yaml", "broken-template.yaml")]);

  env
    .nucleus_cmd()
    .arg("install")
    .arg("--template")
    .arg(env.root().join("broken-template.yaml"))
    .assert()
    .success()
    .stderr(predicate::str::contains("postinstall failed"))
    .stdout(predicate::str::contains("installation summary").not());

  assert!(!env.exists("nucleus.yaml"));
}

#[test]
fn install_failure_is_reported_once() {
  let env = TestEnv::with_fixtures(&[("invalid.yaml", "broken-template.yaml")]);

  for strict in [false, true] {
    let mut cmd = env.nucleus_cmd();
    cmd.arg("install").arg("--template").arg(env.root().join("broken-template.yaml"));
    if strict {
      cmd.arg("--strict");
    }
    let output = cmd.output().unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();

    assert_eq!(stderr.matches("not valid YAML").count(), 1, "strict={strict}:\n{stderr}");
    assert!(stderr.contains("template is broken"), "strict={strict}:\n{stderr}");
  }
}

#[test]
fn install_failure_with_strict_exits_non_zero() {
  let env = TestEnv::with_fixtures(&[("invalid.yaml", "broken-template.yaml")]);

  env
    .nucleus_cmd()
    .args(["install", "--strict", "--template"])
    .arg(env.root().join("broken-template.yaml"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("not valid YAML"));
}

#[test]
fn install_missing_root_is_reported_not_fatal() {
  let env = TestEnv::empty();

  env
    .nucleus_cmd()
    .arg("install")
    .arg("--root")
    .arg(env.root().join("missing"))
    .assert()
    .success()
    .stderr(predicate::str::contains("consumer root"));
}
