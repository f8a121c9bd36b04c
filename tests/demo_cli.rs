// The demo binary runs its bundled katas and reports through the harness.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn demo() -> Command {
    let mut cmd = Command::cargo_bin("kata-demo").unwrap();
    cmd.arg("--no-color").arg("--seed").arg("11");
    cmd
}

#[test]
fn demo_passes_in_text_mode() {
    demo().assert().success().stdout(
        contains("fizzbuzz:")
            .and(contains("Test Passed: Value == Fizz"))
            .and(contains("Test Passed: before hook ran for every case"))
            .and(contains("Expected error was thrown:"))
            .and(contains("console-").not()),
    );
}

#[test]
fn demo_renders_html_fragments() {
    demo().arg("--html").assert().success().stdout(
        contains(r#"<div class="console-describe"><h6>fizzbuzz:</h6>"#)
            .and(contains(r#"<div class="console-passed">"#)),
    );
}

#[test]
fn demo_reports_first_failure() {
    demo().arg("--fail").assert().failure().stdout(
        contains("Test Failed: deliberate - Expected: 3, instead got: Fizz")
            .and(contains("Test Missed: bonus: zero")),
    )
    .stderr(contains("deliberate"));
}

#[test]
fn demo_prints_json_summary() {
    demo()
        .arg("--json")
        .assert()
        .success()
        .stdout(contains(r#""incorrect":0"#));
}
