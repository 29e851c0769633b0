use std::path::Path;
use std::process::Command;

fn scenario(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

#[test]
fn bundled_scenarios_pass_through_the_binary() {
    let report = std::env::temp_dir().join(format!(
        "blockplace_report_{}.json",
        std::process::id()
    ));
    let output = Command::new(env!("CARGO_BIN_EXE_blockplace"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args([
            &scenario("stair_corner.json"),
            &scenario("chest_pair.json"),
            "--report",
            report.to_str().expect("utf-8 temp path"),
        ])
        .output()
        .expect("run blockplace");
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("stair_corner"));
    assert!(stdout.contains("chest_pair"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).expect("report written"))
            .expect("report is json");
    assert_eq!(json.as_array().map(Vec::len), Some(2));
    assert_eq!(json[0]["name"], "stair_corner");
}

#[test]
fn failing_expectation_sets_exit_status() {
    let dir = std::env::temp_dir().join(format!("blockplace_fail_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("fail.json");
    std::fs::write(
        &path,
        r#"{"name": "fail", "steps": [
            {"action": "expect", "pos": {"x": 0, "y": 0, "z": 0}, "state": "minecraft:stone"}
        ]}"#,
    )
    .expect("write scenario");

    let output = Command::new(env!("CARGO_BIN_EXE_blockplace"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .arg(&path)
        .output()
        .expect("run blockplace");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("FAILED"));
}
