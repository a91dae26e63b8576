use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--bin", "sim", "--", "7", "hard"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert_eq!(v["difficulty"], "hard");
    assert_eq!(v["complete"], true);
    assert_eq!(v["matched_pairs"], 12);
    assert_eq!(v["best"], v["moves"]);
    assert_eq!(v["completion_shown"], true);
    let moves = v["moves"].as_u64().unwrap();
    assert!((12..=24).contains(&moves));
}
