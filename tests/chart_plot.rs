use assert_cmd::Command;
use std::fs;

#[test]
fn chart_plot_renders_png_and_dumps_commands() {
    let dir = tempfile::tempdir().expect("tempdir");
    let png_path = dir.path().join("speed.png");
    let json_path = dir.path().join("speed.json");

    Command::cargo_bin("chart_plot")
        .expect("chart_plot bin")
        .args([
            "--input",
            "data/simulation.csv",
            "--chart",
            "speed-space",
            "--output",
            png_path.to_str().unwrap(),
            "--commands",
            json_path.to_str().unwrap(),
            "--classify",
            "speed",
        ])
        .assert()
        .success();

    let metadata = fs::metadata(&png_path).expect("png metadata");
    assert!(metadata.len() > 0, "PNG output should not be empty");

    let dump = fs::read_to_string(&json_path).expect("commands json");
    assert!(dump.contains("\"chart\": \"speed-space\""));
    assert!(dump.contains("\"kind\": \"path\""));
    assert!(dump.contains("\"kind\": \"circle\""));
    assert!(dump.contains("guideline guide-x"));
}

#[test]
fn chart_plot_renders_rotated_svg() {
    let dir = tempfile::tempdir().expect("tempdir");
    let svg_path = dir.path().join("space-time.svg");

    Command::cargo_bin("chart_plot")
        .expect("chart_plot bin")
        .args([
            "--input",
            "data/simulation.csv",
            "--chart",
            "space-time",
            "--rotate",
            "--output",
            svg_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&svg_path).expect("svg output");
    assert!(svg.contains("<svg"));
    assert!(svg.contains("polyline") || svg.contains("path"));
}

#[test]
fn chart_plot_rejects_unknown_chart() {
    Command::cargo_bin("chart_plot")
        .expect("chart_plot bin")
        .args(["--input", "data/simulation.csv", "--chart", "nope"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("chart 'nope' not found"));
}
