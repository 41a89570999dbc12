//! Command tests against packages on disk.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use wesl_diagnostic::emitter::{ColorMode, TerminalEmitter};
use weslc::commands::{check_package, explain_error, link_package, CommandError, Report};
use weslc::options::parse_link_options;

fn write(dir: &Path, relative: &str, text: &str) -> PathBuf {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, text).unwrap();
    path
}

fn emitter() -> TerminalEmitter<Vec<u8>> {
    TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false)
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn test_link_writes_output_and_source_map() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path();
    let root = write(
        dir,
        "shaders/main.wesl",
        "import package::lighting::shade;\nimport noise::hash::hash;\n\
         @compute @workgroup_size(ext.SIZE)\nfn main() { shade(hash(1u)); }\n",
    );
    write(dir, "shaders/lighting.wesl", "fn shade(x: u32) {}\n");
    write(dir, "vendor/hash.wesl", "fn hash(x: u32) -> u32 { return x * 31u; }\n");
    let out = dir.join("out.wgsl");
    let map = dir.join("out.map.json");

    let options = parse_link_options(&args(&[
        root.to_str().unwrap(),
        "--lib",
        &format!("noise={}", dir.join("vendor").display()),
        "--param",
        "SIZE=64",
        "-o",
        out.to_str().unwrap(),
        "--source-map",
        map.to_str().unwrap(),
    ]))
    .unwrap();

    let mut emitter = emitter();
    let report = link_package(&options, &mut emitter).unwrap();
    assert_eq!(report, Report::default());
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "@compute @workgroup_size(64)\nfn main() { shade(hash(1u)); }\n\n\
         fn shade(x: u32) {}\n\n\
         fn hash(x: u32) -> u32 { return x * 31u; }\n"
    );

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&map).unwrap()).unwrap();
    let entries = json.as_array().unwrap();
    assert!(!entries.is_empty());
    assert_eq!(entries[0]["module"], serde_json::json!(["package", "main"]));
}

#[test]
fn test_check_reports_link_errors() {
    let temp = tempfile::tempdir().unwrap();
    let root = write(
        temp.path(),
        "main.wesl",
        "import package::missing::thing;\nfn main() { thing(); undefined(); }\n",
    );
    let options = parse_link_options(&args(&[root.to_str().unwrap()])).unwrap();

    let mut emitter = emitter();
    let report = check_package(&options, &mut emitter).unwrap();
    assert_eq!(report.errors, 2);
    assert!(report.has_errors());

    let rendered = String::from_utf8(emitter.into_inner()).unwrap();
    assert!(rendered.contains("[E2002]"), "{rendered}");
    assert!(rendered.contains("[E2001]"), "{rendered}");
    assert!(rendered.contains("main.wesl:"), "{rendered}");
}

#[test]
fn test_conditions_from_command_line() {
    let temp = tempfile::tempdir().unwrap();
    let root = write(
        temp.path(),
        "main.wesl",
        "@if(FAST) fn pick() -> f32 { return 1.0; }\n@if(!FAST) fn pick() -> f32 { return 2.0; }\nfn main() { pick(); }\n",
    );
    let out = temp.path().join("out.wgsl");
    let options = parse_link_options(&args(&[
        root.to_str().unwrap(),
        "--cond",
        "FAST",
        "-o",
        out.to_str().unwrap(),
    ]))
    .unwrap();
    link_package(&options, &mut emitter()).unwrap();
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "fn pick() -> f32 { return 1.0; }\nfn main() { pick(); }\n"
    );
}

#[test]
fn test_missing_root_is_fatal() {
    let temp = tempfile::tempdir().unwrap();
    let options =
        parse_link_options(&args(&[temp.path().join("nope.wesl").to_str().unwrap()])).unwrap();
    let error = link_package(&options, &mut emitter()).unwrap_err();
    assert!(matches!(error, CommandError::Package(_)));
}

#[test]
fn test_explain() {
    assert!(explain_error("E2001").unwrap().starts_with("E2001: "));
    assert!(explain_error("e2003").is_some());
    assert_eq!(explain_error("X9999"), None);
}
