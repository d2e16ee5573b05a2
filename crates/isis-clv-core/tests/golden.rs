use std::fs;
use std::path::Path;

use isis_clv_core::{DecodeOptions, Decoding, WalkStatus, decode_file};

fn load_expected_report(dir: &str) -> Decoding {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    let expected_path = root.join(dir).join("expected_report.json");

    let expected_json = fs::read_to_string(&expected_path).expect("read expected_report.json");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn run_golden(dir: &str) {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    let input = root.join(dir).join("input.hex");
    let expected = load_expected_report(dir);

    let mut actual = decode_file(&input, &DecodeOptions::default()).expect("decode input");
    if let (Some(actual_input), Some(expected_input)) = (actual.input.as_mut(), &expected.input) {
        actual_input.path = expected_input.path.clone();
    }

    let actual_value = serde_json::to_value(actual).expect("serialize actual");
    let expected_value = serde_json::to_value(expected).expect("serialize expected");

    assert_eq!(actual_value, expected_value, "golden mismatch in {dir}");
}

#[test]
fn golden_hello() {
    run_golden("tests/golden/hello");
}

#[test]
fn golden_lsp() {
    run_golden("tests/golden/lsp");
}

#[test]
fn golden_malformed() {
    run_golden("tests/golden/malformed");
}

#[test]
fn golden_malformed_is_aborted() {
    let report = load_expected_report("tests/golden/malformed");
    assert_eq!(report.outcome, WalkStatus::Aborted);
    assert_eq!(report.records_total, 3);
    assert_eq!(
        report
            .diagnostics
            .iter()
            .filter(|d| d.message.starts_with("Short CLV header"))
            .count(),
        1
    );
}
