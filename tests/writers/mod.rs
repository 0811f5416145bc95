//! Every encoding produces a well-formed artifact through the full
//! pipeline, routed by its incremental-write capability.

use order_report_rs::{OutputFormat, ReportPipeline, ReportWriter};
use rstest::rstest;

use crate::support::{order_line, write_feed};

fn run_pipeline(format: OutputFormat) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let input = write_feed(
        &dir,
        &[
            order_line(1, &[(1, "10.00", 1)], &[]),
            order_line(2, &[(3, "7.25", 2)], &[("PERCENTAGE", "50", 1)]),
            order_line(3, &[(2, "99.99", 3)], &[]),
        ],
    );
    let writer = ReportWriter::create(dir.path(), "report", format).unwrap();

    let mut run = ReportPipeline::new(&input, writer, None).run().unwrap();
    for progress in &mut run {
        progress.expect("run should succeed");
    }
    let path = run.writer().path().to_path_buf();
    (dir, path)
}

#[rstest]
#[case(OutputFormat::Csv, "report.csv")]
#[case(OutputFormat::Json, "report.json")]
#[case(OutputFormat::Jsonl, "report.jsonl")]
#[case(OutputFormat::Xml, "report.xml")]
#[case(OutputFormat::Yaml, "report.yaml")]
fn every_encoding_produces_its_artifact(#[case] format: OutputFormat, #[case] file_name: &str) {
    let (_dir, path) = run_pipeline(format);

    assert_eq!(path.file_name().unwrap(), file_name);
    assert!(path.exists());
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn csv_artifact_has_header_and_one_row_per_record() {
    let (_dir, path) = run_pipeline(OutputFormat::Csv);
    let artifact = std::fs::read_to_string(&path).unwrap();

    assert_eq!(artifact.lines().count(), 4);
    assert!(artifact.starts_with("order_id,"));
}

#[test]
fn json_artifact_is_one_array_in_record_order() {
    let (_dir, path) = run_pipeline(OutputFormat::Json);
    let parsed: Vec<serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    let ids: Vec<u64> = parsed
        .iter()
        .map(|record| record["order_id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn jsonl_artifact_has_one_record_per_line() {
    let (_dir, path) = run_pipeline(OutputFormat::Jsonl);
    let artifact = std::fs::read_to_string(&path).unwrap();

    assert_eq!(artifact.lines().count(), 3);
    for line in artifact.lines() {
        serde_json::from_str::<serde_json::Value>(line).expect("each line should be valid JSON");
    }
}

#[test]
fn xml_artifact_nests_every_record_under_the_root() {
    let (_dir, path) = run_pipeline(OutputFormat::Xml);
    let artifact = std::fs::read_to_string(&path).unwrap();

    assert!(artifact.starts_with("<?xml"));
    assert_eq!(artifact.matches("<OrderReport>").count(), 3);
    // 3 x 7.25 = 21.75, half off -> 10.88 (rounded half away from zero)
    assert!(artifact.contains("<total_order_value>10.88</total_order_value>"));
}

#[test]
fn yaml_artifact_parses_back_into_three_mappings() {
    let (_dir, path) = run_pipeline(OutputFormat::Yaml);
    let parsed: serde_yaml::Value =
        serde_yaml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    let records = parsed.as_sequence().expect("yaml root should be a sequence");
    assert_eq!(records.len(), 3);
    assert_eq!(records[2]["total_order_value"].as_f64(), Some(199.98));
}
