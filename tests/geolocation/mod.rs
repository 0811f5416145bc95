//! Enrichment behavior across the full pipeline: coordinates must be
//! entirely absent when not requested, and zero (never fatal) when the
//! lookup fails.

use order_report_rs::{
    Coordinates, GeoError, Geolocate, OutputFormat, ReportPipeline, ReportWriter, ShippingAddress,
};

use crate::support::{order_line, write_feed};

struct FixedGeocoder(Coordinates);

impl Geolocate for FixedGeocoder {
    fn locate(&self, _address: &ShippingAddress) -> Result<Coordinates, GeoError> {
        Ok(self.0)
    }
}

struct FailingGeocoder;

impl Geolocate for FailingGeocoder {
    fn locate(&self, _address: &ShippingAddress) -> Result<Coordinates, GeoError> {
        Err(GeoError::NoResult)
    }
}

fn run_to_artifact(format: OutputFormat, geolocator: Option<Box<dyn Geolocate>>) -> String {
    let dir = tempfile::tempdir().unwrap();
    let input = write_feed(
        &dir,
        &[
            order_line(1, &[(1, "10.00", 1)], &[]),
            order_line(2, &[(2, "24.50", 2)], &[]),
        ],
    );
    let writer = ReportWriter::create(dir.path(), "out", format).unwrap();

    let mut run = ReportPipeline::new(&input, writer, geolocator).run().unwrap();
    for progress in &mut run {
        progress.expect("run should succeed");
    }
    std::fs::read_to_string(run.writer().path()).unwrap()
}

#[test]
fn without_geolocation_no_encoding_mentions_coordinates() {
    for format in [
        OutputFormat::Csv,
        OutputFormat::Json,
        OutputFormat::Jsonl,
        OutputFormat::Xml,
        OutputFormat::Yaml,
    ] {
        let artifact = run_to_artifact(format, None);
        assert!(
            !artifact.contains("latitude") && !artifact.contains("longitude"),
            "{format:?} artifact must not mention coordinates:\n{artifact}"
        );
    }
}

#[test]
fn successful_lookup_lands_in_every_record() {
    let geocoder = FixedGeocoder(Coordinates {
        latitude: -37.82,
        longitude: 144.99,
    });
    let artifact = run_to_artifact(OutputFormat::Jsonl, Some(Box::new(geocoder)));

    for line in artifact.lines() {
        let record: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(record["latitude"], -37.82);
        assert_eq!(record["longitude"], 144.99);
    }
}

#[test]
fn failing_lookup_degrades_to_zero_coordinates() {
    let artifact = run_to_artifact(OutputFormat::Jsonl, Some(Box::new(FailingGeocoder)));

    let mut lines = 0;
    for line in artifact.lines() {
        let record: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(record["latitude"], 0.0);
        assert_eq!(record["longitude"], 0.0);
        lines += 1;
    }
    assert_eq!(lines, 2, "a failing lookup must not abort the run");
}

#[test]
fn csv_gains_coordinate_columns_only_when_requested() {
    let geocoder = FixedGeocoder(Coordinates {
        latitude: -37.82,
        longitude: 144.99,
    });
    let artifact = run_to_artifact(OutputFormat::Csv, Some(Box::new(geocoder)));

    let header = artifact.lines().next().unwrap();
    assert!(header.ends_with("customer_state,latitude,longitude"));
}
