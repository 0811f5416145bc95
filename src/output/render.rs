//! Per-encoding rendering of report records into an open artifact stream.
//!
//! CSV headers and XML/YAML key order follow the record's field declaration
//! order: records are rendered through `serde_json::Value` (built with
//! `preserve_order`), so every encoding sees the same field sequence.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use quick_xml::Writer as XmlWriter;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde_json::{Map, Value};

use crate::domain::OrderReport;
use crate::error::Error;

const XML_ROOT: &str = "OrderReports";
const XML_RECORD: &str = "OrderReport";

/// CSV: one row per record, comma-separated with standard escaping. The
/// header row is emitted on the first write into an empty artifact; an
/// empty record slice writes nothing at all, header included.
pub(super) fn write_csv(
    handle: &mut File,
    reports: &[OrderReport],
    path: &Path,
) -> Result<(), Error> {
    if reports.is_empty() {
        return Ok(());
    }

    let artifact_is_empty = handle
        .metadata()
        .map_err(|source| Error::output_io(path, source))?
        .len()
        == 0;

    let rows = reports
        .iter()
        .map(to_fields)
        .collect::<Result<Vec<_>, _>>()?;

    let mut csv_writer = csv::Writer::from_writer(&mut *handle);
    if artifact_is_empty {
        csv_writer
            .write_record(rows[0].keys())
            .map_err(|source| Error::render("csv", source))?;
    }
    for row in &rows {
        csv_writer
            .write_record(row.values().map(scalar_text))
            .map_err(|source| Error::render("csv", source))?;
    }
    csv_writer
        .flush()
        .map_err(|source| Error::output_io(path, source))?;

    Ok(())
}

/// JSONL: one compact JSON object per record, newline-terminated, no
/// enclosing array.
pub(super) fn write_jsonl(
    handle: &mut File,
    reports: &[OrderReport],
    path: &Path,
) -> Result<(), Error> {
    for report in reports {
        serde_json::to_writer(&mut *handle, report)
            .map_err(|source| Error::render("jsonl", source))?;
        handle
            .write_all(b"\n")
            .map_err(|source| Error::output_io(path, source))?;
    }
    Ok(())
}

/// JSON: the whole record sequence as a single array.
pub(super) fn write_json(handle: &mut File, reports: &[OrderReport]) -> Result<(), Error> {
    serde_json::to_writer(&mut *handle, reports).map_err(|source| Error::render("json", source))
}

/// XML: an `<OrderReports>` root with one `<OrderReport>` child per record,
/// rendered by a generic structural recursion: objects become nested
/// elements named after their field, arrays repeat their element name.
pub(super) fn write_xml(handle: &mut File, reports: &[OrderReport]) -> Result<(), Error> {
    let mut xml_writer = XmlWriter::new(&mut *handle);

    xml_writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(|source| Error::render("xml", source))?;

    if reports.is_empty() {
        xml_writer
            .write_event(Event::Empty(BytesStart::new(XML_ROOT)))
            .map_err(|source| Error::render("xml", source))?;
        return Ok(());
    }

    xml_writer
        .write_event(Event::Start(BytesStart::new(XML_ROOT)))
        .map_err(|source| Error::render("xml", source))?;
    for report in reports {
        let fields = to_fields(report)?;
        write_xml_element(&mut xml_writer, XML_RECORD, &Value::Object(fields))?;
    }
    xml_writer
        .write_event(Event::End(BytesEnd::new(XML_ROOT)))
        .map_err(|source| Error::render("xml", source))?;

    Ok(())
}

fn write_xml_element<W: Write>(
    xml_writer: &mut XmlWriter<W>,
    name: &str,
    value: &Value,
) -> Result<(), Error> {
    let xml = |source| Error::render("xml", source);

    match value {
        Value::Object(fields) => {
            xml_writer
                .write_event(Event::Start(BytesStart::new(name)))
                .map_err(xml)?;
            for (field, child) in fields {
                write_xml_element(xml_writer, field, child)?;
            }
            xml_writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(xml)?;
        }
        Value::Array(items) => {
            for item in items {
                write_xml_element(xml_writer, name, item)?;
            }
        }
        Value::Null => {
            xml_writer
                .write_event(Event::Empty(BytesStart::new(name)))
                .map_err(xml)?;
        }
        scalar => {
            let text = scalar_text(scalar);
            xml_writer
                .write_event(Event::Start(BytesStart::new(name)))
                .map_err(xml)?;
            xml_writer
                .write_event(Event::Text(BytesText::new(&text)))
                .map_err(xml)?;
            xml_writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(xml)?;
        }
    }

    Ok(())
}

/// YAML: a generic structural dump of the whole sequence, one field-keyed
/// mapping per record, in record order.
pub(super) fn write_yaml(handle: &mut File, reports: &[OrderReport]) -> Result<(), Error> {
    serde_yaml::to_writer(&mut *handle, reports).map_err(|source| Error::render("yaml", source))
}

fn to_fields(report: &OrderReport) -> Result<Map<String, Value>, Error> {
    match serde_json::to_value(report).map_err(|source| Error::render("json", source))? {
        Value::Object(fields) => Ok(fields),
        _ => unreachable!("report records serialize to JSON objects"),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        nested => nested.to_string(),
    }
}
