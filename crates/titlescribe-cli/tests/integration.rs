//! Integration tests for the titlescribe CLI
//!
//! These tests drive the command functions against real files on disk:
//! template DOCX -> scan -> render -> composed DOCX

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use tempfile::TempDir;
use titlescribe_cli::{render_command, scan_command, OutputFormat};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Create a scrutiny template with every kind of placeholder
fn create_test_template() -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    // [Content_Types].xml
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#).unwrap();

    // _rels/.rels
    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#).unwrap();

    // word/document.xml
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t xml:space="preserve">To {Client </w:t></w:r><w:r><w:t>Name}</w:t></w:r></w:p><w:p><w:r><w:t>{{table}}</w:t></w:r></w:p><w:p><w:r><w:t>{{table1}}</w:t></w:r></w:p><w:p><w:r><w:t>{$history}</w:t></w:r></w:p><w:p><w:r><w:t>{#annexures}{/annexures}</w:t></w:r></w:p><w:sectPr/></w:body></w:document>"#,
    )
    .unwrap();

    zip.finish().unwrap();
    buffer.into_inner()
}

fn write_fixtures(dir: &Path) {
    fs::write(dir.join("template.docx"), create_test_template()).unwrap();
    fs::write(
        dir.join("report.toml"),
        r#"
[fields]
"Client Name" = "R. Kumar"

[[deeds]]
deed_type = "Sale Deed"
executed_by = "A"
in_favour_of = "B"
date = "2025-01-01"
document_number = "D1"
custom_fields = { saleAmount = "500" }

[[parcels]]
docNo = "D1"
surveyNo = "45/2B"
"#,
    )
    .unwrap();
    fs::write(
        dir.join("histories.toml"),
        r#"
[[templates]]
deed_type = "sale deed"
narrative_template = "Paid {saleAmount} by {executedBy}"
"#,
    )
    .unwrap();
}

fn document_xml(docx: &[u8]) -> String {
    let mut archive = ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut file = archive.by_name("word/document.xml").unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

#[test]
fn test_scan_command() {
    let temp_dir = TempDir::new().unwrap();
    write_fixtures(temp_dir.path());

    let report = scan_command(&temp_dir.path().join("template.docx"), OutputFormat::Json).unwrap();
    assert_eq!(report.fields, vec!["Client Name"]);
    assert!(report.has_table && report.has_table1 && report.has_history);
    assert_eq!(report.unsupported.len(), 2);
}

#[test]
fn test_scan_missing_template() {
    let temp_dir = TempDir::new().unwrap();
    let err = scan_command(&temp_dir.path().join("missing.docx"), OutputFormat::Text).unwrap_err();
    assert!(err.to_string().contains("Template file not found"));
}

#[test]
fn test_scan_rejects_non_docx() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notes.docx");
    fs::write(&path, "plain text").unwrap();
    assert!(scan_command(&path, OutputFormat::Text).is_err());
}

#[test]
fn test_render_command() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_fixtures(dir);
    let output = dir.join("out.docx");

    let written = render_command(
        &dir.join("template.docx"),
        &dir.join("report.toml"),
        Some(&dir.join("histories.toml")),
        Some(&output),
        None,
    )
    .unwrap();
    assert_eq!(written, output);

    let xml = document_xml(&fs::read(&output).unwrap());
    assert!(xml.contains("To R. Kumar"));
    assert!(xml.contains("<w:t>Sale Deed executed by A in favour of B</w:t>"));
    assert!(xml.contains("As per Doc No : D1"));
    assert!(xml.contains("<w:t>Paid 500 by A</w:t>"));
    assert!(xml.contains("{#annexures}{/annexures}"));
}

#[test]
fn test_render_with_config() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_fixtures(dir);
    fs::write(dir.join("report.toml"), "[fields]\n\"Client Name\" = \"X\"\n").unwrap();
    fs::write(
        dir.join("custom.toml"),
        "[history]\nempty_text = \"No history recorded\"\n",
    )
    .unwrap();
    let output = dir.join("out.docx");

    render_command(
        &dir.join("template.docx"),
        &dir.join("report.toml"),
        None,
        Some(&output),
        Some(&dir.join("custom.toml")),
    )
    .unwrap();

    let xml = document_xml(&fs::read(&output).unwrap());
    assert!(xml.contains("<w:t>No history recorded</w:t>"));
    assert!(xml.contains("<w:t>No deeds added yet</w:t>"));
}

#[test]
fn test_render_bad_data_file() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_fixtures(dir);
    fs::write(dir.join("broken.json"), "{ not json").unwrap();

    let err = render_command(
        &dir.join("template.docx"),
        &dir.join("broken.json"),
        None,
        Some(&dir.join("out.docx")),
        None,
    )
    .unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse JSON"));
    assert!(!dir.join("out.docx").exists());
}
