//! End-to-end composition tests
//!
//! Builds a realistic scrutiny template in memory, composes it and checks
//! the package and markup that come out.

use std::io::{Cursor, Read, Write};

use titlescribe_core::{DeedRecord, FieldRegistry, InMemoryTemplates, ParcelDetail};
use titlescribe_ooxml::{
    scan_document_xml, Composer, OoxmlArchive, ReportData, Template, DOCUMENT_PART,
};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8"?><w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#;

fn document(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        body
    )
}

fn build_docx(body: &str) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", stored).unwrap();
    zip.write_all(br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
        .unwrap();
    zip.start_file(DOCUMENT_PART, deflated).unwrap();
    zip.write_all(document(body).as_bytes()).unwrap();
    zip.start_file("word/styles.xml", deflated).unwrap();
    zip.write_all(STYLES.as_bytes()).unwrap();
    zip.start_file("word/media/seal.png", stored).unwrap();
    zip.write_all(&[0x89, b'P', b'N', b'G', 0, 1, 2, 3]).unwrap();

    zip.finish().unwrap();
    buffer.into_inner()
}

fn read_entry(docx: &[u8], name: &str) -> Vec<u8> {
    let mut archive = ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut contents = Vec::new();
    file.read_to_end(&mut contents).unwrap();
    contents
}

fn document_of(docx: &[u8]) -> String {
    String::from_utf8(read_entry(docx, DOCUMENT_PART)).unwrap()
}

/// Paragraphs of a typical report, with runs split the way Word splits them
fn scrutiny_body() -> String {
    [
        r#"<w:p><w:r><w:t xml:space="preserve">Client: {Client </w:t></w:r><w:r w:rsidR="00C1"><w:t>Name}</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:t>1. FLOW OF TITLE:</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:t>{{ta</w:t></w:r><w:r><w:t>ble}}</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:t>2. DESCRIPTION:</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:t>{{table1}}</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:t>3. HISTORY:</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:t>{$history}</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:t>Place: {place}</w:t></w:r></w:p>"#,
    ]
    .concat()
}

fn deeds() -> Vec<DeedRecord> {
    vec![
        DeedRecord::new("Sale Deed", "A", "B")
            .with_date("2025-01-01")
            .with_document_number("D1")
            .with_nature("Original")
            .with_custom_field("saleAmount", "500"),
        DeedRecord::new("Gift Deed", "", "Z"),
    ]
}

#[test]
fn test_scan_detects_everything() {
    let template = Template::from_bytes(&build_docx(&scrutiny_body())).unwrap();
    let report = template.scan();

    assert_eq!(report.fields, vec!["Client Name", "place"]);
    assert!(report.has_table);
    assert!(report.has_table1);
    assert!(report.has_history);
    assert!(report.unsupported.is_empty());
}

#[test]
fn test_full_report() {
    let bytes = build_docx(&scrutiny_body());
    let template = Template::from_bytes(&bytes).unwrap();

    let mut fields = template.scan().field_registry();
    fields.set("Client Name", "R. Kumar & Sons");
    fields.set("place", "Chennai");

    let deeds = deeds();
    let parcels = vec![ParcelDetail {
        doc_no: "D1".to_string(),
        survey_no: "45/2B".to_string(),
        ..Default::default()
    }];
    let templates = InMemoryTemplates::new().with("Sale Deed", "Paid {saleAmount} to {executedBy}");

    let composer = Composer::new().with_templates(&templates);
    let data = ReportData::new(&fields).with_deeds(&deeds).with_parcels(&parcels);
    let report = composer.compose(&template, &data).unwrap();

    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    assert_eq!(report.file_name, "Legal_Scrutiny_Report.docx");

    let xml = document_of(&report.bytes);
    assert!(xml.contains("Client: R. Kumar &amp; Sons"));
    assert!(xml.contains("<w:t>Place: Chennai</w:t>"));

    // Deeds table: the gift deed has no executor so it is not a row
    assert!(xml.contains("<w:t>Sale Deed executed by A in favour of B</w:t>"));
    assert!(!xml.contains("Gift Deed executed by"));

    // Parcel tables
    assert!(xml.contains("As per Doc No : D1"));
    assert!(xml.contains("<w:t>45/2B</w:t>"));
    assert!(xml.contains("<w:t>(Plot No)</w:t>"));

    // Narrative: template for the sale deed, fallback for the gift deed
    assert!(xml.contains("<w:t>Paid 500 to A</w:t>"));
    assert!(xml.contains("<w:t>GIFT DEED:</w:t>"));
    assert!(xml.contains("Deed executed by [Executor] in favour of Z dated [Date], Document No: [Doc No]"));

    // No markers survive
    for marker in ["{{table}}", "{table}", "{table1}", "{$history}", "{place}"] {
        assert!(!xml.contains(marker), "{} left in output", marker);
    }
}

#[test]
fn test_other_parts_untouched_and_ordered() {
    let bytes = build_docx("<w:p><w:r><w:t>Hello {a}!</w:t></w:r></w:p>");
    let fields: FieldRegistry = [("a", "X")].into_iter().collect();
    let report = Composer::new()
        .compose_bytes(&bytes, &ReportData::new(&fields))
        .unwrap();

    let input = OoxmlArchive::from_bytes(&bytes).unwrap();
    let output = OoxmlArchive::from_bytes(&report.bytes).unwrap();
    let input_names: Vec<&str> = input.file_list().collect();
    let output_names: Vec<&str> = output.file_list().collect();
    assert_eq!(input_names, output_names);

    for name in input_names.iter().filter(|n| **n != DOCUMENT_PART) {
        assert_eq!(read_entry(&bytes, name), read_entry(&report.bytes, name), "{} changed", name);
    }
    assert!(document_of(&report.bytes).contains("<w:t>Hello X!</w:t>"));
}

#[test]
fn test_empty_records_use_fallback_text() {
    let bytes = build_docx(
        "<w:p><w:r><w:t>{{table}}</w:t></w:r></w:p><w:p><w:r><w:t>{{table1}}</w:t></w:r></w:p><w:p><w:r><w:t>[{$history}]</w:t></w:r></w:p>",
    );
    let fields = FieldRegistry::new();
    let report = Composer::new()
        .compose_bytes(&bytes, &ReportData::new(&fields))
        .unwrap();

    let xml = document_of(&report.bytes);
    assert!(xml.contains("<w:t>No deeds added yet</w:t>"));
    assert!(xml.contains("<w:t>No document details added yet</w:t>"));
    assert!(xml.contains("<w:t>[]</w:t>"));
    assert!(!xml.contains("<w:tbl>"));
}

#[test]
fn test_records_are_not_mutated() {
    let bytes = build_docx("<w:p><w:r><w:t>{{table}}{$history}</w:t></w:r></w:p>");
    let fields = FieldRegistry::new();
    let deeds = deeds();
    let before = deeds.clone();

    Composer::new()
        .compose_bytes(&bytes, &ReportData::new(&fields).with_deeds(&deeds))
        .unwrap();
    assert_eq!(deeds, before);
}

#[test]
fn test_composed_output_rescans_clean() {
    let bytes = build_docx(&scrutiny_body());
    let fields = FieldRegistry::new();
    let deeds = deeds();
    let report = Composer::new()
        .compose_bytes(&bytes, &ReportData::new(&fields).with_deeds(&deeds))
        .unwrap();

    let rescan = scan_document_xml(&document_of(&report.bytes));
    assert!(rescan.fields.is_empty());
    assert!(!rescan.has_table && !rescan.has_table1 && !rescan.has_history);
}

#[test]
fn test_malformed_archive_rejected() {
    let fields = FieldRegistry::new();
    let err = Composer::new()
        .compose_bytes(b"PK\x03\x04 not really a zip", &ReportData::new(&fields))
        .unwrap_err();
    assert!(err.is_malformed_archive());
}
