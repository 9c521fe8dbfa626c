//! Deeds table (`{{table}}`)

use titlescribe_core::DeedRecord;

use super::markup::{Align, CellProps, MarkupWriter, TextRun};
use super::RegionMarkup;

/// Text used in place of the table when no deed qualifies
pub const NO_DEEDS_TEXT: &str = "No deeds added yet";

const TABLE_WIDTH: u32 = 9000;

/// Header label and width (dxa) of each column
const COLUMNS: [(&str, u32); 5] = [
    ("Sno", 600),
    ("Date", 1400),
    ("D.No", 1400),
    ("Particulars of Deed", 4400),
    ("Nature of Doc", 1200),
];

/// One table row in plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeedRow {
    pub sno: usize,
    pub date: String,
    pub document_number: String,
    pub particulars: String,
    pub nature: String,
}

impl DeedRow {
    /// Cell texts in column order
    pub fn cells(&self) -> [String; 5] {
        [
            self.sno.to_string(),
            self.date.clone(),
            self.document_number.clone(),
            self.particulars.clone(),
            self.nature.clone(),
        ]
    }
}

/// Rows for every deed with a type, executor and beneficiary, numbered from 1
pub fn deed_rows(deeds: &[DeedRecord]) -> Vec<DeedRow> {
    deeds
        .iter()
        .filter(|deed| deed.is_table_ready())
        .enumerate()
        .map(|(i, deed)| DeedRow {
            sno: i + 1,
            date: or_dash(&deed.date),
            document_number: or_dash(&deed.document_number),
            particulars: deed.particulars(),
            nature: or_dash(&deed.nature_of_doc),
        })
        .collect()
}

/// Render the deeds region
pub fn deeds_table_xml(deeds: &[DeedRecord]) -> RegionMarkup {
    let rows = deed_rows(deeds);
    if rows.is_empty() {
        return RegionMarkup::Inline(NO_DEEDS_TEXT.to_string());
    }

    let widths: Vec<u32> = COLUMNS.iter().map(|(_, w)| *w).collect();
    let mut w = MarkupWriter::new();
    w.start_table(TABLE_WIDTH, &widths);

    w.start_row();
    for (i, (label, width)) in COLUMNS.iter().enumerate() {
        w.cell(CellProps::width(*width), column_align(i), &[TextRun::bold(label)]);
    }
    w.end_row();

    for row in &rows {
        w.start_row();
        for (i, text) in row.cells().iter().enumerate() {
            w.cell(
                CellProps::width(COLUMNS[i].1),
                column_align(i),
                &[TextRun::plain(text)],
            );
        }
        w.end_row();
    }

    w.end_table();
    log::debug!("Rendered deeds table with {} rows", rows.len());
    RegionMarkup::Block(w.finish())
}

fn column_align(index: usize) -> Align {
    if index == 0 {
        Align::Center
    } else {
        Align::Left
    }
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}
