//! Parcel details (`{{table1}}`)
//!
//! Every recorded document gets a heading, a definitional table (survey
//! number, revenue record, extent, plot, location and the four boundaries)
//! and a shaded measurement table. Blank values print a parenthesized label
//! so the lawyer can see what is still missing.

use titlescribe_core::{ParcelDetail, ParcelField};

use super::markup::{Align, CellProps, MarkupWriter, TextRun};
use super::RegionMarkup;

/// Text used in place of the tables when no parcel was recorded
pub const NO_PARCELS_TEXT: &str = "No document details added yet";

const TABLE_WIDTH: u32 = 9000;
const MAIN_COLUMNS: [u32; 3] = [600, 4200, 4200];
const MEASUREMENT_COLUMNS: [u32; 2] = [4500, 4500];
const LABEL_SHADING: &str = "D9D9D9";
const ROMAN: [&str; 5] = ["i", "ii", "iii", "iv", "v"];

/// Render the parcel details region
pub fn parcel_tables_xml(parcels: &[ParcelDetail]) -> RegionMarkup {
    if parcels.is_empty() {
        return RegionMarkup::Inline(NO_PARCELS_TEXT.to_string());
    }

    let mut w = MarkupWriter::new();
    for (i, parcel) in parcels.iter().enumerate() {
        if i > 0 {
            w.spacer();
        }
        write_parcel(&mut w, parcel);
    }

    log::debug!("Rendered parcel details for {} documents", parcels.len());
    RegionMarkup::Block(w.finish())
}

fn write_parcel(w: &mut MarkupWriter, parcel: &ParcelDetail) {
    let heading = format!("As per Doc No : {}", parcel.display(ParcelField::DocNo));
    w.paragraph(Align::Center, &[TextRun::bold(&heading)]);

    write_definitions(w, parcel);

    w.paragraph(Align::Center, &[TextRun::heading("Measurement Details")]);
    write_measurements(w, parcel);
}

fn write_definitions(w: &mut MarkupWriter, parcel: &ParcelDetail) {
    w.start_table(TABLE_WIDTH, &MAIN_COLUMNS);

    for (numeral, field) in ROMAN.iter().zip(ParcelField::DEFINITIONS) {
        w.start_row();
        w.cell(main_cell(MAIN_COLUMNS[0]), Align::Left, &[TextRun::plain(numeral)]);
        w.cell(main_cell(MAIN_COLUMNS[1]), Align::Left, &[TextRun::bold(field.label())]);
        w.cell(
            main_cell(MAIN_COLUMNS[2]),
            Align::Left,
            &[TextRun::plain(parcel.display(field))],
        );
        w.end_row();
    }

    // Boundaries share one merged cell
    w.start_row();
    w.start_cell(CellProps::default().with_span(3).with_margins(400, 300));
    let extent = parcel.value_or(ParcelField::TotalExtentSqFt, "(Total Extent)");
    let title = format!("i) Boundaries for {} Sq.Ft of land", extent);
    w.paragraph(Align::Left, &[TextRun::heading(&title)]);
    for field in ParcelField::BOUNDARIES {
        let value = format!(" - {}", parcel.display(field));
        w.paragraph(
            Align::Left,
            &[TextRun::heading(field.label()), TextRun::plain(&value)],
        );
    }
    w.end_cell();
    w.end_row();

    w.end_table();
}

fn write_measurements(w: &mut MarkupWriter, parcel: &ParcelDetail) {
    w.start_table(TABLE_WIDTH, &MEASUREMENT_COLUMNS);
    for field in ParcelField::MEASUREMENTS {
        w.start_row();
        w.cell(
            measurement_cell().with_shading(LABEL_SHADING),
            Align::Center,
            &[TextRun::bold(field.label())],
        );
        w.cell(
            measurement_cell(),
            Align::Center,
            &[TextRun::plain(parcel.display(field))],
        );
        w.end_row();
    }
    w.end_table();
}

fn main_cell(width: u32) -> CellProps {
    CellProps::width(width).with_margins(400, 300)
}

fn measurement_cell() -> CellProps {
    CellProps::width(MEASUREMENT_COLUMNS[0]).with_margins(320, 300)
}
