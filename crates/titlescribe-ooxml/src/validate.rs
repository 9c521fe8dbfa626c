//! Well-formedness check for composed markup
//!
//! Splicing tables into a paragraph is a string operation, so a marker in an
//! unusual position (inside a field code, say) can leave the part broken.
//! The composer runs this check afterwards and reports the problem instead of
//! handing back a file Word refuses to open without warning.

use quick_xml::events::Event;
use quick_xml::Reader;

/// Parse `xml` end to end; `Err` carries a description with the byte offset
pub fn check_well_formed(xml: &str) -> Result<(), String> {
    let mut reader = Reader::from_str(xml);
    let mut open: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                open.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Ok(Event::End(_)) => {
                open.pop();
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(format!(
                    "XML error at byte {}: {}",
                    reader.buffer_position(),
                    e
                ))
            }
        }
    }

    match open.last() {
        Some(name) => Err(format!("element <{}> is never closed", name)),
        None => Ok(()),
    }
}
