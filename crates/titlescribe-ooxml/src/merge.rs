//! Run merging
//!
//! Word splits visible text into several runs whenever formatting, spell
//! checking or revision ids change, so `{Client Name}` may be stored as
//! `{Client` + ` Name}` in two adjacent `w:r` elements. Merging collapses a
//! text/run close that is immediately followed by a run/text open, joining
//! the two texts into the first run.
//!
//! Runs that differ in formatting, or that sit around a `w:proofErr` or
//! bookmark, cannot be merged that way. For those, [`gather_split_tokens`]
//! moves each `{...}` token into the text element where it starts and
//! leaves the runs and their properties in place.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

/// Collapse adjacent text runs.
///
/// Both boundary shapes are handled: `</w:t></w:r><w:r ATTRS><w:t ATTRS>` and
/// the attribute-free `</w:t></w:r><w:r><w:t>`. Runs separated by run
/// properties, tabs or any other content are left alone. Visible text is
/// never dropped or reordered and merging is idempotent.
pub fn merge_runs(xml: &str) -> String {
    static BOUNDARY_RE: OnceLock<Regex> = OnceLock::new();
    let re = BOUNDARY_RE.get_or_init(|| {
        Regex::new(r"</w:t></w:r><w:r(?:\s[^>]*)?><w:t(?:\s[^>]*)?>").unwrap()
    });
    re.replace_all(xml, "").into_owned()
}

/// A `w:t` element inside the markup
struct TextPiece {
    /// The whole element, open tag to close tag
    element: Range<usize>,
    open: Range<usize>,
    body: Range<usize>,
}

/// Join placeholder tokens that span several `w:t` elements of a paragraph.
///
/// The token text moves into the element where the token starts. Elements
/// it leaves behind keep their run properties and the text outside the
/// token, so visible text keeps its order and nothing is dropped. Tokens
/// never join across paragraphs. Double-brace markers move as one token.
pub fn gather_split_tokens(xml: &str) -> String {
    static PIECE_RE: OnceLock<Regex> = OnceLock::new();
    let re = PIECE_RE.get_or_init(|| {
        Regex::new(r"<w:p(?:\s[^>]*)?/?>|</w:p>|(<w:t(?:\s[^>]*)?>)([^<]*)</w:t>").unwrap()
    });

    let mut edits: Vec<(Range<usize>, String)> = Vec::new();
    let mut paragraph: Vec<TextPiece> = Vec::new();

    for caps in re.captures_iter(xml) {
        match (caps.get(1), caps.get(2)) {
            (Some(open), Some(body)) => paragraph.push(TextPiece {
                element: caps.get(0).map_or(open.range(), |m| m.range()),
                open: open.range(),
                body: body.range(),
            }),
            _ => {
                gather_paragraph(xml, &paragraph, &mut edits);
                paragraph.clear();
            }
        }
    }
    gather_paragraph(xml, &paragraph, &mut edits);

    if edits.is_empty() {
        return xml.to_string();
    }

    let mut out = String::with_capacity(xml.len());
    let mut last = 0;
    for (range, replacement) in edits {
        out.push_str(&xml[last..range.start]);
        out.push_str(&replacement);
        last = range.end;
    }
    out.push_str(&xml[last..]);
    out
}

fn gather_paragraph(xml: &str, pieces: &[TextPiece], edits: &mut Vec<(Range<usize>, String)>) {
    if pieces.len() < 2 {
        return;
    }

    let joined: String = pieces.iter().map(|p| &xml[p.body.clone()]).collect();

    // owner[i] is the piece that byte i of `joined` ends up in; it never
    // decreases along the text, so each piece keeps a contiguous slice
    let mut owner: Vec<usize> = Vec::with_capacity(joined.len());
    for (k, piece) in pieces.iter().enumerate() {
        owner.extend(std::iter::repeat(k).take(piece.body.len()));
    }

    let mut moved = false;
    for m in token_pattern().find_iter(&joined) {
        let first = owner[m.start()];
        if owner[m.end() - 1] != first {
            owner[m.range()].fill(first);
            moved = true;
        }
    }
    if !moved {
        return;
    }

    let mut slices: Vec<Option<Range<usize>>> = vec![None; pieces.len()];
    for (pos, &k) in owner.iter().enumerate() {
        let slice = slices[k].get_or_insert(pos..pos);
        slice.end = pos + 1;
    }

    for (piece, slice) in pieces.iter().zip(slices) {
        let body = slice.map_or("", |r| &joined[r]);
        if body == &xml[piece.body.clone()] {
            continue;
        }
        let open = &xml[piece.open.clone()];
        let padded = body.starts_with(' ') || body.ends_with(' ');
        let replacement = if padded && !open.contains("xml:space") {
            format!("{} xml:space=\"preserve\">{}</w:t>", open.trim_end_matches('>'), body)
        } else {
            format!("{}{}</w:t>", open, body)
        };
        edits.push((piece.element.clone(), replacement));
    }
}

/// A brace token, taking a second brace on either side when present
fn token_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{?[^{}]+\}\}?").unwrap())
}
