//! WordprocessingML markup writer for report regions
//!
//! Regions are spliced into an existing paragraph stream, so the writer
//! emits compact markup with no whitespace between elements.

/// Escape the five XML special characters
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// A run of text with character formatting
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub bold: bool,
    pub underline: bool,
}

impl<'a> TextRun<'a> {
    pub fn plain(text: &'a str) -> Self {
        Self {
            text,
            ..Default::default()
        }
    }

    pub fn bold(text: &'a str) -> Self {
        Self {
            text,
            bold: true,
            underline: false,
        }
    }

    /// Bold and single-underlined
    pub fn heading(text: &'a str) -> Self {
        Self {
            text,
            bold: true,
            underline: true,
        }
    }
}

/// Cell margins in twentieths of a point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMargins {
    pub vertical: u32,
    pub horizontal: u32,
}

/// Properties written into `w:tcPr`
#[derive(Debug, Clone, Copy, Default)]
pub struct CellProps {
    pub width: Option<u32>,
    pub grid_span: Option<u32>,
    pub margins: Option<CellMargins>,
    pub shading: Option<&'static str>,
}

impl CellProps {
    pub fn width(width: u32) -> Self {
        Self {
            width: Some(width),
            ..Default::default()
        }
    }

    pub fn with_span(mut self, span: u32) -> Self {
        self.grid_span = Some(span);
        self
    }

    pub fn with_margins(mut self, vertical: u32, horizontal: u32) -> Self {
        self.margins = Some(CellMargins {
            vertical,
            horizontal,
        });
        self
    }

    pub fn with_shading(mut self, fill: &'static str) -> Self {
        self.shading = Some(fill);
        self
    }
}

/// Accumulates region markup
#[derive(Debug, Default)]
pub struct MarkupWriter {
    output: String,
}

impl MarkupWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the generated markup
    pub fn finish(self) -> String {
        self.output
    }

    /// Open a bordered table with fixed column widths (dxa)
    pub fn start_table(&mut self, total_width: u32, columns: &[u32]) {
        self.output.push_str("<w:tbl><w:tblPr>");
        self.output.push_str(&format!(
            "<w:tblW w:w=\"{}\" w:type=\"dxa\"/>",
            total_width
        ));
        self.output.push_str("<w:tblBorders>");
        for side in ["top", "left", "bottom", "right", "insideH", "insideV"] {
            self.output.push_str(&format!(
                "<w:{} w:val=\"single\" w:sz=\"8\" w:space=\"0\" w:color=\"000000\"/>",
                side
            ));
        }
        self.output.push_str("</w:tblBorders></w:tblPr>");

        self.output.push_str("<w:tblGrid>");
        for width in columns {
            self.output
                .push_str(&format!("<w:gridCol w:w=\"{}\"/>", width));
        }
        self.output.push_str("</w:tblGrid>");
    }

    pub fn end_table(&mut self) {
        self.output.push_str("</w:tbl>");
    }

    pub fn start_row(&mut self) {
        self.output.push_str("<w:tr>");
    }

    pub fn end_row(&mut self) {
        self.output.push_str("</w:tr>");
    }

    pub fn start_cell(&mut self, props: CellProps) {
        self.output.push_str("<w:tc><w:tcPr>");
        if let Some(width) = props.width {
            self.output
                .push_str(&format!("<w:tcW w:w=\"{}\" w:type=\"dxa\"/>", width));
        }
        if let Some(span) = props.grid_span {
            self.output
                .push_str(&format!("<w:gridSpan w:val=\"{}\"/>", span));
        }
        if let Some(fill) = props.shading {
            self.output.push_str(&format!(
                "<w:shd w:val=\"clear\" w:color=\"auto\" w:fill=\"{}\"/>",
                fill
            ));
        }
        if let Some(m) = props.margins {
            self.output.push_str(&format!(
                "<w:tcMar><w:top w:w=\"{v}\" w:type=\"dxa\"/><w:left w:w=\"{h}\" w:type=\"dxa\"/><w:bottom w:w=\"{v}\" w:type=\"dxa\"/><w:right w:w=\"{h}\" w:type=\"dxa\"/></w:tcMar>",
                v = m.vertical,
                h = m.horizontal
            ));
        }
        self.output.push_str("</w:tcPr>");
    }

    pub fn end_cell(&mut self) {
        self.output.push_str("</w:tc>");
    }

    /// A cell holding a single paragraph
    pub fn cell(&mut self, props: CellProps, align: Align, runs: &[TextRun<'_>]) {
        self.start_cell(props);
        self.paragraph(align, runs);
        self.end_cell();
    }

    /// Write one paragraph made of `runs`
    pub fn paragraph(&mut self, align: Align, runs: &[TextRun<'_>]) {
        self.output.push_str("<w:p>");
        if align == Align::Center {
            self.output.push_str("<w:pPr><w:jc w:val=\"center\"/></w:pPr>");
        }
        for run in runs {
            self.run(run);
        }
        self.output.push_str("</w:p>");
    }

    /// An empty paragraph used as vertical spacing
    pub fn spacer(&mut self) {
        self.output.push_str("<w:p><w:r><w:t></w:t></w:r></w:p>");
    }

    /// A paragraph with explicit font and size, used for narrative lines
    pub fn styled_paragraph(&mut self, text: &str, font: &str, size_half_points: u32) {
        let font = escape_xml(font);
        self.output.push_str(&format!(
            "<w:p><w:r><w:rPr><w:rFonts w:ascii=\"{font}\" w:hAnsi=\"{font}\"/><w:sz w:val=\"{}\"/></w:rPr>",
            size_half_points
        ));
        self.text(text);
        self.output.push_str("</w:r></w:p>");
    }

    fn run(&mut self, run: &TextRun<'_>) {
        self.output.push_str("<w:r>");
        if run.bold || run.underline {
            self.output.push_str("<w:rPr>");
            if run.bold {
                self.output.push_str("<w:b/>");
            }
            if run.underline {
                self.output.push_str("<w:u w:val=\"single\"/>");
            }
            self.output.push_str("</w:rPr>");
        }
        self.text(run.text);
        self.output.push_str("</w:r>");
    }

    fn text(&mut self, text: &str) {
        if text.starts_with(' ') || text.ends_with(' ') {
            self.output.push_str("<w:t xml:space=\"preserve\">");
        } else {
            self.output.push_str("<w:t>");
        }
        self.output.push_str(&escape_xml(text));
        self.output.push_str("</w:t>");
    }
}
