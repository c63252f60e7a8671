use std::{fmt, fs::File, io::BufWriter, path::Path};

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};

use super::layout::{Cell, Page, TextBlock};

const PT_TO_MM: f32 = 0.352_778;
/// Rough Helvetica advance width as a share of the font size.
const AVG_CHAR_WIDTH_EM: f32 = 0.5;
const LINE_SPACING: f32 = 1.2;

/// Errors raised while building or saving a card document.
#[derive(Debug)]
pub enum DocumentError {
    /// The output file or its directory could not be written.
    IoError(std::io::Error),
    /// printpdf rejected the document.
    PdfError(String),
}

impl From<std::io::Error> for DocumentError {
    fn from(err: std::io::Error) -> Self {
        DocumentError::IoError(err)
    }
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::IoError(e) => write!(f, "Cannot write document: {}", e),
            DocumentError::PdfError(e) => write!(f, "PDF error: {}", e),
        }
    }
}

impl std::error::Error for DocumentError {}

/// Multi-page PDF that bingo card pages are appended to.
///
/// Pages are only ever added; [`CardDocument::save`] consumes the document.
pub struct CardDocument {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    pages: usize,
}

impl CardDocument {
    /// Creates an empty document with the built-in Helvetica faces loaded.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::PdfError`] if a font cannot be registered.
    pub fn new(title: &str) -> Result<Self, DocumentError> {
        let doc = PdfDocument::empty(title);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| DocumentError::PdfError(e.to_string()))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| DocumentError::PdfError(e.to_string()))?;

        Ok(Self {
            doc,
            font,
            font_bold,
            pages: 0,
        })
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// Adds `page` as the next page: header lines first (the top one in
    /// bold), then every cell border with its label.
    pub fn append(&mut self, page: &Page) {
        self.pages += 1;
        let (page_idx, layer_idx) = self.doc.add_page(
            Mm(page.width_mm),
            Mm(page.height_mm),
            format!("Card {}", self.pages),
        );
        let layer = self.doc.get_page(page_idx).get_layer(layer_idx);

        for (i, block) in page.header.iter().enumerate() {
            // topmost header line is set in bold
            let font = if i == 0 { &self.font_bold } else { &self.font };
            draw_text(&layer, block, page, font);
        }

        layer.set_outline_thickness(page.border_thickness);
        for cell in &page.cells {
            draw_border(&layer, cell, page);
            draw_text(&layer, &cell.text, page, &self.font);
        }
    }

    /// Writes the document to `path`, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// Fails with [`DocumentError::IoError`] when the file cannot be created
    /// and [`DocumentError::PdfError`] when serialization fails.
    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<(), DocumentError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(path)?);
        self.doc
            .save(&mut writer)
            .map_err(|e| DocumentError::PdfError(e.to_string()))
    }
}

fn draw_border(layer: &PdfLayerReference, cell: &Cell, page: &Page) {
    let x0 = cell.x * page.width_mm;
    let y0 = cell.y * page.height_mm;
    let x1 = (cell.x + cell.width) * page.width_mm;
    let y1 = (cell.y + cell.height) * page.height_mm;

    let points = vec![
        (Point::new(Mm(x0), Mm(y0)), false),
        (Point::new(Mm(x1), Mm(y0)), false),
        (Point::new(Mm(x1), Mm(y1)), false),
        (Point::new(Mm(x0), Mm(y1)), false),
    ];
    layer.add_line(Line {
        points,
        is_closed: true,
    });
}

fn draw_text(layer: &PdfLayerReference, block: &TextBlock, page: &Page, font: &IndirectFontRef) {
    let line_height = block.font_size * PT_TO_MM * LINE_SPACING;
    let cap_height = block.font_size * PT_TO_MM * 0.7;
    let total = line_height * (block.lines.len().saturating_sub(1)) as f32;

    let center_x = block.center_x * page.width_mm;
    let first_baseline = block.center_y * page.height_mm + total / 2.0 - cap_height / 2.0;

    for (i, line) in block.lines.iter().enumerate() {
        let width = estimate_text_width_mm(line, block.font_size);
        let x = center_x - width / 2.0;
        let y = first_baseline - i as f32 * line_height;
        layer.use_text(line.as_str(), block.font_size, Mm(x), Mm(y), font);
    }
}

/// Approximate printed width of `text` in millimetres.
pub fn estimate_text_width_mm(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVG_CHAR_WIDTH_EM * PT_TO_MM
}
