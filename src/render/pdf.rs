use std::io::BufWriter;

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};

use super::{Align, DocumentCanvas, TextStyle, PT_TO_MM};
use crate::error::{ReportError, Result};

/// printpdf-backed canvas. Takes top-down mm coordinates from the composer
/// and flips them onto printpdf's bottom-left origin.
pub struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    page_width: f64,
    page_height: f64,
}

impl PdfCanvas {
    pub fn new(title: &str, page_width: f64, page_height: f64) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(page_width as f32), Mm(page_height as f32), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer);

        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::PdfGeneration(e.to_string()))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::PdfGeneration(e.to_string()))?;

        Ok(Self {
            doc,
            layer,
            font,
            font_bold,
            page_width,
            page_height,
        })
    }

    pub fn into_bytes(self) -> Result<Vec<u8>> {
        let mut writer = BufWriter::new(Vec::<u8>::new());
        self.doc
            .save(&mut writer)
            .map_err(|e| ReportError::PdfGeneration(e.to_string()))?;
        writer
            .into_inner()
            .map_err(|e| ReportError::PdfGeneration(e.to_string()))
    }

    /// Helvetica has no metrics available here; half an em per glyph is close
    /// enough for centering headings.
    fn estimated_width(text: &str, size: f64) -> f64 {
        text.chars().count() as f64 * size * 0.5 * PT_TO_MM
    }
}

impl DocumentCanvas for PdfCanvas {
    fn page_size(&self) -> (f64, f64) {
        (self.page_width, self.page_height)
    }

    fn start_page(&mut self) {
        let (page, layer) = self.doc.add_page(
            Mm(self.page_width as f32),
            Mm(self.page_height as f32),
            "Layer 1",
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
    }

    fn text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) {
        let x = match style.align {
            Align::Left => x,
            Align::Center => x - Self::estimated_width(text, style.size) / 2.0,
            Align::Right => x - Self::estimated_width(text, style.size),
        };
        let font = if style.bold { &self.font_bold } else { &self.font };
        self.layer.use_text(
            text,
            style.size as f32,
            Mm(x as f32),
            Mm((self.page_height - y) as f32),
            font,
        );
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), thickness: f64) {
        self.layer.set_outline_thickness(thickness as f32);
        self.layer.add_line(Line {
            points: vec![
                (
                    Point::new(Mm(from.0 as f32), Mm((self.page_height - from.1) as f32)),
                    false,
                ),
                (
                    Point::new(Mm(to.0 as f32), Mm((self.page_height - to.1) as f32)),
                    false,
                ),
            ],
            is_closed: false,
        });
    }
}
