pub mod pdf;
pub mod xlsx;

pub use pdf::PdfCanvas;
pub use xlsx::XlsxSheet;

use crate::error::Result;

/// Points to millimetres.
pub const PT_TO_MM: f64 = 0.352_778;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Style for one text placement on the document canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points.
    pub size: f64,
    pub bold: bool,
    pub align: Align,
}

impl TextStyle {
    pub fn normal(size: f64) -> Self {
        Self {
            size,
            bold: false,
            align: Align::Left,
        }
    }

    pub fn bold(size: f64) -> Self {
        Self {
            size,
            bold: true,
            align: Align::Left,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Minimal drawing surface for the paginated document.
///
/// Coordinates are mm from the top-left corner of the page; backends flip the
/// axis if their native origin differs. Composers depend only on this trait,
/// never on a concrete renderer.
pub trait DocumentCanvas {
    /// (width, height) of a page in mm.
    fn page_size(&self) -> (f64, f64);

    /// Begin a fresh page; subsequent drawing lands there.
    fn start_page(&mut self);

    /// Place a single line of text. `x` is the anchor the alignment is
    /// relative to; `y` is the text baseline.
    fn text(&mut self, text: &str, x: f64, y: f64, style: TextStyle);

    /// Straight line segment with the given stroke thickness.
    fn line(&mut self, from: (f64, f64), to: (f64, f64), thickness: f64);
}

/// Style for one spreadsheet cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub bold: bool,
    pub centered: bool,
}

impl CellStyle {
    pub fn bold() -> Self {
        Self {
            bold: true,
            centered: false,
        }
    }

    pub fn title() -> Self {
        Self {
            bold: true,
            centered: true,
        }
    }
}

/// Minimal writing surface for the flat tabular artifact. Row and column
/// indices are zero-based.
pub trait TabularSheet {
    fn write(&mut self, row: u32, col: u16, text: &str, style: CellStyle) -> Result<()>;

    /// Merge the given columns of one row into a single cell holding `text`.
    fn merge_across(
        &mut self,
        row: u32,
        first_col: u16,
        last_col: u16,
        text: &str,
        style: CellStyle,
    ) -> Result<()>;

    /// Column width in character units.
    fn set_column_width(&mut self, col: u16, width: f64) -> Result<()>;
}
