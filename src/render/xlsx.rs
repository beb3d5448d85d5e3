use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};

use super::{CellStyle, TabularSheet};
use crate::error::{ReportError, Result};

/// rust_xlsxwriter-backed sheet. Built as a detached worksheet and attached
/// to a workbook only when the bytes are produced.
pub struct XlsxSheet {
    worksheet: Worksheet,
}

impl XlsxSheet {
    pub fn new(sheet_name: &str) -> Result<Self> {
        let mut worksheet = Worksheet::new();
        worksheet
            .set_name(sheet_name)
            .map_err(|e| ReportError::SheetGeneration(e.to_string()))?;
        Ok(Self { worksheet })
    }

    pub fn into_bytes(self) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        workbook.push_worksheet(self.worksheet);
        workbook
            .save_to_buffer()
            .map_err(|e| ReportError::SheetGeneration(e.to_string()))
    }

    fn format(style: CellStyle) -> Format {
        let mut format = Format::new();
        if style.bold {
            format = format.set_bold();
        }
        if style.centered {
            format = format.set_align(FormatAlign::Center);
        }
        format
    }
}

impl TabularSheet for XlsxSheet {
    fn write(&mut self, row: u32, col: u16, text: &str, style: CellStyle) -> Result<()> {
        self.worksheet
            .write_string_with_format(row, col, text, &Self::format(style))
            .map_err(|e| ReportError::SheetGeneration(e.to_string()))?;
        Ok(())
    }

    fn merge_across(
        &mut self,
        row: u32,
        first_col: u16,
        last_col: u16,
        text: &str,
        style: CellStyle,
    ) -> Result<()> {
        self.worksheet
            .merge_range(row, first_col, row, last_col, text, &Self::format(style))
            .map_err(|e| ReportError::SheetGeneration(e.to_string()))?;
        Ok(())
    }

    fn set_column_width(&mut self, col: u16, width: f64) -> Result<()> {
        self.worksheet
            .set_column_width(col, width)
            .map_err(|e| ReportError::SheetGeneration(e.to_string()))?;
        Ok(())
    }
}
