use super::fmt::{format_amount, format_qty};
use super::store::ReportSnapshot;
use super::totals::coerce;
use crate::config::Organization;
use crate::error::Result;
use crate::render::{CellStyle, TabularSheet, XlsxSheet};

pub const SHEET_NAME: &str = "Inventory Report";

/// Fixed column widths, in character units.
const COLUMN_WIDTHS: [f64; 13] = [
    15.0, 25.0, 10.0, 10.0, 12.0, 12.0, 12.0, 6.0, 10.0, 10.0, 10.0, 12.0, 15.0,
];

/// Unlike the document table, color and HS code get their own columns here.
const COLUMN_HEADERS: [&str; 13] = [
    "Fabric Code",
    "Item Description",
    "Color",
    "HS Code",
    "Rcvd Date",
    "Challan No",
    "Pi Number",
    "Unit",
    "Invoice Qty",
    "Rcvd Qty",
    "Unit Price $",
    "Total Value",
    "Appstreme No",
];

const LAST_COL: u16 = COLUMN_WIDTHS.len() as u16 - 1;

/// Compose the flat tabular artifact onto any sheet: three merged title rows,
/// the header label/value block, the item table, and the totals row.
pub fn compose_workbook<S: TabularSheet>(
    sheet: &mut S,
    snapshot: &ReportSnapshot,
    org: &Organization,
) -> Result<()> {
    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }

    sheet.merge_across(0, 0, LAST_COL, &org.name, CellStyle::title())?;
    sheet.merge_across(1, 0, LAST_COL, &org.address, CellStyle::title())?;
    sheet.merge_across(2, 0, LAST_COL, &org.report_title, CellStyle::title())?;

    // Row 3 stays blank.
    let header = &snapshot.header;
    let label = CellStyle::bold();
    let plain = CellStyle::default();

    sheet.write(4, 0, "Buyer Name :", label)?;
    sheet.write(4, 1, &header.buyer_name, plain)?;
    sheet.write(4, 7, "Invoice Date:", label)?;
    sheet.write(4, 8, &header.invoice_date, plain)?;

    sheet.write(5, 0, "Supplier Name:", label)?;
    sheet.write(5, 1, &header.supplier_name, plain)?;
    sheet.write(5, 7, "Billing Date:", label)?;
    sheet.write(5, 8, &header.billing_date, plain)?;

    sheet.write(6, 0, "File No :", label)?;
    sheet.write(6, 1, &header.file_no, plain)?;
    sheet.write(7, 0, "Invoice No :", label)?;
    sheet.write(7, 1, &header.invoice_no, plain)?;
    sheet.write(8, 0, "L/C Number :", label)?;
    sheet.write(8, 1, &header.lc_number, plain)?;

    // Row 9 stays blank.
    for (col, title) in COLUMN_HEADERS.iter().enumerate() {
        sheet.write(10, col as u16, title, label)?;
    }

    let mut row = 11;
    for item in &snapshot.items {
        let invoice_qty = coerce(item.invoice_qty);
        let rcvd_qty = coerce(item.rcvd_qty);
        let unit_price = coerce(item.unit_price);

        sheet.write(row, 0, &item.fabric_code, plain)?;
        sheet.write(row, 1, &item.item_description, plain)?;
        sheet.write(row, 2, &item.color, plain)?;
        sheet.write(row, 3, &item.hs_code, plain)?;
        sheet.write(row, 4, &item.rcvd_date, plain)?;
        sheet.write(row, 5, &item.challan_no, plain)?;
        sheet.write(row, 6, &item.pi_number, plain)?;
        sheet.write(row, 7, item.unit.as_str(), plain)?;
        sheet.write(row, 8, &format_qty(invoice_qty), plain)?;
        sheet.write(row, 9, &format_qty(rcvd_qty), plain)?;
        sheet.write(row, 10, &format_qty(unit_price), plain)?;
        sheet.write(row, 11, &format_amount(invoice_qty * unit_price), plain)?;
        sheet.write(row, 12, &item.appstreme_no, plain)?;
        row += 1;
    }

    sheet.write(row, 0, "Total:", label)?;
    sheet.write(row, 8, &format_qty(snapshot.totals.total_invoice_qty), label)?;
    sheet.write(row, 9, &format_qty(snapshot.totals.total_rcvd_qty), label)?;
    sheet.write(row, 11, &format_amount(snapshot.totals.total_value), label)?;

    Ok(())
}

/// Render the tabular artifact to XLSX bytes.
pub fn render_xlsx_bytes(snapshot: &ReportSnapshot, org: &Organization) -> Result<Vec<u8>> {
    let mut sheet = XlsxSheet::new(SHEET_NAME)?;
    compose_workbook(&mut sheet, snapshot, org)?;
    sheet.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::RecordingSheet;
    use crate::report::store::{HeaderField, ItemField, ReportStore};

    fn org() -> Organization {
        Organization {
            name: "Tusuka Trousers Ltd.".to_string(),
            address: "Neelngar, Konabari, Gazipur".to_string(),
            report_title: "Inventory Report".to_string(),
        }
    }

    fn scenario_snapshot() -> crate::report::store::ReportSnapshot {
        let mut store = ReportStore::new();
        store.set_header(HeaderField::BuyerName("HNM".into()));
        store.set_header(HeaderField::InvoiceDate("02-Feb-2025".into()));
        let id = store.items[0].id;
        store.set_item(id, ItemField::FabricCode("FC-1".into()));
        store.set_item(id, ItemField::Color("Red".into()));
        store.set_item(id, ItemField::InvoiceQty(100.0));
        store.set_item(id, ItemField::RcvdQty(90.0));
        store.set_item(id, ItemField::UnitPrice(2.5));
        store.snapshot()
    }

    #[test]
    fn title_rows_merge_across_all_columns() {
        let mut sheet = RecordingSheet::default();
        compose_workbook(&mut sheet, &scenario_snapshot(), &org()).unwrap();

        assert_eq!(
            sheet.merges(),
            vec![(0, 0, 12), (1, 0, 12), (2, 0, 12)]
        );
    }

    #[test]
    fn header_block_uses_offset_column_groups() {
        let mut sheet = RecordingSheet::default();
        compose_workbook(&mut sheet, &scenario_snapshot(), &org()).unwrap();

        assert_eq!(sheet.cell(4, 0), Some("Buyer Name :"));
        assert_eq!(sheet.cell(4, 1), Some("HNM"));
        assert_eq!(sheet.cell(4, 7), Some("Invoice Date:"));
        assert_eq!(sheet.cell(4, 8), Some("02-Feb-2025"));
        assert_eq!(sheet.cell(8, 0), Some("L/C Number :"));
    }

    #[test]
    fn color_and_hs_code_are_separate_columns() {
        let mut sheet = RecordingSheet::default();
        compose_workbook(&mut sheet, &scenario_snapshot(), &org()).unwrap();

        assert_eq!(sheet.cell(10, 2), Some("Color"));
        assert_eq!(sheet.cell(10, 3), Some("HS Code"));
        assert_eq!(sheet.cell(11, 0), Some("FC-1"));
        assert_eq!(sheet.cell(11, 2), Some("Red"));
    }

    #[test]
    fn item_and_totals_rows_use_tabular_number_formats() {
        let mut sheet = RecordingSheet::default();
        compose_workbook(&mut sheet, &scenario_snapshot(), &org()).unwrap();

        // Item row: minimal decimals except the 2-decimal line total.
        assert_eq!(sheet.cell(11, 8), Some("100"));
        assert_eq!(sheet.cell(11, 9), Some("90"));
        assert_eq!(sheet.cell(11, 10), Some("2.5"));
        assert_eq!(sheet.cell(11, 11), Some("250.00"));

        // Totals row directly below the single item row.
        assert_eq!(sheet.cell(12, 0), Some("Total:"));
        assert_eq!(sheet.cell(12, 8), Some("100"));
        assert_eq!(sheet.cell(12, 9), Some("90"));
        assert_eq!(sheet.cell(12, 11), Some("250.00"));
        assert_eq!(sheet.max_row(), 12);
    }

    #[test]
    fn all_thirteen_column_widths_are_set() {
        let mut sheet = RecordingSheet::default();
        compose_workbook(&mut sheet, &scenario_snapshot(), &org()).unwrap();

        let widths: Vec<_> = sheet
            .ops
            .iter()
            .filter(|op| matches!(op, crate::render::testing::SheetOp::ColumnWidth { .. }))
            .collect();
        assert_eq!(widths.len(), 13);
    }
}
