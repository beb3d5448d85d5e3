use super::fmt::{format_amount, format_qty};
use super::layout::{plan_table, PageGeometry, TablePlan, MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use super::model::LineItem;
use super::store::ReportSnapshot;
use super::totals::coerce;
use crate::config::Organization;
use crate::error::Result;
use crate::render::{Align, DocumentCanvas, PdfCanvas, TextStyle, PT_TO_MM};

// Vertical offsets of the static page header, in mm from the page top.
const ORG_NAME_Y: f64 = 15.0;
const ADDRESS_Y: f64 = 21.0;
const TITLE_Y: f64 = 32.0;
const INFO_BLOCK_Y: f64 = 42.0;
const INFO_LINE_HEIGHT: f64 = 5.5;

/// Where the table resumes on a continuation page.
const CONTINUATION_TOP_Y: f64 = 15.0;

/// The signature block moves to a fresh page when the table bottom gets
/// closer to it than this.
const SIGNATURE_TOLERANCE: f64 = 10.0;

const GRID_THICKNESS: f64 = 0.1;
const SIGNATURE_THICKNESS: f64 = 0.3;

/// The description column is wider than the rest.
const DESCRIPTION_COL_WIDTH: f64 = 40.0;

struct Column {
    title: &'static str,
    width: f64,
    align: Align,
}

fn table_columns(page_width: f64) -> Vec<Column> {
    let content_width = page_width - 2.0 * MARGIN_MM;
    let other = (content_width - DESCRIPTION_COL_WIDTH) / 10.0;
    let col = |title, width, align| Column {
        title,
        width,
        align,
    };
    vec![
        col("Fabric Code", other, Align::Center),
        col("Item Description", DESCRIPTION_COL_WIDTH, Align::Left),
        col("Rcvd Date", other, Align::Center),
        col("Challan No", other, Align::Center),
        col("Pi Number", other, Align::Center),
        col("Unit", other, Align::Center),
        col("Invoice Qty", other, Align::Center),
        col("Rcvd Qty", other, Align::Center),
        col("Unit Price $", other, Align::Center),
        col("Total Value", other, Align::Center),
        col("Appstreme No.\n(Receipt no)", other, Align::Center),
    ]
}

/// Description cell lines: the base description, then a detail line for
/// whichever of color / HS code are present, comma-joined. No detail line
/// when both are blank.
fn description_lines(item: &LineItem) -> Vec<String> {
    let mut lines = vec![item.item_description.clone()];

    let mut details = Vec::new();
    if !item.color.trim().is_empty() {
        details.push(format!("Color: {}", item.color));
    }
    if !item.hs_code.trim().is_empty() {
        details.push(format!("H.S Code: {}", item.hs_code));
    }
    if !details.is_empty() {
        lines.push(details.join(", "));
    }
    lines
}

fn item_row(item: &LineItem) -> Vec<Vec<String>> {
    let invoice_qty = coerce(item.invoice_qty);
    let rcvd_qty = coerce(item.rcvd_qty);
    let unit_price = coerce(item.unit_price);

    vec![
        vec![item.fabric_code.clone()],
        description_lines(item),
        vec![item.rcvd_date.clone()],
        vec![item.challan_no.clone()],
        vec![item.pi_number.clone()],
        vec![item.unit.as_str().to_string()],
        vec![format_qty(invoice_qty)],
        vec![format_qty(rcvd_qty)],
        vec![format_amount(unit_price)],
        vec![format_amount(invoice_qty * unit_price)],
        vec![item.appstreme_no.clone()],
    ]
}

fn totals_row(snapshot: &ReportSnapshot) -> Vec<Vec<String>> {
    vec![
        vec![String::new()],
        vec![String::new()],
        vec![String::new()],
        vec![String::new()],
        vec!["Total:".to_string()],
        vec!["YDS".to_string()],
        vec![format_amount(snapshot.totals.total_invoice_qty)],
        vec![format_amount(snapshot.totals.total_rcvd_qty)],
        vec![String::new()],
        vec![format_amount(snapshot.totals.total_value)],
        vec![String::new()],
    ]
}

/// Compose the full paginated document onto any canvas.
pub fn compose_document<C: DocumentCanvas>(
    canvas: &mut C,
    snapshot: &ReportSnapshot,
    org: &Organization,
    geometry: &PageGeometry,
) {
    let (page_width, _) = canvas.page_size();
    let plan = plan_table(snapshot.items.len(), geometry);

    draw_static_header(canvas, org, page_width);
    draw_info_block(canvas, snapshot, page_width);
    let table_bottom = draw_table(canvas, snapshot, &plan, geometry);
    draw_signatures(canvas, geometry, table_bottom, page_width);
}

fn draw_static_header<C: DocumentCanvas>(canvas: &mut C, org: &Organization, page_width: f64) {
    let center = page_width / 2.0;
    canvas.text(
        &org.name,
        center,
        ORG_NAME_Y,
        TextStyle::bold(20.0).align(Align::Center),
    );
    canvas.text(
        &org.address,
        center,
        ADDRESS_Y,
        TextStyle::normal(9.0).align(Align::Center),
    );
    canvas.text(
        &org.report_title,
        center,
        TITLE_Y,
        TextStyle::bold(14.0).align(Align::Center),
    );
}

fn draw_info_block<C: DocumentCanvas>(canvas: &mut C, snapshot: &ReportSnapshot, page_width: f64) {
    let left_x = MARGIN_MM;
    let right_x = page_width - 70.0;
    let header = &snapshot.header;

    let mut label_val = |label: &str, value: &str, x: f64, value_offset: f64, row: usize| {
        let y = INFO_BLOCK_Y + INFO_LINE_HEIGHT * row as f64;
        canvas.text(label, x, y, TextStyle::bold(9.0));
        canvas.text(value, x + value_offset, y, TextStyle::normal(9.0));
    };

    label_val("Buyer Name :", &header.buyer_name, left_x, 35.0, 0);
    label_val("Supplier Name:", &header.supplier_name, left_x, 35.0, 1);
    label_val("File No :", &header.file_no, left_x, 35.0, 2);
    label_val("Invoice No :", &header.invoice_no, left_x, 35.0, 3);
    label_val("L/C Number :", &header.lc_number, left_x, 35.0, 4);

    label_val("Invoice Date:", &header.invoice_date, right_x, 25.0, 0);
    label_val("Billing Date:", &header.billing_date, right_x, 25.0, 1);
}

/// Draw the table and return the y of its bottom edge on the current page.
fn draw_table<C: DocumentCanvas>(
    canvas: &mut C,
    snapshot: &ReportSnapshot,
    plan: &TablePlan,
    geometry: &PageGeometry,
) -> f64 {
    let (page_width, page_height) = canvas.page_size();
    let columns = table_columns(page_width);
    let line_height = plan.font_size * PT_TO_MM * 1.3;
    let bottom_limit = page_height - geometry.bottom_margin;

    let header_cells: Vec<Vec<String>> = columns
        .iter()
        .map(|c| c.title.split('\n').map(str::to_string).collect())
        .collect();

    let mut rows: Vec<(Vec<Vec<String>>, bool)> = Vec::with_capacity(snapshot.items.len() + 2);
    rows.push((header_cells, true));
    for item in &snapshot.items {
        rows.push((item_row(item), false));
    }
    rows.push((totals_row(snapshot), true));

    let mut y = geometry.table_start_y;
    for (cells, bold) in rows {
        let line_count = cells.iter().map(Vec::len).max().unwrap_or(1) as f64;
        let height = (line_count * line_height + 2.0 * plan.cell_padding).max(plan.min_row_height);

        // Never start a row that would run off the page bottom.
        if y + height > bottom_limit && y > CONTINUATION_TOP_Y {
            canvas.start_page();
            y = CONTINUATION_TOP_Y;
        }

        draw_row(canvas, &columns, &cells, bold, y, height, plan, line_height);
        y += height;
    }
    y
}

#[allow(clippy::too_many_arguments)]
fn draw_row<C: DocumentCanvas>(
    canvas: &mut C,
    columns: &[Column],
    cells: &[Vec<String>],
    bold: bool,
    y: f64,
    height: f64,
    plan: &TablePlan,
    line_height: f64,
) {
    let x0 = MARGIN_MM;
    let table_width: f64 = columns.iter().map(|c| c.width).sum();

    canvas.line((x0, y), (x0 + table_width, y), GRID_THICKNESS);
    canvas.line(
        (x0, y + height),
        (x0 + table_width, y + height),
        GRID_THICKNESS,
    );

    let mut x = x0;
    canvas.line((x, y), (x, y + height), GRID_THICKNESS);
    for column in columns {
        x += column.width;
        canvas.line((x, y), (x, y + height), GRID_THICKNESS);
    }

    let mut x = x0;
    for (column, lines) in columns.iter().zip(cells) {
        let text_block = lines.len() as f64 * line_height;
        let mut baseline = y + (height - text_block) / 2.0 + line_height * 0.8;
        for line in lines {
            if !line.is_empty() {
                let (text_x, align) = match column.align {
                    Align::Left => (x + plan.cell_padding, Align::Left),
                    _ => (x + column.width / 2.0, Align::Center),
                };
                canvas.text(
                    line,
                    text_x,
                    baseline,
                    TextStyle {
                        size: plan.font_size,
                        bold,
                        align,
                    },
                );
            }
            baseline += line_height;
        }
        x += column.width;
    }
}

/// Place the signature block at its fixed offset from the page bottom. When
/// the table bottom crowds it, move the whole block to a fresh page at the
/// same offset; it is never split or resized.
fn draw_signatures<C: DocumentCanvas>(
    canvas: &mut C,
    geometry: &PageGeometry,
    table_bottom: f64,
    page_width: f64,
) {
    let sig_y = geometry.signature_y();

    if table_bottom > sig_y - SIGNATURE_TOLERANCE {
        canvas.start_page();
    }

    canvas.line((20.0, sig_y), (70.0, sig_y), SIGNATURE_THICKNESS);
    canvas.text("Prepared By", 25.0, sig_y + 5.0, TextStyle::bold(9.0));

    canvas.line(
        (page_width - 70.0, sig_y),
        (page_width - 20.0, sig_y),
        SIGNATURE_THICKNESS,
    );
    canvas.text(
        "Store In-Charge",
        page_width - 65.0,
        sig_y + 5.0,
        TextStyle::bold(9.0),
    );
}

/// Render the document artifact to PDF bytes.
pub fn render_pdf_bytes(snapshot: &ReportSnapshot, org: &Organization) -> Result<Vec<u8>> {
    let mut canvas = PdfCanvas::new(&org.report_title, PAGE_WIDTH_MM, PAGE_HEIGHT_MM)?;
    compose_document(
        &mut canvas,
        snapshot,
        org,
        &PageGeometry::default(),
    );
    canvas.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{CanvasOp, RecordingCanvas};
    use crate::report::store::{HeaderField, ItemField, ReportStore};

    fn org() -> Organization {
        Organization {
            name: "Tusuka Trousers Ltd.".to_string(),
            address: "Neelngar, Konabari, Gazipur".to_string(),
            report_title: "Inventory Report".to_string(),
        }
    }

    fn snapshot_with(items: usize, with_details: bool) -> ReportSnapshot {
        let mut store = ReportStore::new();
        store.set_header(HeaderField::BuyerName("HNM".into()));
        store.set_header(HeaderField::BillingDate("01-Jan-2025".into()));
        for i in 0..items {
            let id = if i == 0 {
                store.items[0].id
            } else {
                store.add_item()
            };
            store.set_item(id, ItemField::Description(format!("Lot {i}")));
            store.set_item(id, ItemField::InvoiceQty(10.0));
            store.set_item(id, ItemField::RcvdQty(9.0));
            store.set_item(id, ItemField::UnitPrice(2.0));
            if with_details {
                store.set_item(id, ItemField::Color("Indigo".into()));
                store.set_item(id, ItemField::HsCode("5209.42".into()));
            }
        }
        store.snapshot()
    }

    #[test]
    fn description_line_with_color_only() {
        let item = LineItem {
            item_description: "Denim".to_string(),
            color: "Red".to_string(),
            ..LineItem::default()
        };
        assert_eq!(description_lines(&item), vec!["Denim", "Color: Red"]);
    }

    #[test]
    fn description_line_with_both_details() {
        let item = LineItem {
            item_description: "Denim".to_string(),
            color: "Red".to_string(),
            hs_code: "5209.42".to_string(),
            ..LineItem::default()
        };
        assert_eq!(
            description_lines(&item),
            vec!["Denim", "Color: Red, H.S Code: 5209.42"]
        );
    }

    #[test]
    fn description_line_without_details() {
        let item = LineItem {
            item_description: "Denim".to_string(),
            ..LineItem::default()
        };
        assert_eq!(description_lines(&item), vec!["Denim"]);
    }

    #[test]
    fn static_header_is_centered_on_the_page() {
        let mut canvas = RecordingCanvas::a4_landscape();
        compose_document(
            &mut canvas,
            &snapshot_with(1, false),
            &org(),
            &PageGeometry::default(),
        );

        let (_, x, y, style) = canvas
            .texts()
            .find(|(t, ..)| *t == "Tusuka Trousers Ltd.")
            .unwrap();
        assert_eq!(x, PAGE_WIDTH_MM / 2.0);
        assert_eq!(y, ORG_NAME_Y);
        assert!(style.bold);
        assert_eq!(style.align, Align::Center);

        assert!(canvas.contains_text("Inventory Report"));
        assert!(canvas.contains_text("Buyer Name :"));
        assert!(canvas.contains_text("HNM"));
        assert!(canvas.contains_text("Billing Date:"));
    }

    #[test]
    fn single_item_scenario_totals_row() {
        let mut store = ReportStore::new();
        store.set_header(HeaderField::BuyerName("HNM".into()));
        let id = store.items[0].id;
        store.set_item(id, ItemField::InvoiceQty(100.0));
        store.set_item(id, ItemField::RcvdQty(90.0));
        store.set_item(id, ItemField::UnitPrice(2.5));

        let mut canvas = RecordingCanvas::a4_landscape();
        compose_document(
            &mut canvas,
            &store.snapshot(),
            &org(),
            &PageGeometry::default(),
        );

        // Item row renders minimal decimals, the totals row two decimals.
        assert!(canvas.contains_text("100"));
        assert!(canvas.contains_text("90"));
        assert!(canvas.contains_text("2.50"));
        assert!(canvas.contains_text("100.00"));
        assert!(canvas.contains_text("90.00"));
        assert!(canvas.contains_text("250.00"));
        assert!(canvas.contains_text("Total:"));
        assert!(canvas.contains_text("YDS"));
    }

    #[test]
    fn short_report_keeps_everything_on_one_page() {
        let mut canvas = RecordingCanvas::a4_landscape();
        compose_document(
            &mut canvas,
            &snapshot_with(3, false),
            &org(),
            &PageGeometry::default(),
        );

        assert_eq!(canvas.page_count(), 1);
        let sig_y = PageGeometry::default().signature_y();
        let (_, _, y, _) = canvas
            .texts()
            .find(|(t, ..)| *t == "Prepared By")
            .unwrap();
        assert_eq!(y, sig_y + 5.0);
        assert!(canvas.contains_text("Store In-Charge"));
    }

    #[test]
    fn crowded_table_pushes_signatures_to_a_fresh_page() {
        // Two-line descriptions at shrink-mode font grow each row past the
        // planned height, so the table bottom crosses the signature zone.
        let mut canvas = RecordingCanvas::a4_landscape();
        compose_document(
            &mut canvas,
            &snapshot_with(10, true),
            &org(),
            &PageGeometry::default(),
        );

        assert!(canvas.page_count() >= 2);

        // The signature block comes after the last page break, at the same
        // fixed offset.
        let last_break = canvas
            .ops
            .iter()
            .rposition(|op| matches!(op, CanvasOp::StartPage))
            .unwrap();
        let sig_pos = canvas
            .ops
            .iter()
            .position(|op| matches!(op, CanvasOp::Text { text, .. } if text == "Prepared By"))
            .unwrap();
        assert!(sig_pos > last_break);

        let (_, _, y, _) = canvas
            .texts()
            .find(|(t, ..)| *t == "Prepared By")
            .unwrap();
        assert_eq!(y, PageGeometry::default().signature_y() + 5.0);
    }

    #[test]
    fn items_render_in_input_order() {
        let snapshot = snapshot_with(4, false);
        let mut canvas = RecordingCanvas::a4_landscape();
        compose_document(&mut canvas, &snapshot, &org(), &PageGeometry::default());

        let order: Vec<&str> = canvas
            .texts()
            .filter(|(t, ..)| t.starts_with("Lot "))
            .map(|(t, ..)| t)
            .collect();
        assert_eq!(order, vec!["Lot 0", "Lot 1", "Lot 2", "Lot 3"]);
    }
}
