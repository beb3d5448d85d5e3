mod document;
pub mod fmt;
mod generate;
pub mod layout;
mod model;
mod store;
mod totals;
mod workbook;

pub use document::{compose_document, render_pdf_bytes};
pub use generate::{generate_reports, GeneratedReports};
pub use layout::{plan_table, PageGeometry, TablePlan};
pub use model::{LineItem, ReportHeader, Totals, Unit};
pub use store::{
    load_report, save_report, HeaderField, ItemField, ReportSnapshot, ReportStore,
};
pub use totals::compute_totals;
pub use workbook::{compose_workbook, render_xlsx_bytes, SHEET_NAME};
