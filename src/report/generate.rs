use std::fs;
use std::path::{Path, PathBuf};

use super::document::render_pdf_bytes;
use super::fmt::report_basename;
use super::store::ReportSnapshot;
use super::workbook::render_xlsx_bytes;
use crate::config::Organization;
use crate::error::{ReportError, Result};

/// Paths of the two artifacts written by one generation run.
#[derive(Debug)]
pub struct GeneratedReports {
    pub pdf_path: PathBuf,
    pub xlsx_path: PathBuf,
}

/// Produce both artifacts from one immutable snapshot.
///
/// The single precondition is a non-empty buyer name; nothing is written when
/// it fails. Both renderers read the same snapshot, so their totals cannot
/// disagree, and neither depends on the other having run.
pub fn generate_reports(
    snapshot: &ReportSnapshot,
    org: &Organization,
    out_dir: &Path,
) -> Result<GeneratedReports> {
    if snapshot.header.buyer_name.trim().is_empty() {
        return Err(ReportError::MissingBuyerName);
    }

    let base = report_basename(
        &snapshot.header.buyer_name,
        snapshot.totals.total_value,
        &snapshot.header.billing_date,
    );

    let pdf_bytes = render_pdf_bytes(snapshot, org)?;
    let xlsx_bytes = render_xlsx_bytes(snapshot, org)?;

    fs::create_dir_all(out_dir)?;
    let pdf_path = out_dir.join(format!("{base}.pdf"));
    let xlsx_path = out_dir.join(format!("{base}.xlsx"));
    fs::write(&pdf_path, pdf_bytes)?;
    fs::write(&xlsx_path, xlsx_bytes)?;

    Ok(GeneratedReports {
        pdf_path,
        xlsx_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::store::{HeaderField, ItemField, ReportStore};

    fn org() -> Organization {
        Organization {
            name: "Tusuka Trousers Ltd.".to_string(),
            address: "Neelngar, Konabari, Gazipur".to_string(),
            report_title: "Inventory Report".to_string(),
        }
    }

    #[test]
    fn missing_buyer_name_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");

        let store = ReportStore::new();
        let err = generate_reports(&store.snapshot(), &org(), &out).unwrap_err();
        assert!(matches!(err, ReportError::MissingBuyerName));
        assert!(!out.exists());
    }

    #[test]
    fn both_artifacts_share_the_rounded_basename() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = ReportStore::new();
        store.set_header(HeaderField::BuyerName("HNM".into()));
        store.set_header(HeaderField::BillingDate("01-Jan-2025".into()));
        let id = store.items[0].id;
        store.set_item(id, ItemField::InvoiceQty(494.0));
        store.set_item(id, ItemField::UnitPrice(2.5));

        let generated = generate_reports(&store.snapshot(), &org(), dir.path()).unwrap();
        let expected = "Bill of Buyer HNM $1235 DATE-01.01.25";
        assert_eq!(
            generated.pdf_path.file_name().unwrap().to_str().unwrap(),
            format!("{expected}.pdf")
        );
        assert_eq!(
            generated.xlsx_path.file_name().unwrap().to_str().unwrap(),
            format!("{expected}.xlsx")
        );
        assert!(generated.pdf_path.exists());
        assert!(generated.xlsx_path.exists());
    }

    #[test]
    fn invalid_billing_date_still_generates_with_the_sentinel() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = ReportStore::new();
        store.set_header(HeaderField::BuyerName("HNM".into()));
        store.set_header(HeaderField::BillingDate(String::new()));

        let generated = generate_reports(&store.snapshot(), &org(), dir.path()).unwrap();
        assert!(generated
            .pdf_path
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .contains("DATE-00.00.00"));
    }
}
