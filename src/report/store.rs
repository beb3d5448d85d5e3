use std::fs;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::{LineItem, ReportHeader, Totals, Unit};
use super::totals::compute_totals;
use crate::error::{ReportError, Result};

/// A single header-field update. One variant per field keeps the dispatch
/// checked at compile time instead of going through property names.
#[derive(Debug, Clone)]
pub enum HeaderField {
    BuyerName(String),
    SupplierName(String),
    FileNo(String),
    InvoiceNo(String),
    LcNumber(String),
    InvoiceDate(String),
    BillingDate(String),
}

/// A single line-item field update.
#[derive(Debug, Clone)]
pub enum ItemField {
    FabricCode(String),
    Description(String),
    Color(String),
    HsCode(String),
    RcvdDate(String),
    ChallanNo(String),
    PiNumber(String),
    Unit(Unit),
    InvoiceQty(f64),
    RcvdQty(f64),
    UnitPrice(f64),
    AppstremeNo(String),
}

/// Immutable view of the report at one instant. Composers only ever see one
/// of these; totals are computed at capture time by the shared calculator.
#[derive(Debug, Clone)]
pub struct ReportSnapshot {
    pub header: ReportHeader,
    pub items: Vec<LineItem>,
    pub totals: Totals,
}

/// The owned, mutable editing state for one report document: the header and
/// an ordered list of line items.
#[derive(Debug, Deserialize, Serialize)]
pub struct ReportStore {
    #[serde(default)]
    pub header: ReportHeader,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl ReportStore {
    /// A fresh report: empty header except the billing date preset to today,
    /// and one blank item row ready for editing.
    pub fn new() -> Self {
        Self {
            header: ReportHeader {
                billing_date: Local::now().format("%d-%b-%Y").to_string(),
                ..ReportHeader::default()
            },
            items: vec![LineItem::default()],
        }
    }

    pub fn add_item(&mut self) -> Uuid {
        let item = LineItem::default();
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Remove a row by id. The last remaining row cannot be removed.
    pub fn remove_item(&mut self, id: Uuid) -> bool {
        if self.items.len() <= 1 {
            return false;
        }
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() < before
    }

    pub fn set_header(&mut self, field: HeaderField) {
        match field {
            HeaderField::BuyerName(v) => self.header.buyer_name = v,
            HeaderField::SupplierName(v) => self.header.supplier_name = v,
            HeaderField::FileNo(v) => self.header.file_no = v,
            HeaderField::InvoiceNo(v) => self.header.invoice_no = v,
            HeaderField::LcNumber(v) => self.header.lc_number = v,
            HeaderField::InvoiceDate(v) => self.header.invoice_date = v,
            HeaderField::BillingDate(v) => self.header.billing_date = v,
        }
    }

    /// Apply one field update to the row with the given id; false when no
    /// such row exists.
    pub fn set_item(&mut self, id: Uuid, field: ItemField) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        match field {
            ItemField::FabricCode(v) => item.fabric_code = v,
            ItemField::Description(v) => item.item_description = v,
            ItemField::Color(v) => item.color = v,
            ItemField::HsCode(v) => item.hs_code = v,
            ItemField::RcvdDate(v) => item.rcvd_date = v,
            ItemField::ChallanNo(v) => item.challan_no = v,
            ItemField::PiNumber(v) => item.pi_number = v,
            ItemField::Unit(v) => item.unit = v,
            ItemField::InvoiceQty(v) => item.invoice_qty = v,
            ItemField::RcvdQty(v) => item.rcvd_qty = v,
            ItemField::UnitPrice(v) => item.unit_price = v,
            ItemField::AppstremeNo(v) => item.appstreme_no = v,
        }
        true
    }

    /// Capture an immutable snapshot with freshly computed totals.
    pub fn snapshot(&self) -> ReportSnapshot {
        ReportSnapshot {
            header: self.header.clone(),
            items: self.items.clone(),
            totals: compute_totals(&self.items),
        }
    }
}

impl Default for ReportStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a report document from its TOML file. Row ids are regenerated; they
/// only need to be stable within the editing session.
pub fn load_report(path: &Path) -> Result<ReportStore> {
    if !path.exists() {
        return Err(ReportError::ReportFileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ReportError::ReportParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save a report document back to its TOML file.
pub fn save_report(path: &Path, store: &ReportStore) -> Result<()> {
    let content = toml::to_string_pretty(store).map_err(|e| {
        ReportError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })?;
    fs::write(path, content)?;
    Ok(())
}
