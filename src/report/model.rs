use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Shipment-level metadata shared by every line item in one report.
/// Dates are display strings in `DD-Mon-YYYY` form (e.g. "01-Jan-2025").
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ReportHeader {
    #[serde(default)]
    pub buyer_name: String,
    #[serde(default)]
    pub supplier_name: String,
    #[serde(default)]
    pub file_no: String,
    #[serde(default)]
    pub invoice_no: String,
    #[serde(default)]
    pub lc_number: String,
    #[serde(default)]
    pub invoice_date: String,
    #[serde(default)]
    pub billing_date: String,
}

/// Unit of measure for a line item.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Unit {
    Yds,
    Pcs,
    Kgs,
    Mtr,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Yds => "YDS",
            Unit::Pcs => "PCS",
            Unit::Kgs => "KGS",
            Unit::Mtr => "MTR",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inventory row. The id is stable for the editing session only and never
/// appears in report files or artifacts.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LineItem {
    #[serde(skip_serializing, skip_deserializing, default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub fabric_code: String,
    #[serde(default)]
    pub item_description: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub hs_code: String,
    #[serde(default)]
    pub rcvd_date: String,
    #[serde(default)]
    pub challan_no: String,
    #[serde(default)]
    pub pi_number: String,
    #[serde(default = "default_unit")]
    pub unit: Unit,
    #[serde(default, deserialize_with = "lenient_number")]
    pub invoice_qty: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rcvd_qty: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub unit_price: f64,
    #[serde(default)]
    pub appstreme_no: String,
}

fn default_unit() -> Unit {
    Unit::Yds
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            fabric_code: String::new(),
            item_description: String::new(),
            color: String::new(),
            hs_code: String::new(),
            rcvd_date: String::new(),
            challan_no: String::new(),
            pi_number: String::new(),
            unit: Unit::Yds,
            invoice_qty: 0.0,
            rcvd_qty: 0.0,
            unit_price: 0.0,
            appstreme_no: String::new(),
        }
    }
}

impl LineItem {
    /// Derived, never stored: invoice quantity times unit price.
    pub fn line_total(&self) -> f64 {
        super::totals::coerce(self.invoice_qty) * super::totals::coerce(self.unit_price)
    }
}

/// Aggregates across all line items of one report.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub total_invoice_qty: f64,
    pub total_rcvd_qty: f64,
    pub total_value: f64,
}

/// Accept a number, a numeric string, or garbage for quantity/price fields.
/// Anything that is not a finite number becomes 0.0 so computations never see
/// a missing or poisoned value.
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientVisitor;

    impl<'de> serde::de::Visitor<'de> for LenientVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a number or a numeric string")
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> std::result::Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> std::result::Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> std::result::Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> std::result::Result<f64, E> {
            Ok(v.trim().parse().unwrap_or(0.0))
        }

        fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<f64, E> {
            Ok(0.0)
        }
    }

    let value = deserializer.deserialize_any(LenientVisitor)?;
    Ok(if value.is_finite() { value } else { 0.0 })
}
