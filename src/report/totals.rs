use super::model::{LineItem, Totals};

/// Map non-finite quantities to zero so a poisoned field never reaches a sum.
pub(crate) fn coerce(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Fold line items into report totals.
///
/// Pure and order-independent; both export paths and the terminal preview go
/// through here so the printed totals always agree with the live ones.
pub fn compute_totals(items: &[LineItem]) -> Totals {
    items.iter().fold(Totals::default(), |acc, item| {
        let invoice_qty = coerce(item.invoice_qty);
        let rcvd_qty = coerce(item.rcvd_qty);
        let unit_price = coerce(item.unit_price);
        Totals {
            total_invoice_qty: acc.total_invoice_qty + invoice_qty,
            total_rcvd_qty: acc.total_rcvd_qty + rcvd_qty,
            total_value: acc.total_value + invoice_qty * unit_price,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(invoice_qty: f64, rcvd_qty: f64, unit_price: f64) -> LineItem {
        LineItem {
            invoice_qty,
            rcvd_qty,
            unit_price,
            ..LineItem::default()
        }
    }

    #[test]
    fn empty_input_yields_all_zero() {
        assert_eq!(compute_totals(&[]), Totals::default());
    }

    #[test]
    fn sums_match_line_totals() {
        let items = [item(100.0, 90.0, 2.5), item(40.0, 40.0, 1.25), item(0.0, 3.0, 9.99)];
        let totals = compute_totals(&items);
        assert_eq!(totals.total_invoice_qty, 140.0);
        assert_eq!(totals.total_rcvd_qty, 133.0);
        let expected: f64 = items.iter().map(|i| i.line_total()).sum();
        assert_eq!(totals.total_value, expected);
        assert_eq!(totals.total_value, 300.0);
    }

    #[test]
    fn order_independent() {
        let a = [item(1.0, 2.0, 3.0), item(4.0, 5.0, 6.0)];
        let b = [item(4.0, 5.0, 6.0), item(1.0, 2.0, 3.0)];
        assert_eq!(compute_totals(&a), compute_totals(&b));
    }

    #[test]
    fn non_finite_fields_count_as_zero() {
        let items = [item(f64::NAN, f64::INFINITY, 2.0), item(10.0, 9.0, f64::NAN)];
        let totals = compute_totals(&items);
        assert_eq!(totals.total_invoice_qty, 10.0);
        assert_eq!(totals.total_rcvd_qty, 9.0);
        assert_eq!(totals.total_value, 0.0);
    }

    #[test]
    fn single_item_scenario() {
        let totals = compute_totals(&[item(100.0, 90.0, 2.5)]);
        assert_eq!(totals.total_invoice_qty, 100.0);
        assert_eq!(totals.total_rcvd_qty, 90.0);
        assert_eq!(totals.total_value, 250.0);
    }
}
