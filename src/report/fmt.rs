use chrono::NaiveDate;

/// Render a quantity with the fewest digits that preserve it (100, 2.5).
pub fn format_qty(value: f64) -> String {
    format!("{}", value)
}

/// Render a money amount with two decimal places, no grouping.
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Group an integer with thousands separators for terminal display.
pub fn format_grouped_int(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut grouped: String = out.chars().rev().collect();
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

/// Two decimal places with thousands separators for terminal display.
pub fn format_grouped_amount(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let negative = whole.starts_with('-');
    let digits = if negative { &whole[1..] } else { whole };
    let grouped = format_grouped_int(digits.parse::<i64>().unwrap_or(0));

    if negative {
        format!("-{}.{}", grouped, frac)
    } else {
        format!("{}.{}", grouped, frac)
    }
}

/// Filename date segment from a `DD-Mon-YYYY` billing date: "01-Jan-2025"
/// becomes "01.01.25". Unparseable input falls back to the sentinel
/// "00.00.00" and generation carries on.
pub fn filename_date(billing_date: &str) -> String {
    match NaiveDate::parse_from_str(billing_date.trim(), "%d-%b-%Y") {
        Ok(date) => date.format("%d.%m.%y").to_string(),
        Err(_) => "00.00.00".to_string(),
    }
}

/// Base name shared by both artifacts (extension added per artifact).
pub fn report_basename(buyer_name: &str, total_value: f64, billing_date: &str) -> String {
    let name = format!(
        "Bill of Buyer {} ${} DATE-{}",
        buyer_name,
        total_value.round() as i64,
        filename_date(billing_date)
    );
    sanitize_filename(&name)
}

/// Keep artifact names filesystem-safe; anything outside the allowed set
/// becomes an underscore.
pub fn sanitize_filename(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        let ok = ch.is_ascii_alphanumeric()
            || ch == '-'
            || ch == '_'
            || ch == '.'
            || ch == ' '
            || ch == '$';
        out.push(if ok { ch } else { '_' });
    }
    let trimmed = out.trim().to_string();
    if trimmed.is_empty() {
        "report".to_string()
    } else {
        trimmed
    }
}
