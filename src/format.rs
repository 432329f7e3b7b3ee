use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

// ---------------------------------------------------------------------------
// Display formatting for amounts
// ---------------------------------------------------------------------------

fn whole_units(prefix: &str, sep: char) -> Formatter {
    Formatter::currency(prefix)
        .and_then(|f| f.separator(sep))
        .map(|f| f.precision(Precision::Decimals(0)))
        .unwrap_or_else(|_| Formatter::new().precision(Precision::Decimals(0)))
}

/// Round to whole units and group thousands. numfmt renders zero as a bare
/// `"0"`, so zero and non-finite values are spelled out here.
fn format_whole(
    value: f64,
    positive: &Formatter,
    negative: &Formatter,
    zero: &str,
) -> String {
    let rounded = value.round();
    if !rounded.is_finite() {
        value.to_string()
    } else if rounded < 0.0 {
        negative.fmt_string(rounded.abs())
    } else if rounded > 0.0 {
        positive.fmt_string(rounded)
    } else {
        zero.to_owned()
    }
}

/// `1234567.4` → `"Rp 1.234.567"`, as in the detail table.
pub fn format_rupiah(value: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();
    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive = POSITIVE_FMT.get_or_init(|| whole_units("Rp ", '.'));
    let negative = NEGATIVE_FMT.get_or_init(|| whole_units("Rp -", '.'));
    format_whole(value, positive, negative, "Rp 0")
}

/// `1234567.4` → `"1,234,567"`, as in the KPI delta.
pub fn format_grouped(value: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();
    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive = POSITIVE_FMT.get_or_init(|| whole_units("", ','));
    let negative = NEGATIVE_FMT.get_or_init(|| whole_units("-", ','));
    format_whole(value, positive, negative, "0")
}
