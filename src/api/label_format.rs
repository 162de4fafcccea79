//! Number formatting for legend readouts and axis labels.

/// Rounds to an integer and groups thousands with commas: `12345.6` -> `12,346`.
#[must_use]
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Legend text for an optional sample.
#[must_use]
pub fn format_count(value: Option<f64>) -> String {
    value
        .filter(|value| value.is_finite())
        .map_or_else(|| "No Data".to_owned(), format_thousands)
}

/// Axis label: thousands-grouped integer part, fraction kept as-is.
#[must_use]
pub fn format_tick_label(value: f64) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    let text = format!("{value}");
    match text.split_once('.') {
        Some((integer, fraction)) => {
            let integer: f64 = integer.parse().unwrap_or(0.0);
            let sign = if value < 0.0 && integer == 0.0 { "-" } else { "" };
            format!("{sign}{}.{fraction}", format_thousands(integer))
        }
        None => format_thousands(value),
    }
}

const SUFFIXES: [(f64, &str); 4] = [(1e12, "t"), (1e9, "b"), (1e6, "m"), (1e3, "k")];

/// Three significant digits with a `k`/`m`/`b`/`t` suffix: `12345` -> `12.3k`.
#[must_use]
pub fn format_abbreviated(value: f64) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    let rounded = round_significant(value, 3);
    let magnitude = rounded.abs();
    let (scaled, suffix) = SUFFIXES
        .iter()
        .find(|(threshold, _)| magnitude >= *threshold)
        .map_or((rounded, ""), |(threshold, suffix)| (rounded / threshold, *suffix));
    format!("{}{suffix}", three_significant(scaled))
}

/// Rounds before the suffix is picked so `999_999` reads `1m`, not `1000k`.
fn round_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 {
        return 0.0;
    }
    let shift = value.abs().log10().floor() as i32 + 1 - digits;
    if shift > 0 {
        let step = 10f64.powi(shift);
        (value / step).round() * step
    } else {
        let step = 10f64.powi(-shift);
        (value * step).round() / step
    }
}

fn three_significant(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    let integer_digits = value.abs().log10().floor() as i32 + 1;
    let decimals = (3 - integer_digits).max(0) as usize;
    let text = format!("{value:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        text
    }
}
