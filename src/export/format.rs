use rust_decimal::{Decimal, RoundingStrategy};

/// Maximum fraction digits shown for an amount
const MAX_FRACTION_DIGITS: u32 = 3;

/// Format an amount with en-US digit grouping: `12500.5` -> `12,500.5`
///
/// At most three fraction digits are kept (half away from zero) and trailing
/// zeros are dropped.
pub fn format_grouped(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format an amount as dollars: `$12,500`
pub fn format_currency(amount: Decimal) -> String {
    let grouped = format_grouped(amount);
    match grouped.strip_prefix('-') {
        Some(magnitude) => format!("-${}", magnitude),
        None => format!("${}", grouped),
    }
}
