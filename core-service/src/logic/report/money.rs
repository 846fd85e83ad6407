//! Number formatting for reports: en-US dollars and fixed decimals

/// Format whole dollars as `$12,345.00`
pub fn format_usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("${}.00", grouped)
}

/// Fixed-decimal rendering with ties rounded away from zero.
///
/// `format!("{:.N}")` resolves exact binary ties to even (`12.125` -> `12.12`);
/// reports round them up (`12.13`). Non-tie values format identically.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if value.is_sign_negative() && value != 0.0 {
        return format!("-{}", to_fixed(-value, decimals));
    }

    let scale = (0..decimals).fold(1.0_f64, |acc, _| acc * 10.0);
    let scaled = value * scale;
    let floor = scaled.floor();

    // Exact tie only when value * scale is exactly k + 0.5 (fma: single rounding)
    if scaled - floor == 0.5 && value.mul_add(scale, -scaled) == 0.0 {
        return format!("{:.*}", decimals, (floor + 1.0) / scale);
    }

    format!("{:.*}", decimals, value)
}
