/// Formats `value` with `decimals` fraction digits, rounding ties away from
/// zero on the shortest decimal form of the value (so `0.125` becomes
/// `0.13` and `22.5` with no decimals becomes `23`).
pub fn fixed_half_up(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let shortest = value.abs().to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    let mut digits: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).collect();
    let keep = int_part.len() + decimals;
    if digits.len() <= keep {
        digits.resize(keep + 1, b'0');
    }
    let round_up = digits[keep] >= b'5';
    digits.truncate(keep);

    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - decimals;
    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|d| *d as char));
    if decimals > 0 {
        out.push('.');
        out.extend(digits[split..].iter().map(|d| *d as char));
    }
    out
}

/// Two-decimal money amount.
pub fn money(value: f64) -> String {
    fixed_half_up(value, 2)
}
