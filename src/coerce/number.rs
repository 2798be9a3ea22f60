//! Decimal-text helpers for NUMBER coercion.
//!
//! Oracle NUMBER is a decimal format; the driver renders numeric binds as
//! decimal text and applies the vendor's fixed-point rounding rule
//! (round half away from zero) at the declared scale. Working on the text
//! keeps values wider than 64 bits intact.

/// Render a finite f64 as plain decimal text (no exponent).
///
/// Uses the shortest round-trip representation and expands any exponent
/// into positional form. Returns `None` for NaN and infinities, which
/// have no NUMBER representation.
pub(crate) fn f64_to_decimal(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let repr = format!("{value}");
    match repr.find(['e', 'E']) {
        Some(pos) => {
            let exp: i32 = repr[pos + 1..].parse().ok()?;
            Some(expand_exponent(&repr[..pos], exp))
        }
        None => Some(repr),
    }
}

fn expand_exponent(mantissa: &str, exp: i32) -> String {
    let (negative, body) = match mantissa.strip_prefix('-') {
        Some(b) => (true, b),
        None => (false, mantissa),
    };
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
    let digits = format!("{int_part}{frac_part}");
    let point = int_part.len() as i32 + exp;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if point <= 0 {
        out.push_str("0.");
        for _ in point..0 {
            out.push('0');
        }
        out.push_str(&digits);
    } else if point as usize >= digits.len() {
        out.push_str(&digits);
        for _ in digits.len()..point as usize {
            out.push('0');
        }
    } else {
        out.push_str(&digits[..point as usize]);
        out.push('.');
        out.push_str(&digits[point as usize..]);
    }
    out
}

/// Round decimal text at the given scale, half away from zero.
///
/// Positive scales keep that many fractional digits; scale 0 rounds to an
/// integer (`1.98` → `2`, `-1.98` → `-2`); negative scales round integer
/// positions (`1250` at scale -2 → `1300`). The result is normalized:
/// no leading integer zeros, no trailing fraction zeros, no `-0`.
///
/// Returns `None` for text that is not a plain signed decimal.
pub(crate) fn round_at_scale(text: &str, scale: i32) -> Option<String> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(b) => (true, b),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, f),
        None => (body, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes())
        .map(|b| b - b'0')
        .collect();
    let mut int_len = int_part.len();

    let keep = int_len as i64 + i64::from(scale);
    if keep < digits.len() as i64 {
        let keep = keep.max(0) as usize;
        let round_up = digits[keep] >= 5;
        digits.truncate(keep);
        if round_up {
            let mut carry = true;
            for d in digits.iter_mut().rev() {
                if *d == 9 {
                    *d = 0;
                } else {
                    *d += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                digits.insert(0, 1);
                int_len += 1;
            }
        }
        // The rounding position may sit left of the decimal point; pad the
        // dropped integer positions back with zeros.
        while digits.len() < int_len {
            digits.push(0);
        }
    }

    Some(assemble(negative, &digits, int_len))
}

fn assemble(negative: bool, digits: &[u8], int_len: usize) -> String {
    let split = int_len.min(digits.len());
    let (int_digits, frac_digits) = digits.split_at(split);

    let int_start = int_digits
        .iter()
        .position(|&d| d != 0)
        .unwrap_or(int_digits.len());
    let int_digits = &int_digits[int_start..];
    let frac_end = frac_digits
        .iter()
        .rposition(|&d| d != 0)
        .map_or(0, |p| p + 1);
    let frac_digits = &frac_digits[..frac_end];

    if int_digits.is_empty() && frac_digits.is_empty() {
        return "0".to_string();
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if int_digits.is_empty() {
        out.push('0');
    } else {
        out.extend(int_digits.iter().map(|&d| (b'0' + d) as char));
    }
    if !frac_digits.is_empty() {
        out.push('.');
        out.extend(frac_digits.iter().map(|&d| (b'0' + d) as char));
    }
    out
}

/// Parse decimal text as an i64 when it carries no fractional part
/// (trailing zeros after the point are tolerated).
pub(crate) fn parse_integral_i64(text: &str) -> Option<i64> {
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text, ""),
    };
    if !frac_part.is_empty() && !frac_part.bytes().all(|b| b == b'0') {
        return None;
    }
    int_part.parse().ok()
}
