//! Pembersih nilai mentah menjadi teks tampilan.

use crate::record::FieldValue;

/// Penanda tampilan untuk nilai yang belum dicatat.
pub const MISSING: &str = "---";

/// Urai awalan numerik dari teks, mengabaikan sisa karakter di belakangnya.
///
/// `"36.5 C"` menjadi `36.5`, `"12abc"` menjadi `12`, sedangkan `"abc"`,
/// `"-"` dan `""` menghasilkan `None`.
pub fn parse_float(input: &str) -> Option<f64> {
    let text = input.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if text[end..].starts_with("Infinity") {
        return Some(if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok()
}

/// Ubah nilai mentah menjadi teks tampilan yang aman.
///
/// Nilai kosong menjadi [`MISSING`]. Angka dibulatkan ke bawah menuju nol,
/// atau diformat satu desimal jika `is_decimal`. Teks non-angka dikembalikan
/// apa adanya setelah dipangkas.
pub fn clean_number_string(value: Option<&FieldValue>, is_decimal: bool) -> String {
    let Some(value) = value else {
        return MISSING.to_string();
    };

    let text = value.to_string();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return MISSING.to_string();
    }

    match parse_float(trimmed) {
        Some(number) if number.is_finite() => {
            if is_decimal {
                format_one_decimal(number)
            } else {
                let truncated = number.trunc();
                if truncated == 0.0 {
                    "0".to_string()
                } else {
                    format!("{truncated:.0}")
                }
            }
        }
        _ => trimmed.to_string(),
    }
}

/// Satu desimal dengan pembulatan setengah menjauhi nol: `36.25` menjadi
/// `"36.3"`, bukan `"36.2"` seperti `{:.1}`.
pub fn format_one_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.is_finite() {
        format!("{rounded:.1}")
    } else {
        format!("{value:.1}")
    }
}

/// Ambil `HH:MM` dari `"YYYY-MM-DD HH:MM:SS"`.
pub fn extract_time(date_time: Option<&str>) -> String {
    let Some(date_time) = date_time.filter(|text| !text.is_empty()) else {
        return MISSING.to_string();
    };

    match date_time.split(' ').nth(1).filter(|part| !part.is_empty()) {
        Some(time) => time.split(':').take(2).collect::<Vec<_>>().join(":"),
        None => MISSING.to_string(),
    }
}
