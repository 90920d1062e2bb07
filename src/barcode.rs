use crate::error::{LabelError, Result};

/// EAN-13 from a product UPC: non-digits are dropped, 12 digits get a
/// check digit, 13 digits are validated. UPC-A (12 digits incl. check) is
/// not distinguished from an EAN-13 body; pass it zero-padded if needed.
pub fn normalize_ean13(code: &str) -> Result<String> {
    let mut digits: String = code.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        12 => {
            let check = ean13_check_digit(&digits);
            digits.push(char::from(b'0' + check));
            Ok(digits)
        }
        13 => {
            let expected = ean13_check_digit(&digits[..12]);
            if digits.as_bytes()[12] - b'0' == expected {
                Ok(digits)
            } else {
                Err(LabelError::InvalidBarcode { code: code.to_string(), reason: "bad check digit" })
            }
        }
        _ => Err(LabelError::InvalidBarcode {
            code: code.to_string(),
            reason: "needs 12 or 13 digits",
        }),
    }
}

/// `digits` must be 12 ASCII digits.
fn ean13_check_digit(digits: &str) -> u8 {
    let sum: u32 = digits
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let d = (b - b'0') as u32;
            if i % 2 == 0 { d } else { d * 3 }
        })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Left edge that centers a 95-module EAN-13 inside `width` dots.
pub fn center_x_for_ean13(width: u32, narrow: u32) -> u32 {
    width.saturating_sub(95 * narrow) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_check_digit() {
        assert_eq!(normalize_ean13("750123456789").unwrap(), "7501234567893");
        assert_eq!(normalize_ean13("4006381333931").unwrap(), "4006381333931");
    }

    #[test]
    fn strips_separators() {
        assert_eq!(normalize_ean13("7 501234 56789").unwrap(), "7501234567893");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            normalize_ean13("4006381333932"),
            Err(LabelError::InvalidBarcode { reason: "bad check digit", .. })
        ));
        assert!(normalize_ean13("12345").is_err());
        assert!(normalize_ean13("").is_err());
    }

    #[test]
    fn centers_in_label() {
        assert_eq!(center_x_for_ean13(406, 2), 108);
        assert_eq!(center_x_for_ean13(100, 2), 0);
    }
}
