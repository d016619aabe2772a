/// Reduce a phone number to its canonical digit string.
///
/// Every non-digit is dropped. A 12-digit number carrying the `91` country
/// code and an 11-digit number carrying the `0` trunk prefix both collapse to
/// the 10 national digits, so `+91 98765 43210`, `098765-43210` and
/// `9876543210` compare equal. Returns `None` when no digits remain.
#[must_use]
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    let national = match digits.len() {
        12 if digits.starts_with("91") => &digits[2..],
        11 if digits.starts_with('0') => &digits[1..],
        _ => digits.as_str(),
    };
    Some(national.to_string())
}
