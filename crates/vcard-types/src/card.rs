use crate::models::CardData;

/// 32-bit signed polynomial hash (`h = h*31 + unit` over UTF-16 code units,
/// wrapped each step), widened before the absolute value so `i32::MIN`
/// cannot overflow. A cosmetic ID generator, not a security boundary: no
/// collision resistance, never used for authentication.
fn hash(input: &str) -> i64 {
    let mut h: i32 = 0;
    for unit in input.encode_utf16() {
        h = (((h as i64) << 5) - (h as i64) + (unit as i64)) as i32;
    }
    (h as i64).abs()
}

/// Synthesize card data for a username. Pure: for a fixed input the output
/// is byte-identical on every invocation, in every process.
pub fn card_for(username: &str) -> CardData {
    let h = hash(username);
    let last4 = (h % 9000) + 1000;
    let month = (h / 10) % 12 + 1;
    let year = 27 + (h % 5);
    CardData {
        pan: format!("4532 9901 2234 {last4}"),
        exp: format!("{month:02}/{year:02}"),
        cvv: ((h % 900) + 100).to_string(),
        last4: last4.to_string(),
    }
}
