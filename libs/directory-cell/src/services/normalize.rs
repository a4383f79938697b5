//! Numeric extraction from the free-form `fees` and `experience` strings.
//!
//! The upstream feed formats these for display (`"₹ 500"`,
//! `"13 Years of experience"`). Anything that cannot be read as a number
//! sorts as 0; the raw string is still what gets displayed.

/// All digits of the fee string, concatenated. `"₹ 1,200"` reads as 1200.
/// A digit run too long for `u64` saturates, so it sorts last.
pub fn fee_amount(fees: &str) -> u64 {
    let digits: String = fees.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

/// The leading run of digits of the experience string, ignoring leading
/// whitespace.
pub fn experience_years(experience: &str) -> u32 {
    let digits: String = experience
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}
