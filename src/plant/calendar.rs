//! Naive calendar keys sliced out of `YYYY-MM-DD HH:MM:SS` timestamps.
//!
//! Key spaces:
//! - day key `YYYY-MM-DD` (text before the first space)
//! - month key `YYYY-MM`
//! - hour `0..=23`
//!
//! All keys are plain string slices, so lexical order equals chronological
//! order. No time zone handling is done.

/// Date portion of a timestamp: everything before the first space.
///
/// Returns `None` for an empty date portion.
pub fn day_key(timestamp: &str) -> Option<&str> {
    let date = timestamp.split(' ').next().unwrap_or_default().trim();
    (!date.is_empty()).then_some(date)
}

/// `YYYY-MM` month key: the first two `-` separated components of the date.
///
/// Returns `None` when the date portion has no non-empty year and month.
pub fn month_key(timestamp: &str) -> Option<&str> {
    let date = day_key(timestamp)?;
    let mut parts = date.splitn(3, '-');
    let year = parts.next().filter(|p| !p.is_empty())?;
    let month = parts.next().filter(|p| !p.is_empty())?;
    date.get(..year.len() + 1 + month.len())
}

/// Month number parsed from the month component of the date, `1..=12`.
pub fn month_number(timestamp: &str) -> Option<u8> {
    let key = month_key(timestamp)?;
    let (_, month) = key.split_once('-')?;
    month
        .parse::<u8>()
        .ok()
        .filter(|m| (1..=12).contains(m))
}

/// Returns `true` when the day key has the full `YYYY-MM-DD` shape
/// (three non-empty `-` separated parts).
pub fn is_full_date(day: &str) -> bool {
    let parts: Vec<&str> = day.split('-').collect();
    parts.len() >= 3 && parts.iter().take(3).all(|p| !p.is_empty())
}

/// Hour of day from the two digits after the first space, `0..=23`.
pub fn hour(timestamp: &str) -> Option<u8> {
    let (_, time) = timestamp.split_once(' ')?;
    time.trim_start()
        .get(..2)?
        .parse::<u8>()
        .ok()
        .filter(|h| *h < 24)
}

/// Returns `true` if `key` is a well-formed `YYYY-MM` month key.
pub fn is_month_key(key: &str) -> bool {
    let bytes = key.as_bytes();
    bytes.len() == 7
        && bytes[4] == b'-'
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[5..].iter().all(u8::is_ascii_digit)
        && matches!(key[5..].parse::<u8>(), Ok(1..=12))
}
