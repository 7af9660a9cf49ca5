//! Elapsed-time formatting helpers
//!
//! Pure functions producing the fixed-width timer strings shown next to
//! a recording or playback position.

/// Format one timer field: last two decimal digits, zero-padded.
fn pad(value: u64) -> String {
    format!("{:02}", value % 100)
}

/// Format elapsed seconds as `MM:SS`.
///
/// Minutes are reduced modulo 60, so inputs of an hour or more fold
/// into the minute field and the hour component is lost:
/// `mmss(3661)` is `"01:01"`.
pub fn mmss(total_seconds: u64) -> String {
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;
    format!("{}:{}", pad(minutes), pad(seconds))
}

/// Format elapsed milliseconds as `MM:SS:CC`, where `CC` is hundredths
/// of a second.
///
/// Unlike [`mmss`], minutes are not reduced modulo 60 first; the
/// two-digit pad keeps their last two decimal digits, so the string
/// stays fixed-width for any input.
pub fn mmssss(total_millis: u64) -> String {
    let total_seconds = total_millis / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    let hundredths = (total_millis % 1000) / 10;
    format!("{}:{}:{}", pad(minutes), pad(seconds), pad(hundredths))
}
