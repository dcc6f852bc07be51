//! Remaining-time readout for the countdown ring.
//!
//! The ring displays its remaining time as a two-field `MM:SS` clock. There is
//! no hours field: a remaining time of an hour or more drops whole hours from
//! the minutes, while the seconds field is always taken from the full value.
//!
//! ```rust
//! use ring_timer::format::time_string;
//!
//! assert_eq!(time_string(30_000), "00:30");
//! assert_eq!(time_string(65_000), "01:05");
//! ```

const SECOND_IN_MILLIS: u64 = 1_000;
const MINUTE_IN_MILLIS: u64 = 60 * SECOND_IN_MILLIS;
const HOUR_IN_MILLIS: u64 = 60 * MINUTE_IN_MILLIS;

/// Formats a remaining duration in milliseconds as a zero-padded `MM:SS` string.
///
/// Minutes come from the remainder within the current hour, so whole hours are
/// not shown. Seconds are computed from the whole `remaining_millis` value.
///
/// # Arguments
///
/// * `remaining_millis` - Time left on the countdown, in milliseconds
///
/// # Examples
///
/// ```rust
/// use ring_timer::format::time_string;
///
/// assert_eq!(time_string(0), "00:00");
/// assert_eq!(time_string(5_000), "00:05");
/// assert_eq!(time_string(999), "00:00");
/// ```
pub fn time_string(remaining_millis: u64) -> String {
    let within_hour = remaining_millis % HOUR_IN_MILLIS;
    let minutes = within_hour / MINUTE_IN_MILLIS;
    let seconds = (remaining_millis / SECOND_IN_MILLIS) % 60;

    format!("{:02}:{:02}", minutes, seconds)
}
