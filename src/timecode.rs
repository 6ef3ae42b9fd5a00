//! Time codec for the `H:MM:SS` / `M:SS` timestamp grammar
//!
//! Timestamps are the one human-editable wire format of a note: whatever
//! `format` writes is what the renderer recognizes and `parse` reads back.

/// Format a non-negative number of seconds as a timestamp token.
///
/// Hours are emitted (unpadded) only when non-zero or when `force_hours` is set;
/// minutes are zero-padded to two digits only when hours are present.
///
/// ```
/// use stampnote::timecode::format;
///
/// assert_eq!(format(65, false), "1:05");
/// assert_eq!(format(3725, false), "1:02:05");
/// assert_eq!(format(65, true), "0:01:05");
/// ```
pub fn format(seconds: u64, force_hours: bool) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;

    if h > 0 || force_hours {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

/// Parse a timestamp token back into seconds.
///
/// Three parts read as `h:m:s`, two parts as `m:s`. Any other shape, and any
/// part that is not a plain number, yields `0`: tokens come out of free-form
/// text and a malformed one is never an error.
pub fn parse(text: &str) -> u64 {
    let parts: Option<Vec<u64>> = text.split(':').map(parse_part).collect();
    let Some(parts) = parts else {
        return 0;
    };

    match parts.as_slice() {
        [h, m, s] => h
            .saturating_mul(3600)
            .saturating_add(m.saturating_mul(60))
            .saturating_add(*s),
        [m, s] => m.saturating_mul(60).saturating_add(*s),
        _ => 0,
    }
}

/// Shift a timestamp token by `delta` seconds, clamping at zero.
///
/// The result is re-formatted in canonical form, so `"1:00:00"` shifted by
/// `-1` becomes `"59:59"`.
pub fn shift(text: &str, delta: i64) -> String {
    let seconds = parse(text);
    let shifted = if delta.is_negative() {
        seconds.saturating_sub(delta.unsigned_abs())
    } else {
        seconds.saturating_add(delta as u64)
    };
    format(shifted, false)
}

fn parse_part(part: &str) -> Option<u64> {
    let part = part.trim();
    if part.is_empty() {
        return Some(0);
    }
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Overlong digit runs saturate instead of failing
    Some(part.parse().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_minutes_only() {
        assert_eq!(format(0, false), "0:00");
        assert_eq!(format(5, false), "0:05");
        assert_eq!(format(65, false), "1:05");
        assert_eq!(format(3599, false), "59:59");
    }

    #[test]
    fn test_format_with_hours() {
        assert_eq!(format(3600, false), "1:00:00");
        assert_eq!(format(3725, false), "1:02:05");
        assert_eq!(format(36000 + 61, false), "10:01:01");
    }

    #[test]
    fn test_format_force_hours() {
        assert_eq!(format(0, true), "0:00:00");
        assert_eq!(format(125, true), "0:02:05");
    }

    #[test]
    fn test_parse_shapes() {
        assert_eq!(parse("1:05"), 65);
        assert_eq!(parse("1:02:05"), 3725);
        assert_eq!(parse("0:00"), 0);
        assert_eq!(parse("90:00"), 5400);
    }

    #[test]
    fn test_parse_malformed_is_zero() {
        assert_eq!(parse(""), 0);
        assert_eq!(parse("42"), 0);
        assert_eq!(parse("1:2:3:4"), 0);
        assert_eq!(parse("a:05"), 0);
        assert_eq!(parse("1:-5"), 0);
    }

    #[test]
    fn test_parse_empty_part_counts_as_zero() {
        assert_eq!(parse(":30"), 30);
        assert_eq!(parse("2:"), 120);
    }

    #[test]
    fn test_round_trip_below_one_hour() {
        for s in 0..3600 {
            assert_eq!(parse(&format(s, false)), s, "round trip failed for {}", s);
        }
    }

    #[test]
    fn test_round_trip_forced_hours() {
        for s in (3600..200_000).step_by(7) {
            assert_eq!(parse(&format(s, true)), s, "round trip failed for {}", s);
        }
    }

    #[test]
    fn test_shift_clamps_at_zero() {
        assert_eq!(shift("0:00", -1), "0:00");
        assert_eq!(shift("0:01", -5), "0:00");
        assert_eq!(shift("1:05", 2), "1:07");
        assert_eq!(shift("59:59", 1), "1:00:00");
        assert_eq!(shift("1:00:00", -1), "59:59");
    }
}
