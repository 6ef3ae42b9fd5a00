//! Shadow-ban pattern detection for formatted timestamps
//!
//! Some timestamp shapes are heuristically associated with comment moderation
//! (a comment containing them tends to disappear silently). Detection only
//! drives highlighting and a warning banner; it never blocks saving.

/// Literal prefix flagged regardless of the remaining digits
const BANNED_PREFIX: &str = "1:10:";

/// Check whether a formatted timestamp matches a shadow-ban pattern.
///
/// Flags anything starting with `1:10:`, and any `m:s` / `h:m:s` token whose
/// minute part ends in `1` with seconds equal to `10` (`1:10`, `11:10`, `2:01:10`).
pub fn is_banned(formatted: &str) -> bool {
    if formatted.starts_with(BANNED_PREFIX) {
        return true;
    }

    let parts: Vec<&str> = formatted.split(':').collect();
    let (m, s) = match parts.as_slice() {
        [_, m, s] | [m, s] => (*m, *s),
        _ => return false,
    };

    match (numeric(m), numeric(s)) {
        (Some(m), Some(s)) => m % 10 == 1 && s == 10,
        _ => false,
    }
}

fn numeric(part: &str) -> Option<u64> {
    let part = part.trim();
    if part.is_empty() {
        return Some(0);
    }
    part.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_rule() {
        assert!(is_banned("1:10:05"));
        assert!(is_banned("1:10:59"));
        assert!(!is_banned("1:11:05"));
    }

    #[test]
    fn test_minute_second_rule() {
        assert!(is_banned("2:01:10"));
        assert!(is_banned("1:10"));
        assert!(is_banned("11:10"));
        assert!(is_banned("21:10"));
        assert!(!is_banned("3:15"));
        assert!(!is_banned("12:20"));
        assert!(!is_banned("12:10"));
        assert!(!is_banned("1:11"));
    }

    #[test]
    fn test_other_shapes_are_not_banned() {
        assert!(!is_banned(""));
        assert!(!is_banned("110"));
        assert!(!is_banned("1:1:10:10"));
        assert!(!is_banned("x1:10"));
    }
}
