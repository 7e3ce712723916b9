//! Total parsers for the catalog's free-text numeric fields.
//!
//! OMDb reports runtimes as "142 min" and ratings as "8.3", with "N/A"
//! standing in for anything unknown. Both parsers fall back to 0 instead
//! of failing so a watched entry can always be built.

/// Minutes from the leading numeric token of a raw runtime string.
///
/// "142 min" -> 142, "N/A" -> 0, "" -> 0.
pub fn runtime_minutes(raw: &str) -> u32 {
    raw.trim()
        .split_whitespace()
        .next()
        .and_then(|token| token.parse().ok())
        .unwrap_or(0)
}

/// External rating as a float; 0.0 when absent or unparsable.
pub fn parse_rating(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_takes_leading_token() {
        assert_eq!(runtime_minutes("142 min"), 142);
        assert_eq!(runtime_minutes("90 min"), 90);
        assert_eq!(runtime_minutes("  55 min "), 55);
    }

    #[test]
    fn runtime_falls_back_to_zero() {
        assert_eq!(runtime_minutes("N/A"), 0);
        assert_eq!(runtime_minutes(""), 0);
        assert_eq!(runtime_minutes("min 90"), 0);
    }

    #[test]
    fn rating_parses_or_zeroes() {
        assert_eq!(parse_rating("8.3"), 8.3);
        assert_eq!(parse_rating("10"), 10.0);
        assert_eq!(parse_rating("N/A"), 0.0);
        assert_eq!(parse_rating(""), 0.0);
    }
}
