//! Number formatting for the markdown report.

/// Abbreviate a magnitude: `1.2M`, `35.4K`, or the plain number below 1,000.
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Exact count with thousands separators: `1,234,567`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rank cell, `N/A` when the player is unranked.
pub fn format_rank(rank: Option<u64>) -> String {
    match rank {
        Some(r) if r > 0 => format!("#{}", format_thousands(r)),
        _ => "N/A".to_string(),
    }
}

/// Share of `part` in `whole` as a percentage, 0 when `whole` is 0.
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1.0K");
        assert_eq!(format_number(35_420), "35.4K");
        assert_eq!(format_number(13_034_431), "13.0M");
        assert_eq!(format_number(1_260_000), "1.3M");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_rank() {
        assert_eq!(format_rank(Some(12_345)), "#12,345");
        assert_eq!(format_rank(None), "N/A");
        assert_eq!(format_rank(Some(0)), "N/A");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 4), 25.0);
        assert_eq!(percent(3, 0), 0.0);
    }
}
