/// Format a value as USD, e.g. `$1,234.56`
///
/// Non-finite values render as `$0.00`.
pub fn usd(value: f64) -> String {
    if !value.is_finite() {
        return "$0.00".to_string();
    }

    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };

    format!("{}${}.{:02}", sign, whole, cents % 100)
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        groups.push(n % 1000);
        n /= 1000;
        if n == 0 {
            break;
        }
    }

    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    while let Some(g) = groups.pop() {
        out.push_str(&format!(",{:03}", g));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_groups_thousands() {
        assert_eq!(usd(1234.5), "$1,234.50");
        assert_eq!(usd(1_000_000.0), "$1,000,000.00");
        assert_eq!(usd(999.999), "$1,000.00");
    }

    #[test]
    fn test_usd_small_and_negative() {
        assert_eq!(usd(0.0), "$0.00");
        assert_eq!(usd(0.5), "$0.50");
        assert_eq!(usd(-5.0), "-$5.00");
        assert_eq!(usd(-0.001), "$0.00");
    }

    #[test]
    fn test_usd_non_finite() {
        assert_eq!(usd(f64::NAN), "$0.00");
        assert_eq!(usd(f64::INFINITY), "$0.00");
    }
}
