//! Duration formatting for display

/// Format seconds as `HH:MM:SS`. Hours are zero-padded to two digits but
/// never truncated, so long totals render as e.g. `123:04:05`.
pub fn format_hms(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::format_hms;

    #[test]
    fn pads_each_component() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(59), "00:00:59");
        assert_eq!(format_hms(61), "00:01:01");
        assert_eq!(format_hms(3600), "01:00:00");
        assert_eq!(format_hms(3 * 3600 + 25 * 60 + 7), "03:25:07");
    }

    #[test]
    fn hours_are_unbounded() {
        assert_eq!(format_hms(100 * 3600), "100:00:00");
        assert_eq!(format_hms(123 * 3600 + 4 * 60 + 5), "123:04:05");
    }
}
