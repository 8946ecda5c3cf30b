//! Time display and seek-bar math

/// Rendered in place of a time that is not a usable number
pub const TIME_PLACEHOLDER: &str = "0:00";

/// Format seconds as `m:ss`
///
/// Minutes are unpadded, seconds are zero-padded to two digits. NaN, infinite
/// and negative inputs (e.g. duration before metadata loads) render as
/// [`TIME_PLACEHOLDER`].
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return TIME_PLACEHOLDER.to_string();
    }

    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Played share of the track in percent (0-100)
///
/// Returns 0 while the duration is unknown or zero.
pub fn progress_percent(current_time: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !current_time.is_finite() {
        return 0.0;
    }
    (current_time / duration * 100.0).clamp(0.0, 100.0)
}

/// Seek-bar position (0.0-1.0) to seconds
pub fn position_from_fraction(fraction: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !fraction.is_finite() {
        return 0.0;
    }
    fraction.clamp(0.0, 1.0) * duration
}

/// Clamp a seek target to the valid range of the current track
///
/// The upper bound only applies once a finite, positive duration is known.
pub(crate) fn clamp_position(target: f64, duration: f64) -> f64 {
    let target = target.max(0.0);
    if duration.is_finite() && duration > 0.0 {
        target.min(duration)
    } else {
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(5.0), "0:05");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(600.0), "10:00");
        assert_eq!(format_time(3725.0), "62:05");
    }

    #[test]
    fn truncates_fractional_seconds() {
        assert_eq!(format_time(59.999), "0:59");
        assert_eq!(format_time(61.5), "1:01");
    }

    #[test]
    fn unusable_values_render_placeholder() {
        assert_eq!(format_time(f64::NAN), TIME_PLACEHOLDER);
        assert_eq!(format_time(f64::INFINITY), TIME_PLACEHOLDER);
        assert_eq!(format_time(-3.0), TIME_PLACEHOLDER);
        assert_ne!(format_time(f64::NAN), "NaN:NaN");
    }

    #[test]
    fn progress_guards_unknown_duration() {
        assert_eq!(progress_percent(10.0, 0.0), 0.0);
        assert_eq!(progress_percent(10.0, f64::NAN), 0.0);
        assert_eq!(progress_percent(30.0, 120.0), 25.0);
        assert_eq!(progress_percent(500.0, 120.0), 100.0);
    }

    #[test]
    fn fraction_maps_onto_duration() {
        assert_eq!(position_from_fraction(0.5, 200.0), 100.0);
        assert_eq!(position_from_fraction(2.0, 200.0), 200.0);
        assert_eq!(position_from_fraction(0.5, f64::NAN), 0.0);
    }

    #[test]
    fn clamp_respects_known_duration_only() {
        assert_eq!(clamp_position(-5.0, 100.0), 0.0);
        assert_eq!(clamp_position(150.0, 100.0), 100.0);
        assert_eq!(clamp_position(150.0, 0.0), 150.0);
        assert_eq!(clamp_position(150.0, f64::NAN), 150.0);
    }
}
