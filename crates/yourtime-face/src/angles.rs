//! Hand angles and the digital label, derived from a [`ClockTime`].
//!
//! Angles are clockwise from 12 o'clock. Every function here is pure and
//! recomputed on each render.

use crate::time::ClockTime;

/// Clockwise angle in degrees, 0 at 12 o'clock.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd)]
pub struct Angle(f32);

impl Angle {
    #[inline]
    pub const fn from_degrees(degrees: f32) -> Self {
        Self(degrees)
    }

    #[inline]
    pub const fn degrees(self) -> f32 {
        self.0
    }

    #[inline]
    pub fn radians(self) -> f32 {
        self.0.to_radians()
    }
}

/// `second * 6`.
pub fn seconds_angle(t: ClockTime) -> Angle {
    Angle(t.second() as f32 * 6.0)
}

/// `minute * 6`. Does not sweep with the seconds.
pub fn minutes_angle(t: ClockTime) -> Angle {
    Angle(t.minute() as f32 * 6.0)
}

/// `(hour mod 12) * 30 + minute * 0.5`.
pub fn hours_angle(t: ClockTime) -> Angle {
    Angle((t.hour() % 12) as f32 * 30.0 + t.minute() as f32 * 0.5)
}

/// Zero-padded 24-hour `HH:MM:SS`.
pub fn digital_string(t: ClockTime) -> String {
    t.format("%H:%M:%S")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32, s: u32) -> ClockTime {
        ClockTime::from_hms(h, m, s).unwrap()
    }

    fn all(t: ClockTime) -> (f32, f32, f32) {
        (
            hours_angle(t).degrees(),
            minutes_angle(t).degrees(),
            seconds_angle(t).degrees(),
        )
    }

    #[test]
    fn midnight_is_all_zero() {
        assert_eq!(all(t(0, 0, 0)), (0.0, 0.0, 0.0));
        assert_eq!(digital_string(t(0, 0, 0)), "00:00:00");
    }

    #[test]
    fn last_second_of_the_day() {
        assert_eq!(all(t(23, 59, 59)), (359.5, 354.0, 354.0));
        assert_eq!(digital_string(t(23, 59, 59)), "23:59:59");
    }

    #[test]
    fn half_past_three() {
        assert_eq!(all(t(3, 30, 0)), (105.0, 180.0, 0.0));
        assert_eq!(digital_string(t(3, 30, 0)), "03:30:00");
    }

    #[test]
    fn noon_wraps_hour_hand() {
        assert_eq!(hours_angle(t(12, 0, 0)).degrees(), 0.0);
        assert_eq!(digital_string(t(12, 0, 0)), "12:00:00");
        assert_eq!(hours_angle(t(15, 0, 0)), hours_angle(t(3, 0, 0)));
    }

    #[test]
    fn angles_stay_in_range_for_every_second() {
        for secs in 0..86_400 {
            let time = t(0, 0, 0).plus_seconds(secs);
            let (h, m, s) = all(time);
            for a in [h, m, s] {
                assert!((0.0..360.0).contains(&a), "{a} at {time:?}");
            }
        }
    }

    #[test]
    fn seconds_angle_is_repeatable() {
        let time = t(8, 41, 17);
        assert_eq!(seconds_angle(time), seconds_angle(time));
    }

    #[test]
    fn seconds_step_by_six_within_a_minute() {
        let base = t(10, 7, 0);
        for k in 0..60 {
            let expected = seconds_angle(base).degrees() + 6.0 * k as f32;
            assert_eq!(seconds_angle(base.plus_seconds(k)).degrees(), expected);
        }
    }

    #[test]
    fn minute_hand_ignores_seconds() {
        assert_eq!(minutes_angle(t(4, 20, 0)), minutes_angle(t(4, 20, 59)));
    }

    #[test]
    fn radians_match_degrees() {
        let a = Angle::from_degrees(180.0);
        assert!((a.radians() - std::f32::consts::PI).abs() < 1e-6);
    }
}
