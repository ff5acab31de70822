//! Globe time: local wall-clock time shifted by the user's offset.

use chrono::{NaiveDateTime, TimeDelta, Timelike};

const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Wall-clock time plus the stored offset, as seen by the mode algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlobeTime(NaiveDateTime);

impl GlobeTime {
    /// Shift `wall` by `offset_secs`
    ///
    /// An offset that would leave chrono's representable range pins the
    /// result to the nearest representable instant.
    pub fn from_wall(wall: NaiveDateTime, offset_secs: i64) -> Self {
        let shifted = TimeDelta::try_seconds(offset_secs)
            .and_then(|delta| wall.checked_add_signed(delta))
            .unwrap_or(if offset_secs < 0 {
                NaiveDateTime::MIN
            } else {
                NaiveDateTime::MAX
            });
        Self(shifted)
    }

    pub const fn naive(self) -> NaiveDateTime {
        self.0
    }

    /// Seconds since local midnight (0-86399)
    pub fn seconds_of_day(self) -> u32 {
        self.0.num_seconds_from_midnight()
    }

    /// Milliseconds since local midnight (0-86_399_999)
    pub fn millis_of_day(self) -> u32 {
        let millis = (self.0.nanosecond() / 1_000_000).min(999);
        self.seconds_of_day() * 1000 + millis
    }

    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    /// Milliseconds on a continuous timeline, for animations
    ///
    /// Instants before the Unix epoch clamp to zero.
    pub fn animation_millis(self) -> u64 {
        u64::try_from(self.0.and_utc().timestamp_millis()).unwrap_or(0)
    }

    /// Fraction of the day elapsed, as 16.16 fixed point of a full turn
    pub fn day_fraction_fp(self) -> u32 {
        let millis = u64::from(self.millis_of_day());
        let day_ms = u64::from(SECONDS_PER_DAY) * 1000;
        #[allow(clippy::cast_possible_truncation)]
        {
            ((millis << 16) / day_ms) as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn offset_is_added_to_wall_time() {
        let time = GlobeTime::from_wall(at(6, 0, 0), 120);
        assert_eq!(time.naive(), at(6, 2, 0));

        let time = GlobeTime::from_wall(at(0, 0, 30), -60);
        assert_eq!(time.seconds_of_day(), SECONDS_PER_DAY - 30);
    }

    #[test]
    fn huge_offsets_clamp() {
        let time = GlobeTime::from_wall(at(12, 0, 0), i64::MAX);
        assert_eq!(time.naive(), NaiveDateTime::MAX);
        let time = GlobeTime::from_wall(at(12, 0, 0), i64::MIN);
        assert_eq!(time.naive(), NaiveDateTime::MIN);
        assert_eq!(time.animation_millis(), 0);
    }

    #[test]
    fn day_fraction_covers_a_full_turn() {
        assert_eq!(GlobeTime::from_wall(at(0, 0, 0), 0).day_fraction_fp(), 0);
        assert_eq!(GlobeTime::from_wall(at(12, 0, 0), 0).day_fraction_fp(), 1 << 15);
        assert!(GlobeTime::from_wall(at(23, 59, 59), 0).day_fraction_fp() < 1 << 16);
    }
}
