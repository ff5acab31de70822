//! Clock face
//!
//! The globe is washed in an ambient color picked from a time-of-day
//! schedule (dim teal at dawn, soft white in the evening, a faint red for
//! the night). A single hand runs around the pixels once per day: its
//! position is the time of day and its hue is the minute of the hour.

use chrono::{NaiveTime, Timelike};

use super::{FrameInput, Mode};
use crate::color::{Color, Hsv, Rgb, blend_colors, hsv2rgb};
use crate::time::GlobeTime;

const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Ambient color that applies from `at` until the next entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub at: NaiveTime,
    pub color: Color,
}

/// Built-in schedule used when the config does not provide one
pub fn default_schedule() -> Vec<ScheduleEntry> {
    [
        ((6, 45), Color::new(0x00, 0x20, 0x20).with_white(0x00)),
        ((19, 0), Color::new(0x40, 0x40, 0x40).with_white(0x40)),
        ((19, 15), Color::new(0x10, 0x00, 0x00).with_white(0x00)),
    ]
    .into_iter()
    .filter_map(|((h, m), color)| {
        NaiveTime::from_hms_opt(h, m, 0).map(|at| ScheduleEntry { at, color })
    })
    .collect()
}

#[derive(Debug, Clone)]
pub struct ClockMode {
    /// Sorted by `at`
    schedule: Vec<ScheduleEntry>,
}

impl Default for ClockMode {
    fn default() -> Self {
        Self::new(default_schedule())
    }
}

impl ClockMode {
    pub fn new(mut schedule: Vec<ScheduleEntry>) -> Self {
        schedule.sort_by_key(|entry| entry.at);
        Self { schedule }
    }

    /// Ambient color for `time`
    ///
    /// The latest entry that started at or before `time` wins; before the
    /// first entry of the day the last entry of the previous day still holds.
    pub fn ambient(&self, time: GlobeTime) -> Rgb {
        let now = time.seconds_of_day();
        self.schedule
            .iter()
            .rev()
            .find(|entry| entry.at.num_seconds_from_midnight() <= now)
            .or_else(|| self.schedule.last())
            .map_or(BLACK, |entry| entry.color.to_rgb())
    }

    /// Hand color: hue walks the color wheel once per hour
    #[allow(clippy::cast_possible_truncation)]
    fn hand(time: GlobeTime) -> Rgb {
        let hue = ((time.minute() * 256) / 60) as u8;
        hsv2rgb(Hsv {
            hue,
            sat: 255,
            val: 255,
        })
    }
}

impl Mode for ClockMode {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&self, input: &FrameInput, leds: &mut [Rgb]) {
        if leds.is_empty() {
            return;
        }
        let time = input.globe_time;
        let ambient = self.ambient(time);
        leds.fill(ambient);

        // Hand position in 16.16 pixels, spread over two neighbours.
        let len = leds.len();
        let position = u64::from(time.day_fraction_fp()) * len as u64;
        let index = (position >> 16) as usize % len;
        let next = (index + 1) % len;
        let frac = ((position >> 8) & 0xFF) as u8;

        let hand = Self::hand(time);
        if next == index {
            leds[index] = hand;
            return;
        }
        leds[index] = blend_colors(ambient, hand, 255 - frac);
        leds[next] = blend_colors(ambient, hand, frac);
    }
}
