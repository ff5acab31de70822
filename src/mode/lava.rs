//! Lava lamp
//!
//! A few warm blobs drift up and down the strip, each on its own period.
//! Where blobs overlap their heat adds up; heat maps from a dim red through
//! orange to a pale yellow core. Positions come only from globe time.

use super::{FrameInput, Mode};
use crate::{
    color::{Hsv, Rgb, hsv2rgb},
    math8::{ease_in_out_quad, hash32, progress8, scale8},
};

const BLOBS: u64 = 3;

/// Shortest rise-and-fall cycle of a blob
const MIN_PERIOD_MS: u64 = 6_000;
/// Blob periods spread over `MIN_PERIOD_MS..MIN_PERIOD_MS + PERIOD_SPREAD_MS`
const PERIOD_SPREAD_MS: u32 = 7_000;

/// Sub-pixel resolution of blob positions
const SUBPIXEL: u32 = 256;

/// One blob at an instant, in 1/`SUBPIXEL` pixel units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Blob {
    center: u32,
    radius: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LavaMode;

impl LavaMode {
    /// Where blob `index` sits at `time_ms` on a strip of `len` pixels
    #[allow(clippy::cast_possible_truncation)]
    fn blob(index: u64, time_ms: u64, len: usize) -> Blob {
        let len = u32::try_from(len).unwrap_or(u32::MAX / SUBPIXEL);
        let seed = hash32(index);
        let period = MIN_PERIOD_MS + u64::from(seed % PERIOD_SPREAD_MS);
        let phase = progress8(time_ms.wrapping_add(u64::from(seed >> 16)) % period, period);

        // Up for the first half of the period, down for the second.
        let sweep = if phase < 128 {
            phase * 2
        } else {
            (255 - phase) * 2
        };
        let height = u32::from(ease_in_out_quad(sweep));

        let span = len.saturating_sub(1) * SUBPIXEL;
        Blob {
            center: span * height / 255,
            radius: (len * SUBPIXEL / 4).max(SUBPIXEL),
        }
    }

    /// Heat of the pixel at `position` (sub-pixel units), 0-255
    #[allow(clippy::cast_possible_truncation)]
    fn heat(blobs: &[Blob], position: u32) -> u8 {
        blobs.iter().fold(0u8, |heat, blob| {
            let distance = position.abs_diff(blob.center);
            if distance >= blob.radius {
                return heat;
            }
            let warmth = 255 - (distance * 255 / blob.radius) as u8;
            heat.saturating_add(warmth)
        })
    }

    fn glow(heat: u8) -> Rgb {
        hsv2rgb(Hsv {
            hue: scale8(heat, 40),
            sat: 255 - scale8(heat, 80),
            val: 40u8.saturating_add(scale8(heat, 215)),
        })
    }
}

impl Mode for LavaMode {
    fn render(&self, input: &FrameInput, leds: &mut [Rgb]) {
        let time_ms = input.globe_time.animation_millis();
        let mut blobs = [Blob {
            center: 0,
            radius: SUBPIXEL,
        }; BLOBS as usize];
        for (index, blob) in (0..BLOBS).zip(blobs.iter_mut()) {
            *blob = Self::blob(index, time_ms, leds.len());
        }

        for (position, led) in (0u32..).step_by(SUBPIXEL as usize).zip(leds.iter_mut()) {
            *led = Self::glow(Self::heat(&blobs, position));
        }
    }
}
