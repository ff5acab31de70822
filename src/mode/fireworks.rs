//! Fireworks
//!
//! Time is cut into fixed slots per burst lane. Each (slot, lane) pair
//! hashes to a launch pixel and a hue; the burst expands around the globe
//! and fades out before the slot ends. Lanes are staggered so a new burst
//! starts every `SLOT_MS / LANES` milliseconds.

use super::{FrameInput, Mode};
use crate::{
    color::{Hsv, Rgb, add_colors, hsv2rgb, scale_color},
    math8::{ease_in_out_quad, hash32, progress8},
};

const SLOT_MS: u64 = 1_800;
const LANES: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Burst {
    center: usize,
    hue: u8,
    /// 0 at launch, 255 when the slot ends
    progress: u8,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FireworksMode;

impl FireworksMode {
    #[allow(clippy::cast_possible_truncation)]
    fn burst(time_ms: u64, lane: u64, len: usize) -> Burst {
        let shifted = time_ms.wrapping_add(lane * SLOT_MS / LANES);
        let slot = shifted / SLOT_MS;
        let seed = hash32(slot.wrapping_mul(LANES).wrapping_add(lane));

        Burst {
            center: seed as usize % len,
            hue: (seed >> 8) as u8,
            progress: progress8(shifted % SLOT_MS, SLOT_MS),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn draw(burst: Burst, leds: &mut [Rgb]) {
        let len = leds.len();
        let max_radius = (len / 4).max(1);
        let radius = usize::from(burst.progress) * max_radius / 255;
        let spark = hsv2rgb(Hsv {
            hue: burst.hue,
            sat: 240,
            val: 255 - ease_in_out_quad(burst.progress),
        });

        for distance in 0..=radius {
            let falloff = 255 - (distance * 255 / (radius + 1)) as u8;
            let color = scale_color(spark, falloff);

            let ahead = (burst.center + distance) % len;
            leds[ahead] = add_colors(leds[ahead], color);
            if distance != 0 {
                let behind = (burst.center + len - distance % len) % len;
                leds[behind] = add_colors(leds[behind], color);
            }
        }
    }
}

impl Mode for FireworksMode {
    fn render(&self, input: &FrameInput, leds: &mut [Rgb]) {
        leds.fill(Rgb::default());
        if leds.is_empty() {
            return;
        }

        let time_ms = input.globe_time.animation_millis();
        for lane in 0..LANES {
            Self::draw(Self::burst(time_ms, lane, leds.len()), leds);
        }
    }
}
