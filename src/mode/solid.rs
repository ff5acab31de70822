//! Solid color fill
//!
//! Fills all LEDs with the selected color, white channel mixed in.

use super::{FrameInput, Mode};
use crate::color::Rgb;

#[derive(Debug, Clone, Copy, Default)]
pub struct SolidMode;

impl Mode for SolidMode {
    fn render(&self, input: &FrameInput, leds: &mut [Rgb]) {
        leds.fill(input.color.to_rgb());
    }
}
