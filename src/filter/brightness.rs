use super::Filter;
use crate::color::{Rgb, scale_color};

/// Fixed global brightness scale
#[derive(Debug, Clone, Copy)]
pub(crate) struct BrightnessFilter {
    scale: u8,
}

impl BrightnessFilter {
    pub(crate) const fn new(scale: u8) -> Self {
        Self { scale }
    }
}

impl Filter for BrightnessFilter {
    fn apply(&self, frame: &mut [Rgb]) {
        if self.scale == u8::MAX {
            return;
        }
        for led in frame {
            *led = scale_color(*led, self.scale);
        }
    }
}
