//! Output filters applied to every frame after the mode has drawn it.

use crate::color::Rgb;

mod brightness;
mod gamma;

pub(crate) trait Filter {
    /// Apply the filter to a frame
    fn apply(&self, frame: &mut [Rgb]);
}

pub(crate) use brightness::BrightnessFilter;
pub use gamma::GAMMA_LUT;
pub(crate) use gamma::GammaFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterProcessorConfig {
    /// Global brightness scale (0-255 = 0.0-1.0)
    pub brightness: u8,
    /// Apply gamma 2.0 correction before output
    pub gamma: bool,
}

impl Default for FilterProcessorConfig {
    fn default() -> Self {
        Self {
            brightness: 255,
            gamma: true,
        }
    }
}

/// Filter processor - applies post-processing to frames
///
/// Gamma runs before brightness so the scale acts on perceived light.
#[derive(Debug, Clone)]
pub(crate) struct FilterProcessor {
    gamma: Option<GammaFilter>,
    brightness: BrightnessFilter,
}

impl FilterProcessor {
    pub(crate) const fn new(config: &FilterProcessorConfig) -> Self {
        Self {
            gamma: if config.gamma { Some(GammaFilter) } else { None },
            brightness: BrightnessFilter::new(config.brightness),
        }
    }

    pub(crate) fn apply(&self, frame: &mut [Rgb]) {
        if let Some(gamma) = &self.gamma {
            gamma.apply(frame);
        }
        self.brightness.apply(frame);
    }
}
