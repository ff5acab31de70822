use super::Filter;
use crate::color::Rgb;

/// Gamma 2.0 lookup table: `round(255 * (i / 255)^2)`
pub const GAMMA_LUT: [u8; 256] = gamma_lut();

#[allow(clippy::cast_possible_truncation)]
const fn gamma_lut() -> [u8; 256] {
    let mut lut = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        // i^2 / 255, rounded half up
        lut[i] = ((i * i * 2 + 255) / 510) as u8;
        i += 1;
    }
    lut
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct GammaFilter;

impl Filter for GammaFilter {
    fn apply(&self, frame: &mut [Rgb]) {
        for led in frame {
            *led = Rgb {
                r: GAMMA_LUT[usize::from(led.r)],
                g: GAMMA_LUT[usize::from(led.g)],
                b: GAMMA_LUT[usize::from(led.b)],
            };
        }
    }
}
