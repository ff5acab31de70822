mod rgbw;
mod utils;

pub use rgbw::Color;
use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use utils::{add_colors, blend_colors, hsv2rgb, rgb_from_u32, scale_color};

pub type Rgb = RGB8;
pub type Hsv = HSV;
