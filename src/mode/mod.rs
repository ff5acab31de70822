//! Display modes with compile-time known variants
//!
//! Each mode is a pure function of its [`FrameInput`] and the pixel
//! topology: identical inputs always produce identical frames, so nothing
//! here keeps counters or clocks of its own.

mod clock;
mod fireworks;
mod lava;
mod solid;

pub use clock::{ClockMode, ScheduleEntry, default_schedule};
pub use fireworks::FireworksMode;
pub use lava::LavaMode;
pub use solid::SolidMode;

use crate::color::{Color, Rgb};
use crate::time::GlobeTime;

const MODE_NAME_CLOCK: &str = "clock";
const MODE_NAME_SOLID: &str = "solid";
const MODE_NAME_LAVA: &str = "lava";
const MODE_NAME_FIREWORKS: &str = "fireworks";

const MODE_ID_CLOCK: u8 = 0;
const MODE_ID_SOLID: u8 = 1;
const MODE_ID_LAVA: u8 = 2;
const MODE_ID_FIREWORKS: u8 = 3;

/// Everything a mode may look at when drawing a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInput {
    pub color: Color,
    pub globe_time: GlobeTime,
}

pub trait Mode {
    /// Render a single frame into `leds`
    ///
    /// The slice length is the pixel topology.
    fn render(&self, input: &FrameInput, leds: &mut [Rgb]);
}

/// Known mode ids that can be requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ModeId {
    #[default]
    Clock = MODE_ID_CLOCK,
    Solid = MODE_ID_SOLID,
    Lava = MODE_ID_LAVA,
    Fireworks = MODE_ID_FIREWORKS,
}

impl ModeId {
    pub const ALL: [Self; 4] = [Self::Clock, Self::Solid, Self::Lava, Self::Fireworks];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_CLOCK => Self::Clock,
            MODE_ID_SOLID => Self::Solid,
            MODE_ID_LAVA => Self::Lava,
            MODE_ID_FIREWORKS => Self::Fireworks,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clock => MODE_NAME_CLOCK,
            Self::Solid => MODE_NAME_SOLID,
            Self::Lava => MODE_NAME_LAVA,
            Self::Fireworks => MODE_NAME_FIREWORKS,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_CLOCK => Some(Self::Clock),
            MODE_NAME_SOLID => Some(Self::Solid),
            MODE_NAME_LAVA => Some(Self::Lava),
            MODE_NAME_FIREWORKS => Some(Self::Fireworks),
            _ => None,
        }
    }

    /// Parse either the numeric id or the mode name
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.parse::<i64>() {
            Ok(raw) => u8::try_from(raw).ok().and_then(Self::from_raw),
            Err(_) => Self::parse_from_str(&s.to_ascii_lowercase()),
        }
    }
}

/// The configured algorithm for every mode
#[derive(Debug, Clone, Default)]
pub struct ModeSet {
    clock: ClockMode,
    solid: SolidMode,
    lava: LavaMode,
    fireworks: FireworksMode,
}

impl ModeSet {
    pub fn new(clock: ClockMode) -> Self {
        Self {
            clock,
            ..Self::default()
        }
    }

    /// Render the frame for `id`
    pub fn render(&self, id: ModeId, input: &FrameInput, leds: &mut [Rgb]) {
        match id {
            ModeId::Clock => self.clock.render(input, leds),
            ModeId::Solid => self.solid.render(input, leds),
            ModeId::Lava => self.lava.render(input, leds),
            ModeId::Fireworks => self.fireworks.render(input, leds),
        }
    }
}
