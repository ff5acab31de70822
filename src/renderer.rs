use chrono::NaiveDateTime;

use crate::color::Rgb;
use crate::filter::{FilterProcessor, FilterProcessorConfig};
use crate::mode::{ClockMode, FrameInput, ModeSet};
use crate::state::DisplayState;
use crate::time::GlobeTime;

/// Upper bound on the pixel topology
pub const MAX_LEDS: usize = 256;

/// Configuration for the renderer
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Number of pixels on the globe (at most [`MAX_LEDS`])
    pub led_count: usize,
    pub filters: FilterProcessorConfig,
    pub clock: ClockMode,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            led_count: 13,
            filters: FilterProcessorConfig::default(),
            clock: ClockMode::default(),
        }
    }
}

/// Turns a display state snapshot into a frame
///
/// Rendering is a pure function of the snapshot and the wall-clock time it
/// is given; the buffer is reused between frames but fully rewritten.
#[derive(Debug, Clone)]
pub struct Renderer {
    modes: ModeSet,
    filters: FilterProcessor,
    led_count: usize,
    frame_buffer: [Rgb; MAX_LEDS],
}

impl Renderer {
    /// Create a renderer; `led_count` is clamped to `1..=MAX_LEDS`
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            modes: ModeSet::new(config.clock.clone()),
            filters: FilterProcessor::new(&config.filters),
            led_count: config.led_count.clamp(1, MAX_LEDS),
            frame_buffer: [Rgb::default(); MAX_LEDS],
        }
    }

    pub const fn led_count(&self) -> usize {
        self.led_count
    }

    /// Render one frame of `state` at local wall-clock time `wall`
    pub fn render(&mut self, state: &DisplayState, wall: NaiveDateTime) -> &[Rgb] {
        let input = FrameInput {
            color: state.color,
            globe_time: GlobeTime::from_wall(wall, state.offset),
        };

        let frame = &mut self.frame_buffer[..self.led_count];
        self.modes.render(state.mode, &input, frame);
        self.filters.apply(frame);

        frame
    }
}
