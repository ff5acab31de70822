//! Daemon configuration.
//!
//! Every field has a compiled default, so an empty file (or no file at all)
//! is a valid configuration.
//!
//! ```toml
//! [http]
//! bind = "0.0.0.0:80"
//!
//! [render]
//! fps = 50
//! led_count = 13
//! driver_timeout_ms = 20
//! brightness = 255
//! gamma = true
//!
//! [state]
//! mode = 0
//! color = "ffffff"
//!
//! [[clock.schedule]]
//! at = "06:45"
//! color = "00202000"
//! ```

use std::path::Path;
use std::time::Duration;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ConfigError;
use crate::filter::FilterProcessorConfig;
use crate::mode::{ClockMode, ModeId, ScheduleEntry, default_schedule};
use crate::renderer::{MAX_LEDS, RendererConfig};
use crate::state::DisplayState;

const MAX_FPS: u32 = 240;
const SCHEDULE_TIME_FORMAT: &str = "%H:%M";

/// Complete globe configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub http: HttpConfig,
    pub render: RenderConfig,
    pub state: StateConfig,
    pub clock: ClockConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Listen address for the control surface.
    /// Default: 0.0.0.0:80
    pub bind: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:80".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub fps: u32,
    pub led_count: usize,
    /// Per-frame write budget; one frame period when unset.
    pub driver_timeout_ms: Option<u64>,
    pub brightness: u8,
    pub gamma: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let filters = FilterProcessorConfig::default();
        Self {
            fps: crate::frame_scheduler::DEFAULT_FPS,
            led_count: RendererConfig::default().led_count,
            driver_timeout_ms: None,
            brightness: filters.brightness,
            gamma: filters.gamma,
        }
    }
}

impl RenderConfig {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    pub fn driver_timeout(&self) -> Duration {
        self.driver_timeout_ms
            .map_or_else(|| self.frame_duration(), Duration::from_millis)
    }
}

/// Display state at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    pub mode: u8,
    pub color: Color,
}

impl Default for StateConfig {
    fn default() -> Self {
        let state = DisplayState::default();
        Self {
            mode: state.mode.as_raw(),
            color: state.color,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub schedule: Vec<ScheduleConfig>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            schedule: default_schedule()
                .into_iter()
                .map(|entry| ScheduleConfig {
                    at: entry.at.format(SCHEDULE_TIME_FORMAT).to_string(),
                    color: entry.color,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Local time of day, `HH:MM`.
    pub at: String,
    pub color: Color,
}

impl GlobeConfig {
    /// Load from `path`, or use the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&contents, path)
    }

    /// Parse a TOML document; `path` is only used in error messages.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e: toml::de::Error| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Check ranges the types alone do not enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_FPS).contains(&self.render.fps) {
            return Err(ConfigError::Invalid {
                field: "render.fps",
                message: format!("{} is outside 1-{MAX_FPS}", self.render.fps),
            });
        }
        if !(1..=MAX_LEDS).contains(&self.render.led_count) {
            return Err(ConfigError::Invalid {
                field: "render.led_count",
                message: format!("{} is outside 1-{MAX_LEDS}", self.render.led_count),
            });
        }
        if self.render.driver_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid {
                field: "render.driver_timeout_ms",
                message: "must be greater than zero".to_string(),
            });
        }
        self.initial_mode()?;
        self.schedule()?;
        Ok(())
    }

    /// Record the store starts with.
    pub fn initial_state(&self) -> Result<DisplayState, ConfigError> {
        Ok(DisplayState {
            mode: self.initial_mode()?,
            color: self.state.color,
            offset: 0,
        })
    }

    pub fn renderer_config(&self) -> Result<RendererConfig, ConfigError> {
        Ok(RendererConfig {
            led_count: self.render.led_count,
            filters: FilterProcessorConfig {
                brightness: self.render.brightness,
                gamma: self.render.gamma,
            },
            clock: ClockMode::new(self.schedule()?),
        })
    }

    fn initial_mode(&self) -> Result<ModeId, ConfigError> {
        ModeId::from_raw(self.state.mode).ok_or_else(|| ConfigError::Invalid {
            field: "state.mode",
            message: format!("unknown mode {}", self.state.mode),
        })
    }

    fn schedule(&self) -> Result<Vec<ScheduleEntry>, ConfigError> {
        self.clock
            .schedule
            .iter()
            .map(|entry| {
                let at = NaiveTime::parse_from_str(entry.at.trim(), SCHEDULE_TIME_FORMAT)
                    .map_err(|e| ConfigError::Invalid {
                        field: "clock.schedule.at",
                        message: format!("{:?}: {e}", entry.at),
                    })?;
                Ok(ScheduleEntry {
                    at,
                    color: entry.color,
                })
            })
            .collect()
    }
}
