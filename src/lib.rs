pub mod color;
pub mod config;
pub mod daemon;
pub mod error;
pub mod filter;
pub mod frame_scheduler;
pub mod http;
pub mod math8;
pub mod mode;
pub mod output;
pub mod renderer;
pub mod state;
pub mod time;

pub use color::{Color, Hsv, Rgb};
pub use config::GlobeConfig;
pub use daemon::Globe;
pub use error::{ConfigError, DriverError, StartupError, ValidationError};
pub use filter::FilterProcessorConfig;
pub use frame_scheduler::{FrameScheduler, RenderStats, StatsSnapshot};
pub use math8::ease_in_out_quad;
pub use mode::{FrameInput, ModeId, ModeSet};
pub use output::{NullDriver, OutputDriver, OutputWorker, SmartLedsDriver, TraceDriver, WriteOutcome};
pub use renderer::{MAX_LEDS, Renderer, RendererConfig};
pub use state::{DisplayState, StateStore, StateUpdate};
pub use time::GlobeTime;
