//! The shared display state and the store that owns it.
//!
//! `StateStore` is the only place the record lives. The HTTP handlers and
//! the render loop hold clones of the store, never copies of the record, so
//! there is exactly one source of truth.
//!
//! Every mutation builds the next record from a copy and publishes it as a
//! whole, so a reader observes either the previous record or the new one,
//! never a mix of fields from two writes.

use std::sync::Arc;

use tokio::sync::watch;

use crate::color::Color;
use crate::error::ValidationError;
use crate::mode::ModeId;

/// Mode, color and time offset currently shown on the globe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub mode: ModeId,
    pub color: Color,
    /// Seconds added to wall-clock time to get globe time
    pub offset: i64,
}

/// A single-field change requested by a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateUpdate {
    /// Add seconds to the offset
    AdjustOffset(i64),
    SetColor(Color),
    SetMode(ModeId),
}

impl StateUpdate {
    /// Parse one form field (`offset`, `color` or `mode`)
    pub fn from_field(key: &str, value: &str) -> Result<Self, ValidationError> {
        match key {
            "offset" => value
                .trim()
                .parse()
                .map(Self::AdjustOffset)
                .map_err(|_| ValidationError::InvalidOffset(value.to_string())),
            "color" => value.parse().map(Self::SetColor),
            "mode" => ModeId::parse(value)
                .map(Self::SetMode)
                .ok_or_else(|| ValidationError::UnknownMode(value.to_string())),
            other => Err(ValidationError::UnknownField(other.to_string())),
        }
    }

    fn apply_to(self, state: &mut DisplayState) {
        match self {
            Self::AdjustOffset(delta) => state.offset = state.offset.saturating_add(delta),
            Self::SetColor(color) => state.color = color,
            Self::SetMode(mode) => state.mode = mode,
        }
    }
}

/// Owner of the single [`DisplayState`]
///
/// Cloning the store hands out another reference to the same record.
#[derive(Debug, Clone)]
pub struct StateStore {
    inner: Arc<watch::Sender<DisplayState>>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(DisplayState::default())
    }
}

impl StateStore {
    pub fn new(initial: DisplayState) -> Self {
        Self {
            inner: Arc::new(watch::Sender::new(initial)),
        }
    }

    /// Consistent snapshot of the current record
    pub fn read(&self) -> DisplayState {
        *self.inner.borrow()
    }

    /// Publish `update` as a whole-record replacement and return the new record
    pub fn apply(&self, update: StateUpdate) -> DisplayState {
        let mut published = DisplayState::default();
        self.inner.send_if_modified(|state| {
            let mut next = *state;
            update.apply_to(&mut next);
            published = next;
            if next == *state {
                return false;
            }
            *state = next;
            true
        });
        published
    }

    /// Parse and set the color
    ///
    /// Accepts `rrggbb`, `rrggbbww` (optionally `#`-prefixed) or `r,g,b[,w]`.
    pub fn set_color(&self, color: &str) -> Result<DisplayState, ValidationError> {
        let color = color.parse()?;
        Ok(self.apply(StateUpdate::SetColor(color)))
    }

    /// Set the mode from its raw id
    pub fn set_mode(&self, mode: i64) -> Result<DisplayState, ValidationError> {
        let id = u8::try_from(mode)
            .ok()
            .and_then(ModeId::from_raw)
            .ok_or_else(|| ValidationError::UnknownMode(mode.to_string()))?;
        Ok(self.apply(StateUpdate::SetMode(id)))
    }

    /// Add `delta` seconds to the offset, saturating at the `i64` range
    pub fn adjust_offset(&self, delta: i64) -> DisplayState {
        self.apply(StateUpdate::AdjustOffset(delta))
    }

    /// Receiver notified whenever a write changes the record
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.inner.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_parsing() {
        assert_eq!(
            StateUpdate::from_field("offset", "-30"),
            Ok(StateUpdate::AdjustOffset(-30))
        );
        assert_eq!(
            StateUpdate::from_field("mode", "lava"),
            Ok(StateUpdate::SetMode(ModeId::Lava))
        );
        assert_eq!(
            StateUpdate::from_field("color", "#FF00AA"),
            Ok(StateUpdate::SetColor(Color::new(0xff, 0x00, 0xaa)))
        );
        assert!(matches!(
            StateUpdate::from_field("offset", "1.5"),
            Err(ValidationError::InvalidOffset(_))
        ));
        assert!(matches!(
            StateUpdate::from_field("brightness", "10"),
            Err(ValidationError::UnknownField(_))
        ));
    }

    #[test]
    fn unchanged_writes_do_not_notify() {
        let store = StateStore::default();
        let rx = store.subscribe();

        store.adjust_offset(0);
        assert!(!rx.has_changed().unwrap());

        store.adjust_offset(5);
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn offset_saturates() {
        let store = StateStore::new(DisplayState {
            offset: i64::MAX - 1,
            ..DisplayState::default()
        });
        assert_eq!(store.adjust_offset(10).offset, i64::MAX);
    }
}
