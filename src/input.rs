//! # Input Devices
//!
//! The two physical controls, read as Linux evdev devices: a rotary
//! encoder (the category knob) and a push button. Each is opened
//! exclusively — grabbed with `EVIOCGRAB` — so no other process can
//! consume the same events while the appliance runs, and exposed as an
//! unbounded async stream of [`DeviceEvent`]s.
//!
//! ## Event Mapping
//!
//! | Kernel event | Value | Mapped to |
//! |--------------|-------|-----------|
//! | `EV_KEY` | 1 (press) | `Button { pressed: true }` |
//! | `EV_KEY` | 0 (release) | `Button { pressed: false }` |
//! | `EV_KEY` | 2 (autorepeat) | ignored |
//! | `EV_REL` | > 0 | `Rotate(Clockwise)` |
//! | `EV_REL` | < 0 | `Rotate(CounterClockwise)` |
//! | anything else | | ignored |
//!
//! Sync reports and other non-actionable kernel events are skipped
//! inside the stream; consumers only ever see mapped events.

use evdev::{Device, EventStream, EventType};
use std::path::Path;

use crate::error::TiradaError;

/// Rotation direction of the knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Positive relative movement; selects the next category.
    Clockwise,
    /// Negative relative movement; selects the previous category.
    CounterClockwise,
}

/// One actionable event from a physical control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    /// The knob moved one detent.
    Rotate(Direction),
    /// The button changed state.
    Button {
        /// `true` on press, `false` on release.
        pressed: bool,
    },
}

/// An unbounded, in-order stream of device events.
///
/// Implemented by [`EvdevSource`] for real hardware and by scripted
/// fakes in dispatcher tests.
pub trait EventSource {
    /// Wait for the next actionable event. Suspends cooperatively; an
    /// error means the device is no longer usable.
    fn next_event(&mut self) -> impl Future<Output = Result<DeviceEvent, TiradaError>> + Send;
}

/// Map a raw kernel event to a [`DeviceEvent`], if it is actionable.
fn map_event(event_type: EventType, value: i32) -> Option<DeviceEvent> {
    match event_type {
        EventType::KEY => match value {
            1 => Some(DeviceEvent::Button { pressed: true }),
            0 => Some(DeviceEvent::Button { pressed: false }),
            // Autorepeat; a held button is one press.
            _ => None,
        },
        EventType::RELATIVE => match value {
            v if v > 0 => Some(DeviceEvent::Rotate(Direction::Clockwise)),
            v if v < 0 => Some(DeviceEvent::Rotate(Direction::CounterClockwise)),
            _ => None,
        },
        _ => None,
    }
}

/// # Evdev Event Source
///
/// Owns one exclusively-grabbed input device and its async event
/// stream.
pub struct EvdevSource {
    stream: EventStream,
}

impl EvdevSource {
    /// Open and grab an input device.
    ///
    /// ## Errors
    ///
    /// Returns [`TiradaError::Input`] if the device cannot be opened or
    /// the exclusive grab fails (typically: another process already
    /// holds it). Acquisition failures are fatal at startup — the
    /// appliance cannot run without both controls.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TiradaError> {
        let path = path.as_ref();

        let mut device = Device::open(path).map_err(|e| {
            TiradaError::Input(format!("Failed to open {}: {e}", path.display()))
        })?;

        device.grab().map_err(|e| {
            TiradaError::Input(format!("Failed to grab {}: {e}", path.display()))
        })?;

        let stream = device.into_event_stream().map_err(|e| {
            TiradaError::Input(format!("Failed to stream {}: {e}", path.display()))
        })?;

        Ok(Self { stream })
    }
}

impl EventSource for EvdevSource {
    async fn next_event(&mut self) -> Result<DeviceEvent, TiradaError> {
        loop {
            let event = self
                .stream
                .next_event()
                .await
                .map_err(|e| TiradaError::Input(format!("Device read failed: {e}")))?;

            if let Some(mapped) = map_event(event.event_type(), event.value()) {
                return Ok(mapped);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press_maps_to_button() {
        assert_eq!(
            map_event(EventType::KEY, 1),
            Some(DeviceEvent::Button { pressed: true })
        );
        assert_eq!(
            map_event(EventType::KEY, 0),
            Some(DeviceEvent::Button { pressed: false })
        );
    }

    #[test]
    fn test_key_autorepeat_ignored() {
        assert_eq!(map_event(EventType::KEY, 2), None);
    }

    #[test]
    fn test_relative_maps_to_rotation() {
        assert_eq!(
            map_event(EventType::RELATIVE, 1),
            Some(DeviceEvent::Rotate(Direction::Clockwise))
        );
        assert_eq!(
            map_event(EventType::RELATIVE, -1),
            Some(DeviceEvent::Rotate(Direction::CounterClockwise))
        );
        assert_eq!(map_event(EventType::RELATIVE, 0), None);
    }

    #[test]
    fn test_synchronization_ignored() {
        assert_eq!(map_event(EventType::SYNCHRONIZATION, 0), None);
    }

    #[test]
    fn test_open_missing_device_fails() {
        assert!(matches!(
            EvdevSource::open("/nonexistent/event9"),
            Err(TiradaError::Input(_))
        ));
    }
}
