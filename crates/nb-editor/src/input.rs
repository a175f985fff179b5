//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and pen events from the host into a single
//! `InputEvent` enum consumed by the interaction state machine. Positions
//! are screen-space pixels; timestamps are host milliseconds
//! (`event.timeStamp` in the browser).

use nb_core::model::Point;
use std::str::FromStr;

/// The interaction channel an event arrived on. Double taps only pair up
/// within one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Mouse,
    Touch,
    Pen,
}

impl FromStr for Channel {
    type Err = String;

    /// Accepts the DOM `PointerEvent.pointerType` strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mouse" => Ok(Channel::Mouse),
            "touch" => Ok(Channel::Touch),
            "pen" => Ok(Channel::Pen),
            other => Err(format!("unknown pointer type `{other}`")),
        }
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse down, touch start, pen contact.
    PointerDown {
        x: f32,
        y: f32,
        channel: Channel,
        time_ms: f64,
    },

    PointerMove { x: f32, y: f32, channel: Channel },

    PointerUp { x: f32, y: f32, channel: Channel },

    /// Pointer left the canvas. Ends any gesture like `PointerUp`.
    PointerLeave { channel: Channel },

    /// Scroll wheel. Negative `delta_y` (scrolling up) zooms in.
    Wheel { delta_y: f32 },

    Key {
        key: String,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    },
}

impl InputEvent {
    pub fn pointer_down(x: f32, y: f32, channel: Channel, time_ms: f64) -> Self {
        Self::PointerDown {
            x,
            y,
            channel,
            time_ms,
        }
    }

    pub fn pointer_move(x: f32, y: f32, channel: Channel) -> Self {
        Self::PointerMove { x, y, channel }
    }

    pub fn pointer_up(x: f32, y: f32, channel: Channel) -> Self {
        Self::PointerUp { x, y, channel }
    }

    /// Screen position, if this is a positioned pointer event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_from_pointer_type() {
        assert_eq!("touch".parse::<Channel>(), Ok(Channel::Touch));
        assert_eq!("mouse".parse::<Channel>(), Ok(Channel::Mouse));
        assert_eq!("pen".parse::<Channel>(), Ok(Channel::Pen));
        assert!("stylus".parse::<Channel>().is_err());
    }

    #[test]
    fn position_of_pointer_events() {
        let down = InputEvent::pointer_down(3.0, 4.0, Channel::Mouse, 0.0);
        assert_eq!(down.position(), Some(Point::new(3.0, 4.0)));
        let leave = InputEvent::PointerLeave {
            channel: Channel::Mouse,
        };
        assert_eq!(leave.position(), None);
        assert_eq!(InputEvent::Wheel { delta_y: 1.0 }.position(), None);
    }
}
