//! Double-tap / double-click detection.
//!
//! One global "last tap" slot: the detector keys purely on elapsed time and
//! channel, not on which node or where. Two quick presses on different
//! nodes still pair up.

use crate::input::Channel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tap {
    Single,
    Double,
}

#[derive(Debug, Clone)]
pub struct DoubleTapDetector {
    window_ms: f64,
    last: Option<(Channel, f64)>,
}

impl DoubleTapDetector {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            last: None,
        }
    }

    pub fn window_ms(&self) -> f64 {
        self.window_ms
    }

    /// Record a press and classify it.
    ///
    /// A press is `Double` when the previous recorded press came from the
    /// same channel strictly less than `window_ms` earlier. A `Double`
    /// consumes the pair, so a third quick press starts over as `Single`.
    pub fn register(&mut self, channel: Channel, time_ms: f64) -> Tap {
        let paired = matches!(
            self.last,
            Some((prev_channel, prev_time))
                if prev_channel == channel
                    && time_ms >= prev_time
                    && time_ms - prev_time < self.window_ms
        );

        if paired {
            self.last = None;
            Tap::Double
        } else {
            self.last = Some((channel, time_ms));
            Tap::Single
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_second_press_is_double() {
        let mut d = DoubleTapDetector::new(300.0);
        assert_eq!(d.register(Channel::Touch, 1_000.0), Tap::Single);
        assert_eq!(d.register(Channel::Touch, 1_100.0), Tap::Double);
    }

    #[test]
    fn slow_second_press_is_fresh_first_tap() {
        let mut d = DoubleTapDetector::new(300.0);
        d.register(Channel::Mouse, 0.0);
        assert_eq!(d.register(Channel::Mouse, 500.0), Tap::Single);
        // ...and it becomes the new reference point.
        assert_eq!(d.register(Channel::Mouse, 650.0), Tap::Double);
    }

    #[test]
    fn window_is_exclusive() {
        let mut d = DoubleTapDetector::new(300.0);
        d.register(Channel::Mouse, 0.0);
        assert_eq!(d.register(Channel::Mouse, 300.0), Tap::Single);
    }

    #[test]
    fn channels_do_not_pair() {
        let mut d = DoubleTapDetector::new(300.0);
        d.register(Channel::Touch, 0.0);
        assert_eq!(d.register(Channel::Mouse, 50.0), Tap::Single);
        assert_eq!(d.register(Channel::Mouse, 100.0), Tap::Double);
    }

    #[test]
    fn triple_tap_is_double_then_single() {
        let mut d = DoubleTapDetector::new(300.0);
        assert_eq!(d.register(Channel::Pen, 0.0), Tap::Single);
        assert_eq!(d.register(Channel::Pen, 100.0), Tap::Double);
        assert_eq!(d.register(Channel::Pen, 200.0), Tap::Single);
    }

    #[test]
    fn clock_going_backwards_does_not_pair() {
        let mut d = DoubleTapDetector::new(300.0);
        d.register(Channel::Mouse, 1_000.0);
        assert_eq!(d.register(Channel::Mouse, 900.0), Tap::Single);
    }
}
