//! Input events for a wheel.
//!
//! Hosts that receive touches, frame ticks and remote commands on different threads
//! send them as [`WheelEvent`]s through one channel, and the thread that owns the
//! controller applies them in order with [`WheelController::handle`].

use crate::error::WheelError;
use crate::wheel::{Point, Size, WheelAction, WheelController, WheelDataSource, WheelDelegate};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelEvent {
    TouchDown(Point),
    TouchMove(Point),
    TouchUp,
    Frame,
    BoundsChanged(Size),
    SelectSection { index: usize, duration: Duration },
    Next(Duration),
    Previous(Duration),
}

impl<S: WheelDataSource, D: WheelDelegate> WheelController<S, D> {
    /// Applies one event. `now` timestamps releases, frames and selections.
    pub fn handle(
        &mut self,
        event: WheelEvent,
        now: Instant,
    ) -> Result<WheelAction, WheelError> {
        let action = match event {
            WheelEvent::TouchDown(point) => self.begin_drag_at(point, now),
            WheelEvent::TouchMove(point) => self.continue_drag(point),
            WheelEvent::TouchUp => self.end_drag_at(now),
            WheelEvent::Frame => self.tick(now),
            WheelEvent::BoundsChanged(size) => self.bounds_changed(size)?,
            WheelEvent::SelectSection { index, duration } => {
                self.set_section_at(index, duration, now)?
            }
            WheelEvent::Next(duration) => self.select_next_at(duration, now)?,
            WheelEvent::Previous(duration) => self.select_previous_at(duration, now)?,
        };
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::EvenSections;

    fn quarters() -> WheelController<EvenSections> {
        WheelController::new(Size::new(100.0, 100.0), EvenSections::new(4), ()).unwrap()
    }

    fn point_at(angle: f64) -> Point {
        Point::new(50.0 + 40.0 * angle.cos(), 50.0 + 40.0 * angle.sin())
    }

    #[test]
    fn test_event_sequence_settles() {
        let mut w = quarters();
        let t0 = Instant::now();

        let events = [
            WheelEvent::TouchDown(point_at(0.0)),
            WheelEvent::TouchMove(point_at(0.2)),
            WheelEvent::TouchMove(point_at(1.8)),
            WheelEvent::TouchUp,
        ];
        for event in events {
            w.handle(event, t0).unwrap();
        }
        assert!(w.is_animating());

        let action = w
            .handle(WheelEvent::Frame, t0 + Duration::from_secs(1))
            .unwrap();
        assert!(action.should_redraw);
        assert!(!w.is_animating());
        assert_eq!(w.current_index(), Some(1));
    }

    #[test]
    fn test_selection_events() {
        let mut w = quarters();
        let now = Instant::now();

        w.handle(
            WheelEvent::SelectSection {
                index: 3,
                duration: Duration::ZERO,
            },
            now,
        )
        .unwrap();
        assert_eq!(w.current_index(), Some(3));

        w.handle(WheelEvent::Next(Duration::ZERO), now).unwrap();
        assert_eq!(w.current_index(), Some(0));
        w.handle(WheelEvent::Previous(Duration::ZERO), now).unwrap();
        assert_eq!(w.current_index(), Some(3));

        let err = w.handle(
            WheelEvent::SelectSection {
                index: 9,
                duration: Duration::ZERO,
            },
            now,
        );
        assert_eq!(err, Err(WheelError::InvalidIndex { index: 9, count: 4 }));
    }

    #[test]
    fn test_bounds_event() {
        let mut w = quarters();
        w.handle(WheelEvent::BoundsChanged(Size::new(300.0, 200.0)), Instant::now())
            .unwrap();
        assert_eq!(w.center(), Point::new(150.0, 100.0));
        assert!(w
            .handle(WheelEvent::BoundsChanged(Size::default()), Instant::now())
            .is_err());
    }
}
