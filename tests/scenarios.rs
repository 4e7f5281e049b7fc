//! End-to-end wheel scenarios driven through the public API with synthetic timestamps.

use colorwheel::angle::{self, normalize};
use colorwheel::config::WheelConfig;
use colorwheel::wheel::Easing;
use colorwheel::{EvenSections, Point, Section, Size, WheelController, WheelDelegate, WheelEvent};
use std::cell::RefCell;
use std::f64::consts::{FRAC_PI_4, PI, TAU};
use std::rc::Rc;
use std::time::{Duration, Instant};

const EPS: f64 = 1e-9;

/// Delegate that shares its log with the test, the way a view model would.
#[derive(Clone, Default)]
struct SharedLog(Rc<RefCell<Vec<usize>>>);

impl WheelDelegate for SharedLog {
    fn on_section_changed(&mut self, section: &Section) {
        self.0.borrow_mut().push(section.index);
    }
}

fn quarter_wheel(log: &SharedLog) -> WheelController<EvenSections, SharedLog> {
    WheelController::new(Size::new(300.0, 300.0), EvenSections::new(4), log.clone()).unwrap()
}

fn at(angle: f64) -> Point {
    Point::new(150.0 + 100.0 * angle.cos(), 150.0 + 100.0 * angle.sin())
}

#[test]
fn drag_a_little_and_release_snaps_back_to_first_midpoint() {
    let log = SharedLog::default();
    let mut wheel = quarter_wheel(&log);
    assert_eq!(wheel.section_at_rotation().map(|s| s.index), Some(0));

    let t0 = Instant::now();
    wheel.handle(WheelEvent::TouchDown(at(0.0)), t0).unwrap();
    wheel.handle(WheelEvent::TouchMove(at(PI / 10.0)), t0).unwrap();
    assert!((wheel.rotation() - PI / 10.0).abs() < EPS);

    wheel.handle(WheelEvent::TouchUp, t0).unwrap();
    let mut frame = t0;
    while wheel.is_animating() {
        frame += Duration::from_millis(16);
        wheel.handle(WheelEvent::Frame, frame).unwrap();
        assert!(log.0.borrow().is_empty() || !wheel.is_animating());
    }

    assert!((wheel.rotation() - FRAC_PI_4).abs() < EPS);
    assert_eq!(*log.0.borrow(), vec![0]);

    wheel.handle(WheelEvent::Frame, frame).unwrap();
    wheel.handle(WheelEvent::Frame, frame + Duration::from_secs(1)).unwrap();
    assert_eq!(*log.0.borrow(), vec![0]);
}

#[test]
fn programmatic_selection_with_zero_duration() {
    let log = SharedLog::default();
    let mut wheel = quarter_wheel(&log);
    wheel.set_section(0, Duration::ZERO).unwrap();
    log.0.borrow_mut().clear();

    wheel.set_section(2, Duration::ZERO).unwrap();
    assert!((normalize(wheel.rotation()) - 5.0 * FRAC_PI_4).abs() < EPS);
    assert_eq!(wheel.current_section().map(|s| s.index), Some(2));
    assert_eq!(*log.0.borrow(), vec![2]);
}

#[test]
fn drag_across_the_seam_between_359_and_1_degrees() {
    let log = SharedLog::default();
    let mut wheel = quarter_wheel(&log);

    wheel.begin_drag(at(359f64.to_radians()));
    wheel.continue_drag(at(1f64.to_radians()));
    assert!((wheel.rotation() - 2f64.to_radians()).abs() < EPS);

    wheel.continue_drag(at(357f64.to_radians()));
    assert!((wheel.rotation() + 2f64.to_radians()).abs() < EPS);
}

#[test]
fn every_release_lands_on_a_midpoint_within_half_a_section() {
    let config = WheelConfig {
        easing: Easing::EaseInOut,
        animation_duration_ms: 120,
        ..WheelConfig::default()
    };
    let sections = EvenSections::new(7).with_start_offset(0.3);

    for step in 0..36 {
        let sweep = -PI + 0.05 + step as f64 * (TAU / 36.0);
        let mut wheel =
            WheelController::with_config(Size::new(300.0, 300.0), sections, (), config.clone())
                .unwrap();

        wheel.begin_drag(at(0.0));
        wheel.continue_drag(at(sweep / 2.0));
        wheel.continue_drag(at(sweep));
        let released = wheel.rotation();

        let t0 = Instant::now();
        wheel.end_drag_at(t0);
        wheel.tick(t0 + Duration::from_millis(120));

        assert!(!wheel.is_animating());
        assert!((wheel.rotation() - released).abs() <= PI / 7.0 + EPS);
        let settled = wheel.normalized_rotation();
        let current = wheel.current_section().unwrap();
        assert!(angle::angular_distance(settled, current.midpoint_angle).abs() < EPS);
    }
}

#[test]
fn resizing_keeps_the_rotation() {
    let log = SharedLog::default();
    let mut wheel = quarter_wheel(&log);
    wheel.set_section(1, Duration::ZERO).unwrap();
    let rotation = wheel.rotation();

    wheel
        .handle(WheelEvent::BoundsChanged(Size::new(120.0, 80.0)), Instant::now())
        .unwrap();
    assert_eq!(wheel.rotation(), rotation);
    assert_eq!(wheel.current_index(), Some(1));
    assert!((wheel.sections()[1].radius - 40.0).abs() < EPS);
    assert_eq!(*log.0.borrow(), vec![1]);
}
