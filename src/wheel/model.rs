use crate::angle::{self, FULL_TURN, HALF_TURN};
use crate::config::WheelConfig;
use crate::error::WheelError;
use crate::wheel::animation::SnapAnimation;
use crate::wheel::contract::{WheelDataSource, WheelDelegate};
use crate::wheel::section::{Point, Section, Size, validate_partition};
use std::time::{Duration, Instant};

/// Follows one drag gesture, unwrapping the touch angle across the ±π seam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTracker {
    pub start_touch_angle: f64,
    pub start_rotation: f64,
    last_raw_angle: f64,
    turns: i32,
}

impl DragTracker {
    pub fn new(touch_angle: f64, rotation: f64) -> Self {
        Self {
            start_touch_angle: touch_angle,
            start_rotation: rotation,
            last_raw_angle: touch_angle,
            turns: 0,
        }
    }

    /// Continuous touch angle. A raw jump of more than half a turn between samples
    /// means the touch crossed the seam rather than jumped across the wheel.
    pub fn unwrap(&mut self, raw_angle: f64) -> f64 {
        let jump = raw_angle - self.last_raw_angle;
        if jump > HALF_TURN {
            self.turns -= 1;
        } else if jump < -HALF_TURN {
            self.turns += 1;
        }
        self.last_raw_angle = raw_angle;
        raw_angle + f64::from(self.turns) * FULL_TURN
    }

    pub fn rotation_for(&mut self, raw_angle: f64) -> f64 {
        let unwrapped = self.unwrap(raw_angle);
        self.start_rotation + (unwrapped - self.start_touch_angle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging(DragTracker),
    Animating(SnapAnimation),
}

/// What the host should do after feeding an event to the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WheelAction {
    pub should_redraw: bool,
    pub section_changed: bool,
}

impl WheelAction {
    pub fn new(should_redraw: bool, section_changed: bool) -> Self {
        Self {
            should_redraw,
            section_changed,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

/// Rotation state machine for one wheel: `Idle ⇄ Dragging → Animating → Idle`.
///
/// The rotation angle is unbounded so a drag keeps its direction across full turns;
/// it is only normalized when compared against section boundaries. The delegate hears
/// about a section only when the wheel settles on it.
#[derive(Debug)]
pub struct WheelController<S, D = ()> {
    data_source: S,
    delegate: D,
    config: WheelConfig,
    size: Size,
    center: Point,
    sections: Vec<Section>,
    rotation: f64,
    current_index: Option<usize>,
    notified_index: Option<usize>,
    drag_state: DragState,
}

impl<S: WheelDataSource, D: WheelDelegate> WheelController<S, D> {
    pub fn new(bounds: Size, data_source: S, delegate: D) -> Result<Self, WheelError> {
        Self::with_config(bounds, data_source, delegate, WheelConfig::default())
    }

    pub fn with_config(
        bounds: Size,
        data_source: S,
        delegate: D,
        config: WheelConfig,
    ) -> Result<Self, WheelError> {
        let sections = Self::layout(&data_source, bounds)?;
        log::debug!(
            "Wheel initialized with {} sections at {}",
            sections.len(),
            bounds
        );

        Ok(Self {
            data_source,
            delegate,
            config,
            size: bounds,
            center: bounds.center(),
            sections,
            rotation: 0.0,
            current_index: None,
            notified_index: None,
            drag_state: DragState::Idle,
        })
    }

    fn layout(data_source: &S, size: Size) -> Result<Vec<Section>, WheelError> {
        let sections = data_source.sections_for_size(size);
        if let Err(e) = validate_partition(&sections) {
            log::error!("Data source produced an invalid wheel for {}: {}", size, e);
            return Err(e.into());
        }
        Ok(sections)
    }

    /// Re-queries the data source for the new bounds. Rotation is kept and the current
    /// section is re-resolved at the same angle. On error the previous layout stays.
    pub fn bounds_changed(&mut self, bounds: Size) -> Result<WheelAction, WheelError> {
        let sections = Self::layout(&self.data_source, bounds)?;
        Ok(self.apply_layout(sections, bounds))
    }

    /// Swaps the data source and lays the wheel out again at the current size.
    pub fn set_data_source(&mut self, data_source: S) -> Result<WheelAction, WheelError> {
        let sections = Self::layout(&data_source, self.size)?;
        self.data_source = data_source;
        Ok(self.apply_layout(sections, self.size))
    }

    /// Indices are only meaningful within one layout, so the notified index follows the
    /// current one when they agreed and is forgotten otherwise. A running snap is moved to
    /// the midpoint of the new section under its target.
    fn apply_layout(&mut self, sections: Vec<Section>, bounds: Size) -> WheelAction {
        self.sections = sections;
        self.size = bounds;
        self.center = bounds.center();

        let previous = self.current_index;
        let was_notified = previous.is_some() && previous == self.notified_index;
        if previous.is_some() {
            self.current_index = self.section_at_rotation().map(|s| s.index);
        }
        self.notified_index = if was_notified {
            self.current_index
        } else {
            None
        };

        if let DragState::Animating(animation) = &mut self.drag_state
            && let Some(section) = angle::section_containing(animation.target, &self.sections)
        {
            animation.target += angle::angular_distance(animation.target, section.midpoint_angle);
        }
        log::debug!(
            "Wheel laid out at {} ({} sections)",
            bounds,
            self.sections.len()
        );
        WheelAction::new(true, previous != self.current_index)
    }

    pub fn begin_drag(&mut self, point: Point) -> WheelAction {
        self.begin_drag_at(point, Instant::now())
    }

    /// Starts a drag. A running snap is stopped at its interpolated rotation for `now`.
    pub fn begin_drag_at(&mut self, point: Point, now: Instant) -> WheelAction {
        if self.is_dragging() {
            log::trace!("begin_drag ignored: drag already active");
            return WheelAction::none();
        }
        if self.in_dead_zone(point) {
            log::trace!("begin_drag ignored: {} is inside the dead zone", point);
            return WheelAction::none();
        }
        if let DragState::Animating(animation) = self.drag_state {
            self.rotation = animation.rotation_at(now);
            log::debug!("Drag interrupted snap at rotation {:.4}", self.rotation);
        }

        let touch_angle = angle::point_angle(self.center, point);
        self.drag_state = DragState::Dragging(DragTracker::new(touch_angle, self.rotation));
        WheelAction::none()
    }

    pub fn continue_drag(&mut self, point: Point) -> WheelAction {
        if !self.is_dragging() || self.in_dead_zone(point) {
            return WheelAction::none();
        }
        let raw_angle = angle::point_angle(self.center, point);
        let DragState::Dragging(tracker) = &mut self.drag_state else {
            return WheelAction::none();
        };
        self.rotation = tracker.rotation_for(raw_angle);

        let previous = self.current_index;
        self.current_index = self.section_at_rotation().map(|s| s.index);
        let changed = previous != self.current_index;

        if changed && let Some(section) = self.current_index.and_then(|i| self.sections.get(i)) {
            self.delegate.on_section_under_touch(section);
        }
        WheelAction::new(true, changed)
    }

    pub fn end_drag(&mut self) -> WheelAction {
        self.end_drag_at(Instant::now())
    }

    /// Releases the drag and snaps to the midpoint of the section under the rotation.
    pub fn end_drag_at(&mut self, now: Instant) -> WheelAction {
        if !self.is_dragging() {
            log::trace!("end_drag ignored: no active drag");
            return WheelAction::none();
        }
        let Some(target) = self.section_at_rotation().map(|s| s.midpoint_angle) else {
            self.drag_state = DragState::Idle;
            return WheelAction::none();
        };
        let delta = angle::angular_distance(self.rotation, target);
        self.snap_by(delta, self.config.animation_duration(), now)
    }

    /// Advances the snap animation. Ticks outside an animation do nothing, and repeating
    /// a timestamp never advances twice.
    pub fn tick(&mut self, now: Instant) -> WheelAction {
        let DragState::Animating(animation) = self.drag_state else {
            return WheelAction::none();
        };

        self.rotation = animation.rotation_at(now);
        if animation.is_complete(now) {
            self.drag_state = DragState::Idle;
            return self.settle();
        }
        WheelAction::new(true, false)
    }

    pub fn set_section(
        &mut self,
        index: usize,
        duration: Duration,
    ) -> Result<WheelAction, WheelError> {
        self.set_section_at(index, duration, Instant::now())
    }

    /// Rotates to the midpoint of section `index` the short way round. A zero duration
    /// settles at once.
    pub fn set_section_at(
        &mut self,
        index: usize,
        duration: Duration,
        now: Instant,
    ) -> Result<WheelAction, WheelError> {
        let Some(section) = self.sections.get(index) else {
            return Err(WheelError::InvalidIndex {
                index,
                count: self.sections.len(),
            });
        };
        let delta = angle::angular_distance(self.rotation, section.midpoint_angle);
        log::debug!("Selecting section {} ({:+.4} rad)", index, delta);
        Ok(self.snap_by(delta, duration, now))
    }

    pub fn select_next(&mut self, duration: Duration) -> Result<WheelAction, WheelError> {
        self.select_next_at(duration, Instant::now())
    }

    pub fn select_previous(&mut self, duration: Duration) -> Result<WheelAction, WheelError> {
        self.select_previous_at(duration, Instant::now())
    }

    pub fn select_next_at(
        &mut self,
        duration: Duration,
        now: Instant,
    ) -> Result<WheelAction, WheelError> {
        let index = (self.anchor_index() + 1) % self.sections.len();
        self.set_section_at(index, duration, now)
    }

    pub fn select_previous_at(
        &mut self,
        duration: Duration,
        now: Instant,
    ) -> Result<WheelAction, WheelError> {
        let count = self.sections.len();
        let index = (self.anchor_index() + count - 1) % count;
        self.set_section_at(index, duration, now)
    }

    /// Section a step starts from: the pending snap target, else the settled section.
    fn anchor_index(&self) -> usize {
        let pending = match &self.drag_state {
            DragState::Animating(animation) => {
                angle::section_containing(animation.target, &self.sections).map(|s| s.index)
            }
            _ => None,
        };
        pending
            .or(self.current_index)
            .or_else(|| self.section_at_rotation().map(|s| s.index))
            .unwrap_or(0)
    }

    fn snap_by(&mut self, delta: f64, duration: Duration, now: Instant) -> WheelAction {
        let target = self.rotation + delta;

        if delta.abs() <= self.config.snap_epsilon || duration.is_zero() {
            self.rotation = target;
            self.drag_state = DragState::Idle;
            return self.settle();
        }

        self.drag_state = DragState::Animating(SnapAnimation::new(
            self.rotation,
            target,
            now,
            duration,
            self.config.easing,
        ));
        WheelAction::new(true, false)
    }

    fn settle(&mut self) -> WheelAction {
        let previous = self.current_index;
        self.current_index = self.section_at_rotation().map(|s| s.index);

        if self.current_index != self.notified_index {
            self.notified_index = self.current_index;
            if let Some(section) = self.current_index.and_then(|i| self.sections.get(i)) {
                log::debug!(
                    "Wheel settled on section {} at rotation {:.4}",
                    section.index,
                    self.rotation
                );
                self.delegate.on_section_changed(section);
            }
        }
        WheelAction::new(true, previous != self.current_index)
    }

    fn in_dead_zone(&self, point: Point) -> bool {
        self.center.distance_to(point) <= self.config.dead_zone_radius
    }

    pub fn section_at_rotation(&self) -> Option<&Section> {
        angle::section_containing(self.rotation, &self.sections)
    }

    pub fn current_section(&self) -> Option<&Section> {
        self.current_index.and_then(|i| self.sections.get(i))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn number_of_sections(&self) -> usize {
        self.sections.len()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn normalized_rotation(&self) -> f64 {
        angle::normalize(self.rotation)
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag_state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag_state, DragState::Dragging(_))
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.drag_state, DragState::Animating(_))
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn data_source(&self) -> &S {
        &self.data_source
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Applies to the next snap; an animation already running keeps its settings.
    pub fn set_config(&mut self, config: WheelConfig) {
        self.config = config;
    }
}
