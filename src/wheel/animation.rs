use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::f64::consts::PI;
use std::time::{Duration, Instant};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum Easing {
    #[strum(to_string = "linear")]
    Linear,
    #[strum(to_string = "ease-out", serialize = "ease_out", serialize = "quad")]
    EaseOut,
    #[default]
    #[strum(to_string = "ease-out-cubic", serialize = "ease_out_cubic", serialize = "cubic")]
    EaseOutCubic,
    #[strum(to_string = "ease-in-out", serialize = "ease_in_out", serialize = "smooth")]
    EaseInOut,
}

impl Easing {
    pub fn apply(self, p: f64) -> f64 {
        match self {
            Easing::Linear => p,
            Easing::EaseOut => 1.0 - (1.0 - p) * (1.0 - p),
            Easing::EaseOutCubic => 1.0 - (1.0 - p).powi(3),
            // 0.5 - 0.5*cos(pi*p)
            Easing::EaseInOut => 0.5 - 0.5 * (PI * p).cos(),
        }
    }
}

/// Interpolates the wheel rotation from `from` to `target` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapAnimation {
    pub from: f64,
    pub target: f64,
    pub start_time: Instant,
    pub duration: Duration,
    pub easing: Easing,
}

impl SnapAnimation {
    pub fn new(
        from: f64,
        target: f64,
        start_time: Instant,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        Self {
            from,
            target,
            start_time,
            duration,
            easing,
        }
    }

    /// Linear progress in `[0, 1]`. Timestamps before the start count as zero.
    pub fn fraction(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start_time).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn rotation_at(&self, now: Instant) -> f64 {
        let progress = self.fraction(now);
        if progress >= 1.0 {
            return self.target;
        }
        self.from + (self.target - self.from) * self.easing.apply(progress)
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        self.fraction(now) >= 1.0
    }
}
