use crate::angle::{self, FULL_TURN};
use crate::error::{PartitionError, WheelError};
use crate::wheel::contract::WheelDataSource;
use crate::wheel::{DEFAULT_SECTION_COUNT, PARTITION_EPSILON};
use derive_more::{Display, From, Into};

#[derive(Debug, Clone, Copy, PartialEq, Default, Display, From, Into)]
#[display("({x:.1}, {y:.1})")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Display, From, Into)]
#[display("{width:.0}x{height:.0}")]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn min_dimension(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// One angular wedge of the wheel. Angles are stored in `[0, 2π)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub index: usize,
    pub start_angle: f64,
    pub midpoint_angle: f64,
    pub end_angle: f64,
    pub radius: f64,
}

impl Section {
    /// Builds a section spanning `start..end` with the midpoint halfway along the arc.
    ///
    /// Fails when the radius is not positive or any value is not finite.
    pub fn new(index: usize, start: f64, end: f64, radius: f64) -> Result<Self, WheelError> {
        let section = Self::arc(index, start, end, radius);
        section.check_values()?;
        Ok(section)
    }

    /// Builds a section with an explicit midpoint.
    pub fn with_midpoint(
        index: usize,
        start: f64,
        midpoint: f64,
        end: f64,
        radius: f64,
    ) -> Result<Self, WheelError> {
        let section = Self {
            index,
            start_angle: angle::normalize(start),
            midpoint_angle: angle::normalize(midpoint),
            end_angle: angle::normalize(end),
            radius,
        };
        section.check_values()?;
        Ok(section)
    }

    /// Unchecked constructor, left for the controller's partition check to validate.
    pub fn arc(index: usize, start: f64, end: f64, radius: f64) -> Self {
        let span = arc_span(start, end);
        Self {
            index,
            start_angle: angle::normalize(start),
            midpoint_angle: angle::normalize(start + span / 2.0),
            end_angle: angle::normalize(end),
            radius,
        }
    }

    /// Angular width. A section whose start meets its own end covers the whole turn.
    pub fn span(&self) -> f64 {
        arc_span(self.start_angle, self.end_angle)
    }

    pub fn contains(&self, angle: f64) -> bool {
        angle::angle_between(self.start_angle, angle, self.span())
    }

    fn check_values(&self) -> Result<(), PartitionError> {
        let finite = [
            self.start_angle,
            self.midpoint_angle,
            self.end_angle,
            self.radius,
        ]
        .iter()
        .all(|v| v.is_finite());

        if !finite {
            return Err(PartitionError::NonFinite { index: self.index });
        }
        if self.radius <= 0.0 {
            return Err(PartitionError::NonPositiveRadius {
                index: self.index,
                radius: self.radius,
            });
        }
        Ok(())
    }
}

fn arc_span(start: f64, end: f64) -> f64 {
    let span = angle::normalize(end - start);
    if span == 0.0 { FULL_TURN } else { span }
}

/// Checks that `sections` tile the circle exactly, in index order.
pub fn validate_partition(sections: &[Section]) -> Result<(), PartitionError> {
    if sections.is_empty() {
        return Err(PartitionError::Empty);
    }

    for (position, section) in sections.iter().enumerate() {
        section.check_values()?;

        if section.index != position {
            return Err(PartitionError::IndexMismatch {
                position,
                index: section.index,
            });
        }

        let mid_offset = angle::normalize(section.midpoint_angle - section.start_angle);
        if mid_offset > section.span() + PARTITION_EPSILON {
            return Err(PartitionError::MidpointOutOfBounds {
                index: section.index,
            });
        }
    }

    for (before, after) in sections.iter().zip(sections.iter().cycle().skip(1)) {
        let gap = angle::angular_distance(before.end_angle, after.start_angle);
        if gap.abs() > PARTITION_EPSILON {
            return Err(PartitionError::Discontinuous {
                before: before.index,
                after: after.index,
            });
        }
    }

    let covered: f64 = sections.iter().map(Section::span).sum();
    if (covered - FULL_TURN).abs() > PARTITION_EPSILON * sections.len() as f64 {
        return Err(PartitionError::IncompleteCoverage { covered });
    }

    Ok(())
}

/// Data source splitting the circle into `count` equal sections.
///
/// Section `i` starts at `start_offset + i * step`, and every section reaches
/// `radius_ratio` of half the smaller bounds dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvenSections {
    pub count: usize,
    pub start_offset: f64,
    pub radius_ratio: f64,
}

impl Default for EvenSections {
    fn default() -> Self {
        Self::new(DEFAULT_SECTION_COUNT)
    }
}

impl EvenSections {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            start_offset: 0.0,
            radius_ratio: 1.0,
        }
    }

    pub fn with_start_offset(mut self, start_offset: f64) -> Self {
        self.start_offset = start_offset;
        self
    }

    pub fn with_radius_ratio(mut self, radius_ratio: f64) -> Self {
        self.radius_ratio = radius_ratio;
        self
    }

    pub fn step(&self) -> f64 {
        FULL_TURN / self.count.max(1) as f64
    }
}

impl WheelDataSource for EvenSections {
    fn sections_for_size(&self, size: Size) -> Vec<Section> {
        let radius = size.min_dimension() / 2.0 * self.radius_ratio;
        let step = self.step();

        (0..self.count)
            .map(|i| {
                let start = self.start_offset + i as f64 * step;
                Section::arc(i, start, start + step, radius)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const EPS: f64 = 1e-9;

    fn quarters() -> Vec<Section> {
        EvenSections::new(4).sections_for_size(Size::new(200.0, 200.0))
    }

    #[test]
    fn test_new_derives_midpoint() {
        let s = Section::new(0, 0.0, FRAC_PI_2, 10.0).unwrap();
        assert!((s.midpoint_angle - FRAC_PI_4).abs() < EPS);
        assert!((s.span() - FRAC_PI_2).abs() < EPS);

        // arc crossing zero
        let s = Section::new(0, -FRAC_PI_4, FRAC_PI_4, 10.0).unwrap();
        assert!(s.midpoint_angle.abs() < EPS);
        assert!(s.contains(0.0));
        assert!(s.contains(2.0 * PI - 0.1));
        assert!(!s.contains(PI));
    }

    #[test]
    fn test_new_rejects_bad_radius() {
        assert_eq!(
            Section::new(3, 0.0, 1.0, 0.0),
            Err(WheelError::Configuration(
                PartitionError::NonPositiveRadius {
                    index: 3,
                    radius: 0.0
                }
            ))
        );
        assert!(Section::new(0, 0.0, 1.0, -5.0).is_err());
        assert!(Section::new(0, f64::NAN, 1.0, 5.0).is_err());
    }

    #[test]
    fn test_single_section_covers_full_turn() {
        let sections = EvenSections::new(1).sections_for_size(Size::new(50.0, 50.0));
        assert_eq!(sections.len(), 1);
        assert!((sections[0].span() - FULL_TURN).abs() < EPS);
        assert!(sections[0].contains(4.0));
        assert_eq!(validate_partition(&sections), Ok(()));
    }

    #[test]
    fn test_even_sections_layout() {
        let sections = quarters();
        assert_eq!(sections.len(), 4);
        let mids: Vec<f64> = sections.iter().map(|s| s.midpoint_angle).collect();
        let expected = [FRAC_PI_4, 3.0 * FRAC_PI_4, 5.0 * FRAC_PI_4, 7.0 * FRAC_PI_4];
        for (m, e) in mids.iter().zip(expected) {
            assert!((m - e).abs() < EPS, "midpoint {m} != {e}");
        }
        assert!(sections.iter().all(|s| (s.radius - 100.0).abs() < EPS));
        assert_eq!(validate_partition(&sections), Ok(()));
    }

    #[test]
    fn test_radius_ratio_and_offset() {
        let sections = EvenSections::new(8)
            .with_start_offset(-FRAC_PI_2)
            .with_radius_ratio(0.5)
            .sections_for_size(Size::new(400.0, 300.0));
        assert!((sections[0].radius - 75.0).abs() < EPS);
        assert!((sections[0].start_angle - 3.0 * FRAC_PI_2).abs() < EPS);
        assert_eq!(validate_partition(&sections), Ok(()));
    }

    #[test]
    fn test_validate_empty() {
        assert_eq!(validate_partition(&[]), Err(PartitionError::Empty));
    }

    #[test]
    fn test_validate_gap() {
        let sections = vec![
            Section::arc(0, 0.0, PI, 10.0),
            Section::arc(1, PI + 0.1, 2.0 * PI, 10.0),
        ];
        assert_eq!(
            validate_partition(&sections),
            Err(PartitionError::Discontinuous {
                before: 0,
                after: 1
            })
        );
    }

    #[test]
    fn test_validate_overlap_and_coverage() {
        // every seam lines up, but the arcs wind around twice
        let sections = vec![
            Section::arc(0, 0.0, 2.0 * PI / 3.0 * 2.0, 10.0),
            Section::arc(1, 4.0 * PI / 3.0, 2.0 * PI / 3.0 * 4.0, 10.0),
            Section::arc(2, 8.0 * PI / 3.0, 4.0 * PI, 10.0),
        ];
        assert!(matches!(
            validate_partition(&sections),
            Err(PartitionError::IncompleteCoverage { .. })
        ));
    }

    #[test]
    fn test_validate_duplicate_index() {
        let mut sections = quarters();
        sections[2].index = 1;
        assert_eq!(
            validate_partition(&sections),
            Err(PartitionError::IndexMismatch {
                position: 2,
                index: 1
            })
        );
    }

    #[test]
    fn test_validate_midpoint_outside_arc() {
        let mut sections = quarters();
        sections[1].midpoint_angle = 0.1;
        assert_eq!(
            validate_partition(&sections),
            Err(PartitionError::MidpointOutOfBounds { index: 1 })
        );
    }

    #[test]
    fn test_size_helpers() {
        let size = Size::new(300.0, 120.0);
        assert_eq!(size.center(), Point::new(150.0, 60.0));
        assert_eq!(size.min_dimension(), 120.0);
        assert_eq!(size.to_string(), "300x120");
        assert_eq!(Point::from((1.0, 2.0)), Point::new(1.0, 2.0));
        assert!((Point::new(0.0, 0.0).distance_to(Point::new(3.0, 4.0)) - 5.0).abs() < EPS);
    }
}
