pub mod animation;
pub mod contract;
pub mod model;
pub mod section;

pub use animation::{Easing, SnapAnimation};
pub use contract::{SectionRenderer, WheelDataSource, WheelDelegate};
pub use model::{DragState, DragTracker, WheelAction, WheelController};
pub use section::{EvenSections, Point, Section, Size, validate_partition};

pub const DEFAULT_SECTION_COUNT: usize = 8;
pub const DEFAULT_ANIMATION_MS: u64 = 250;
pub const DEFAULT_DEAD_ZONE: f64 = 12.0; // touches this close to the center are ignored
pub const SNAP_EPSILON: f64 = 1e-4; // closer than this to a midpoint settles without animating
pub const PARTITION_EPSILON: f64 = 1e-6; // seam tolerance when validating sections
pub const START_OFFSET_DEGREES: f64 = -90.0; // first section starts at twelve o'clock
