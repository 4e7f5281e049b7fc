//! A rotatable wheel control split into angular sections.
//!
//! The user drags to rotate the wheel; on release it snaps to the midpoint of the
//! nearest section and tells its [`WheelDelegate`](wheel::WheelDelegate). Drawing is
//! left to the host through [`SectionRenderer`](wheel::SectionRenderer).

pub mod angle;
pub mod config;
pub mod error;
pub mod events;
pub mod wheel;

pub use error::{PartitionError, WheelError};
pub use events::WheelEvent;
pub use wheel::{
    EvenSections, Point, Section, SectionRenderer, Size, WheelAction, WheelController,
    WheelDataSource, WheelDelegate,
};
