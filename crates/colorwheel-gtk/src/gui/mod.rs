pub mod app;
pub mod theme;
pub mod view;

pub const WINDOW_SIZE: i32 = 480;
pub const WHEEL_RADIUS_RATIO: f64 = 0.9; // leaves room for the needle tip
pub const INNER_RADIUS_RATIO: f64 = 0.35;
pub const HIGHLIGHT_WIDTH: f64 = 6.0;
pub const NEEDLE_WIDTH: f64 = 3.0;
pub const NEEDLE_TIP_RADIUS: f64 = 6.0;
