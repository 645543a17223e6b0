pub mod capture;
pub mod export;
pub mod model;
pub mod render;

pub use capture::StrokeCapture;
pub use model::{Drawing, Point, Stroke, StrokeColor, StrokeId};
