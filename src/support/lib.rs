pub mod app;
pub mod geometry;
pub mod render;

pub use self::{app::*, geometry::*, render::*};
