pub mod bounds;
pub mod color;
pub mod geometry;
