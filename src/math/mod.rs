//! Mathematical utilities and data structures

pub mod aabb;
pub mod rect;
pub mod frustum;

pub use aabb::Aabb;
pub use rect::Rect;
pub use frustum::{Plane, Frustum};
