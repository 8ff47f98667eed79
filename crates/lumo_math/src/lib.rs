// Re-export glam for convenience
pub use glam::*;

// Lumo math types
mod interval;
mod ray;
mod transform;

pub use interval::Interval;
pub use ray::Ray;
pub use transform::{reflect, Mat4Ext};
