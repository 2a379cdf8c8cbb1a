mod rigid;
mod rotation;

pub use rigid::Transform;
pub use rotation::Rotation;
