//! Camera state written into scene memory

mod camera;

pub use camera::CameraBlock;
