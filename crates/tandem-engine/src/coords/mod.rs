//! Math types shared by the renderer and the scene.
//!
//! World space follows the usual GL conventions:
//! - origin at the center of the view, +X right, +Y up
//! - column vectors, column-major storage, `M * v`
//!
//! Composition helpers (`Mat4::scale`, `Mat4::rotate`, `Mat4::translate`)
//! right-multiply, so successive calls apply in the object's local frame.

mod mat4;
mod vec3;

pub use mat4::Mat4;
pub use vec3::Vec3;
