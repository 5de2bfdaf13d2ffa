//! Collision geometry for exporting meshes to the **Source engine**.
//!
//! The core is a minimum-volume **oriented bounding box** fitter: the convex
//! hull of a mesh placed in the world is searched face direction by face
//! direction, each direction reduced to a 2D minimum-area rectangle with
//! rotating calipers, and the smallest resulting box is rebuilt in the
//! object's local space.
//!
//! Multi-hull collision models come from an external convex-decomposition
//! tool (CoACD), driven through [`decompose::ConvexDecomposer`] and
//! [`session::CollisionSession`].
//!
//! ```rust
//! use hullbox::{FitOptions, Mesh, Transform, fit_collision_box};
//!
//! let mesh = Mesh::cuboid(2.0, 1.0, 0.5);
//! let fitted = fit_collision_box(&mesh, &Transform::identity(), &FitOptions::default()).unwrap();
//! assert!((fitted.volume - 1.0).abs() < 1e-9);
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod config;
pub mod decompose;
pub mod errors;
pub mod float_types;
pub mod hull;
pub mod io;
pub mod mesh;
pub mod obb;
pub mod session;
pub mod triangulated;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use config::FitOptions;
pub use mesh::{Mesh, Transform};
pub use obb::{CollisionBox, fit_collision_box};
