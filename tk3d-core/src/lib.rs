/// TK3D Core Library - Scene graph, transform stack and tank simulation
///
/// This library holds everything a frontend needs to run the tank scene:
/// the transform stack, the hierarchical part composer, projectile
/// ballistics and the per-frame driver. Rasterizing is left to a
/// `MeshDrawer` supplied by the frontend.

pub mod camera;
pub mod controls;
pub mod draw;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod projectile;
pub mod scene;
pub mod stack;
pub mod state;
pub mod tank;
pub mod transform;
pub mod tuning;

// Re-export commonly used types
pub use camera::{CameraPreset, Projection, ProjectionMode};
pub use controls::{command_for_key, Command};
pub use draw::{Color, DrawCall, DrawList, MeshDrawer};
pub use error::SceneError;
pub use frame::{FrameDriver, FrameStats};
pub use geometry::{Mesh, MeshKind, Triangle, Vertex};
pub use projectile::{Projectile, ProjectileSimulator};
pub use scene::{traverse, Node};
pub use stack::TransformStack;
pub use state::{DrawMode, SceneState, TankPose};
pub use transform::{LocalTransform, Op, Transform};
pub use tuning::Tuning;
