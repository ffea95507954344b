// extensions/mod.rs
//
// Optional extension modules for the engine.
// Decoupled from core Entity/Scene: games opt in by creating these systems.

pub mod transform;

pub use transform::{compose, LocalTransform, TransformGraph};
