pub mod lighting;
pub mod render;
pub mod rings;
pub mod rng;
pub mod starfield;
