pub mod frame;
pub mod ray;
pub mod scene;
