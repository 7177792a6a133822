pub mod lighting;
pub mod overlay;
pub mod picking;
pub mod render;
