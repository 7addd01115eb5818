pub mod baseline;
pub mod render;
