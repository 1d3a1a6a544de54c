pub mod config;
pub mod distance;
pub mod loader;
pub mod visualize;
