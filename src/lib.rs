pub mod astro;
pub mod config;
pub mod data;
pub mod geometry;
pub mod map;
pub mod predict;
pub mod render;
