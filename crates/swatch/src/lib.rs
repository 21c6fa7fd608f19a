pub mod color;
pub mod compose;
pub mod config;
pub mod flow;
pub mod geometry;
pub mod macros;
pub mod material;
pub mod pending;
pub mod picker;
pub mod profile;
pub mod shades;
pub mod wheel;
