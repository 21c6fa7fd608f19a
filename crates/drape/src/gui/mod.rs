pub mod app;
pub mod materials;
pub mod theme;
pub mod wheel;
