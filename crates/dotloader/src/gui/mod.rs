pub mod app;
pub mod canvas;
pub mod theme;
pub mod window;
