pub mod config;
pub mod console;
pub mod input;
pub mod logging;
pub mod render;
pub mod session;
