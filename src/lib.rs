pub mod auth;
pub mod canvas;
pub mod gemini;
pub mod gui;
pub mod interpret;
pub mod logging;
pub mod process;
pub mod settings;
