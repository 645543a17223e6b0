mod app;
mod login;

pub use app::CanvasAiApp;
pub use login::LoginForm;
