use anyhow::Context;
use canvas_ai::auth::HostedAuthProvider;
use canvas_ai::gemini::GeminiClient;
use canvas_ai::gui::CanvasAiApp;
use canvas_ai::settings::Settings;
use eframe::egui;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load("settings.json")?;
    canvas_ai::logging::init(settings.debug_logging);

    // The processing endpoint cannot start without the model API key.
    let model = GeminiClient::from_env(settings.gemini_endpoint.clone())
        .context("vision model configuration")?;
    let auth = HostedAuthProvider::new(&settings.auth_url)?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("CanvasAI"),
        ..Default::default()
    };

    let app = CanvasAiApp::new(settings, Arc::new(model), Arc::new(auth));
    eframe::run_native(
        "CanvasAI",
        native_options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|err| anyhow::anyhow!("eframe exited with an error: {err}"))?;
    Ok(())
}
