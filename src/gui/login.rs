use crate::auth::{validate_credentials, AuthError, AuthProvider, Credentials, Session};
use eframe::egui::{self, Align2};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::debug;

/// Email/password form shown before the canvas. Failures surface in a
/// modal dialog naming the specific reason; the form stays editable and no
/// attempt is retried automatically.
pub struct LoginForm {
    email: String,
    password: String,
    dialog: Option<Dialog>,
    busy: Arc<AtomicBool>,
    outcome: Arc<Mutex<Option<Result<Session, AuthError>>>>,
}

struct Dialog {
    title: &'static str,
    message: String,
}

impl Dialog {
    fn from_error(err: &AuthError) -> Self {
        Self {
            title: err.dialog_title(),
            message: err.dialog_message(),
        }
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            dialog: None,
            busy: Arc::new(AtomicBool::new(false)),
            outcome: Arc::new(Mutex::new(None)),
        }
    }
}

impl LoginForm {
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Renders the form and returns the session once authentication has
    /// succeeded.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        provider: &Arc<dyn AuthProvider + Send + Sync>,
    ) -> Option<Session> {
        let mut session = None;
        if let Some(result) = self.outcome.lock().ok().and_then(|mut slot| slot.take()) {
            match result {
                Ok(s) => session = Some(s),
                Err(err) => self.dialog = Some(Dialog::from_error(&err)),
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(120.0);
                ui.heading("Welcome to CanvasAI");
                ui.label("Sign in with your email to get started.");
                ui.add_space(16.0);

                let busy = self.is_busy();
                ui.add_enabled_ui(!busy, |ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.email)
                            .hint_text("name@example.com")
                            .desired_width(260.0),
                    );
                    ui.add_space(4.0);
                    ui.add(
                        egui::TextEdit::singleline(&mut self.password)
                            .hint_text("Enter your password")
                            .password(true)
                            .desired_width(260.0),
                    );
                });
                ui.add_space(12.0);

                let label = if busy { "Signing in..." } else { "Log In" };
                if ui.add_enabled(!busy, egui::Button::new(label)).clicked() {
                    self.submit(provider, ctx);
                }
            });
        });

        self.show_dialog(ctx);
        session
    }

    fn submit(&mut self, provider: &Arc<dyn AuthProvider + Send + Sync>, ctx: &egui::Context) {
        let credentials = Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };
        // Cheap local checks before any provider round trip.
        if let Err(err) = validate_credentials(&credentials) {
            self.dialog = Some(Dialog::from_error(&err));
            return;
        }
        if self.busy.swap(true, Ordering::SeqCst) {
            return;
        }
        debug!("authenticating against hosted provider");

        let provider = Arc::clone(provider);
        let outcome = Arc::clone(&self.outcome);
        let busy = Arc::clone(&self.busy);
        let ctx = ctx.clone();
        thread::spawn(move || {
            let result = provider.authenticate(&credentials);
            if let Ok(mut slot) = outcome.lock() {
                *slot = Some(result);
            }
            busy.store(false, Ordering::SeqCst);
            ctx.request_repaint();
        });
    }

    fn show_dialog(&mut self, ctx: &egui::Context) {
        let mut close = false;
        if let Some(dialog) = &self.dialog {
            egui::Window::new(dialog.title)
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(&dialog.message);
                    ui.add_space(8.0);
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
        }
        if close {
            self.dialog = None;
        }
    }
}
