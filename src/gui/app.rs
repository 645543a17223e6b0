use crate::auth::{AuthProvider, Session};
use crate::canvas::{export, render, Drawing, Point, StrokeCapture, StrokeColor};
use crate::gemini::VisionModel;
use crate::gui::login::LoginForm;
use crate::interpret::ComputationResult;
use crate::process::{handle_process, ProcessRequest, ProcessResponse};
use crate::settings::Settings;
use eframe::egui::{
    self, Align2, PointerButton, Rounding, Sense, Stroke as LineStroke, Vec2,
};
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::info;

enum Screen {
    Login(LoginForm),
    Canvas,
}

pub struct CanvasAiApp {
    settings: Settings,
    screen: Screen,
    session: Option<Session>,

    drawing: Drawing,
    capture: StrokeCapture,
    selected_color: StrokeColor,
    result: Option<ComputationResult>,
    // canvas size in egui points from the last painted frame, used as the
    // export surface size
    canvas_size: (u32, u32),

    model: Arc<dyn VisionModel + Send + Sync>,
    auth: Arc<dyn AuthProvider + Send + Sync>,
    busy: Arc<AtomicBool>,
    outcome: Arc<Mutex<Option<ProcessResponse>>>,

    toasts: Toasts,
}

impl CanvasAiApp {
    pub fn new(
        settings: Settings,
        model: Arc<dyn VisionModel + Send + Sync>,
        auth: Arc<dyn AuthProvider + Send + Sync>,
    ) -> Self {
        let toasts = Toasts::new().anchor(Align2::RIGHT_TOP, [10.0, 10.0]);
        Self {
            settings,
            screen: Screen::Login(LoginForm::default()),
            session: None,
            drawing: Drawing::default(),
            capture: StrokeCapture::default(),
            selected_color: StrokeColor::default(),
            result: None,
            canvas_size: (0, 0),
            model,
            auth,
            busy: Arc::new(AtomicBool::new(false)),
            outcome: Arc::new(Mutex::new(None)),
            toasts,
        }
    }

    fn add_toast(&mut self, kind: ToastKind, text: String) {
        if !self.settings.enable_toasts {
            return;
        }
        self.toasts.add(Toast {
            text: text.into(),
            kind,
            options: ToastOptions::default()
                .duration_in_seconds(self.settings.toast_duration as f64),
        });
    }

    /// Applies a finished submission, if any. A reply that lands after a
    /// reset is still applied to the current drawing; results are advisory
    /// overlays, not state the drawing depends on.
    fn poll_submission(&mut self) {
        let Some(response) = self.outcome.lock().ok().and_then(|mut slot| slot.take()) else {
            return;
        };
        match response.computation() {
            Some(result) => {
                let text = match &result {
                    ComputationResult::Mathematical(_) => {
                        format!("Calculation Result: = {}", result.display_value())
                    }
                    ComputationResult::Caption(caption) => caption.clone(),
                };
                self.add_toast(ToastKind::Success, text);
                self.result = Some(result);
            }
            None => {
                let details = response
                    .error_details()
                    .unwrap_or_else(|| "processing failed".to_string());
                self.add_toast(ToastKind::Error, details);
                self.result = None;
            }
        }
    }

    /// Exports the current drawing and hands it to the processing handler
    /// on a worker thread. The busy flag keeps a single request in flight;
    /// a click while one is pending is ignored.
    fn submit(&mut self, ctx: &egui::Context) {
        let (width, height) = self.canvas_size;
        if width == 0 || height == 0 {
            return;
        }
        let image = match export::export_data_url(&self.drawing, width, height) {
            Ok(image) => image,
            Err(err) => {
                self.add_toast(ToastKind::Error, format!("Export failed: {err:#}"));
                return;
            }
        };
        if self.busy.swap(true, Ordering::SeqCst) {
            return;
        }
        info!(width, height, "submitting canvas for processing");

        let model = Arc::clone(&self.model);
        let outcome = Arc::clone(&self.outcome);
        let busy = Arc::clone(&self.busy);
        let ctx = ctx.clone();
        thread::spawn(move || {
            let response = handle_process(&ProcessRequest { image: Some(image) }, model.as_ref());
            if let Ok(mut slot) = outcome.lock() {
                *slot = Some(response);
            }
            busy.store(false, Ordering::SeqCst);
            ctx.request_repaint();
        });
    }

    fn reset(&mut self) {
        self.drawing.clear();
        self.capture.end_stroke();
        self.result = None;
    }

    fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            info!(email = %session.email, "session ended");
        }
        // The drawing belongs to the session and dies with it.
        self.reset();
        self.screen = Screen::Login(LoginForm::default());
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("CanvasAI");
                ui.separator();

                let mut picked = None;
                for color in StrokeColor::ALL {
                    let (rect, response) =
                        ui.allocate_exact_size(Vec2::splat(20.0), Sense::click());
                    let painter = ui.painter();
                    painter.rect_filled(rect, Rounding::same(10.0), color.as_color32());
                    if color == self.selected_color {
                        painter.rect_stroke(
                            rect,
                            Rounding::same(10.0),
                            LineStroke::new(2.0, ui.visuals().strong_text_color()),
                        );
                    }
                    if response.on_hover_text(color.name()).clicked() {
                        picked = Some(color);
                    }
                }
                if let Some(color) = picked {
                    self.selected_color = color;
                }
                ui.separator();

                if ui.button("Reset").clicked() {
                    self.reset();
                }
                let busy = self.busy.load(Ordering::SeqCst);
                let label = if busy { "Fetching result..." } else { "Get Result" };
                if ui.add_enabled(!busy, egui::Button::new(label)).clicked() {
                    self.submit(ctx);
                }
                if ui.button("Logout").clicked() {
                    self.logout();
                }
            });
        });
    }

    fn show_canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
                let rect = response.rect;
                self.canvas_size = (
                    rect.width().round().max(0.0) as u32,
                    rect.height().round().max(0.0) as u32,
                );

                let to_canvas =
                    |pos: egui::Pos2| Point::new(pos.x - rect.min.x, pos.y - rect.min.y);

                if response.drag_started_by(PointerButton::Primary) {
                    if let Some(pos) = response.interact_pointer_pos() {
                        self.capture.begin_stroke(
                            &mut self.drawing,
                            to_canvas(pos),
                            self.selected_color,
                        );
                    }
                }
                if response.dragged_by(PointerButton::Primary) {
                    if let Some(pos) = response.interact_pointer_pos() {
                        self.capture.extend_stroke(&mut self.drawing, to_canvas(pos));
                    }
                }
                if response.drag_stopped_by(PointerButton::Primary) {
                    self.capture.end_stroke();
                }

                render::paint_frame(&painter, rect, &self.drawing, self.result.as_ref());
            });
    }
}

impl eframe::App for CanvasAiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_submission();

        let mut new_session = None;
        if let Screen::Login(form) = &mut self.screen {
            new_session = form.show(ctx, &self.auth);
        }
        if let Some(session) = new_session {
            info!(email = %session.email, "session started");
            self.session = Some(session);
            self.drawing = Drawing::default();
            self.capture = StrokeCapture::default();
            self.result = None;
            self.screen = Screen::Canvas;
        }

        if matches!(self.screen, Screen::Canvas) {
            self.show_header(ctx);
            self.show_canvas(ctx);
        }

        self.toasts.show(ctx);
    }
}
