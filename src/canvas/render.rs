use crate::canvas::model::Drawing;
use crate::interpret::ComputationResult;
use eframe::egui::{
    Align2, Color32, FontId, Painter, Pos2, Rect, Rounding, Stroke as LineStroke, Vec2,
};

pub const STROKE_WIDTH: f32 = 2.0;
pub const BACKGROUND: Color32 = Color32::WHITE;

const RESULT_BOX_WIDTH_FRACTION: f32 = 0.8;
const RESULT_BOX_HEIGHT: f32 = 120.0;
const RESULT_BOX_PADDING: f32 = 20.0;
const RESULT_BOX_ROUNDING: f32 = 10.0;

/// Repaints the whole canvas from the drawing: solid background, every
/// stroke with at least two points as a rounded-cap polyline in its stored
/// color, then the result overlay when a result is present. The painter
/// works in egui points, so the output is already scaled for the display's
/// pixel density.
pub fn paint_frame(
    painter: &Painter,
    rect: Rect,
    drawing: &Drawing,
    result: Option<&ComputationResult>,
) {
    painter.rect_filled(rect, Rounding::ZERO, BACKGROUND);

    let origin = rect.min.to_vec2();
    for stroke in drawing.strokes() {
        if !stroke.is_renderable() {
            continue;
        }
        let color = stroke.color.as_color32();
        let cap_radius = STROKE_WIDTH / 2.0;
        if let (Some(first), Some(last)) = (stroke.points.first(), stroke.points.last()) {
            painter.circle_filled(Pos2::new(first.x, first.y) + origin, cap_radius, color);
            painter.circle_filled(Pos2::new(last.x, last.y) + origin, cap_radius, color);
        }
        for pair in stroke.points.windows(2) {
            painter.line_segment(
                [
                    Pos2::new(pair[0].x, pair[0].y) + origin,
                    Pos2::new(pair[1].x, pair[1].y) + origin,
                ],
                LineStroke::new(STROKE_WIDTH, color),
            );
        }
    }

    if let Some(result) = result {
        paint_result_overlay(painter, rect, result);
    }
}

/// Placement of the result overlay: 80% of the surface width, fixed height,
/// centered horizontally and sitting just above the bottom edge.
pub fn result_box(rect: Rect) -> Rect {
    let width = rect.width() * RESULT_BOX_WIDTH_FRACTION;
    let min = Pos2::new(
        rect.min.x + (rect.width() - width) / 2.0,
        rect.max.y - RESULT_BOX_HEIGHT - RESULT_BOX_PADDING,
    );
    Rect::from_min_size(min, Vec2::new(width, RESULT_BOX_HEIGHT))
}

fn paint_result_overlay(painter: &Painter, rect: Rect, result: &ComputationResult) {
    let overlay = result_box(rect);
    painter.rect_filled(overlay, Rounding::same(RESULT_BOX_ROUNDING), Color32::BLACK);

    let center_x = overlay.center().x;
    painter.text(
        Pos2::new(center_x, overlay.min.y + RESULT_BOX_PADDING),
        Align2::CENTER_TOP,
        result.title(),
        FontId::proportional(24.0),
        Color32::WHITE,
    );
    painter.text(
        Pos2::new(center_x, overlay.min.y + RESULT_BOX_PADDING + 34.0),
        Align2::CENTER_TOP,
        result.display_value(),
        FontId::proportional(32.0),
        Color32::WHITE,
    );
}
