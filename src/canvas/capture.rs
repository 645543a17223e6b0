use crate::canvas::model::{Drawing, Point, Stroke, StrokeColor, StrokeId};

/// Target spacing between rendered points, in pixels.
const POINT_SPACING: f32 = 5.0;
/// Floor on the interpolation step count so fast gestures stay smooth even
/// when pointer-move events arrive far apart.
const MIN_STEPS: usize = 5;

/// Evenly spaced points along the straight segment from `start` towards
/// `end`, excluding `end` itself. Purely a function of the two endpoints:
/// identical inputs always produce identical sequences.
pub fn intermediate_points(start: Point, end: Point) -> Vec<Point> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let distance = start.distance(end);
    let steps = ((distance / POINT_SPACING).round() as usize).max(MIN_STEPS);

    (0..steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            Point::new(start.x + dx * t, start.y + dy * t)
        })
        .collect()
}

/// Translates pointer gestures into strokes on a [`Drawing`]. At most one
/// stroke is in progress at a time.
#[derive(Debug, Default)]
pub struct StrokeCapture {
    active: Option<ActiveStroke>,
}

#[derive(Debug)]
struct ActiveStroke {
    id: StrokeId,
    last: Point,
}

impl StrokeCapture {
    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// Starts a new stroke seeded with `point` in the currently selected
    /// color. Silently a no-op (returning `None`) while another stroke is
    /// still in progress.
    pub fn begin_stroke(
        &mut self,
        drawing: &mut Drawing,
        point: Point,
        color: StrokeColor,
    ) -> Option<StrokeId> {
        if self.active.is_some() {
            return None;
        }
        let id = drawing.push(Stroke::new(point, color));
        self.active = Some(ActiveStroke { id, last: point });
        Some(id)
    }

    /// Appends the interpolated intermediate points plus `point` itself, in
    /// order, to the stroke in progress. Ignored when no stroke is active.
    pub fn extend_stroke(&mut self, drawing: &mut Drawing, point: Point) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        // The drawing may have been cleared under an in-flight gesture; a
        // stale id then simply drops the points.
        let Some(stroke) = drawing.stroke_mut(active.id) else {
            return;
        };
        stroke.points.extend(intermediate_points(active.last, point));
        stroke.points.push(point);
        active.last = point;
    }

    /// Finalizes the stroke in progress; no further points can be appended.
    pub fn end_stroke(&mut self) {
        self.active = None;
    }
}
