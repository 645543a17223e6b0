use eframe::egui::Color32;

/// A single sampled coordinate in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The palette offered by the header toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeColor {
    #[default]
    Black,
    Red,
    Green,
    Blue,
    Purple,
    Orange,
}

impl StrokeColor {
    pub const ALL: [StrokeColor; 6] = [
        StrokeColor::Black,
        StrokeColor::Red,
        StrokeColor::Green,
        StrokeColor::Blue,
        StrokeColor::Purple,
        StrokeColor::Orange,
    ];

    pub fn as_color32(self) -> Color32 {
        match self {
            StrokeColor::Black => Color32::BLACK,
            StrokeColor::Red => Color32::from_rgb(255, 0, 0),
            StrokeColor::Green => Color32::from_rgb(0, 128, 0),
            StrokeColor::Blue => Color32::from_rgb(0, 0, 255),
            StrokeColor::Purple => Color32::from_rgb(128, 0, 128),
            StrokeColor::Orange => Color32::from_rgb(255, 165, 0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StrokeColor::Black => "black",
            StrokeColor::Red => "red",
            StrokeColor::Green => "green",
            StrokeColor::Blue => "blue",
            StrokeColor::Purple => "purple",
            StrokeColor::Orange => "orange",
        }
    }
}

/// One continuous pointer-down-to-pointer-up gesture. The color is fixed
/// when the stroke is started and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub color: StrokeColor,
}

impl Stroke {
    pub fn new(seed: Point, color: StrokeColor) -> Self {
        Self {
            points: vec![seed],
            color,
        }
    }

    /// A stroke with fewer than two points leaves no visible mark.
    pub fn is_renderable(&self) -> bool {
        self.points.len() >= 2
    }
}

/// Identifier handed out by `begin_stroke`; indexes into the owning
/// [`Drawing`] for the lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeId(pub(crate) usize);

/// The ordered collection of strokes for the current session and the single
/// source of truth for rendering. Append-only while drawing; `clear` is the
/// only removal and resets the whole drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drawing {
    strokes: Vec<Stroke>,
}

impl Drawing {
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub(crate) fn push(&mut self, stroke: Stroke) -> StrokeId {
        self.strokes.push(stroke);
        StrokeId(self.strokes.len() - 1)
    }

    pub(crate) fn stroke_mut(&mut self, id: StrokeId) -> Option<&mut Stroke> {
        self.strokes.get_mut(id.0)
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }
}
