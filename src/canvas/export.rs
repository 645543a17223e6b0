use crate::canvas::model::{Drawing, Point};
use crate::canvas::render::STROKE_WIDTH;
use anyhow::{ensure, Context, Result};
use base64::{engine::general_purpose, Engine as _};
use image::{Rgba, RgbaImage};
use std::io::Cursor;

const JPEG_QUALITY: u8 = 90;
pub const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Rasterizes the drawing onto an off-surface buffer with an opaque white
/// background, independent of whatever the live view shows. Strokes with
/// fewer than two points are skipped, matching the on-screen renderer.
pub fn render_to_image(drawing: &Drawing, width: u32, height: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    for stroke in drawing.strokes() {
        if !stroke.is_renderable() {
            continue;
        }
        let [r, g, b, a] = stroke.color.as_color32().to_array();
        let color = Rgba([r, g, b, a]);
        for pair in stroke.points.windows(2) {
            draw_line(&mut img, pair[0], pair[1], color, STROKE_WIDTH);
        }
    }
    img
}

/// JPEG-compresses the rendered drawing and wraps it in a
/// `data:image/jpeg;base64,` URL ready for the processing endpoint.
pub fn export_data_url(drawing: &Drawing, width: u32, height: u32) -> Result<String> {
    ensure!(width > 0 && height > 0, "export surface must be non-empty");
    let rgb = image::DynamicImage::ImageRgba8(render_to_image(drawing, width, height)).into_rgb8();
    let mut buf = Cursor::new(Vec::new());
    rgb.write_to(&mut buf, image::ImageOutputFormat::Jpeg(JPEG_QUALITY))
        .context("encode canvas as jpeg")?;
    Ok(format!(
        "{DATA_URL_PREFIX}{}",
        general_purpose::STANDARD.encode(buf.get_ref())
    ))
}

/// Stamped line with circular caps, so segment joints come out rounded the
/// same way the live renderer draws them.
fn draw_line(img: &mut RgbaImage, start: Point, end: Point, color: Rgba<u8>, thickness: f32) {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
    let radius = (thickness / 2.0).max(0.5);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        draw_disc(img, start.x + dx * t, start.y + dy * t, radius, color);
    }
}

fn draw_disc(img: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    let radius_sq = radius * radius;
    let width = img.width() as i32;
    let height = img.height() as i32;
    let min_x = (cx - radius).floor().max(0.0) as i32;
    let max_x = ((cx + radius).ceil() as i32).min(width - 1);
    let min_y = (cy - radius).floor().max(0.0) as i32;
    let max_y = ((cy + radius).ceil() as i32).min(height - 1);
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let ox = x as f32 + 0.5 - cx;
            let oy = y as f32 + 0.5 - cy;
            if ox * ox + oy * oy <= radius_sq {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::capture::StrokeCapture;
    use crate::canvas::model::StrokeColor;

    #[test]
    fn empty_drawing_renders_opaque_white() {
        let img = render_to_image(&Drawing::default(), 16, 16);
        assert!(img
            .pixels()
            .all(|px| px.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn single_point_stroke_leaves_no_mark() {
        let mut drawing = Drawing::default();
        let mut capture = StrokeCapture::default();
        capture.begin_stroke(&mut drawing, Point::new(8.0, 8.0), StrokeColor::Red);
        capture.end_stroke();

        let img = render_to_image(&drawing, 16, 16);
        assert!(img.pixels().all(|px| px.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn stroke_pixels_take_the_stroke_color() {
        let mut drawing = Drawing::default();
        let mut capture = StrokeCapture::default();
        capture.begin_stroke(&mut drawing, Point::new(2.0, 8.0), StrokeColor::Black);
        capture.extend_stroke(&mut drawing, Point::new(14.0, 8.0));
        capture.end_stroke();

        let img = render_to_image(&drawing, 16, 16);
        assert_eq!(img.get_pixel(8, 8).0, [0, 0, 0, 255]);
        // far corner stays background
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn export_produces_a_jpeg_data_url() {
        let url = export_data_url(&Drawing::default(), 8, 8).expect("export");
        assert!(url.starts_with(DATA_URL_PREFIX));
        let b64 = &url[DATA_URL_PREFIX.len()..];
        let bytes = general_purpose::STANDARD.decode(b64).expect("valid base64");
        // JPEG SOI marker
        assert_eq!(&bytes[..2], &[0xff, 0xd8]);
    }

    #[test]
    fn export_rejects_a_zero_sized_surface() {
        assert!(export_data_url(&Drawing::default(), 0, 10).is_err());
    }
}
