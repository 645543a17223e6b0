use base64::{engine::general_purpose, Engine as _};
use canvas_ai::canvas::export::{export_data_url, render_to_image, DATA_URL_PREFIX};
use canvas_ai::canvas::{Drawing, Point, StrokeCapture, StrokeColor};

fn drawing_with_line(from: Point, to: Point, color: StrokeColor) -> Drawing {
    let mut drawing = Drawing::default();
    let mut capture = StrokeCapture::default();
    capture.begin_stroke(&mut drawing, from, color);
    capture.extend_stroke(&mut drawing, to);
    capture.end_stroke();
    drawing
}

#[test]
fn empty_drawing_exports_all_opaque_white() {
    let img = render_to_image(&Drawing::default(), 64, 48);
    assert_eq!(img.dimensions(), (64, 48));
    assert!(img.pixels().all(|px| px.0 == [255, 255, 255, 255]));
}

#[test]
fn empty_export_survives_jpeg_compression_as_white() {
    let url = export_data_url(&Drawing::default(), 32, 32).expect("export");
    let bytes = general_purpose::STANDARD
        .decode(&url[DATA_URL_PREFIX.len()..])
        .expect("valid base64");
    let decoded = image::load_from_memory(&bytes).expect("decodable jpeg");
    let rgb = decoded.to_rgb8();
    assert_eq!(rgb.dimensions(), (32, 32));
    for px in rgb.pixels() {
        for channel in px.0 {
            assert!(channel >= 250, "channel {channel} drifted from white");
        }
    }
}

#[test]
fn raster_matches_the_live_frame_for_background_and_stroke_color() {
    let drawing = drawing_with_line(
        Point::new(4.0, 16.0),
        Point::new(28.0, 16.0),
        StrokeColor::Blue,
    );
    let img = render_to_image(&drawing, 32, 32);

    // Pixels on the stroke take the stroke color, pixels far away stay
    // background white, exactly as the live renderer paints them.
    assert_eq!(img.get_pixel(16, 16).0, [0, 0, 255, 255]);
    assert_eq!(img.get_pixel(16, 2).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(2, 30).0, [255, 255, 255, 255]);
}

#[test]
fn stroke_colors_survive_the_jpeg_round_trip_approximately() {
    let drawing = drawing_with_line(
        Point::new(4.0, 16.0),
        Point::new(28.0, 16.0),
        StrokeColor::Red,
    );
    let url = export_data_url(&drawing, 32, 32).expect("export");
    let bytes = general_purpose::STANDARD
        .decode(&url[DATA_URL_PREFIX.len()..])
        .expect("valid base64");
    let rgb = image::load_from_memory(&bytes).expect("decodable jpeg").to_rgb8();

    // Loose bounds: chroma subsampling bleeds the surrounding white into
    // the thin line.
    let on_stroke = rgb.get_pixel(16, 16).0;
    assert!(on_stroke[0] > 140, "red channel too weak: {on_stroke:?}");
    assert!(on_stroke[1] < 140 && on_stroke[2] < 140, "not red: {on_stroke:?}");

    let off_stroke = rgb.get_pixel(2, 30).0;
    assert!(off_stroke.iter().all(|&channel| channel >= 230));
}

#[test]
fn single_point_strokes_are_invisible_in_the_export() {
    let mut drawing = Drawing::default();
    let mut capture = StrokeCapture::default();
    capture.begin_stroke(&mut drawing, Point::new(16.0, 16.0), StrokeColor::Black);
    capture.end_stroke();

    let img = render_to_image(&drawing, 32, 32);
    assert!(img.pixels().all(|px| px.0 == [255, 255, 255, 255]));
}

#[test]
fn export_output_is_a_data_url() {
    let url = export_data_url(&Drawing::default(), 8, 8).expect("export");
    assert!(url.starts_with("data:image/jpeg;base64,"));
}
