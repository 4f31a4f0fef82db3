use crate::models::{RenderStyle, ViewBox};
use crate::point::Point2;
use crate::session::RenderFrame;
use anyhow::Result;
use euclid::default::{Box2D, Point2D};
use std::path::Path;
use tiny_skia::Pixmap;

/// Save a pixmap to PNG with compression quality control (0-100).
/// Maps 0-100 to PNG compression types:
/// - 0-25: Fast (fastest encoding, larger files)
/// - 26-75: Default (balanced)
/// - 76-100: Best (slowest encoding, smallest files)
pub fn save_png_with_quality(
    pixmap: &Pixmap,
    output_path: &Path,
    quality: u8,
) -> Result<()> {
    use std::fs::File;
    use std::io::BufWriter;

    let file = File::create(output_path)
        .map_err(|e| anyhow::anyhow!("Failed to create PNG file: {e}"))?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, pixmap.width(), pixmap.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_filter(png::FilterType::Paeth);
    encoder.set_compression(compression_for_quality(quality));

    let mut writer = encoder
        .write_header()
        .map_err(|e| anyhow::anyhow!("Failed to write PNG header: {e}"))?;

    // tiny-skia stores premultiplied RGBA
    let data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|px| {
            let c = px.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    writer
        .write_image_data(&data)
        .map_err(|e| anyhow::anyhow!("Failed to write PNG data: {e}"))?;

    Ok(())
}

pub fn compression_for_quality(quality: u8) -> png::Compression {
    if quality <= 25 {
        png::Compression::Fast
    } else if quality <= 75 {
        png::Compression::Default
    } else {
        png::Compression::Best
    }
}

/// Every point a frame draws, including tangent mark tips
pub fn frame_points(frame: &RenderFrame, style: &RenderStyle) -> Vec<Point2> {
    let mut points: Vec<Point2> = frame.polygon.points().to_vec();
    points.extend_from_slice(&frame.curve);
    points.extend_from_slice(&frame.targets);
    points.extend(
        frame
            .tangents
            .iter()
            .map(|mark| mark.point + style.tangent_length * mark.direction),
    );
    points
}

/// Calculate the viewbox that encompasses everything drawn in a frame
pub fn calculate_viewbox(frame: &RenderFrame, style: &RenderStyle) -> ViewBox {
    const PADDING: f64 = 40.0;

    let points: Vec<Point2D<f64>> = frame_points(frame, style)
        .into_iter()
        .filter(|p| p.is_finite())
        .map(Point2D::from)
        .collect();

    if points.is_empty() {
        return ViewBox {
            min_x: 0.0,
            min_y: 0.0,
            width: 800.0,
            height: 600.0,
        };
    }

    let bounds = Box2D::from_points(&points).inflate(PADDING, PADDING);
    ViewBox {
        min_x: bounds.min.x,
        min_y: bounds.min.y,
        width: bounds.width(),
        height: bounds.height(),
    }
}
