use crate::color_utils::{is_transparent, parse_color_or_black, to_skia};
use crate::models::RenderStyle;
use crate::point::Point2;
use crate::session::RenderFrame;
use crate::utils::{calculate_viewbox, save_png_with_quality};
use anyhow::{Context, Result};
use palette::Srgba;
use std::path::Path;
use tiny_skia::*;

const TARGET_MARK_SIZE: f32 = 6.0;

fn paint_for(color: Srgba<u8>) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia(color));
    paint.anti_alias = true;
    paint
}

fn round_stroke(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    }
}

fn polyline(points: &[Point2]) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    let (x, y) = first.to_f32();
    pb.move_to(x, y);
    for p in rest {
        let (x, y) = p.to_f32();
        pb.line_to(x, y);
    }
    pb.finish()
}

fn stroke_polyline(
    pixmap: &mut Pixmap,
    points: &[Point2],
    color: &str,
    width: f64,
    transform: Transform,
) {
    let color = parse_color_or_black(color);
    if is_transparent(color) || width <= 0.0 {
        return;
    }
    // A single point has no segments to stroke
    if let Some(path) = polyline(points) {
        pixmap.stroke_path(
            &path,
            &paint_for(color),
            &round_stroke(width as f32),
            transform,
            None,
        );
    }
}

fn draw_control_points(pixmap: &mut Pixmap, frame: &RenderFrame, style: &RenderStyle, transform: Transform) {
    let paint = paint_for(parse_color_or_black(&style.control_point_color));
    let radius = style.control_point_radius as f32;
    for p in frame.polygon.points() {
        let (x, y) = p.to_f32();
        if let Some(circle) = PathBuilder::from_circle(x, y, radius) {
            pixmap.fill_path(&circle, &paint, FillRule::Winding, transform, None);
        }
    }
}

fn draw_tangents(pixmap: &mut Pixmap, frame: &RenderFrame, style: &RenderStyle, transform: Transform) {
    for mark in &frame.tangents {
        let tip = mark.point + style.tangent_length * mark.direction;
        stroke_polyline(pixmap, &[mark.point, tip], &style.tangent_color, 2.0, transform);
    }
}

fn draw_targets(pixmap: &mut Pixmap, frame: &RenderFrame, style: &RenderStyle, transform: Transform) {
    let color = parse_color_or_black(&style.target_color);
    let paint = paint_for(color);
    let stroke = round_stroke(1.5);
    let s = TARGET_MARK_SIZE;
    for target in &frame.targets {
        let (x, y) = target.to_f32();
        let mut pb = PathBuilder::new();
        pb.move_to(x - s, y - s);
        pb.line_to(x + s, y + s);
        pb.move_to(x - s, y + s);
        pb.line_to(x + s, y - s);
        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, &paint, &stroke, transform, None);
        }
    }
}

/// Rasterize one frame. `scale` multiplies the viewbox size in pixels;
/// `background` overrides the style's background color.
pub fn render_to_pixmap(
    frame: &RenderFrame,
    style: &RenderStyle,
    background: Option<Srgba<u8>>,
    scale: f32,
) -> Result<Pixmap> {
    let viewbox = calculate_viewbox(frame, style);
    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };

    let width = (viewbox.width * scale as f64).ceil().max(1.0) as u32;
    let height = (viewbox.height * scale as f64).ceil().max(1.0) as u32;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("Failed to create {width}x{height} pixmap"))?;

    let background = background.unwrap_or_else(|| parse_color_or_black(&style.background));
    if !is_transparent(background) {
        pixmap.fill(to_skia(background));
    }

    // Simulation coordinates -> pixels
    let transform = Transform::from_scale(scale, scale)
        .pre_translate(-viewbox.min_x as f32, -viewbox.min_y as f32);

    stroke_polyline(
        &mut pixmap,
        &frame.polygon.points(),
        &style.polygon_color,
        style.polygon_width,
        transform,
    );
    stroke_polyline(
        &mut pixmap,
        &frame.curve,
        &style.curve_color,
        style.curve_width,
        transform,
    );
    draw_tangents(&mut pixmap, frame, style, transform);
    draw_targets(&mut pixmap, frame, style, transform);
    draw_control_points(&mut pixmap, frame, style, transform);

    Ok(pixmap)
}

pub fn render_to_png(
    frame: &RenderFrame,
    style: &RenderStyle,
    output_path: &Path,
    background: Option<Srgba<u8>>,
    quality: u8,
    scale: f32,
) -> Result<()> {
    let pixmap = render_to_pixmap(frame, style, background, scale)?;
    save_png_with_quality(&pixmap, output_path, quality)
        .with_context(|| format!("Failed to save PNG: {output_path:?}"))?;
    Ok(())
}
