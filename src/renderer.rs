use crate::color_utils::{is_transparent, parse_color_or_black, svg_opacity, to_svg_hex};
use crate::models::RenderStyle;
use crate::point::Point2;
use crate::session::RenderFrame;
use crate::utils::calculate_viewbox;

/// Half the arm length of the cross drawn at each target
const TARGET_MARK_SIZE: f64 = 6.0;

fn stroke_attrs(color: &str, width: f64) -> String {
    let color = parse_color_or_black(color);
    format!(
        r#"fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
        to_svg_hex(color),
        svg_opacity(color),
        width
    )
}

fn fill_attrs(color: &str) -> String {
    let color = parse_color_or_black(color);
    format!(
        r#"fill="{}" fill-opacity="{}""#,
        to_svg_hex(color),
        svg_opacity(color)
    )
}

fn polyline_path(points: &[Point2]) -> Option<String> {
    let (first, rest) = points.split_first()?;
    let mut d = format!("M {},{}", first.x, first.y);
    for p in rest {
        d.push_str(&format!(" L {},{}", p.x, p.y));
    }
    Some(d)
}

fn render_curve(frame: &RenderFrame, style: &RenderStyle) -> String {
    match polyline_path(&frame.curve) {
        Some(d) => format!(
            r#"<path class="curve" d="{}" {} stroke-linejoin="round" stroke-linecap="round"/>"#,
            d,
            stroke_attrs(&style.curve_color, style.curve_width)
        ),
        None => String::new(),
    }
}

fn render_control_polygon(frame: &RenderFrame, style: &RenderStyle) -> String {
    match polyline_path(&frame.polygon.points()) {
        Some(d) => format!(
            r#"<path class="control-polygon" d="{}" {}/>"#,
            d,
            stroke_attrs(&style.polygon_color, style.polygon_width)
        ),
        None => String::new(),
    }
}

fn render_control_points(frame: &RenderFrame, style: &RenderStyle) -> String {
    let fill = fill_attrs(&style.control_point_color);
    frame
        .polygon
        .points()
        .iter()
        .map(|p| {
            format!(
                r#"<circle class="control-point" cx="{}" cy="{}" r="{}" {}/>"#,
                p.x, p.y, style.control_point_radius, fill
            )
        })
        .collect::<Vec<_>>()
        .join("\n  ")
}

fn render_tangents(frame: &RenderFrame, style: &RenderStyle) -> String {
    let attrs = stroke_attrs(&style.tangent_color, 2.0);
    frame
        .tangents
        .iter()
        .map(|mark| {
            let tip = mark.point + style.tangent_length * mark.direction;
            format!(
                r#"<line class="tangent" data-t="{}" x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
                mark.t, mark.point.x, mark.point.y, tip.x, tip.y, attrs
            )
        })
        .collect::<Vec<_>>()
        .join("\n  ")
}

fn render_targets(frame: &RenderFrame, style: &RenderStyle) -> String {
    let attrs = stroke_attrs(&style.target_color, 1.5);
    frame
        .targets
        .iter()
        .map(|t| {
            let s = TARGET_MARK_SIZE;
            format!(
                r#"<path class="target" d="M {},{} L {},{} M {},{} L {},{}" {}/>"#,
                t.x - s,
                t.y - s,
                t.x + s,
                t.y + s,
                t.x - s,
                t.y + s,
                t.x + s,
                t.y - s,
                attrs
            )
        })
        .collect::<Vec<_>>()
        .join("\n  ")
}

/// SVG document for one frame, drawn back to front:
/// background, control polygon, curve, tangents, targets, control points
pub fn generate_svg(frame: &RenderFrame, style: &RenderStyle) -> String {
    let viewbox = calculate_viewbox(frame, style);
    let background = parse_color_or_black(&style.background);

    let background_svg = if !is_transparent(background) {
        format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
            viewbox.min_x,
            viewbox.min_y,
            viewbox.width,
            viewbox.height,
            fill_attrs(&style.background)
        )
    } else {
        String::new()
    };

    let body = [
        background_svg,
        render_control_polygon(frame, style),
        render_curve(frame, style),
        render_tangents(frame, style),
        render_targets(frame, style),
        render_control_points(frame, style),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join("\n  ");

    format!(
        "<svg viewBox=\"{} {} {} {}\" width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n  {}\n</svg>",
        viewbox.min_x,
        viewbox.min_y,
        viewbox.width,
        viewbox.height,
        viewbox.width.ceil(),
        viewbox.height.ceil(),
        body
    )
}
