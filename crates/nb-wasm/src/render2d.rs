//! Canvas2D software renderer.
//!
//! Paints a screen-space `DrawList` to an HTML `<canvas>` via
//! `CanvasRenderingContext2d`.

use nb_core::model::EdgeKind;
use nb_render::paint::{DrawCmd, DrawList};
use web_sys::CanvasRenderingContext2d;

const CORNER_RADIUS: f64 = 8.0;
const FONT_SIZE: f64 = 13.0;
const LABEL_PADDING: f64 = 10.0;

/// Theme-dependent colors for the canvas renderer.
pub struct CanvasTheme {
    pub bg: &'static str,
    pub grid: &'static str,
    pub node_fill: &'static str,
    pub node_border: &'static str,
    pub node_text: &'static str,
    pub primary_edge: &'static str,
    pub alias_edge: &'static str,
    pub accent: &'static str,
}

impl CanvasTheme {
    /// Light theme: warm white canvas.
    pub fn light() -> Self {
        Self {
            bg: "#F5F5F7",
            grid: "rgba(0, 0, 0, 0.05)",
            node_fill: "#FFFFFF",
            node_border: "#D1D1D6",
            node_text: "#1D1D1F",
            primary_edge: "#6B7080",
            alias_edge: "#A1A1AA",
            accent: "#4FC3F7",
        }
    }

    /// Dark theme.
    pub fn dark() -> Self {
        Self {
            bg: "#1C1C1E",
            grid: "rgba(255, 255, 255, 0.04)",
            node_fill: "#2C2C2E",
            node_border: "#48484A",
            node_text: "#F2F2F7",
            primary_edge: "#98989D",
            alias_edge: "#636366",
            accent: "#4FC3F7",
        }
    }
}

/// Paint a draw list. Commands are already in paint order.
pub fn render_list(
    ctx: &CanvasRenderingContext2d,
    list: &DrawList,
    canvas_width: f64,
    canvas_height: f64,
    theme: &CanvasTheme,
) {
    ctx.set_fill_style_str(theme.bg);
    ctx.fill_rect(0.0, 0.0, canvas_width, canvas_height);

    draw_grid(ctx, canvas_width, canvas_height, theme);

    for cmd in &list.commands {
        match cmd {
            DrawCmd::Edge { kind, from, to, .. } => {
                draw_edge(
                    ctx,
                    *kind,
                    (f64::from(from.x), f64::from(from.y)),
                    (f64::from(to.x), f64::from(to.y)),
                    list.scale,
                    theme,
                );
            }
            DrawCmd::Node {
                text,
                rect,
                selected,
                editing,
                ..
            } => {
                draw_node(ctx, rect, list.scale, *selected, theme);
                // The page overlays its text field on a node being edited.
                if !editing {
                    draw_label(ctx, rect, text, list.scale, theme);
                }
            }
        }
    }
}

fn draw_grid(ctx: &CanvasRenderingContext2d, width: f64, height: f64, theme: &CanvasTheme) {
    ctx.set_fill_style_str(theme.grid);
    let spacing = 20.0;
    let mut x = 0.0;
    while x < width {
        let mut y = 0.0;
        while y < height {
            ctx.fill_rect(x, y, 1.0, 1.0);
            y += spacing;
        }
        x += spacing;
    }
}

fn draw_edge(
    ctx: &CanvasRenderingContext2d,
    kind: EdgeKind,
    (x1, y1): (f64, f64),
    (x2, y2): (f64, f64),
    scale: f64,
    theme: &CanvasTheme,
) {
    ctx.save();
    ctx.begin_path();
    match kind {
        EdgeKind::Primary => {
            ctx.set_stroke_style_str(theme.primary_edge);
            ctx.set_line_width(1.5 * scale);
        }
        EdgeKind::Alias => {
            ctx.set_stroke_style_str(theme.alias_edge);
            ctx.set_line_width(1.0 * scale);
            let _ = ctx.set_line_dash(&js_sys::Array::of2(
                &(6.0 * scale).into(),
                &(4.0 * scale).into(),
            ));
        }
    }
    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    ctx.stroke();
    ctx.restore();
}

fn draw_node(
    ctx: &CanvasRenderingContext2d,
    rect: &kurbo::Rect,
    scale: f64,
    selected: bool,
    theme: &CanvasTheme,
) {
    let (x, y, w, h) = (rect.x0, rect.y0, rect.width(), rect.height());
    let radius = CORNER_RADIUS * scale;

    ctx.save();
    rounded_rect_path(ctx, x, y, w, h, radius);
    ctx.set_fill_style_str(theme.node_fill);
    ctx.fill();
    ctx.set_stroke_style_str(theme.node_border);
    ctx.set_line_width(1.0);
    ctx.stroke();

    if selected {
        ctx.set_stroke_style_str(theme.accent);
        ctx.set_line_width(2.0);
        rounded_rect_path(ctx, x - 1.0, y - 1.0, w + 2.0, h + 2.0, radius);
        ctx.stroke();
    }
    ctx.restore();
}

fn draw_label(
    ctx: &CanvasRenderingContext2d,
    rect: &kurbo::Rect,
    text: &str,
    scale: f64,
    theme: &CanvasTheme,
) {
    let max_width = (rect.width() - 2.0 * LABEL_PADDING * scale).max(0.0);
    ctx.save();
    ctx.set_font(&format!(
        "{}px -apple-system, BlinkMacSystemFont, 'Inter', sans-serif",
        FONT_SIZE * scale
    ));
    ctx.set_fill_style_str(theme.node_text);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let center = rect.center();
    let label = fit_label(ctx, text, max_width);
    let _ = ctx.fill_text(&label, center.x, center.y);
    ctx.restore();
}

/// Truncate with an ellipsis until the label fits `max_width`.
fn fit_label(ctx: &CanvasRenderingContext2d, text: &str, max_width: f64) -> String {
    let fits = |s: &str| ctx.measure_text(s).map(|m| m.width() <= max_width).unwrap_or(true);
    if fits(text) {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().chain(std::iter::once(&'…')).collect();
        if fits(&candidate) {
            return candidate;
        }
    }
    String::new()
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
    let r = r.min(w / 2.0).min(h / 2.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.line_to(x + w - r, y);
    ctx.arc_to(x + w, y, x + w, y + r, r).unwrap_or(());
    ctx.line_to(x + w, y + h - r);
    ctx.arc_to(x + w, y + h, x + w - r, y + h, r).unwrap_or(());
    ctx.line_to(x + r, y + h);
    ctx.arc_to(x, y + h, x, y + h - r, r).unwrap_or(());
    ctx.line_to(x, y + r);
    ctx.arc_to(x, y, x + r, y, r).unwrap_or(());
    ctx.close_path();
}
