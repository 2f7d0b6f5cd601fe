use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::options::RenderOptions;
use super::state::{NODE_RADIUS, NetworkState, control_point};

const BACKGROUND: &str = "#1a1a2e";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &NetworkState, options: &RenderOptions, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, options, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_arrow(ctx: &CanvasRenderingContext2d, tip: (f64, f64), dir: (f64, f64), size: f64) {
	let (ux, uy) = dir;
	let (back_x, back_y) = (tip.0 - ux * size, tip.1 - uy * size);
	let (px, py) = (-uy * size * 0.5, ux * size * 0.5);
	ctx.begin_path();
	ctx.move_to(tip.0, tip.1);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn unit(from: (f64, f64), to: (f64, f64)) -> Option<(f64, f64)> {
	let (dx, dy) = (to.0 - from.0, to.1 - from.1);
	let len = (dx * dx + dy * dy).sqrt();
	(len >= 0.001).then(|| (dx / len, dy / len))
}

fn draw_edges(state: &NetworkState, options: &RenderOptions, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, arrow_size) = (1.5 / k, 8.0 / k);
	let t = ease_out_cubic(state.hover.t);
	let positions = state.positions();

	for link in &state.edges {
		let (Some(&p1), Some(&p2)) = (positions.get(&link.from), positions.get(&link.to)) else {
			continue;
		};
		let via = control_point(p1, p2, &options.edges.smooth);
		// Tangents at both ends follow the control point when curved.
		let (Some(out_dir), Some(in_dir)) = (
			unit(p1, via.unwrap_or(p2)),
			unit(via.unwrap_or(p1), p2),
		) else {
			continue;
		};

		let lit = state.is_highlighted(link.from) && state.is_highlighted(link.to);
		let (alpha, width) = if lit {
			(0.6 + 0.3 * t, line_width * (1.0 + 0.3 * t))
		} else {
			(0.6 - 0.45 * t, line_width * (1.0 - 0.3 * t))
		};
		let color = format!("rgba(100, 180, 255, {alpha})");
		ctx.set_stroke_style_str(&color);
		ctx.set_fill_style_str(&color);
		ctx.set_line_width(width);

		let start = (p1.0 + out_dir.0 * NODE_RADIUS, p1.1 + out_dir.1 * NODE_RADIUS);
		let end = (p2.0 - in_dir.0 * NODE_RADIUS, p2.1 - in_dir.1 * NODE_RADIUS);
		ctx.begin_path();
		ctx.move_to(start.0, start.1);
		match via {
			Some((cx, cy)) => ctx.quadratic_curve_to(cx, cy, end.0, end.1),
			None => ctx.line_to(end.0, end.1),
		}
		ctx.stroke();

		if link.arrows.to {
			draw_arrow(ctx, end, in_dir, arrow_size);
		}
		if link.arrows.from {
			draw_arrow(ctx, start, (-out_dir.0, -out_dir.1), arrow_size);
		}
	}
}

fn draw_nodes(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let (active, t, k) = (
		state.hover.node.is_some() || state.hover.t > 0.0,
		ease_out_cubic(state.hover.t),
		state.transform.k,
	);
	let font = format!("{}px sans-serif", 11.0 / k.max(0.5));

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let (x, y) = (node.x() as f64, node.y() as f64);
		let lit = active && state.is_highlighted(idx);
		let (alpha, radius) = match (active, lit) {
			(false, _) => (1.0, NODE_RADIUS),
			(true, true) => (1.0, NODE_RADIUS * (1.0 + 0.3 * t)),
			(true, false) => (1.0 - 0.7 * t, NODE_RADIUS * (1.0 - 0.15 * t)),
		};
		let info = &node.data.user_data;

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();

		if state.hover.node == Some(idx) && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		if let Some(label) = &info.label {
			ctx.set_fill_style_str("rgba(255, 255, 255, 0.85)");
			ctx.set_font(&font);
			let _ = ctx.fill_text(label, x + radius + 3.0, y + 3.0);
		}
		ctx.set_global_alpha(1.0);
	});
}
