use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::NetworkGraphState;

const GOLD: &str = "#b8822e";

pub fn render(state: &NetworkGraphState, ctx: &CanvasRenderingContext2d, dpr: f64) {
	let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	if state.alpha <= 0.0 {
		return;
	}
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	if state.profile_count == 0 {
		ctx.set_font("11px monospace");
		ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", 0.12 * state.alpha));
		ctx.set_text_align("center");
		let _ = ctx.fill_text("// connecting...", state.width / 2.0, state.height / 2.0);
	}
}

fn draw_edges(state: &NetworkGraphState, ctx: &CanvasRenderingContext2d) {
	let (alpha, busy) = (state.alpha, state.is_busy());
	let nodes = &state.graph.nodes;

	for edge in &state.graph.edges {
		let connected = state.is_hovered(edge.source) || state.is_hovered(edge.target);
		// busy graphs only show the hovered node's links
		if busy && !connected {
			continue;
		}
		let (a, b) = (&nodes[edge.source], &nodes[edge.target]);

		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		if connected {
			ctx.set_stroke_style_str(&format!("rgba(184, 130, 46, {})", 0.35 * alpha));
			ctx.set_line_width(1.2);
		} else {
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.06 * alpha));
			ctx.set_line_width(0.5);
		}
		ctx.stroke();
	}
}

fn draw_nodes(state: &NetworkGraphState, ctx: &CanvasRenderingContext2d) {
	let alpha = state.alpha;

	for node in &state.graph.nodes {
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.radius, 0.0, 2.0 * PI);

		if node.is_ghost() {
			ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", 0.08 * alpha));
		} else if state.is_hovered(node.id) {
			ctx.set_shadow_color(GOLD);
			ctx.set_shadow_blur(18.0);
			ctx.set_fill_style_str(&format!("rgba(184, 130, 46, {})", 0.9 * alpha));
		} else if state.is_highlighted(node.id) {
			ctx.set_fill_style_str(&format!("rgba(184, 130, 46, {})", 0.5 * alpha));
		} else {
			ctx.set_fill_style_str(&format!("rgba(134, 35, 52, {})", 0.65 * alpha));
		}
		ctx.fill();

		ctx.set_shadow_color("transparent");
		ctx.set_shadow_blur(0.0);
	}
}
