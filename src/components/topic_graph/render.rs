use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::TopicGraphState;
use super::types::Category;

/// Fill color per category.
fn category_color(category: Category) -> &'static str {
	match category {
		Category::Central => "#d62728",
		Category::Cause => "#1f77b4",
		Category::Effect => "#2ca02c",
		Category::Trend => "#9467bd",
		Category::Context => "#7f7f7f",
	}
}

pub fn render(state: &TopicGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &TopicGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k, 6.0 / k, 4.0 / k, 8.0 / k);
	let (hw, hh) = (state.config.node_width / 2.0, state.config.node_height / 2.0);

	for scene_edge in &state.scene_edges {
		let child = &state.scene_nodes[scene_edge.from];
		let parent = &state.scene_nodes[scene_edge.to];
		let edge = &state.data.edges[scene_edge.edge];

		// Anchor at the facing box borders: child top, parent bottom.
		let (x1, y1) = (child.x, child.y - hh);
		let (x2, y2) = (parent.x, parent.y + hh);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		let alpha = 0.35 + 0.45 * edge.strength;
		ctx.set_stroke_style_str(&format!("rgba(100, 180, 255, {})", alpha));
		ctx.set_line_width(line_width);
		if edge.strength < 0.5 {
			// Weak links render dashed.
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
		}
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2 - ux * arrow_size, y2 - uy * arrow_size);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		// Arrowhead at the parent end.
		ctx.set_fill_style_str(&format!("rgba(100, 180, 255, {})", alpha));
		let (back_x, back_y) = (x2 - ux * arrow_size, y2 - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(x2, y2);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if !edge.relationship.is_empty() && k > 0.4 {
			let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
			ctx.set_fill_style_str("rgba(255, 255, 255, 0.55)");
			ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
			ctx.set_text_align("center");
			let _ = ctx.fill_text(&edge.relationship, mx, my - 4.0 / k);
		}
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &TopicGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (w, h) = (state.config.node_width, state.config.node_height);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for (i, scene) in state.scene_nodes.iter().enumerate() {
		let node = &state.data.nodes[scene.node];
		let (left, top) = (scene.x - w / 2.0, scene.y - h / 2.0);
		let hovered = state.hover == Some(i);

		ctx.set_fill_style_str(category_color(node.category));
		ctx.fill_rect(left, top, w, h);

		// Impact accent along the left edge: green above zero, red below.
		if node.impact != 0.0 {
			let accent = if node.impact > 0.0 {
				"rgba(80, 220, 120, 0.9)"
			} else {
				"rgba(240, 80, 80, 0.9)"
			};
			ctx.set_fill_style_str(accent);
			ctx.fill_rect(left, top, 5.0, h);
		}

		let (border_alpha, border_width) = if hovered { (0.95, 2.5 / k) } else { (0.4, 1.5 / k) };
		ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", border_alpha));
		ctx.set_line_width(border_width);
		ctx.stroke_rect(left, top, w, h);

		ctx.set_fill_style_str("white");
		ctx.set_font("13px sans-serif");
		let _ = ctx.fill_text_with_max_width(&node.label, scene.x, scene.y, w - 16.0);

		if scene.has_children {
			draw_expand_marker(ctx, scene.x, top + h, scene.is_expanded, k);
		}
	}
}

/// Small +/− badge on the bottom border of expandable nodes.
fn draw_expand_marker(
	ctx: &CanvasRenderingContext2d,
	x: f64,
	y: f64,
	expanded: bool,
	k: f64,
) {
	let r = 8.0;
	ctx.set_fill_style_str("#1a1a2e");
	ctx.begin_path();
	let _ = ctx.arc(x, y, r, 0.0, 2.0 * std::f64::consts::PI);
	ctx.fill();
	ctx.set_stroke_style_str("rgba(255, 255, 255, 0.8)");
	ctx.set_line_width(1.5 / k);
	ctx.stroke();

	ctx.begin_path();
	ctx.move_to(x - r * 0.5, y);
	ctx.line_to(x + r * 0.5, y);
	if !expanded {
		ctx.move_to(x, y - r * 0.5);
		ctx.line_to(x, y + r * 0.5);
	}
	ctx.stroke();
}
