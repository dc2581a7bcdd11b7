use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::network::icons::{self, Glyph, Shape};
use crate::network::layout::LayoutState;

const BACKGROUND: &str = "#000000";
const FALLBACK_RADIUS: f64 = 6.0;

pub fn render(state: &LayoutState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &LayoutState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (dash, gap) = (8.0 / k, 4.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);

	ctx.set_stroke_style_str("rgba(0, 255, 0, 0.6)");
	ctx.set_line_width(1.5 / k);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(dash),
		&JsValue::from_f64(gap),
	));
	ctx.set_line_dash_offset(dash_offset);
	state.graph.visit_edges(|n1, n2, _| {
		ctx.begin_path();
		ctx.move_to(n1.x() as f64, n1.y() as f64);
		ctx.line_to(n2.x() as f64, n2.y() as f64);
		ctx.stroke();
	});
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_glyph(ctx: &CanvasRenderingContext2d, glyph: &Glyph, x: f64, y: f64) {
	let (ox, oy) = (x - glyph.width / 2.0, y - glyph.height / 2.0);
	for shape in &glyph.shapes {
		match shape {
			Shape::Rect { x, y, w, h, color } => {
				ctx.set_fill_style_str(color);
				ctx.fill_rect(ox + x, oy + y, *w, *h);
			}
			Shape::Circle { x, y, r, color } => {
				ctx.set_fill_style_str(color);
				ctx.begin_path();
				let _ = ctx.arc(ox + x, oy + y, *r, 0.0, 2.0 * PI);
				ctx.fill();
			}
		}
	}
}

fn draw_nodes(state: &LayoutState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	state.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		let info = &node.data.user_data;
		let half_height = match icons::render(&info.kind, info.color) {
			Some(glyph) => {
				draw_glyph(ctx, &glyph, x, y);
				glyph.height / 2.0
			}
			// unknown types still need something to click on
			None => {
				ctx.begin_path();
				let _ = ctx.arc(x, y, FALLBACK_RADIUS, 0.0, 2.0 * PI);
				ctx.set_fill_style_str(info.color);
				ctx.fill();
				FALLBACK_RADIUS
			}
		};

		ctx.set_fill_style_str(info.color);
		ctx.set_font(&format!("{}px monospace", 12.0 / k.max(0.5)));
		ctx.set_text_align("center");
		let _ = ctx.fill_text(&info.label, x, y + half_height + 14.0);
	});
}
