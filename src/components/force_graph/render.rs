//! Canvas rendering for the force graph.
//!
//! Immediate-mode: every frame is redrawn in full from the simulation's
//! authoritative positions, so the picture can never drift out of sync
//! with the data. Passes run in z-order: background, edge lines and
//! arrowheads, edge labels, nodes, node labels, selection ring.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::simulation::Body;
use super::state::GraphViewState;
use super::theme::Theme;

/// Renders the complete graph to the canvas.
pub fn render(
	state: &GraphViewState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
	selected: Option<&str>,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &scale, theme);
	draw_nodes(state, ctx, &scale, theme, selected);

	ctx.restore();
}

fn draw_background(state: &GraphViewState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	if theme.background.use_gradient {
		let gradient = ctx
			.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				(state.width.max(state.height)) * 0.8,
			)
			.unwrap();

		gradient
			.add_color_stop(0.0, &theme.background.color_secondary.to_css())
			.unwrap();
		gradient
			.add_color_stop(1.0, &theme.background.color.to_css())
			.unwrap();

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_edges(
	state: &GraphViewState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let bodies = state.sim.bodies();

	for link in state.sim.links() {
		let (n1, n2) = (&bodies[link.source], &bodies[link.target]);
		let (dx, dy) = (n2.x - n1.x, n2.y - n1.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		ctx.set_stroke_style_str(&theme.edge.color.to_css());
		ctx.set_line_width(scale.edge_line_width);

		ctx.begin_path();
		ctx.move_to(n1.x + ux * scale.node_radius, n1.y + uy * scale.node_radius);
		ctx.line_to(
			n2.x - ux * (scale.node_radius + scale.arrow_size),
			n2.y - uy * (scale.node_radius + scale.arrow_size),
		);
		ctx.stroke();

		if !scale.cull_arrows {
			draw_arrowhead(ctx, scale, theme, n2, ux, uy);
		}

		if !scale.cull_edge_labels && !link.label.is_empty() {
			let (mid_x, mid_y) = ((n1.x + n2.x) / 2.0, (n1.y + n2.y) / 2.0);
			ctx.set_fill_style_str(&theme.edge.label_color.to_css());
			ctx.set_font(&scale.edge_label_font);
			// Nudge the label off the line along its normal.
			let _ = ctx.fill_text(&link.label, mid_x - uy * 6.0, mid_y + ux * 6.0);
		}
	}
}

fn draw_arrowhead(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	target: &Body,
	ux: f64,
	uy: f64,
) {
	ctx.set_fill_style_str(&theme.edge.color.to_css());

	let (tip_x, tip_y) = (
		target.x - ux * scale.node_radius,
		target.y - uy * scale.node_radius,
	);
	let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
	let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);

	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(
	state: &GraphViewState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	selected: Option<&str>,
) {
	for (i, body) in state.sim.bodies().iter().enumerate() {
		let is_selected = selected == Some(body.id.as_str());
		let is_hovered = state.hovered.as_deref() == Some(body.id.as_str());
		let radius_mult = if is_hovered { 1.15 } else { 1.0 };

		draw_node(ctx, scale, theme, body, i, radius_mult);

		if is_selected {
			let radius = scale.node_radius * radius_mult;
			ctx.begin_path();
			let _ = ctx.arc(body.x, body.y, radius + scale.ring_offset, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&theme.selection.ring_color.with_alpha(0.9).to_css());
			ctx.set_line_width(scale.ring_width);
			ctx.stroke();
		}
	}
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	body: &Body,
	palette_index: usize,
	radius_mult: f64,
) {
	let (x, y) = (body.x, body.y);
	let radius = scale.node_radius * radius_mult;
	let base_color = theme.palette.get(palette_index);

	if theme.node.use_gradient {
		let gradient = ctx
			.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
			.unwrap();

		let highlight = base_color.lighten(0.4);
		let shadow = base_color.darken(0.2);

		gradient.add_color_stop(0.0, &highlight.to_css()).unwrap();
		gradient.add_color_stop(0.7, &base_color.to_css()).unwrap();
		gradient.add_color_stop(1.0, &shadow.to_css()).unwrap();

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.fill();
	} else {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&base_color.to_css());
		ctx.fill();
	}

	if theme.node.border_width > 0.0 {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&theme.node.border_color.to_css());
		ctx.set_line_width(theme.node.border_width / scale.k);
		ctx.stroke();
	}

	if !body.label.is_empty() {
		ctx.set_fill_style_str(&theme.node.label_color.to_css());
		ctx.set_font(&scale.label_font);
		let _ = ctx.fill_text(&body.label, x + radius + 4.0, y + 3.0);
	}
}
