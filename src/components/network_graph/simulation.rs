//! One-step particle physics for the network graph.
//!
//! Forces are applied to velocities in a fixed order (centre gravity,
//! repulsion, springs, drift) before damping and integration, so a seeded
//! run always lands on the same positions.

use rand::Rng;

use super::graph::Graph;

/// Force constants. [`Default`] gives the tuned values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParameters {
	/// Pull towards the canvas centre, per unit of offset.
	pub center_gravity: f64,
	/// Pairwise repulsion numerator.
	pub repulsion: f64,
	/// Spring stiffness along edges.
	pub spring_stiffness: f64,
	/// Edge length at which a spring exerts no force.
	pub spring_rest_length: f64,
	/// Amplitude of the random ambient drift.
	pub drift: f64,
	/// Velocity multiplier applied every tick.
	pub damping: f64,
	/// Distance kept clear between nodes and the canvas border.
	pub padding: f64,
	/// Mean speed below which the layout counts as settled.
	pub settle_threshold: f64,
}

impl Default for SimulationParameters {
	fn default() -> Self {
		Self {
			center_gravity: 0.0003,
			repulsion: 800.0,
			spring_stiffness: 0.0004,
			spring_rest_length: 80.0,
			drift: 0.02,
			damping: 0.92,
			padding: 30.0,
			settle_threshold: 0.1,
		}
	}
}

impl Graph {
	/// Advances every node by one frame and reports whether the layout has
	/// roughly settled.
	///
	/// Drift never stops, so "settled" only means the mean `|vx| + |vy|` has
	/// dropped under the threshold. Repulsion is quadratic in the node count.
	pub fn tick(
		&mut self,
		params: &SimulationParameters,
		width: f64,
		height: f64,
		rng: &mut impl Rng,
	) -> bool {
		let n = self.nodes.len();
		if n == 0 {
			return true;
		}

		let (cx, cy) = (width / 2.0, height / 2.0);
		for node in &mut self.nodes {
			node.vx += (cx - node.x) * params.center_gravity;
			node.vy += (cy - node.y) * params.center_gravity;
		}

		for i in 0..n {
			for j in i + 1..n {
				let (head, tail) = self.nodes.split_at_mut(j);
				let (a, b) = (&mut head[i], &mut tail[0]);
				let (dx, dy) = (a.x - b.x, a.y - b.y);
				// +1 keeps coincident nodes finite
				let force = params.repulsion / (dx * dx + dy * dy + 1.0);
				let (fx, fy) = (dx * force, dy * force);
				a.vx += fx;
				a.vy += fy;
				b.vx -= fx;
				b.vy -= fy;
			}
		}

		for edge in &self.edges {
			let (a, b) = (&self.nodes[edge.source], &self.nodes[edge.target]);
			let (dx, dy) = (b.x - a.x, b.y - a.y);
			let dist = (dx * dx + dy * dy).sqrt();
			let dist = if dist > 0.0 { dist } else { 1.0 };
			let force = (dist - params.spring_rest_length) * params.spring_stiffness;
			let (fx, fy) = (dx / dist * force, dy / dist * force);

			let a = &mut self.nodes[edge.source];
			a.vx += fx;
			a.vy += fy;
			let b = &mut self.nodes[edge.target];
			b.vx -= fx;
			b.vy -= fy;
		}

		for node in &mut self.nodes {
			node.vx += rng.gen_range(-0.5_f64..0.5) * params.drift;
			node.vy += rng.gen_range(-0.5_f64..0.5) * params.drift;
		}

		let pad = params.padding;
		let mut motion = 0.0;
		for node in &mut self.nodes {
			node.vx *= params.damping;
			node.vy *= params.damping;
			node.x += node.vx;
			node.y += node.vy;
			// max(min(..)) rather than clamp: a canvas narrower than 2 * pad pins to pad
			node.x = node.x.min(width - pad).max(pad);
			node.y = node.y.min(height - pad).max(pad);
			motion += node.vx.abs() + node.vy.abs();
		}

		motion / (n as f64) < params.settle_threshold
	}
}
