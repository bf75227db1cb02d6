use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::graph::Graph;
use super::simulation::SimulationParameters;
use crate::profile::Profile;

/// Extra hit distance around a node's radius for hover.
pub const HOVER_SLACK: f64 = 12.0;
/// Past this many profiles only the hovered node's edges are drawn.
pub const BUSY_GRAPH: usize = 50;

// keeps the tooltip card from running off the right edge
const TOOLTIP_WIDTH: f64 = 60.0;

const FADE_STEP: f64 = 0.012;
// fade in anyway if the layout is still busy after this many frames
const WARMUP_FRAMES: u32 = 90;

/// Hover card content, in canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	pub name: String,
	pub major: String,
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub neighbors: HashSet<usize>,
}

pub struct NetworkGraphState {
	pub graph: Graph,
	pub params: SimulationParameters,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	/// 0..1 fade-in progress.
	pub alpha: f64,
	pub profile_count: usize,
	settled: bool,
	frames: u32,
	rng: StdRng,
}

impl NetworkGraphState {
	pub fn new(profiles: &[Profile], width: f64, height: f64) -> Self {
		Self::with_rng(profiles, width, height, StdRng::from_entropy())
	}

	pub fn with_rng(profiles: &[Profile], width: f64, height: f64, mut rng: StdRng) -> Self {
		let graph = Graph::build(profiles, width, height, &mut rng);
		log::debug!(
			"network graph built: {} nodes, {} edges",
			graph.nodes.len(),
			graph.edges.len()
		);
		Self {
			graph,
			params: SimulationParameters::default(),
			hover: HoverState::default(),
			width,
			height,
			alpha: 0.0,
			profile_count: profiles.len(),
			settled: false,
			frames: 0,
			rng,
		}
	}

	/// One animation frame: physics, then fade-in progress.
	pub fn tick(&mut self) {
		let settled = self
			.graph
			.tick(&self.params, self.width, self.height, &mut self.rng);
		self.settled |= settled;
		self.frames = self.frames.saturating_add(1);

		if (self.settled || self.frames >= WARMUP_FRAMES) && self.alpha < 1.0 {
			self.alpha = (self.alpha + FADE_STEP).min(1.0);
		}
	}

	/// Updates hover from a canvas-space pointer position and returns the
	/// tooltip for the hovered profile, if any.
	pub fn hover_at(&mut self, x: f64, y: f64) -> Option<Tooltip> {
		let hit = self
			.graph
			.node_at(x, y, HOVER_SLACK)
			.map(|node| (node.id, node.profile.clone(), node.x, node.y));
		match hit {
			Some((id, profile, nx, ny)) => {
				self.set_hover(Some(id));
				profile.map(|p| Tooltip {
					name: p.name,
					major: p.major,
					x: nx.min((self.width - TOOLTIP_WIDTH).max(0.0)),
					y: ny,
				})
			}
			None => {
				self.set_hover(None);
				None
			}
		}
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;
		self.hover.neighbors = node
			.map(|id| self.graph.neighbors(id).collect())
			.unwrap_or_default();
	}

	pub fn is_hovered(&self, id: usize) -> bool {
		self.hover.node == Some(id)
	}

	/// Hovered node or one of its neighbours.
	pub fn is_highlighted(&self, id: usize) -> bool {
		self.is_hovered(id) || self.hover.neighbors.contains(&id)
	}

	pub fn is_busy(&self) -> bool {
		self.profile_count > BUSY_GRAPH
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn profiles() -> Vec<Profile> {
		["cs", "cs", "art"]
			.iter()
			.enumerate()
			.map(|(i, major)| Profile {
				name: format!("builder {i}"),
				major: major.to_string(),
				grad_year: format!("{}", 2025 + i),
				building: "things".into(),
				..Default::default()
			})
			.collect()
	}

	fn state() -> NetworkGraphState {
		NetworkGraphState::with_rng(&profiles(), 320.0, 260.0, StdRng::seed_from_u64(9))
	}

	#[test]
	fn fade_waits_for_settle_or_warmup() {
		let mut state = state();
		state.tick();
		if !state.settled {
			assert_eq!(state.alpha, 0.0);
		}
		for _ in 0..WARMUP_FRAMES + 200 {
			state.tick();
		}
		assert_eq!(state.alpha, 1.0);
	}

	#[test]
	fn hovering_a_profile_highlights_neighbors() {
		let mut state = state();
		let (x, y) = (state.graph.nodes[0].x, state.graph.nodes[0].y);
		let tooltip = state.hover_at(x, y);
		// pointer sits exactly on node 0
		assert_eq!(tooltip.map(|t| t.name), Some("builder 0".to_string()));
		assert!(state.is_hovered(0));
		assert!(state.is_highlighted(1));
		assert!(!state.is_highlighted(2));

		assert!(state.hover_at(-1000.0, -1000.0).is_none());
		assert!(state.hover.node.is_none());
		assert!(state.hover.neighbors.is_empty());
	}

	#[test]
	fn ghosts_hover_without_tooltip() {
		let mut state = NetworkGraphState::with_rng(&[], 320.0, 260.0, StdRng::seed_from_u64(1));
		let (x, y) = (state.graph.nodes[4].x, state.graph.nodes[4].y);
		assert!(state.hover_at(x, y).is_none());
		assert!(state.hover.node.is_some());
	}
}
