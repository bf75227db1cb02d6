use rand::Rng;

use crate::profile::Profile;

/// Node radius when the directory has five profiles or fewer.
pub const SPARSE_RADIUS: f64 = 10.0;
/// Node radius for larger directories.
pub const DENSE_RADIUS: f64 = 6.0;
/// Radius of profile-less filler nodes.
pub const GHOST_RADIUS: f64 = 4.0;

const SPARSE_LIMIT: usize = 5;
const MIN_POPULATED: usize = 6;
const EMPTY_GHOSTS: usize = 10;

const REAL_JITTER: f64 = 0.3;
const GHOST_JITTER: f64 = 0.5;

/// A particle on the canvas. `profile` is `None` for ghosts.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Dense id, equal to the node's index in [`Graph::nodes`].
	pub id: usize,
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
	/// Horizontal velocity.
	pub vx: f64,
	/// Vertical velocity.
	pub vy: f64,
	/// Draw and hit radius.
	pub radius: f64,
	/// The profile this node stands for.
	pub profile: Option<Profile>,
}

impl GraphNode {
	/// Whether this node is filler.
	pub fn is_ghost(&self) -> bool {
		self.profile.is_none()
	}
}

/// Undirected link between two node ids, `source < target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphEdge {
	/// Lower node id.
	pub source: usize,
	/// Higher node id.
	pub target: usize,
}

/// Nodes and the edges between them.
///
/// Edges index straight into `nodes`, so nodes are never reordered or removed
/// once the graph is built. A changed profile list means a new graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	/// Real nodes first, then ghosts.
	pub nodes: Vec<GraphNode>,
	/// Links between real nodes.
	pub edges: Vec<GraphEdge>,
}

impl Graph {
	/// Lays out one node per profile around the canvas centre, links profiles
	/// that share a major or a class year, and pads sparse directories with
	/// ghosts.
	///
	/// Edge search compares every pair, which assumes a directory of at most a
	/// few hundred profiles.
	pub fn build(profiles: &[Profile], width: f64, height: f64, rng: &mut impl Rng) -> Self {
		let n = profiles.len();
		let radius = if n <= SPARSE_LIMIT {
			SPARSE_RADIUS
		} else {
			DENSE_RADIUS
		};

		let mut nodes: Vec<GraphNode> = profiles
			.iter()
			.enumerate()
			.map(|(id, profile)| {
				let (x, y) = jittered(width, height, REAL_JITTER, rng);
				GraphNode {
					id,
					x,
					y,
					vx: 0.0,
					vy: 0.0,
					radius,
					profile: Some(profile.clone()),
				}
			})
			.collect();

		let mut edges = Vec::new();
		for i in 0..n {
			for j in i + 1..n {
				if related(&profiles[i], &profiles[j]) {
					edges.push(GraphEdge {
						source: i,
						target: j,
					});
				}
			}
		}

		let ghosts = if n == 0 {
			EMPTY_GHOSTS
		} else {
			MIN_POPULATED.saturating_sub(n)
		};
		for _ in 0..ghosts {
			let (x, y) = jittered(width, height, GHOST_JITTER, rng);
			nodes.push(GraphNode {
				id: nodes.len(),
				x,
				y,
				vx: 0.0,
				vy: 0.0,
				radius: GHOST_RADIUS,
				profile: None,
			});
		}

		Self { nodes, edges }
	}

	/// Number of nodes that stand for a profile.
	pub fn real_count(&self) -> usize {
		self.nodes.iter().filter(|n| !n.is_ghost()).count()
	}

	/// Ids linked to `id`.
	pub fn neighbors(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
		self.edges.iter().filter_map(move |e| {
			if e.source == id {
				Some(e.target)
			} else if e.target == id {
				Some(e.source)
			} else {
				None
			}
		})
	}

	/// Closest node whose radius plus `slack` covers the point.
	pub fn node_at(&self, x: f64, y: f64, slack: f64) -> Option<&GraphNode> {
		self.nodes
			.iter()
			.map(|node| (node, (node.x - x).hypot(node.y - y)))
			.filter(|(node, dist)| *dist < node.radius + slack)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(node, _)| node)
	}
}

/// Canvas centre plus uniform jitter spanning `span` of each dimension.
fn jittered(width: f64, height: f64, span: f64, rng: &mut impl Rng) -> (f64, f64) {
	(
		width / 2.0 + rng.gen_range(-0.5_f64..0.5) * width * span,
		height / 2.0 + rng.gen_range(-0.5_f64..0.5) * height * span,
	)
}

fn related(a: &Profile, b: &Profile) -> bool {
	let (major_a, major_b) = (a.major.trim(), b.major.trim());
	let same_major = !major_a.is_empty() && major_a.to_lowercase() == major_b.to_lowercase();
	let (year_a, year_b) = (a.grad_year.trim(), b.grad_year.trim());
	let same_year = !year_a.is_empty() && year_a == year_b;
	same_major || same_year
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn profile(major: &str, year: &str) -> Profile {
		Profile {
			name: format!("{major} {year}"),
			major: major.into(),
			grad_year: year.into(),
			building: "things".into(),
			..Default::default()
		}
	}

	fn build(profiles: &[Profile]) -> Graph {
		Graph::build(profiles, 320.0, 260.0, &mut StdRng::seed_from_u64(7))
	}

	#[test]
	fn empty_directory_gets_ten_ghosts() {
		let graph = build(&[]);
		assert_eq!(graph.nodes.len(), 10);
		assert!(graph.edges.is_empty());
		assert!(graph.nodes.iter().all(|n| n.is_ghost() && n.radius == GHOST_RADIUS));
	}

	#[test]
	fn unrelated_profiles_are_padded_to_six() {
		let profiles = [
			profile("Art", "2025"),
			profile("Biology", "2026"),
			profile("Chemistry", "2027"),
		];
		let graph = build(&profiles);
		assert_eq!(graph.nodes.len(), 6);
		assert_eq!(graph.real_count(), 3);
		assert!(graph.edges.is_empty());
	}

	#[test]
	fn shared_major_links_case_insensitively() {
		let graph = build(&[profile("Computer Science", "2025"), profile("computer science", "2026")]);
		assert_eq!(graph.edges, vec![GraphEdge { source: 0, target: 1 }]);
	}

	#[test]
	fn shared_year_links_exactly() {
		let graph = build(&[
			profile("Art", "2026"),
			profile("Law", "2026"),
			profile("Music", "Class of 2026"),
		]);
		assert_eq!(graph.edges, vec![GraphEdge { source: 0, target: 1 }]);
	}

	#[test]
	fn blank_fields_never_link() {
		let graph = build(&[profile("", ""), profile("", "")]);
		assert!(graph.edges.is_empty());
	}

	#[test]
	fn ids_are_dense_indices() {
		let profiles: Vec<Profile> = (0..4).map(|i| profile("Math", &i.to_string())).collect();
		let graph = build(&profiles);
		for (idx, node) in graph.nodes.iter().enumerate() {
			assert_eq!(node.id, idx);
		}
		assert!(graph.nodes[..4].iter().all(|n| !n.is_ghost()));
		assert!(graph.nodes[4..].iter().all(GraphNode::is_ghost));
		assert!(graph
			.edges
			.iter()
			.all(|e| e.source < e.target && e.target < graph.nodes.len()));
	}

	#[test]
	fn radius_shrinks_for_dense_directories() {
		let five: Vec<Profile> = (0..5).map(|i| profile("A", &i.to_string())).collect();
		let six: Vec<Profile> = (0..6).map(|i| profile("B", &i.to_string())).collect();
		assert_eq!(build(&five).nodes[0].radius, SPARSE_RADIUS);
		let dense = build(&six);
		assert_eq!(dense.nodes.len(), 6);
		assert_eq!(dense.nodes[0].radius, DENSE_RADIUS);
	}

	#[test]
	fn initial_positions_stay_within_jitter() {
		let profiles: Vec<Profile> = (0..20).map(|i| profile("X", &i.to_string())).collect();
		let graph = build(&profiles);
		for node in &graph.nodes {
			assert!((node.x - 160.0).abs() <= 320.0 * 0.15);
			assert!((node.y - 130.0).abs() <= 260.0 * 0.15);
			assert_eq!((node.vx, node.vy), (0.0, 0.0));
		}
	}

	#[test]
	fn ghost_padding_stays_within_its_jitter() {
		let profiles = [profile("Math", "1"), profile("Art", "2")];
		for seed in 0..20 {
			let graph = Graph::build(&profiles, 320.0, 260.0, &mut StdRng::seed_from_u64(seed));
			let (real, ghosts) = graph.nodes.split_at(profiles.len());
			assert_eq!(ghosts.len(), 4);
			for node in real {
				assert_eq!(node.radius, SPARSE_RADIUS);
				assert!((node.x - 160.0).abs() <= 320.0 * 0.15);
				assert!((node.y - 130.0).abs() <= 260.0 * 0.15);
			}
			for node in ghosts {
				assert!(node.is_ghost());
				assert_eq!(node.radius, GHOST_RADIUS);
				assert!((node.x - 160.0).abs() <= 320.0 * 0.25);
				assert!((node.y - 130.0).abs() <= 260.0 * 0.25);
				assert_eq!((node.vx, node.vy), (0.0, 0.0));
			}
		}
	}

	#[test]
	fn neighbors_and_hit_testing() {
		let mut graph = build(&[profile("Math", "1"), profile("Math", "2"), profile("Art", "3")]);
		assert_eq!(graph.neighbors(0).collect::<Vec<_>>(), vec![1]);
		assert_eq!(graph.neighbors(2).count(), 0);

		graph.nodes[1].x = 50.0;
		graph.nodes[1].y = 50.0;
		assert_eq!(graph.node_at(55.0, 52.0, 12.0).map(|n| n.id), Some(1));
		assert!(graph.node_at(-500.0, -500.0, 12.0).is_none());
	}
}
