use leptos::prelude::*;

const CRIMSON: &str = "#862334";
const STONE: &str = "#a0a0a0";
const GOLD: &str = "#b8822e";

/// Gold peaks, stone body, crimson base. Each row has its colour and peak
/// opacity.
const MOUNTAIN: [(&str, &str, f64); 12] = [
	(r"                *                ", GOLD, 0.30),
	(r"               / \               ", GOLD, 0.26),
	(r"         *    /   \    *         ", GOLD, 0.22),
	(r"        / \  /     \  / \        ", STONE, 0.16),
	(r"       /   \/   *   \/   \       ", STONE, 0.18),
	(r"      /    /\  / \  /\    \      ", STONE, 0.20),
	(r"     /    /  \/   \/  \    \     ", STONE, 0.22),
	(r"    /    /   /\   /\   \    \    ", STONE, 0.24),
	(r"   /    /   /  \ /  \   \    \   ", CRIMSON, 0.30),
	(r"  /    /   /    X    \   \    \  ", CRIMSON, 0.36),
	(r" /    /   /    / \    \   \    \ ", CRIMSON, 0.42),
	(r"/____/   /____/   \____\   \____\", CRIMSON, 0.50),
];

/// Where a character flies in from, and when.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
	pub ch: char,
	/// Scatter offset in px.
	pub dx: f64,
	pub dy: f64,
	/// Scatter rotation in degrees.
	pub rotate: f64,
	/// Seconds before this character's cycle starts.
	pub delay: f64,
}

// stable pseudo-random in [0, 1) per seed
fn scatter(seed: f64) -> f64 {
	let x = (seed * 9301.0 + 49297.0).sin() * 233280.0;
	x - x.floor()
}

/// The bottom-left character assembles first.
pub fn glyph(row: usize, col: usize, ch: char) -> Glyph {
	let seed = (row * 100 + col) as f64;
	Glyph {
		ch,
		dx: (scatter(seed) - 0.5) * 80.0,
		dy: (scatter(seed + 500.0) - 0.5) * 60.0,
		rotate: (scatter(seed + 1000.0) - 0.5) * 120.0,
		delay: (MOUNTAIN.len() - 1 - row) as f64 * 0.06 + col as f64 * 0.008,
	}
}

/// ASCII mountain range that assembles from scattered characters and drifts
/// apart again, on a loop, while `visible`. Desktop widths only.
#[component]
pub fn AsciiMountains(#[prop(into)] visible: Signal<bool>) -> impl IntoView {
	let rows = MOUNTAIN
		.iter()
		.enumerate()
		.map(|(row, (text, color, peak))| {
			let glyphs = text
				.chars()
				.enumerate()
				.map(|(col, ch)| {
					if ch == ' ' {
						return view! { <span class="glyph space">"\u{a0}"</span> }.into_any();
					}
					let g = glyph(row, col, ch);
					let style = format!(
						"--dx: {:.1}px; --dy: {:.1}px; --rot: {:.1}deg; --peak: {peak}; --delay: {:.3}s; color: {color}; text-shadow: 0 0 10px {color};",
						g.dx, g.dy, g.rotate, g.delay,
					);
					view! { <span class="glyph" style=style>{g.ch.to_string()}</span> }.into_any()
				})
				.collect_view();
			view! { <div class="mountain-row">{glyphs}</div> }
		})
		.collect_view();

	view! {
		<div class="mountains" class:assembling=move || visible.get() aria-hidden="true">
			{rows}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rows_line_up() {
		let width = MOUNTAIN[0].0.chars().count();
		assert!(MOUNTAIN.iter().all(|(text, _, _)| text.chars().count() == width));
	}

	#[test]
	fn bottom_left_goes_first() {
		let last = MOUNTAIN.len() - 1;
		assert_eq!(glyph(last, 0, '/').delay, 0.0);
		assert!(glyph(0, 16, '*').delay > glyph(last, 32, '\\').delay);
	}

	#[test]
	fn scatter_is_stable_and_bounded() {
		for row in 0..MOUNTAIN.len() {
			for col in 0..33 {
				let g = glyph(row, col, '/');
				assert_eq!(g, glyph(row, col, '/'));
				assert!(g.dx.abs() <= 40.0 && g.dy.abs() <= 30.0 && g.rotate.abs() <= 60.0);
			}
		}
	}
}
