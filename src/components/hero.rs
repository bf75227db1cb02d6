use std::time::Duration;

use leptos::prelude::*;
use leptos_router::components::A;

use super::ascii_mountains::AsciiMountains;
use super::network_graph::NetworkGraph;
use crate::SCHOOL;
use crate::profile::Profile;

/// Milliseconds per typed character.
pub const CHAR_DELAY_MS: u64 = 38;
// pause after a finished line, in character ticks (about 180ms)
const LINE_GAP_TICKS: u32 = 5;

/// Headline typed out one character per tick, line after line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingSequence {
	lines: Vec<String>,
	line: usize,
	chars: usize,
	pause: u32,
	done: bool,
}

impl TypingSequence {
	pub fn new(lines: Vec<String>) -> Self {
		let done = lines.is_empty();
		Self {
			lines,
			line: 0,
			chars: 0,
			pause: 0,
			done,
		}
	}

	/// Advances one tick. `false` once everything is typed.
	pub fn tick(&mut self) -> bool {
		if self.done {
			return false;
		}
		let Some(current) = self.lines.get(self.line) else {
			self.done = true;
			return false;
		};
		if self.chars < current.chars().count() {
			self.chars += 1;
			return true;
		}
		if self.line + 1 < self.lines.len() {
			if self.pause < LINE_GAP_TICKS {
				self.pause += 1;
			} else {
				self.pause = 0;
				self.line += 1;
				self.chars = 0;
			}
			return true;
		}
		self.done = true;
		false
	}

	/// Skips to the end.
	pub fn finish(&mut self) {
		self.done = true;
	}

	pub fn is_done(&self) -> bool {
		self.done
	}

	/// Text shown for line `i`, `None` until typing reaches it.
	pub fn visible(&self, i: usize) -> Option<String> {
		let line = self.lines.get(i)?;
		if self.done || i < self.line {
			Some(line.clone())
		} else if i == self.line {
			Some(line.chars().take(self.chars).collect())
		} else {
			None
		}
	}
}

/// Typed headline, then the blurb and links; the mountains and the network
/// graph sit to the right.
#[component]
pub fn Hero(
	#[prop(into)] profiles: Signal<Vec<Profile>>,
	#[prop(into)] loaded: Signal<bool>,
) -> impl IntoView {
	let typing = RwSignal::new(TypingSequence::new(vec![
		format!("// {SCHOOL}"),
		"find the builders".into(),
		"at your school.".into(),
	]));
	let done = Memo::new(move |_| typing.with(TypingSequence::is_done));

	let ticker = StoredValue::new(None::<IntervalHandle>);
	match set_interval_with_handle(
		move || {
			let typing_on = typing.try_update(TypingSequence::tick).unwrap_or(false);
			if !typing_on {
				if let Some(handle) = ticker.try_get_value().flatten() {
					handle.clear();
				}
			}
		},
		Duration::from_millis(CHAR_DELAY_MS),
	) {
		Ok(handle) => {
			ticker.set_value(Some(handle));
			on_cleanup(move || handle.clear());
		}
		Err(err) => {
			log::warn!("typing animation unavailable: {err:?}");
			typing.update(TypingSequence::finish);
		}
	}

	let line = move |i: usize, class: &'static str| {
		move || {
			typing
				.with(|t| t.visible(i))
				.map(|text| view! { <p class=class>{text}</p> })
		}
	};

	view! {
		<section class="hero">
			<div class="hero-copy">
				{line(0, "eyebrow")}
				{line(1, "hero-title")}
				{line(2, "hero-title dim")}
				<Show when=move || done.get()>
					<div class="hero-reveal">
						<p class="hero-blurb">
							"a directory of students shipping startups, research, projects, and open source work."
						</p>
						<div class="hero-actions">
							<A href="/join" attr:class="accent-link">
								"add your profile →"
							</A>
							<a href="#directory" class="muted-link">
								"browse"
							</a>
						</div>
					</div>
				</Show>
			</div>
			<div class="hero-art">
				<AsciiMountains visible=done />
				<NetworkGraph profiles=profiles visible=loaded class="hero-graph" />
			</div>
		</section>
	}
}
