use leptos::prelude::*;

use super::profile_card::ProfileCard;
use crate::directory::{DirectoryFilter, major_options, summary_label, year_options};
use crate::profile::Profile;

// quick-filter chips shown per row before the list is cut off
const MAX_MAJOR_CHIPS: usize = 8;

/// Search box, class-year and major chips, and the card grid.
#[component]
pub fn Directory(#[prop(into)] profiles: Signal<Vec<Profile>>) -> impl IntoView {
	let query = RwSignal::new(String::new());
	let year = RwSignal::new(None::<String>);
	let major = RwSignal::new(None::<String>);

	let filter = Memo::new(move |_| DirectoryFilter {
		query: query.get(),
		year: year.get(),
		major: major.get(),
	});
	let filtered = Memo::new(move |_| filter.get().apply(&profiles.get()));
	let years = Memo::new(move |_| profiles.with(|p| year_options(p)));
	let majors = Memo::new(move |_| {
		profiles.with(|p| {
			let mut majors = major_options(p);
			majors.truncate(MAX_MAJOR_CHIPS);
			majors
		})
	});

	let clear = move |_| {
		query.set(String::new());
		year.set(None);
		major.set(None);
	};

	view! {
		<div class="directory">
			<div class="directory-search">
				<span class="muted">"search_"</span>
				<input
					type="text"
					placeholder="name, major, or what they're building"
					prop:value=move || query.get()
					on:input=move |ev| query.set(event_target_value(&ev))
				/>
			</div>

			<div class="directory-chips">
				{move || {
					years
						.get()
						.into_iter()
						.map(|y| chip(y, year))
						.collect_view()
				}}
			</div>
			<div class="directory-chips">
				{move || {
					majors
						.get()
						.into_iter()
						.map(|m| chip(m, major))
						.collect_view()
				}}
			</div>

			<p class="directory-count">
				<span class="muted">"// "</span>
				{move || summary_label(filtered.get().len())}
				<Show when=move || filter.get().is_active()>
					{move || {
						let q = query.get();
						(!q.trim().is_empty()).then(|| format!(" matching \"{q}\""))
					}}
					<button class="link-button muted" on:click=clear>
						"[clear]"
					</button>
				</Show>
			</p>

			<Show
				when=move || !filtered.get().is_empty()
				fallback=|| view! { <p class="directory-empty">"no results."</p> }
			>
				<div class="directory-grid">
					{move || {
						filtered
							.get()
							.into_iter()
							.map(|profile| view! { <ProfileCard profile=profile /> })
							.collect_view()
					}}
				</div>
			</Show>
		</div>
	}
}

/// Toggle chip: selecting the active value clears it.
fn chip(value: String, selected: RwSignal<Option<String>>) -> impl IntoView {
	let label = value.clone();
	let is_selected = {
		let value = value.clone();
		move || selected.with(|s| s.as_deref() == Some(value.as_str()))
	};
	view! {
		<button
			class="chip"
			class:selected=is_selected
			on:click=move |_| {
				selected
					.update(|s| {
						*s = if s.as_deref() == Some(value.as_str()) {
							None
						} else {
							Some(value.clone())
						};
					})
			}
		>
			{label}
		</button>
	}
}
